use serde::Deserialize;
use sqlx::prelude::FromRow;

pub const TABLE_NAME: &str = "public.permission_type";

/// Lookup rows inserted by the initial migration.
pub const SEEDED_PERMISSION_TYPES: [(i32, &str); 5] = [
    (1, "Vacaciones"),
    (2, "Licencia médica"),
    (3, "Permiso personal"),
    (4, "Día libre"),
    (5, "Trabajo remoto"),
];

#[derive(Clone, Debug, PartialEq, Deserialize, FromRow)]
pub struct PermissionType {
    pub id: i32,
    pub description: String,
}
