use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

pub const TABLE_NAME: &str = "public.permission";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, FromRow)]
pub struct Permission {
    pub id: i32,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub permission_type_id: i32,
    pub permission_date: DateTime<FixedOffset>,
}

/// A permission row left-joined with its type. `permission_type_description`
/// is `None` when the type reference does not resolve.
#[derive(Clone, Debug, PartialEq, Deserialize, FromRow)]
pub struct PermissionDetail {
    pub id: i32,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub permission_type_id: i32,
    pub permission_type_description: Option<String>,
    pub permission_date: DateTime<FixedOffset>,
}
