use sqlx::PgPool;

use crate::{
    model::permission_type::PermissionType,
    repository::permission_type::get_all_permission_type,
};

pub async fn list_permission_type(pool: &PgPool) -> anyhow::Result<Vec<PermissionType>> {
    let mut tx = pool.begin().await?;
    let data = get_all_permission_type(&mut tx).await?;
    tx.commit().await?;
    Ok(data)
}

pub fn format_permission_type(data: &[PermissionType]) -> String {
    data.iter()
        .map(|x| format!("{:>3}  {}", x.id, x.description))
        .collect::<Vec<String>>()
        .join("\n")
}
