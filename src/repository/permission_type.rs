use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder},
    model::permission_type::{PermissionType, TABLE_NAME},
};

pub async fn get_all_permission_type(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<PermissionType>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &[],
        vec!["id ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<PermissionType>(&stmt, vec![]);
    let data = q.fetch_all(&mut **tx).await?;
    Ok(data)
}
