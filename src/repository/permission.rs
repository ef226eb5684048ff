use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::{
        permission::{Permission, PermissionDetail, TABLE_NAME},
        permission_type::TABLE_NAME as PERMISSION_TYPE_TABLE_NAME,
    },
};

use super::PermissionStore;

pub async fn get_permission_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<Option<Permission>> {
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Int(id)];
    let filters: Vec<String> = vec!["id = $1".to_string()];
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let q = binds_query_as::<Permission>(&stmt, binds);
    let data = q.fetch_optional(&mut **tx).await?;
    Ok(data)
}

pub async fn get_all_permission(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<PermissionDetail>> {
    let stmt = query_builder(
        Some(
            "p.id, p.employee_first_name, p.employee_last_name, p.permission_type_id, \
            pt.description AS permission_type_description, p.permission_date"
                .to_string(),
        ),
        format!(
            "{} p LEFT JOIN {} pt ON pt.id = p.permission_type_id",
            TABLE_NAME, PERMISSION_TYPE_TABLE_NAME
        )
        .as_str(),
        &[],
        vec!["p.id ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<PermissionDetail>(&stmt, vec![]);
    let data = q.fetch_all(&mut **tx).await?;
    Ok(data)
}

pub async fn create_permission(
    tx: &mut Transaction<'_, Postgres>,
    employee_first_name: String,
    employee_last_name: String,
    permission_type_id: i32,
    permission_date: DateTime<FixedOffset>,
) -> anyhow::Result<Permission> {
    let (id,): (i32,) = sqlx::query_as(
        format!(
            r#"
    INSERT INTO {} (employee_first_name, employee_last_name, permission_type_id, permission_date)
    VALUES ($1, $2, $3, $4)
    RETURNING id"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&employee_first_name)
    .bind(&employee_last_name)
    .bind(permission_type_id)
    .bind(permission_date)
    .fetch_one(&mut **tx)
    .await?;
    Ok(Permission {
        id,
        employee_first_name,
        employee_last_name,
        permission_type_id,
        permission_date,
    })
}

pub async fn update_permission(
    tx: &mut Transaction<'_, Postgres>,
    permission: &Permission,
) -> anyhow::Result<u64> {
    let res = sqlx::query(
        format!(
            r#"
        UPDATE {}
        SET employee_first_name = $1, employee_last_name = $2, permission_type_id = $3,
        permission_date = $4
        WHERE id = $5"#,
            TABLE_NAME
        )
        .as_str(),
    )
    .bind(&permission.employee_first_name)
    .bind(&permission.employee_last_name)
    .bind(permission.permission_type_id)
    .bind(permission.permission_date)
    .bind(permission.id)
    .execute(&mut **tx)
    .await?;
    Ok(res.rows_affected())
}

/// Postgres-backed [`PermissionStore`]. A transaction is begun on first use
/// and closed by `commit`; dropping the store without committing rolls back.
pub struct PgPermissionStore {
    db: Pool<Postgres>,
    tx: Option<Transaction<'static, Postgres>>,
    pending: u64,
}

impl PgPermissionStore {
    pub fn new(db: Pool<Postgres>) -> Self {
        Self {
            db,
            tx: None,
            pending: 0,
        }
    }

    async fn transaction(&mut self) -> anyhow::Result<&mut Transaction<'static, Postgres>> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.db.begin().await.context("begin transaction")?,
        };
        Ok(self.tx.insert(tx))
    }
}

impl PermissionStore for PgPermissionStore {
    async fn get_by_id(&mut self, id: i32) -> anyhow::Result<Option<Permission>> {
        let tx = self.transaction().await?;
        get_permission_by_id(tx, id).await
    }

    async fn get_all(&mut self) -> anyhow::Result<Vec<PermissionDetail>> {
        let tx = self.transaction().await?;
        get_all_permission(tx).await
    }

    async fn add(&mut self, permission: &mut Permission) -> anyhow::Result<()> {
        let tx = self.transaction().await?;
        let new_permission = create_permission(
            tx,
            permission.employee_first_name.clone(),
            permission.employee_last_name.clone(),
            permission.permission_type_id,
            permission.permission_date,
        )
        .await
        .context("insert permission")?;
        permission.id = new_permission.id;
        self.pending += 1;
        Ok(())
    }

    async fn update(&mut self, permission: &Permission) -> anyhow::Result<()> {
        let tx = self.transaction().await?;
        let updated = update_permission(tx, permission)
            .await
            .with_context(|| format!("update permission {}", permission.id))?;
        self.pending += updated;
        Ok(())
    }

    async fn commit(&mut self) -> anyhow::Result<u64> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await.context("commit transaction")?;
        }
        let count = self.pending;
        self.pending = 0;
        Ok(count)
    }
}
