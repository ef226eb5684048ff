use std::future::Future;

use anyhow::Context;
use r2d2::Pool as r2d2Pool;
use redis::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{core::utils::datetime_to_string, model::permission::Permission};

/// Denormalized copy of a permission as stored in the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionDocument {
    pub id: i32,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub permission_type_id: i32,
    pub permission_date: String,
}

impl From<&Permission> for PermissionDocument {
    fn from(permission: &Permission) -> Self {
        Self {
            id: permission.id,
            employee_first_name: permission.employee_first_name.clone(),
            employee_last_name: permission.employee_last_name.clone(),
            permission_type_id: permission.permission_type_id,
            permission_date: datetime_to_string(permission.permission_date),
        }
    }
}

pub fn document_key(index: &str, id: i32) -> String {
    format!("{}:{}", index, id)
}

pub trait SearchIndexer: Send + Sync {
    fn index_permission(
        &self,
        permission: &Permission,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Keeps one JSON document per permission under `<index>:<id>`.
/// Re-indexing the same id overwrites the previous document.
#[derive(Clone)]
pub struct RedisSearchIndexer {
    redis_conn: r2d2Pool<Client>,
    index: String,
}

impl RedisSearchIndexer {
    pub fn new(redis_conn: r2d2Pool<Client>, index: &str) -> Self {
        Self {
            redis_conn,
            index: index.to_string(),
        }
    }

    pub fn get_document(&self, id: i32) -> anyhow::Result<Option<PermissionDocument>> {
        let mut conn = self.redis_conn.get()?;
        let res: Option<String> = redis::cmd("GET")
            .arg(document_key(&self.index, id))
            .query(&mut *conn)?;
        match res {
            Some(val) => Ok(Some(serde_json::from_str(&val)?)),
            None => Ok(None),
        }
    }
}

impl SearchIndexer for RedisSearchIndexer {
    async fn index_permission(&self, permission: &Permission) -> anyhow::Result<()> {
        let document = PermissionDocument::from(permission);
        let document_json = serde_json::to_string(&document)?;
        let key = document_key(&self.index, permission.id);
        let mut conn = self
            .redis_conn
            .get()
            .context("get redis pool connection")?;
        redis::cmd("SET")
            .arg(&key)
            .arg(document_json)
            .exec(&mut *conn)
            .with_context(|| format!("index document {}", key))?;
        debug!(%key, "permission indexed");
        Ok(())
    }
}
