//! Write pipeline and read path for permissions.
//!
//! Writes go to the store first and are committed before the search index and
//! the event log are touched. Index and publish run once each, in that order,
//! with no retry: if either fails the error is returned to the caller while
//! the committed record stays in the store.

use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::{
    core::{
        event::{EventPublisher, Operation},
        search::SearchIndexer,
    },
    model::permission::{Permission, PermissionDetail},
    repository::PermissionStore,
};

/// The four caller-supplied fields of a permission.
#[derive(Clone, Debug)]
pub struct PermissionInput {
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub permission_type_id: i32,
    pub permission_date: DateTime<FixedOffset>,
}

/// A permission as listed to clients. Unresolved types read as `""`.
#[derive(Clone, Debug, PartialEq)]
pub struct PermissionSummary {
    pub id: i32,
    pub employee_first_name: String,
    pub employee_last_name: String,
    pub permission_type_id: i32,
    pub permission_type_description: String,
    pub permission_date: DateTime<FixedOffset>,
}

impl From<PermissionDetail> for PermissionSummary {
    fn from(value: PermissionDetail) -> Self {
        Self {
            id: value.id,
            employee_first_name: value.employee_first_name,
            employee_last_name: value.employee_last_name,
            permission_type_id: value.permission_type_id,
            permission_type_description: value.permission_type_description.unwrap_or_default(),
            permission_date: value.permission_date,
        }
    }
}

pub struct PermissionService<S, I, P> {
    store: S,
    indexer: I,
    publisher: P,
}

impl<S, I, P> PermissionService<S, I, P>
where
    S: PermissionStore,
    I: SearchIndexer,
    P: EventPublisher,
{
    pub fn new(store: S, indexer: I, publisher: P) -> Self {
        Self {
            store,
            indexer,
            publisher,
        }
    }

    /// Create a permission and return its id.
    pub async fn request_permission(&mut self, input: PermissionInput) -> anyhow::Result<i32> {
        let mut permission = Permission {
            id: 0,
            employee_first_name: input.employee_first_name,
            employee_last_name: input.employee_last_name,
            permission_type_id: input.permission_type_id,
            permission_date: input.permission_date,
        };
        self.store.add(&mut permission).await?;
        self.store.commit().await?;
        debug!(id = permission.id, "permission requested");

        self.indexer
            .index_permission(&permission)
            .await
            .context("index permission")?;
        self.publisher
            .publish_operation(Operation::Request)
            .await
            .context("publish operation")?;
        Ok(permission.id)
    }

    /// Overwrite every field of an existing permission. Returns `false`
    /// without side effects when `id` does not exist.
    pub async fn modify_permission(
        &mut self,
        id: i32,
        input: PermissionInput,
    ) -> anyhow::Result<bool> {
        let mut permission = match self.store.get_by_id(id).await? {
            Some(val) => val,
            None => {
                debug!(id, "permission to modify not found");
                return Ok(false);
            }
        };
        permission.employee_first_name = input.employee_first_name;
        permission.employee_last_name = input.employee_last_name;
        permission.permission_type_id = input.permission_type_id;
        permission.permission_date = input.permission_date;

        self.store.update(&permission).await?;
        self.store.commit().await?;
        debug!(id, "permission modified");

        self.indexer
            .index_permission(&permission)
            .await
            .context("index permission")?;
        self.publisher
            .publish_operation(Operation::Modify)
            .await
            .context("publish operation")?;
        Ok(true)
    }

    pub async fn get_permissions(&mut self) -> anyhow::Result<Vec<PermissionSummary>> {
        let data = self.store.get_all().await?;
        self.publisher
            .publish_operation(Operation::Get)
            .await
            .context("publish operation")?;
        Ok(data.into_iter().map(PermissionSummary::from).collect())
    }
}
