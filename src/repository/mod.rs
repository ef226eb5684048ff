use std::future::Future;

use crate::model::permission::{Permission, PermissionDetail};

pub mod permission;
pub mod permission_type;

/// Unit of work over the permission table.
///
/// `add` and `update` are not durable until `commit` returns. `add` assigns
/// the surrogate id to the given permission.
pub trait PermissionStore: Send {
    fn get_by_id(
        &mut self,
        id: i32,
    ) -> impl Future<Output = anyhow::Result<Option<Permission>>> + Send;

    /// Every permission joined with its type, in insertion order.
    fn get_all(&mut self) -> impl Future<Output = anyhow::Result<Vec<PermissionDetail>>> + Send;

    fn add(&mut self, permission: &mut Permission)
        -> impl Future<Output = anyhow::Result<()>> + Send;

    fn update(&mut self, permission: &Permission)
        -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Flush pending changes, returning how many were written.
    fn commit(&mut self) -> impl Future<Output = anyhow::Result<u64>> + Send;
}
