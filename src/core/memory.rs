//! In-memory collaborators for the permission pipeline.
//!
//! All three share a [`CallLog`] so tests can assert the exact order in which
//! the pipeline touched the store, the index and the event log.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, bail};

use crate::{
    core::{
        event::{EventPublisher, Operation},
        search::SearchIndexer,
    },
    model::{
        permission::{Permission, PermissionDetail},
        permission_type::{PermissionType, SEEDED_PERMISSION_TYPES},
    },
    repository::PermissionStore,
};

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: &str) {
        lock(&self.0).push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.0).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
struct MemoryTables {
    permissions: Vec<Permission>,
    permission_types: Vec<PermissionType>,
    last_id: i32,
}

enum Change {
    Add(Permission),
    Update(Permission),
}

/// Unit-of-work store over shared in-memory tables. Changes are staged until
/// [`PermissionStore::commit`], which enforces the type reference the way the
/// database foreign key does.
#[derive(Clone)]
pub struct InMemoryPermissionStore {
    tables: Arc<Mutex<MemoryTables>>,
    pending: Arc<Mutex<Vec<Change>>>,
    calls: CallLog,
}

impl InMemoryPermissionStore {
    /// Store seeded with the five standard permission types.
    pub fn new(calls: CallLog) -> Self {
        let permission_types = SEEDED_PERMISSION_TYPES
            .iter()
            .map(|(id, description)| PermissionType {
                id: *id,
                description: description.to_string(),
            })
            .collect();
        Self {
            tables: Arc::new(Mutex::new(MemoryTables {
                permission_types,
                ..Default::default()
            })),
            pending: Arc::new(Mutex::new(vec![])),
            calls,
        }
    }

    /// Insert a committed row directly, skipping the type reference check.
    pub fn insert_raw(&self, mut permission: Permission) -> Permission {
        let mut tables = lock(&self.tables);
        tables.last_id += 1;
        permission.id = tables.last_id;
        tables.permissions.push(permission.clone());
        permission
    }

    pub fn permissions(&self) -> Vec<Permission> {
        lock(&self.tables).permissions.clone()
    }
}

impl PermissionStore for InMemoryPermissionStore {
    async fn get_by_id(&mut self, id: i32) -> anyhow::Result<Option<Permission>> {
        self.calls.record("store.get_by_id");
        let tables = lock(&self.tables);
        Ok(tables.permissions.iter().find(|x| x.id == id).cloned())
    }

    async fn get_all(&mut self) -> anyhow::Result<Vec<PermissionDetail>> {
        self.calls.record("store.get_all");
        let tables = lock(&self.tables);
        Ok(tables
            .permissions
            .iter()
            .map(|x| PermissionDetail {
                id: x.id,
                employee_first_name: x.employee_first_name.clone(),
                employee_last_name: x.employee_last_name.clone(),
                permission_type_id: x.permission_type_id,
                permission_type_description: tables
                    .permission_types
                    .iter()
                    .find(|t| t.id == x.permission_type_id)
                    .map(|t| t.description.clone()),
                permission_date: x.permission_date,
            })
            .collect())
    }

    async fn add(&mut self, permission: &mut Permission) -> anyhow::Result<()> {
        self.calls.record("store.add");
        {
            let mut tables = lock(&self.tables);
            tables.last_id += 1;
            permission.id = tables.last_id;
        }
        lock(&self.pending).push(Change::Add(permission.clone()));
        Ok(())
    }

    async fn update(&mut self, permission: &Permission) -> anyhow::Result<()> {
        self.calls.record("store.update");
        lock(&self.pending).push(Change::Update(permission.clone()));
        Ok(())
    }

    async fn commit(&mut self) -> anyhow::Result<u64> {
        self.calls.record("store.commit");
        let changes: Vec<Change> = lock(&self.pending).drain(..).collect();
        let mut tables = lock(&self.tables);
        for change in changes.iter() {
            let permission = match change {
                Change::Add(val) | Change::Update(val) => val,
            };
            if !tables
                .permission_types
                .iter()
                .any(|t| t.id == permission.permission_type_id)
            {
                bail!(
                    "permission type {} does not exist",
                    permission.permission_type_id
                );
            }
        }
        for change in changes.iter() {
            match change {
                Change::Add(val) => tables.permissions.push(val.clone()),
                Change::Update(val) => {
                    let row = tables
                        .permissions
                        .iter_mut()
                        .find(|x| x.id == val.id)
                        .ok_or_else(|| anyhow!("permission {} does not exist", val.id))?;
                    *row = val.clone();
                }
            }
        }
        Ok(changes.len() as u64)
    }
}

#[derive(Clone)]
pub struct InMemorySearchIndexer {
    documents: Arc<Mutex<Vec<Permission>>>,
    calls: CallLog,
    fail: bool,
}

impl InMemorySearchIndexer {
    pub fn new(calls: CallLog) -> Self {
        Self {
            documents: Arc::new(Mutex::new(vec![])),
            calls,
            fail: false,
        }
    }

    /// Indexer whose every call fails after being recorded.
    pub fn failing(calls: CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(calls)
        }
    }

    /// Every indexed document in call order.
    pub fn documents(&self) -> Vec<Permission> {
        lock(&self.documents).clone()
    }
}

impl SearchIndexer for InMemorySearchIndexer {
    async fn index_permission(&self, permission: &Permission) -> anyhow::Result<()> {
        self.calls.record("indexer.index");
        if self.fail {
            bail!("search index unavailable");
        }
        lock(&self.documents).push(permission.clone());
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemoryEventPublisher {
    operations: Arc<Mutex<Vec<Operation>>>,
    calls: CallLog,
}

impl InMemoryEventPublisher {
    pub fn new(calls: CallLog) -> Self {
        Self {
            operations: Arc::new(Mutex::new(vec![])),
            calls,
        }
    }

    pub fn operations(&self) -> Vec<Operation> {
        lock(&self.operations).clone()
    }
}

impl EventPublisher for InMemoryEventPublisher {
    async fn publish_operation(&self, operation: Operation) -> anyhow::Result<()> {
        self.calls
            .record(format!("publisher.publish:{}", operation).as_str());
        lock(&self.operations).push(operation);
        Ok(())
    }
}
