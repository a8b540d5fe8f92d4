use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::SystemTime,
};

use padbot_model::{
    OperationId, OperationInfo, OperationKind, OperationPage, OperationQuery, OperationStatus,
};

use crate::controller::OperationEvent;

/// In-memory operation state storage.
///
/// Written only by the controller: records are inserted when an operation is
/// submitted, every later transition arrives as an [`OperationEvent`].
///
/// At most `retain` finished records are kept; the ones that finished first
/// are dropped first.
/// Pending and running records are never dropped.
#[derive(Clone)]
pub struct OperationState {
    inner: Arc<RwLock<OperationStateInner>>,
}

struct OperationStateInner {
    /// Operations indexed by id.
    operations: HashMap<OperationId, OperationInfo>,
    /// Submission order.
    order: Vec<OperationId>,
    /// Finished records, oldest first.
    finished: VecDeque<OperationId>,
    /// Max finished records kept.
    retain: usize,
}

impl OperationState {
    /// Create empty operation state that keeps every record.
    pub fn new() -> Self {
        Self::with_retention(usize::MAX)
    }

    /// Create empty operation state keeping at most `retain` finished records.
    pub fn with_retention(retain: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(OperationStateInner {
                operations: HashMap::new(),
                order: Vec::new(),
                finished: VecDeque::new(),
                retain,
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, OperationStateInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, OperationStateInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new operation as `Pending`. Re-inserting a known id is a no-op.
    pub fn insert(&self, id: OperationId, kind: OperationKind) {
        let mut inner = self.write();
        if inner.operations.contains_key(&id) {
            return;
        }

        let now = SystemTime::now();
        let info = OperationInfo {
            id: id.clone(),
            kind,
            status: OperationStatus::Pending,
            created_at: now,
            updated_at: now,
            report: None,
            error: None,
        };
        inner.operations.insert(id.clone(), info);
        inner.order.push(id);
    }

    /// Apply one controller event.
    ///
    /// Terminal records are final: late events for them are ignored.
    pub fn apply(&self, event: &OperationEvent) {
        match event {
            OperationEvent::Accepted { id, kind } => self.insert(id.clone(), *kind),
            OperationEvent::Started { id, .. } => {
                let mut inner = self.write();
                if let Some(info) = inner.operations.get_mut(id)
                    && info.status.is_active()
                {
                    info.status = OperationStatus::Running;
                    info.updated_at = SystemTime::now();
                }
            }
            OperationEvent::Finished(outcome) => {
                let mut inner = self.write();
                if let Some(info) = inner.operations.get_mut(&outcome.id)
                    && info.status.is_active()
                {
                    info.status = outcome.status;
                    info.updated_at = SystemTime::now();
                    info.report = outcome.report.clone();
                    info.error = outcome.error.clone();
                    inner.finished.push_back(outcome.id.clone());
                    inner.evict_finished();
                }
            }
        }
    }

    /// Get operation info by id.
    pub fn get(&self, id: &OperationId) -> Option<OperationInfo> {
        self.read().operations.get(id).cloned()
    }

    /// All operations in submission order.
    pub fn list(&self) -> Vec<OperationInfo> {
        let inner = self.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.operations.get(id).cloned())
            .collect()
    }

    /// Operations that are pending or running.
    pub fn active(&self) -> Vec<OperationInfo> {
        self.list()
            .into_iter()
            .filter(|info| info.status.is_active())
            .collect()
    }

    /// Query operations with combined filters and pagination.
    ///
    /// Results keep submission order. `total` counts matches before pagination.
    pub fn query(&self, q: &OperationQuery) -> OperationPage<OperationInfo> {
        let inner = self.read();

        let filtered: Vec<&OperationInfo> = inner
            .order
            .iter()
            .filter_map(|id| inner.operations.get(id))
            .filter(|info| q.kind.is_none_or(|kind| info.kind == kind))
            .filter(|info| q.status.is_none_or(|status| info.status == status))
            .collect();
        let total = filtered.len();

        let items = filtered
            .into_iter()
            .skip(q.offset)
            .take(q.limit)
            .cloned()
            .collect();

        OperationPage { items, total }
    }
}

impl OperationStateInner {
    /// Drop the records that finished first until the retention limit holds.
    fn evict_finished(&mut self) {
        if self.finished.len() <= self.retain {
            return;
        }
        while self.finished.len() > self.retain {
            if let Some(id) = self.finished.pop_front() {
                self.operations.remove(&id);
            }
        }
        let operations = &self.operations;
        self.order.retain(|id| operations.contains_key(id));
    }
}

impl Default for OperationState {
    fn default() -> Self {
        Self::new()
    }
}
