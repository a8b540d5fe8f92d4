use crate::{OperationKind, OperationStatus};

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Query parameters for listing operations with filtering and pagination.
#[derive(Debug, Clone)]
pub struct OperationQuery {
    pub kind: Option<OperationKind>,
    pub status: Option<OperationStatus>,
    pub limit: usize,
    pub offset: usize,
}

/// Result of a paginated operation query.
#[derive(Debug, Clone)]
pub struct OperationPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl OperationQuery {
    pub fn new() -> Self {
        Self {
            kind: None,
            status: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn with_kind(mut self, kind: OperationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_status(mut self, status: OperationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl Default for OperationQuery {
    fn default() -> Self {
        Self::new()
    }
}
