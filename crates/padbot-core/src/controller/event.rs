use tokio::sync::oneshot;

use padbot_model::{
    ErrorKind, OperationError, OperationId, OperationKind, OperationOutcome, OperationStatus,
};

/// Lifecycle event of one operation, delivered in order by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationEvent {
    /// Recorded and waiting for a worker.
    Accepted { id: OperationId, kind: OperationKind },
    /// A worker picked it up.
    Started { id: OperationId, kind: OperationKind },
    /// Terminal outcome.
    Finished(OperationOutcome),
}

impl OperationEvent {
    pub fn id(&self) -> &OperationId {
        match self {
            OperationEvent::Accepted { id, .. } | OperationEvent::Started { id, .. } => id,
            OperationEvent::Finished(outcome) => &outcome.id,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            OperationEvent::Accepted { kind, .. } | OperationEvent::Started { kind, .. } => *kind,
            OperationEvent::Finished(outcome) => outcome.kind,
        }
    }

    /// Status the operation has after this event.
    pub fn status(&self) -> OperationStatus {
        match self {
            OperationEvent::Accepted { .. } => OperationStatus::Pending,
            OperationEvent::Started { .. } => OperationStatus::Running,
            OperationEvent::Finished(outcome) => outcome.status,
        }
    }

    pub fn outcome(&self) -> Option<&OperationOutcome> {
        match self {
            OperationEvent::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Caller side of a submitted operation.
pub struct OperationHandle {
    id: OperationId,
    kind: OperationKind,
    rx: oneshot::Receiver<OperationOutcome>,
}

impl OperationHandle {
    pub(crate) fn new(
        id: OperationId,
        kind: OperationKind,
        rx: oneshot::Receiver<OperationOutcome>,
    ) -> Self {
        Self { id, kind, rx }
    }

    pub fn id(&self) -> &OperationId {
        &self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Wait for the terminal outcome.
    ///
    /// Always resolves: if the controller goes away first the outcome is `Cancelled`.
    pub async fn wait(self) -> OperationOutcome {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => OperationOutcome {
                id: self.id,
                kind: self.kind,
                status: OperationStatus::Cancelled,
                report: None,
                error: Some(OperationError::new(
                    ErrorKind::Cancelled,
                    "controller stopped before the operation finished",
                )),
            },
        }
    }
}

impl std::fmt::Debug for OperationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}
