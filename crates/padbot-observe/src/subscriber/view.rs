use padbot_core::OperationEvent;
use padbot_model::OperationStatus;
use tracing::{debug, error, info, trace, warn};

#[inline]
pub fn message_for(status: OperationStatus) -> &'static str {
    match status {
        OperationStatus::Pending => "operation accepted",
        OperationStatus::Running => "operation started",
        OperationStatus::Succeeded => "operation succeeded",
        OperationStatus::Partial => "operation finished with failed best-effort steps",
        OperationStatus::Failed => "operation failed",
        OperationStatus::TimedOut => "operation gave up waiting for the robot",
        OperationStatus::Cancelled => "operation cancelled",
    }
}

#[inline]
pub fn log_event(event: &OperationEvent) {
    let status = event.status();
    let msg = message_for(status);
    let id = event.id().as_str();
    let kind = event.kind().as_str();
    let reason = event
        .outcome()
        .and_then(|o| o.error.as_ref())
        .map(|e| e.message.as_str())
        .unwrap_or("unknown");

    match status {
        OperationStatus::Pending => trace!(operation_id = id, kind, "{msg}"),
        OperationStatus::Running => debug!(operation_id = id, kind, "{msg}"),
        OperationStatus::Succeeded => info!(operation_id = id, kind, "{msg}"),
        OperationStatus::Cancelled => info!(operation_id = id, kind, reason, "{msg}"),
        OperationStatus::Partial => warn!(operation_id = id, kind, reason, "{msg}"),
        OperationStatus::Failed | OperationStatus::TimedOut => {
            error!(operation_id = id, kind, reason, "{msg}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_a_message() {
        for status in [
            OperationStatus::Pending,
            OperationStatus::Running,
            OperationStatus::Succeeded,
            OperationStatus::Partial,
            OperationStatus::Failed,
            OperationStatus::TimedOut,
            OperationStatus::Cancelled,
        ] {
            assert!(!message_for(status).is_empty());
        }
    }
}
