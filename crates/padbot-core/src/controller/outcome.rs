//! Folding component results into operation status, report and error.

use std::time::Duration;

use padbot_model::{
    ActionStatus, OperationError, OperationReport, OperationStatus, PipelineResult,
    PipelineStatus, SeedReport,
};

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Completion {
    pub status: OperationStatus,
    pub report: Option<OperationReport>,
    pub error: Option<OperationError>,
}

impl Completion {
    pub fn failed(err: &CoreError) -> Self {
        let status = match err {
            CoreError::Cancelled => OperationStatus::Cancelled,
            CoreError::Timeout(_) => OperationStatus::TimedOut,
            _ => OperationStatus::Failed,
        };
        Self {
            status,
            report: None,
            error: Some(err.to_operation_error()),
        }
    }

    pub fn succeeded() -> Self {
        Self {
            status: OperationStatus::Succeeded,
            report: None,
            error: None,
        }
    }
}

pub(crate) fn from_action(result: Result<ActionStatus, CoreError>, timeout: Duration) -> Completion {
    let action = match result {
        Ok(action) => action,
        Err(e) => return Completion::failed(&e),
    };
    let (status, error) = match &action {
        ActionStatus::Succeeded => (OperationStatus::Succeeded, None),
        // supervise() never returns Running; treat it as a lost action.
        ActionStatus::Running => (
            OperationStatus::Failed,
            Some(CoreError::ActionFailed("supervision ended while running".into())),
        ),
        ActionStatus::Failed { reason } => (
            OperationStatus::Failed,
            Some(CoreError::ActionFailed(reason.clone())),
        ),
        ActionStatus::TimedOut => (OperationStatus::TimedOut, Some(CoreError::Timeout(timeout))),
        ActionStatus::Cancelled { .. } => (OperationStatus::Cancelled, Some(CoreError::Cancelled)),
    };
    Completion {
        status,
        report: Some(OperationReport::Action(action)),
        error: error.map(|e| e.to_operation_error()),
    }
}

pub(crate) fn from_pipeline(result: PipelineResult) -> Completion {
    let status = match result.status {
        PipelineStatus::Success => OperationStatus::Succeeded,
        PipelineStatus::Partial => OperationStatus::Partial,
        PipelineStatus::Failed => OperationStatus::Failed,
    };
    let error = result
        .critical_failure()
        .or(result.failures.first())
        .map(|f| {
            let err = CoreError::PipelineStepFailed {
                step: f.step.clone(),
                critical: f.critical,
                reason: f.reason.clone(),
            };
            OperationError::new(f.kind, err.to_string())
        });
    Completion {
        status,
        report: Some(OperationReport::Pipeline(result)),
        error,
    }
}

pub(crate) fn from_seed(result: Result<SeedReport, CoreError>) -> Completion {
    let report = match result {
        Ok(report) => report,
        Err(e) => return Completion::failed(&e),
    };
    let (status, error) = if report.is_complete() {
        (OperationStatus::Succeeded, None)
    } else if report.is_total_failure() {
        let first = &report.failed[0];
        (
            OperationStatus::Failed,
            Some(OperationError::new(
                first.kind,
                format!("no poi could be created, first failure: {}", first.reason),
            )),
        )
    } else {
        (OperationStatus::Partial, None)
    };
    Completion {
        status,
        report: Some(OperationReport::Seed(report)),
        error,
    }
}
