use async_trait::async_trait;

use crate::controller::OperationEvent;

/// Receiver of operation lifecycle events.
///
/// Subscribers are invoked one at a time from the controller's dispatcher task,
/// in event order. A slow subscriber delays delivery of later results.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    async fn on_event(&self, event: &OperationEvent);

    fn name(&self) -> &'static str;
}
