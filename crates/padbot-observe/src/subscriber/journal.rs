use async_trait::async_trait;
use padbot_core::{OperationEvent, Subscribe};

use crate::subscriber::view::log_event;

/// Subscriber that writes every operation event to the log.
#[derive(Debug, Default)]
pub struct Journal;

impl Journal {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for Journal {
    async fn on_event(&self, event: &OperationEvent) {
        log_event(event);
    }

    fn name(&self) -> &'static str {
        "journal"
    }
}
