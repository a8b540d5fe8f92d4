//! Scripted in-memory robot for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use padbot_client::{ActionRequest, ClientError, CommandBody, Method, RobotApi};
use padbot_model::{ActionHandle, ActionStatus};

type PollResult = Result<ActionStatus, ClientError>;

pub(crate) struct ScriptedRobot {
    polls: Mutex<VecDeque<PollResult>>,
    default_poll: PollResult,
    poll_delay: Duration,
    dispatch_error: Mutex<Option<ClientError>>,
    failures: Mutex<HashMap<String, ClientError>>,
    calls: Mutex<Vec<String>>,
    dispatched: Mutex<Vec<ActionRequest>>,
    next_id: AtomicUsize,
    poll_count: AtomicUsize,
}

impl ScriptedRobot {
    /// Actions complete on their first poll; every command succeeds.
    pub(crate) fn new() -> Self {
        Self {
            polls: Mutex::new(VecDeque::new()),
            default_poll: Ok(ActionStatus::Succeeded),
            poll_delay: Duration::ZERO,
            dispatch_error: Mutex::new(None),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            dispatched: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            poll_count: AtomicUsize::new(0),
        }
    }

    /// Poll results served in order before falling back to the default.
    pub(crate) fn with_polls(self, polls: Vec<PollResult>) -> Self {
        *self.polls.lock().unwrap() = polls.into();
        self
    }

    pub(crate) fn with_default_poll(mut self, poll: PollResult) -> Self {
        self.default_poll = poll;
        self
    }

    pub(crate) fn with_poll_delay(mut self, delay: Duration) -> Self {
        self.poll_delay = delay;
        self
    }

    pub(crate) fn with_dispatch_error(self, err: ClientError) -> Self {
        *self.dispatch_error.lock().unwrap() = Some(err);
        self
    }

    /// Make `METHOD path` fail with `err`.
    pub(crate) fn failing(self, method: Method, path: &str, err: ClientError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(format!("{method} {path}"), err);
        self
    }

    /// Every call in order, as `METHOD path`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn dispatched(&self) -> Vec<ActionRequest> {
        self.dispatched.lock().unwrap().clone()
    }

    pub(crate) fn poll_count(&self) -> usize {
        self.poll_count.load(Ordering::SeqCst)
    }

    fn record(&self, method: &Method, path: &str) -> Option<ClientError> {
        let key = format!("{method} {path}");
        self.calls.lock().unwrap().push(key.clone());
        self.failures.lock().unwrap().get(&key).cloned()
    }
}

#[async_trait]
impl RobotApi for ScriptedRobot {
    async fn dispatch_action(&self, request: &ActionRequest) -> Result<ActionHandle, ClientError> {
        if let Some(err) = self.record(&Method::POST, padbot_client::endpoints::ACTIONS) {
            return Err(err);
        }
        if let Some(err) = self.dispatch_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.dispatched.lock().unwrap().push(request.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(ActionHandle::new(id.to_string()))
    }

    async fn poll_action(&self, _handle: &ActionHandle) -> Result<ActionStatus, ClientError> {
        self.poll_count.fetch_add(1, Ordering::SeqCst);
        if !self.poll_delay.is_zero() {
            tokio::time::sleep(self.poll_delay).await;
        }
        let next = self.polls.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.default_poll.clone())
    }

    async fn simple_command(
        &self,
        method: Method,
        path: &str,
        _body: CommandBody,
    ) -> Result<(), ClientError> {
        match self.record(&method, path) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn fetch_json(&self, path: &str) -> Result<Value, ClientError> {
        match self.record(&Method::GET, path) {
            Some(err) => Err(err),
            None => Ok(serde_json::json!({ "x": 1.0, "y": 2.0, "yaw": 0.5 })),
        }
    }
}
