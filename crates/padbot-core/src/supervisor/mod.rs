mod config;
pub use config::SupervisorConfig;

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use padbot_client::{ActionRequest, RobotApi};
use padbot_model::{ActionHandle, ActionStatus};

use crate::error::CoreError;

/// Drives one dispatched action to a terminal [`ActionStatus`].
///
/// State machine: `Running -> {Succeeded, Failed, TimedOut}`, plus `Cancelled`
/// when the caller's token fires. Transient poll failures are retried after a
/// fixed backoff; the counter resets on every successful poll, so only an
/// unbroken run of more than `max_consecutive_retries` failures fails the action.
/// The overall deadline is checked before every poll and bounds each poll too.
#[derive(Clone)]
pub struct ActionSupervisor {
    api: Arc<dyn RobotApi>,
    cfg: SupervisorConfig,
}

impl ActionSupervisor {
    pub fn new(api: Arc<dyn RobotApi>, cfg: SupervisorConfig) -> Self {
        Self { api, cfg }
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.cfg
    }

    /// Poll `handle` until it reaches a terminal state.
    #[instrument(level = "debug", skip(self, handle, cancel), fields(action_id = %handle))]
    pub async fn supervise(&self, handle: &ActionHandle, cancel: &CancellationToken) -> ActionStatus {
        let started = Instant::now();
        let timeout = self.cfg.timeout();
        let mut retries: u32 = 0;

        loop {
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                warn!(?elapsed, "action did not finish in time");
                return ActionStatus::TimedOut;
            }

            let polled = tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled(),
                polled = time::timeout(timeout - elapsed, self.api.poll_action(handle)) => polled,
            };

            let pause = match polled {
                Err(_) => {
                    warn!("action deadline reached during poll");
                    return ActionStatus::TimedOut;
                }
                Ok(Ok(ActionStatus::Running)) => {
                    if retries > 0 {
                        debug!(retries, "poll recovered");
                    }
                    retries = 0;
                    self.cfg.poll_interval()
                }
                Ok(Ok(ActionStatus::Succeeded)) => {
                    info!(elapsed = ?started.elapsed(), "action finished");
                    return ActionStatus::Succeeded;
                }
                Ok(Ok(other)) => return other,
                Ok(Err(e)) if e.is_transient() => {
                    retries += 1;
                    if retries > self.cfg.max_consecutive_retries {
                        warn!(retries, error = %e, "poll retry budget exhausted");
                        return ActionStatus::Failed {
                            reason: format!("{retries} consecutive poll failures, last: {e}"),
                        };
                    }
                    debug!(attempt = retries, error = %e, "transient poll failure");
                    self.cfg.retry_backoff()
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "poll failed");
                    return ActionStatus::Failed {
                        reason: e.to_string(),
                    };
                }
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled(),
                _ = time::sleep(pause) => {}
            }
        }
    }

    /// Dispatch `request` and supervise the resulting action.
    ///
    /// Dispatch failures are returned as errors and never retried.
    pub async fn run(
        &self,
        request: &ActionRequest,
        cancel: &CancellationToken,
    ) -> Result<ActionStatus, CoreError> {
        if cancel.is_cancelled() {
            return Ok(cancelled());
        }
        let handle = self.api.dispatch_action(request).await?;
        Ok(self.supervise(&handle, cancel).await)
    }

    /// Supervise on a background task; the join handle yields the terminal state.
    pub fn spawn(&self, handle: ActionHandle, cancel: CancellationToken) -> JoinHandle<ActionStatus> {
        let supervisor = self.clone();
        tokio::spawn(async move { supervisor.supervise(&handle, &cancel).await })
    }
}

fn cancelled() -> ActionStatus {
    debug!("supervision cancelled");
    ActionStatus::Cancelled {
        reason: "supervision cancelled".into(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use padbot_client::ClientError;
    use padbot_model::{NavigationMode, Pose2D};

    use super::*;
    use crate::testing::ScriptedRobot;

    fn running() -> Result<ActionStatus, ClientError> {
        Ok(ActionStatus::Running)
    }

    fn blip() -> Result<ActionStatus, ClientError> {
        Err(ClientError::Connection("connection reset".into()))
    }

    fn supervisor(robot: &Arc<ScriptedRobot>) -> ActionSupervisor {
        ActionSupervisor::new(robot.clone(), SupervisorConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn running_then_absent_action_succeeds() {
        let robot = Arc::new(ScriptedRobot::new().with_polls(vec![running(), running(), running()]));

        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(status, ActionStatus::Succeeded);
        assert_eq!(robot.poll_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn polls_at_fixed_interval_while_running() {
        let robot = Arc::new(ScriptedRobot::new().with_polls(vec![running(), running()]));

        let started = Instant::now();
        supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(started.elapsed(), Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn running_forever_times_out() {
        let robot = Arc::new(ScriptedRobot::new().with_default_poll(running()));

        let started = Instant::now();
        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(status, ActionStatus::TimedOut);
        assert!(started.elapsed() >= Duration::from_secs(300));
        assert!(started.elapsed() < Duration::from_secs(301));
    }

    #[tokio::test(start_paused = true)]
    async fn blips_below_budget_then_running_recover() {
        let robot = Arc::new(
            ScriptedRobot::new().with_polls(vec![blip(), blip(), blip(), running(), running()]),
        );

        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(status, ActionStatus::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_counter_resets_after_successful_poll() {
        let robot = Arc::new(ScriptedRobot::new().with_polls(vec![
            blip(),
            blip(),
            blip(),
            running(),
            blip(),
            blip(),
            blip(),
            running(),
            blip(),
            blip(),
            blip(),
        ]));

        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(status, ActionStatus::Succeeded);
        assert_eq!(robot.poll_count(), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn blips_beyond_budget_fail() {
        let robot = Arc::new(
            ScriptedRobot::new().with_polls(vec![running(), blip(), blip(), blip(), blip()]),
        );

        let started = Instant::now();
        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        match status {
            ActionStatus::Failed { reason } => assert!(reason.contains("connection reset")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(robot.poll_count(), 5);
        // one poll interval plus three backoffs
        assert_eq!(started.elapsed(), Duration::from_millis(3_500));
    }

    #[tokio::test(start_paused = true)]
    async fn http_errors_are_retried_like_connection_errors() {
        let robot = Arc::new(ScriptedRobot::new().with_polls(vec![
            Err(ClientError::Http { code: 502 }),
            Err(ClientError::MalformedResponse("truncated".into())),
        ]));

        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(status, ActionStatus::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn non_transient_error_fails_without_retry() {
        let robot = Arc::new(
            ScriptedRobot::new().with_polls(vec![Err(ClientError::Request("bad url".into()))]),
        );

        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert!(matches!(status, ActionStatus::Failed { .. }));
        assert_eq!(robot.poll_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_budget_never_outlives_the_deadline() {
        let robot = Arc::new(ScriptedRobot::new().with_default_poll(blip()));
        let cfg = SupervisorConfig {
            timeout_ms: 2_500,
            max_consecutive_retries: 100,
            ..Default::default()
        };

        let status = ActionSupervisor::new(robot.clone(), cfg)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(status, ActionStatus::TimedOut);
        assert_eq!(robot.poll_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_poll_is_bounded_by_the_deadline() {
        let robot = Arc::new(
            ScriptedRobot::new()
                .with_default_poll(running())
                .with_poll_delay(Duration::from_secs(3_600)),
        );

        let status = supervisor(&robot)
            .supervise(&ActionHandle::from("1"), &CancellationToken::new())
            .await;

        assert_eq!(status, ActionStatus::TimedOut);
        assert_eq!(robot.poll_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_polling() {
        let robot = Arc::new(ScriptedRobot::new().with_default_poll(running()));
        let cancel = CancellationToken::new();

        let task = supervisor(&robot).spawn(ActionHandle::from("1"), cancel.clone());
        time::sleep(Duration::from_secs(2)).await;
        cancel.cancel();

        let status = task.await.unwrap();
        assert!(matches!(status, ActionStatus::Cancelled { .. }));
        let polls = robot.poll_count();
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(robot.poll_count(), polls);
    }

    #[tokio::test(start_paused = true)]
    async fn run_propagates_dispatch_errors() {
        let robot = Arc::new(ScriptedRobot::new().with_dispatch_error(ClientError::Http { code: 500 }));
        let request = ActionRequest::move_to(Pose2D::new(1.0, 1.0, 0.0), NavigationMode::Standard);

        let result = supervisor(&robot).run(&request, &CancellationToken::new()).await;

        assert_eq!(result, Err(CoreError::Http(500)));
        assert_eq!(robot.poll_count(), 0);
    }
}
