mod config;
pub use config::ControllerConfig;

mod event;
pub use event::{OperationEvent, OperationHandle};

mod outcome;
use outcome::Completion;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Semaphore, mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{Instrument, debug, info, info_span, instrument, warn};

use padbot_client::{ActionRequest, RobotApi};
use padbot_model::{
    NavigationMode, OperationId, OperationInfo, OperationKind, OperationOutcome, OperationPage,
    OperationQuery, Pose, Pose2D, ProvisionSettings, RobotHealth,
};

use crate::error::CoreError;
use crate::pipeline::MapProvisioningPipeline;
use crate::seeder::PoiSeeder;
use crate::state::OperationState;
use crate::subscribe::Subscribe;
use crate::supervisor::ActionSupervisor;

/// Message from a worker (or the submit path) to the dispatcher.
struct Dispatch {
    event: OperationEvent,
    reply: Option<oneshot::Sender<OperationOutcome>>,
}

struct Inner {
    api: Arc<dyn RobotApi>,
    cfg: ControllerConfig,
    supervisor: ActionSupervisor,
    pipeline: MapProvisioningPipeline,
    seeder: PoiSeeder,
    state: OperationState,
    permits: Arc<Semaphore>,
    tx: mpsc::UnboundedSender<Dispatch>,
    root: CancellationToken,
    workers: TaskTracker,
    /// Supervised motions still in flight.
    motions: Mutex<HashMap<OperationId, CancellationToken>>,
}

/// Entry point for robot operations.
///
/// Every operation is recorded, runs on a worker gated by a semaphore of
/// `max_concurrent_operations` permits, and reports back through one dispatcher
/// task. The dispatcher is the only writer of [`OperationState`] after submit
/// and the only caller of subscribers, so both observe events in one order.
#[derive(Clone)]
pub struct RobotController {
    inner: Arc<Inner>,
}

impl RobotController {
    /// Build the controller and spawn its dispatcher. Must be called inside a tokio runtime.
    pub fn new(
        api: Arc<dyn RobotApi>,
        cfg: ControllerConfig,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Result<Self, CoreError> {
        cfg.validate()?;

        let state = OperationState::with_retention(cfg.max_retained_operations);
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(dispatch_loop(rx, state.clone(), subscribers));

        let inner = Inner {
            supervisor: ActionSupervisor::new(api.clone(), cfg.supervisor.clone()),
            pipeline: MapProvisioningPipeline::new(api.clone(), cfg.pipeline.clone()),
            seeder: PoiSeeder::new(api.clone(), cfg.seeder.clone()),
            permits: Arc::new(Semaphore::new(cfg.max_concurrent_operations)),
            api,
            cfg,
            state,
            tx,
            root: CancellationToken::new(),
            workers: TaskTracker::new(),
            motions: Mutex::new(HashMap::new()),
        };
        info!(
            workers = inner.cfg.max_concurrent_operations,
            supersede_motion = inner.cfg.supersede_motion,
            "robot controller ready"
        );
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Navigate to `target` with the standard motion profile.
    pub fn navigate(&self, target: Pose2D) -> Result<OperationHandle, CoreError> {
        self.navigate_with(target, NavigationMode::Standard)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn navigate_with(
        &self,
        target: Pose2D,
        mode: NavigationMode,
    ) -> Result<OperationHandle, CoreError> {
        if !target.is_finite() {
            return Err(CoreError::Rejected(format!(
                "navigation target must be finite, got ({}, {}, {})",
                target.x, target.y, target.yaw
            )));
        }
        let request = ActionRequest::move_to(target, mode);
        self.submit(OperationKind::Navigate, move |inner, cancel| {
            run_action(inner, request, cancel)
        })
    }

    /// Drive back to the charging dock.
    #[instrument(level = "debug", skip(self))]
    pub fn go_home(&self) -> Result<OperationHandle, CoreError> {
        self.submit(OperationKind::GoHome, |inner, cancel| {
            run_action(inner, ActionRequest::go_home(), cancel)
        })
    }

    /// Stop the robot's current action.
    ///
    /// Local supervision of every active motion is cancelled at once; the
    /// robot is then told to drop its current action.
    #[instrument(level = "debug", skip(self))]
    pub fn stop_navigation(&self) -> Result<OperationHandle, CoreError> {
        self.ensure_open()?;
        for (id, cancel) in self.take_motions() {
            info!(operation_id = %id, "stopping supervised motion");
            cancel.cancel();
        }
        self.submit(OperationKind::StopNavigation, |inner, _cancel| async move {
            match inner.api.stop_current_action().await {
                Ok(()) => Completion::succeeded(),
                Err(e) => Completion::failed(&CoreError::from(e)),
            }
        })
    }

    /// Install a map and home dock on the robot.
    #[instrument(level = "debug", skip(self))]
    pub fn process_and_upload_map(
        &self,
        settings: ProvisionSettings,
    ) -> Result<OperationHandle, CoreError> {
        let coords = [
            settings.home_dock_x,
            settings.home_dock_y,
            settings.home_dock_yaw,
        ];
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::Rejected("home dock must be finite".into()));
        }
        self.submit(OperationKind::ProvisionMap, |inner, _cancel| async move {
            outcome::from_pipeline(inner.pipeline.run(&settings).await)
        })
    }

    /// Create the default POIs from the local waypoint list.
    #[instrument(level = "debug", skip(self))]
    pub fn seed_default_pois(&self) -> Result<OperationHandle, CoreError> {
        self.submit(OperationKind::SeedPois, |inner, _cancel| async move {
            outcome::from_seed(inner.seeder.seed().await)
        })
    }

    /// Clear every POI on the robot, then seed the defaults.
    #[instrument(level = "debug", skip(self))]
    pub fn reset_pois(&self) -> Result<OperationHandle, CoreError> {
        self.submit(OperationKind::ResetPois, |inner, _cancel| async move {
            outcome::from_seed(inner.seeder.reset().await)
        })
    }

    /// Probe the robot's health endpoint.
    pub async fn check_connection(&self) -> RobotHealth {
        self.inner.api.health().await
    }

    pub async fn current_pose(&self) -> Result<Pose, CoreError> {
        Ok(self.inner.api.current_pose().await?)
    }

    pub async fn set_max_line_speed(&self, speed: f64) -> Result<(), CoreError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(CoreError::Rejected(format!(
                "line speed must be positive, got {speed}"
            )));
        }
        Ok(self.inner.api.set_max_line_speed(speed).await?)
    }

    pub fn operation(&self, id: &OperationId) -> Option<OperationInfo> {
        self.inner.state.get(id)
    }

    pub fn operations(&self, query: &OperationQuery) -> OperationPage<OperationInfo> {
        self.inner.state.query(query)
    }

    pub fn state(&self) -> &OperationState {
        &self.inner.state
    }

    /// Refuse new operations, cancel every in-flight supervision and wait
    /// for the workers to return.
    ///
    /// Provisioning and seeding runs that already hold a permit finish their
    /// sequence; operations still waiting for one end as `Cancelled`.
    pub async fn shutdown(&self) {
        if !self.inner.root.is_cancelled() {
            info!("robot controller shutting down");
            self.inner.root.cancel();
        }
        self.inner.workers.close();
        self.inner.workers.wait().await;
        debug!("workers drained");
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.root.is_cancelled()
    }

    fn ensure_open(&self) -> Result<(), CoreError> {
        if self.inner.root.is_cancelled() {
            return Err(CoreError::Rejected("controller is shut down".into()));
        }
        Ok(())
    }

    fn take_motions(&self) -> HashMap<OperationId, CancellationToken> {
        std::mem::take(
            &mut *self
                .inner
                .motions
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Token for a new operation. Motions are registered so stop can reach
    /// them; with `supersede_motion` the new one cancels all others.
    fn cancel_token(&self, id: &OperationId, kind: OperationKind) -> CancellationToken {
        let token = self.inner.root.child_token();
        if !kind.is_motion() {
            return token;
        }

        let mut motions = self
            .inner
            .motions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.inner.cfg.supersede_motion {
            for (previous, cancel) in motions.drain() {
                info!(superseded = %previous, by = %id, "superseding active motion");
                cancel.cancel();
            }
        }
        motions.insert(id.clone(), token.clone());
        token
    }

    fn submit<F, Fut>(&self, kind: OperationKind, work: F) -> Result<OperationHandle, CoreError>
    where
        F: FnOnce(Arc<Inner>, CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Completion> + Send + 'static,
    {
        self.ensure_open()?;

        let id = OperationId::from(uuid::Uuid::new_v4().to_string());
        self.inner.state.insert(id.clone(), kind);
        let cancel = self.cancel_token(&id, kind);
        let (reply_tx, reply_rx) = oneshot::channel();

        self.inner.send(OperationEvent::Accepted {
            id: id.clone(),
            kind,
        });
        debug!(operation_id = %id, kind = kind.as_str(), "operation accepted");

        let inner = self.inner.clone();
        let worker_id = id.clone();
        let span = info_span!("operation", operation_id = %id, kind = kind.as_str());
        let worker = async move {
            let done = tokio::select! {
                biased;
                _ = cancel.cancelled() => Completion::failed(&CoreError::Cancelled),
                permit = inner.permits.clone().acquire_owned() => match permit {
                    Ok(_permit) => {
                        inner.send(OperationEvent::Started { id: worker_id.clone(), kind });
                        work(inner.clone(), cancel).await
                    }
                    Err(_) => Completion::failed(&CoreError::Cancelled),
                },
            };

            inner.release_motion(&worker_id);
            let outcome = OperationOutcome {
                id: worker_id,
                kind,
                status: done.status,
                report: done.report,
                error: done.error,
            };
            inner.finish(outcome, reply_tx);
        };
        self.inner.workers.spawn(worker.instrument(span));

        Ok(OperationHandle::new(id, kind, reply_rx))
    }
}

impl Inner {
    fn send(&self, event: OperationEvent) {
        if self.tx.send(Dispatch { event, reply: None }).is_err() {
            warn!("dispatcher is gone; dropping event");
        }
    }

    fn finish(&self, outcome: OperationOutcome, reply: oneshot::Sender<OperationOutcome>) {
        let dispatch = Dispatch {
            event: OperationEvent::Finished(outcome),
            reply: Some(reply),
        };
        if self.tx.send(dispatch).is_err() {
            warn!("dispatcher is gone; dropping outcome");
        }
    }

    fn release_motion(&self, id: &OperationId) {
        self.motions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }
}

async fn run_action(
    inner: Arc<Inner>,
    request: ActionRequest,
    cancel: CancellationToken,
) -> Completion {
    let result = inner.supervisor.run(&request, &cancel).await;
    outcome::from_action(result, inner.cfg.supervisor.timeout())
}

/// Single result-delivery context: state first, then subscribers, then the caller.
async fn dispatch_loop(
    mut rx: mpsc::UnboundedReceiver<Dispatch>,
    state: OperationState,
    subscribers: Vec<Arc<dyn Subscribe>>,
) {
    while let Some(Dispatch { event, reply }) = rx.recv().await {
        state.apply(&event);
        for sub in &subscribers {
            sub.on_event(&event).await;
        }

        if let (Some(reply), OperationEvent::Finished(outcome)) = (reply, event) {
            debug!(
                operation_id = %outcome.id,
                status = outcome.status.as_str(),
                "operation finished"
            );
            // The caller may have dropped its handle; the state keeps the result.
            let _ = reply.send(outcome);
        }
    }
    debug!("dispatcher stopped");
}
