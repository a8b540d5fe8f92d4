use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use padbot_model::{
    NavigationMode, OperationId, OperationInfo, OperationKind, OperationQuery, OperationStatus,
    Pose2D, ProvisionSettings,
};

use crate::{error::ApiError, handler::ApiHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /api/v1/navigate - Navigate to a pose
    /// - POST /api/v1/navigate/stop - Stop the current motion
    /// - POST /api/v1/home - Return to the dock
    /// - POST /api/v1/maps/provision - Upload a map and set the home dock
    /// - POST /api/v1/pois/seed - Create the default POIs
    /// - POST /api/v1/pois/reset - Clear POIs, then create the defaults
    /// - GET /api/v1/operations/{id} - Get operation status
    /// - GET /api/v1/operations - List operations (filter by query params)
    /// - GET /api/v1/robot/health - Probe the robot
    /// - GET /api/v1/robot/pose - Current robot pose
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/v1/navigate", post(navigate::<H>))
            .route("/api/v1/navigate/stop", post(stop_navigation::<H>))
            .route("/api/v1/home", post(go_home::<H>))
            .route("/api/v1/maps/provision", post(provision_map::<H>))
            .route("/api/v1/pois/seed", post(seed_pois::<H>))
            .route("/api/v1/pois/reset", post(reset_pois::<H>))
            .route("/api/v1/operations", get(list_operations::<H>))
            .route("/api/v1/operations/{id}", get(get_operation::<H>))
            .route("/api/v1/robot/health", get(robot_health::<H>))
            .route("/api/v1/robot/pose", get(robot_pose::<H>))
            .with_state(self.handler)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct NavigateRequest {
    x: f64,
    y: f64,
    #[serde(default)]
    yaw: f64,
    #[serde(default)]
    mode: NavigationMode,
}

#[derive(Debug, Serialize, Deserialize)]
struct SubmitResponse {
    operation_id: String,
}

#[derive(Debug, Deserialize)]
struct ListOperationsParams {
    /// Filter by operation kind
    kind: Option<String>,
    /// Filter by operation status
    status: Option<String>,
    /// Max items per page (default 100, max 1000)
    limit: Option<usize>,
    /// Offset for pagination (default 0)
    offset: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ListOperationsResponse {
    operations: Vec<OperationInfo>,
    total: usize,
}

fn accepted(id: OperationId) -> impl IntoResponse {
    let response = SubmitResponse {
        operation_id: id.to_string(),
    };
    (StatusCode::ACCEPTED, Json(response))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/navigate
async fn navigate<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<NavigateRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let target = Pose2D::new(req.x, req.y, req.yaw);
    if !target.is_finite() {
        return Err(ApiError::InvalidRequest(
            "x, y and yaw must be finite numbers".into(),
        ));
    }

    debug!(x = req.x, y = req.y, yaw = req.yaw, mode = ?req.mode, "navigating");
    let id = handler.navigate(target, req.mode).await?;
    Ok(accepted(id))
}

/// POST /api/v1/navigate/stop
async fn stop_navigation<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    debug!("stopping navigation");
    Ok(accepted(handler.stop_navigation().await?))
}

/// POST /api/v1/home
async fn go_home<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    debug!("going home");
    Ok(accepted(handler.go_home().await?))
}

/// POST /api/v1/maps/provision
async fn provision_map<H>(
    State(handler): State<Arc<H>>,
    Json(settings): Json<ProvisionSettings>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let dock = [
        settings.home_dock_x,
        settings.home_dock_y,
        settings.home_dock_yaw,
    ];
    if dock.iter().any(|v| !v.is_finite()) {
        return Err(ApiError::InvalidRequest(
            "home dock coordinates must be finite numbers".into(),
        ));
    }

    debug!(?settings, "provisioning map");
    Ok(accepted(handler.provision_map(settings).await?))
}

/// POST /api/v1/pois/seed
async fn seed_pois<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    debug!("seeding default pois");
    Ok(accepted(handler.seed_pois().await?))
}

/// POST /api/v1/pois/reset
async fn reset_pois<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    debug!("resetting pois");
    Ok(accepted(handler.reset_pois().await?))
}

/// GET /api/v1/operations/{id}
async fn get_operation<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let operation_id = OperationId::from(id);
    debug!(%operation_id, "getting operation status");

    match handler.get_operation(&operation_id).await? {
        Some(info) => Ok(Json(info)),
        None => Err(ApiError::OperationNotFound(operation_id.to_string())),
    }
}

/// GET /api/v1/operations
///
/// Query params (all optional, combinable):
/// - ?kind=navigate - filter by kind
/// - ?status=running - filter by status
/// - ?limit=50 - max items per page (default 100, max 1000)
/// - ?offset=0 - pagination offset (default 0)
async fn list_operations<H>(
    State(handler): State<Arc<H>>,
    Query(params): Query<ListOperationsParams>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let mut query = OperationQuery::new();

    if let Some(kind) = params.kind {
        let kind: OperationKind = kind.parse().map_err(ApiError::InvalidRequest)?;
        query = query.with_kind(kind);
    }

    if let Some(status) = params.status {
        let status: OperationStatus = status.parse().map_err(ApiError::InvalidRequest)?;
        query = query.with_status(status);
    }

    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }

    if let Some(offset) = params.offset {
        query = query.with_offset(offset);
    }

    let page = handler.query_operations(query).await?;
    debug!(count = page.items.len(), total = page.total, "operations listed");

    let response = ListOperationsResponse {
        operations: page.items,
        total: page.total,
    };
    Ok(Json(response))
}

/// GET /api/v1/robot/health
async fn robot_health<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    Ok(Json(handler.health().await?))
}

/// GET /api/v1/robot/pose
async fn robot_pose<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    Ok(Json(handler.current_pose().await?))
}
