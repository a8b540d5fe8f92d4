use async_trait::async_trait;
use padbot_model::{
    NavigationMode, OperationId, OperationInfo, OperationPage, OperationQuery, Pose, Pose2D,
    ProvisionSettings, RobotHealth,
};

use crate::error::ApiError;

/// Robot operation API handler.
///
/// Abstracts the backend so the HTTP layer can be mounted on the provided
/// [`ControllerAdapter`](crate::ControllerAdapter) or on a custom handler that
/// adds its own checks (auth, rate limiting, ...).
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    async fn navigate(&self, target: Pose2D, mode: NavigationMode) -> Result<OperationId, ApiError>;

    async fn stop_navigation(&self) -> Result<OperationId, ApiError>;

    async fn go_home(&self) -> Result<OperationId, ApiError>;

    async fn provision_map(&self, settings: ProvisionSettings) -> Result<OperationId, ApiError>;

    async fn seed_pois(&self) -> Result<OperationId, ApiError>;

    async fn reset_pois(&self) -> Result<OperationId, ApiError>;

    /// Get the stored record of an operation.
    async fn get_operation(&self, id: &OperationId) -> Result<Option<OperationInfo>, ApiError>;

    async fn query_operations(
        &self,
        query: OperationQuery,
    ) -> Result<OperationPage<OperationInfo>, ApiError>;

    async fn health(&self) -> Result<RobotHealth, ApiError>;

    async fn current_pose(&self) -> Result<Pose, ApiError>;
}
