use async_trait::async_trait;
use padbot_core::RobotController;
use padbot_model::{
    NavigationMode, OperationId, OperationInfo, OperationPage, OperationQuery, Pose, Pose2D,
    ProvisionSettings, RobotHealth,
};

use crate::error::ApiError;
use crate::handler::ApiHandler;

/// Adapter that bridges [`RobotController`] to [`ApiHandler`].
///
/// Operations are submitted and their id returned at once; callers follow
/// progress through the operation queries.
pub struct ControllerAdapter {
    controller: RobotController,
}

impl ControllerAdapter {
    pub fn new(controller: RobotController) -> Self {
        Self { controller }
    }
}

#[async_trait]
impl ApiHandler for ControllerAdapter {
    async fn navigate(&self, target: Pose2D, mode: NavigationMode) -> Result<OperationId, ApiError> {
        let handle = self.controller.navigate_with(target, mode)?;
        Ok(handle.id().clone())
    }

    async fn stop_navigation(&self) -> Result<OperationId, ApiError> {
        Ok(self.controller.stop_navigation()?.id().clone())
    }

    async fn go_home(&self) -> Result<OperationId, ApiError> {
        Ok(self.controller.go_home()?.id().clone())
    }

    async fn provision_map(&self, settings: ProvisionSettings) -> Result<OperationId, ApiError> {
        Ok(self.controller.process_and_upload_map(settings)?.id().clone())
    }

    async fn seed_pois(&self) -> Result<OperationId, ApiError> {
        Ok(self.controller.seed_default_pois()?.id().clone())
    }

    async fn reset_pois(&self) -> Result<OperationId, ApiError> {
        Ok(self.controller.reset_pois()?.id().clone())
    }

    async fn get_operation(&self, id: &OperationId) -> Result<Option<OperationInfo>, ApiError> {
        Ok(self.controller.operation(id))
    }

    async fn query_operations(
        &self,
        query: OperationQuery,
    ) -> Result<OperationPage<OperationInfo>, ApiError> {
        Ok(self.controller.operations(&query))
    }

    async fn health(&self) -> Result<RobotHealth, ApiError> {
        Ok(self.controller.check_connection().await)
    }

    async fn current_pose(&self) -> Result<Pose, ApiError> {
        Ok(self.controller.current_pose().await?)
    }
}
