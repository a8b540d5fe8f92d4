//! Supervision and sequencing of long-running robot operations.
//!
//! - [`ActionSupervisor`] polls a dispatched action to a terminal state.
//! - [`MapProvisioningPipeline`] installs a map and home pose in a fixed step order.
//! - [`PoiSeeder`] re-creates the default POIs from a local waypoint list.
//! - [`RobotController`] runs all of the above on a bounded worker pool and
//!   delivers every result through one dispatcher task.

pub mod error;
pub use error::CoreError;

pub mod supervisor;
pub use supervisor::{ActionSupervisor, SupervisorConfig};

pub mod pipeline;
pub use pipeline::{
    MapProvisioningPipeline, PipelineConfig, ProvisioningStep, StepAction, resolve_home_dock,
};

pub mod seeder;
pub use seeder::{PoiSeeder, SeederConfig, load_waypoints};

pub mod state;
pub use state::OperationState;

pub mod controller;
pub use controller::{ControllerConfig, OperationEvent, OperationHandle, RobotController};

mod subscribe;
pub use subscribe::Subscribe;

#[cfg(test)]
pub(crate) mod testing;
