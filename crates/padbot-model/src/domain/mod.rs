mod pose;
pub use pose::{Pose, Pose2D};

mod action;
pub use action::{ActionHandle, ActionStatus, NavigationMode};

mod waypoint;
pub use waypoint::Waypoint;

mod pipeline;
pub use pipeline::{PipelineResult, PipelineStatus, ProvisionSettings, StepFailure};

mod seed;
pub use seed::{SeedFailure, SeedReport};

mod health;
pub use health::RobotHealth;

mod error_kind;
pub use error_kind::{ErrorKind, OperationError};

mod operation_id;
pub use operation_id::OperationId;

mod operation_status;
pub use operation_status::OperationStatus;

mod operation;
pub use operation::{OperationInfo, OperationKind, OperationOutcome, OperationReport};

mod operation_query;
pub use operation_query::{OperationPage, OperationQuery};
