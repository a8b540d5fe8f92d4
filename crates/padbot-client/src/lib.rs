mod api;
pub use api::{CommandBody, RobotApi};

mod client;
pub use client::RobotClient;

mod config;
pub use config::ClientConfig;

pub mod endpoints;

mod errors;
pub use errors::ClientError;

mod wire;
pub use wire::{
    ActionRequest, GoHomeOptions, MoveOptions, MoveToOptions, Target, decode_action_handle,
    decode_action_status,
};

pub use reqwest::Method;
