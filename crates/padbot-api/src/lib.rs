mod config;
pub use config::ApiConfig;

mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod adapter;
pub use adapter::ControllerAdapter;

mod http;
pub use http::HttpApi;

pub use axum;
