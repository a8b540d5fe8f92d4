use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use padbot_model::{ActionHandle, ActionStatus};

use crate::{
    api::{CommandBody, RobotApi},
    config::ClientConfig,
    endpoints,
    errors::ClientError,
    wire::{ActionRequest, decode_action_handle, decode_action_status},
};

/// HTTP implementation of [`RobotApi`].
#[derive(Debug, Clone)]
pub struct RobotClient {
    http: reqwest::Client,
    base_url: String,
    upload_timeout: Duration,
}

impl RobotClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(cfg.timeout_ms))
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url(),
            upload_timeout: Duration::from_millis(cfg.upload_timeout_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        ensure_success(response.status())?;
        Ok(response)
    }
}

fn ensure_success(status: StatusCode) -> Result<(), ClientError> {
    let code = status.as_u16();
    if (200..=204).contains(&code) {
        Ok(())
    } else {
        Err(ClientError::Http { code })
    }
}

#[async_trait]
impl RobotApi for RobotClient {
    #[instrument(level = "debug", skip(self, request), fields(action = %request.action_name))]
    async fn dispatch_action(&self, request: &ActionRequest) -> Result<ActionHandle, ClientError> {
        let response = self
            .send(self.http.post(self.url(endpoints::ACTIONS)).json(request))
            .await?;
        let body = response.bytes().await?;
        let handle = decode_action_handle(&body)?;

        debug!(action_id = %handle, "action dispatched");
        Ok(handle)
    }

    async fn poll_action(&self, handle: &ActionHandle) -> Result<ActionStatus, ClientError> {
        let response = self
            .send(self.http.get(self.url(&endpoints::action(handle.as_str()))))
            .await?;
        let body = response.bytes().await?;
        let status = decode_action_status(&body)?;

        trace!(action_id = %handle, ?status, "action polled");
        Ok(status)
    }

    #[instrument(level = "debug", skip(self, body))]
    async fn simple_command(
        &self,
        method: Method,
        path: &str,
        body: CommandBody,
    ) -> Result<(), ClientError> {
        let request = self.http.request(method, self.url(path));
        let request = match body {
            CommandBody::Empty => request,
            CommandBody::Json(value) => request.json(&value),
            CommandBody::Binary(bytes) => request
                .header(CONTENT_TYPE, "application/octet-stream")
                .timeout(self.upload_timeout)
                .body(bytes),
        };
        self.send(request).await?;

        trace!("command accepted");
        Ok(())
    }

    async fn fetch_json(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
