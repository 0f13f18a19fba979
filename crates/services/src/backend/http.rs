use async_trait::async_trait;
use exam_core::model::TestId;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::ExamBackend;
use crate::config::BackendConfig;
use crate::context::AuthContext;
use crate::error::BackendError;

/// `ExamBackend` over JSON/HTTPS.
///
/// One attempt per call; no retries.
#[derive(Clone)]
pub struct HttpExamBackend {
    client: Client,
    config: BackendConfig,
    token: Option<String>,
}

impl HttpExamBackend {
    /// Build a client using the configured timeout. A token in `auth` takes
    /// precedence over one in `config`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: BackendConfig, auth: &AuthContext) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let token = auth.token().map(str::to_string).or_else(|| config.token.clone());
        Ok(Self {
            client,
            config,
            token,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json(&self, template: &str, test_id: TestId) -> Result<Value, BackendError> {
        let url = self.config.url_for(template, test_id.value())?;
        debug!(%url, "GET");
        let response = self.authorized(self.client.get(url)).send().await?;
        let response = check_status(response, test_id)?;
        decode_body(response).await
    }
}

#[async_trait]
impl ExamBackend for HttpExamBackend {
    async fn fetch_test_view(&self, test_id: TestId) -> Result<Value, BackendError> {
        self.get_json(&self.config.view_path, test_id).await
    }

    async fn submit_selection(&self, test_id: TestId, view_model: &Value) -> Result<(), BackendError> {
        let url = self.config.url_for(&self.config.view_path, test_id.value())?;
        debug!(%url, "PUT");
        let response = self
            .authorized(self.client.put(url))
            .json(view_model)
            .send()
            .await?;
        check_status(response, test_id)?;
        Ok(())
    }

    async fn fetch_review_record(&self, test_id: TestId) -> Result<Value, BackendError> {
        self.get_json(&self.config.review_path, test_id).await
    }
}

fn check_status(response: Response, test_id: TestId) -> Result<Response, BackendError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
        StatusCode::NOT_FOUND => Err(BackendError::NotFound(format!("test {test_id}"))),
        status => Err(BackendError::HttpStatus(status)),
    }
}

async fn decode_body(response: Response) -> Result<Value, BackendError> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|err| BackendError::Decode(err.to_string()))
}
