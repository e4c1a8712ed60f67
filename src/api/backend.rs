//! Backend seam used by the app shell.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{Analysis, SuggestFixResult, ValidationResult};

/// The three backend operations the shell sequences.
pub trait Backend {
    fn validate<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> impl Future<Output = Result<ValidationResult, ApiError>>;

    fn analyze<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> impl Future<Output = Result<Analysis, ApiError>>;

    fn suggest_fix(
        &self,
        analysis: &Value,
    ) -> impl Future<Output = Result<SuggestFixResult, ApiError>>;
}

impl Backend for ApiClient {
    async fn validate<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<ValidationResult, ApiError> {
        self.validate_topology(payload).await
    }

    async fn analyze<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Analysis, ApiError> {
        self.analyze_topology(payload).await
    }

    async fn suggest_fix(&self, analysis: &Value) -> Result<SuggestFixResult, ApiError> {
        ApiClient::suggest_fix(self, analysis).await
    }
}
