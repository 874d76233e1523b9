//! Category prediction for new todos.
//!
//! # Design
//! The service only sees the `Classifier` trait, so tests can inject a
//! deterministic stub. `RemoteClassifier` is the production shape: it builds
//! the request with `ClassifierClient`, runs it through any `Transport`
//! under a timeout, and parses the answer.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::client::ClassifierClient;
use crate::error::ClassifierError;
use crate::http::Transport;
use crate::types::NewTodo;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Assigns a category name to a draft todo.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn predict_category(&self, draft: &NewTodo) -> Result<String, ClassifierError>;
}

/// Classifier backed by the prediction API, reached through `T`.
#[derive(Debug, Clone)]
pub struct RemoteClassifier<T> {
    client: ClassifierClient,
    transport: T,
    timeout: Duration,
}

impl<T: Transport> RemoteClassifier<T> {
    pub fn new(client: ClassifierClient, transport: T) -> Self {
        Self {
            client,
            transport,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl<T: Transport> Classifier for RemoteClassifier<T> {
    async fn predict_category(&self, draft: &NewTodo) -> Result<String, ClassifierError> {
        let request = self.client.build_predict_category(draft)?;
        debug!(path = %request.path, "requesting category prediction");
        let response = tokio::time::timeout(self.timeout, self.transport.execute(request))
            .await
            .map_err(|_| ClassifierError::Timeout {
                after_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })??;
        let category = self.client.parse_predict_category(response)?;
        debug!(%category, "category predicted");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PredictCategoryResponse;
    use crate::http::{HttpRequest, HttpResponse};

    struct FixedTransport {
        delay: Duration,
        response: HttpResponse,
    }

    #[async_trait]
    impl Transport for FixedTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ClassifierError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.response.clone())
        }
    }

    struct UnreachableTransport;

    #[async_trait]
    impl Transport for UnreachableTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, ClassifierError> {
            Err(ClassifierError::unavailable("connection refused"))
        }
    }

    fn answering(category: &str, delay: Duration) -> FixedTransport {
        let body = serde_json::to_string(&PredictCategoryResponse::success(category)).unwrap();
        FixedTransport {
            delay,
            response: HttpResponse::json(body),
        }
    }

    #[tokio::test]
    async fn returns_predicted_category() {
        let classifier = RemoteClassifier::new(ClassifierClient::default(), answering("Health", Duration::ZERO));
        let category = classifier
            .predict_category(&NewTodo::new(1, "run", "5k"))
            .await
            .unwrap();
        assert_eq!(category, "Health");
    }

    #[tokio::test]
    async fn slow_transport_times_out() {
        let classifier = RemoteClassifier::new(
            ClassifierClient::default(),
            answering("Health", Duration::from_millis(300)),
        )
        .with_timeout(Duration::from_millis(20));
        let err = classifier
            .predict_category(&NewTodo::new(1, "run", "5k"))
            .await
            .unwrap_err();
        assert_eq!(err, ClassifierError::Timeout { after_ms: 20 });
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let classifier = RemoteClassifier::new(ClassifierClient::default(), UnreachableTransport);
        let err = classifier
            .predict_category(&NewTodo::new(1, "run", "5k"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifierError::ServiceUnavailable { .. }));
    }

    #[tokio::test]
    async fn error_response_is_invalid() {
        let transport = FixedTransport {
            delay: Duration::ZERO,
            response: HttpResponse::json(r#"{"status":"error","message":"nope","data":{"category":""}}"#),
        };
        let classifier = RemoteClassifier::new(ClassifierClient::default(), transport);
        let err = classifier
            .predict_category(&NewTodo::new(1, "run", "5k"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse { .. }));
    }
}
