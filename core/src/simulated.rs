//! In-process stand-in for the category prediction service.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::trace;

use crate::client::PredictCategoryResponse;
use crate::error::ClassifierError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::seed::CATEGORY_NAMES;

/// Default latency bounds in milliseconds, upper bound exclusive.
pub const DEFAULT_DELAY_MS: Range<u64> = 10..500;

/// Answers every request after a uniformly random delay with a category
/// drawn uniformly from `vocabulary`. The request body is not inspected.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    vocabulary: Vec<String>,
    delay_ms: Range<u64>,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new(CATEGORY_NAMES.iter().map(|name| (*name).to_string()).collect())
    }
}

impl SimulatedTransport {
    pub fn new(vocabulary: Vec<String>) -> Self {
        Self {
            vocabulary,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }

    /// An empty range pins the delay to its start.
    pub fn with_delay_ms(mut self, delay_ms: Range<u64>) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClassifierError> {
        // ThreadRng is not Send, so draw everything before the first await.
        let (delay_ms, category) = {
            let mut rng = rand::rng();
            let delay_ms = if self.delay_ms.is_empty() {
                self.delay_ms.start
            } else {
                rng.random_range(self.delay_ms.clone())
            };
            (delay_ms, self.vocabulary.choose(&mut rng).cloned())
        };
        trace!(path = %request.path, delay_ms, "simulating classifier call");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let Some(category) = category else {
            return Ok(HttpResponse {
                status: 503,
                headers: Vec::new(),
                body: "no categories available".to_string(),
            });
        };
        let body = serde_json::to_string(&PredictCategoryResponse::success(&category))
            .map_err(|e| ClassifierError::invalid_response(e.to_string()))?;
        Ok(HttpResponse::json(body))
    }
}
