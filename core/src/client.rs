//! Stateless request builder and response parser for the category
//! prediction API.
//!
//! # Design
//! `ClassifierClient` holds only a `base_url`. A prediction is split into
//! `build_predict_category`, which renders the draft into a document,
//! base64-encodes it and wraps it in a JSON request, and
//! `parse_predict_category`, which turns the response into a category name.
//! The round-trip in between belongs to a `Transport`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::NewTodo;

pub const DEFAULT_BASE_URL: &str = "https://ai.example.com";

/// Request payload: the rendered document, base64 encoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictCategoryRequest {
    pub file: String,
}

/// Response envelope returned by the prediction service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictCategoryResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: PredictCategoryData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictCategoryData {
    pub category: String,
}

impl PredictCategoryResponse {
    pub fn success(category: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: "Category predicted successfully".to_string(),
            data: PredictCategoryData {
                category: category.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassifierClient {
    base_url: String,
}

impl Default for ClassifierClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClassifierClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The document the service classifies, named after the draft's text
    /// and description.
    pub fn render_document(draft: &NewTodo) -> String {
        format!("{}_{}.pdf", draft.text, draft.description)
    }

    pub fn build_predict_category(&self, draft: &NewTodo) -> Result<HttpRequest, ClassifierError> {
        let payload = PredictCategoryRequest {
            file: STANDARD.encode(Self::render_document(draft)),
        };
        let body = serde_json::to_string(&payload).map_err(|e| ClassifierError::Encode {
            message: e.to_string(),
        })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/predict-category", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_predict_category(&self, response: HttpResponse) -> Result<String, ClassifierError> {
        check_status(&response)?;
        let parsed: PredictCategoryResponse = serde_json::from_str(&response.body)
            .map_err(|e| ClassifierError::invalid_response(e.to_string()))?;
        if parsed.status != "success" {
            return Err(ClassifierError::invalid_response(format!(
                "status `{}`: {}",
                parsed.status, parsed.message
            )));
        }
        if parsed.data.category.is_empty() {
            return Err(ClassifierError::invalid_response("empty category"));
        }
        Ok(parsed.data.category)
    }
}

/// Map non-200 status codes to the matching `ClassifierError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ClassifierError> {
    match response.status {
        200 => Ok(()),
        429 | 500..=599 => Err(ClassifierError::unavailable(format!(
            "HTTP {}: {}",
            response.status, response.body
        ))),
        status => Err(ClassifierError::invalid_response(format!(
            "unexpected HTTP {status}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ClassifierClient {
        ClassifierClient::new("http://localhost:9000")
    }

    fn draft() -> NewTodo {
        NewTodo::new(1, "buy milk", "two litres")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn render_document_joins_text_and_description() {
        assert_eq!(ClassifierClient::render_document(&draft()), "buy milk_two litres.pdf");
    }

    #[test]
    fn build_predict_category_produces_correct_request() {
        let req = client().build_predict_category(&draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:9000/predict-category");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: PredictCategoryRequest = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        let decoded = STANDARD.decode(body.file).unwrap();
        assert_eq!(decoded, b"buy milk_two litres.pdf");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let req = ClassifierClient::new("http://localhost:9000/")
            .build_predict_category(&draft())
            .unwrap();
        assert_eq!(req.path, "http://localhost:9000/predict-category");
    }

    #[test]
    fn default_client_targets_the_public_service() {
        let req = ClassifierClient::default().build_predict_category(&draft()).unwrap();
        assert_eq!(req.path, "https://ai.example.com/predict-category");
    }

    #[test]
    fn parse_predict_category_success() {
        let body = r#"{
            "data": { "category": "Shopping" },
            "status": "success",
            "message": "Category predicted successfully"
        }"#;
        let category = client().parse_predict_category(response(200, body)).unwrap();
        assert_eq!(category, "Shopping");
    }

    #[test]
    fn parse_predict_category_reports_failed_status() {
        let body = r#"{"data":{"category":""},"status":"error","message":"model offline"}"#;
        let err = client().parse_predict_category(response(200, body)).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse { ref message } if message.contains("model offline")));
    }

    #[test]
    fn parse_predict_category_rejects_empty_category() {
        let body = serde_json::to_string(&PredictCategoryResponse::success("")).unwrap();
        let err = client().parse_predict_category(response(200, &body)).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse { .. }));
    }

    #[test]
    fn parse_predict_category_bad_json() {
        let err = client().parse_predict_category(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse { .. }));
    }

    #[test]
    fn server_errors_are_unavailable() {
        let err = client().parse_predict_category(response(503, "busy")).unwrap_err();
        assert_eq!(err, ClassifierError::unavailable("HTTP 503: busy"));
        let err = client().parse_predict_category(response(429, "")).unwrap_err();
        assert!(matches!(err, ClassifierError::ServiceUnavailable { .. }));
    }

    #[test]
    fn client_errors_are_invalid_responses() {
        let err = client().parse_predict_category(response(400, "bad file")).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse { .. }));
    }
}
