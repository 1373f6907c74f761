use crate::actors::messages::{AnalysisError, AppError, GENERIC_SERVICE_MESSAGE};
use crate::actors::traits::AnalysisService;
use crate::config::ClientConfig;
use crate::models::{AnalysisRequest, AnalysisResult, ServiceEnvelope};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

/// HTTP client for the remote analysis service (`POST /analyze`).
#[derive(Clone)]
pub struct HttpAnalysisService {
    client: Client,
    endpoint: Url,
}

impl HttpAnalysisService {
    /// Builds a client for the endpoint described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.analyze_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        debug!("Posting {} chars for analysis", request.text.chars().count());

        // `json` also sets `Content-Type: application/json`.
        let res = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        interpret_response(status, &body)
    }
}

/// Maps a raw HTTP response onto the service contract.
///
/// * body is not an envelope → `Transport`
/// * non-2xx or `success: false` → `Service` with the service message, or a generic one
/// * `success: true` without a well-formed `result` → `Transport`
pub fn interpret_response(status: StatusCode, body: &str) -> Result<AnalysisResult, AnalysisError> {
    let envelope: ServiceEnvelope = serde_json::from_str(body).map_err(|e| {
        warn!("Unparseable response (status {}): {}", status, e);
        AnalysisError::Transport(format!("Invalid response body (status {}): {}", status, e))
    })?;

    if !status.is_success() || !envelope.success {
        let message = envelope
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| GENERIC_SERVICE_MESSAGE.to_string());
        warn!("Analysis service reported failure (status {}): {}", status, message);
        return Err(AnalysisError::Service(message));
    }

    let result = envelope
        .result
        .ok_or_else(|| AnalysisError::Transport("Response is missing `result`".to_string()))?;
    serde_json::from_value(result)
        .map_err(|e| AnalysisError::Transport(format!("Malformed `result`: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> HttpAnalysisService {
        let config = ClientConfig {
            server_url: server.uri(),
            ..ClientConfig::default()
        };
        HttpAnalysisService::new(&config).unwrap()
    }

    fn request(text: &str) -> AnalysisRequest {
        AnalysisRequest {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_analyze_success() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let service = service_for(&mock_server);

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "text": "The radical leftist mob attacked..." })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "result": {
                    "text": "The radical leftist mob attacked...",
                    "is_neutral": false,
                    "word_count": 5,
                    "overall_score": 42,
                    "biases": [{
                        "type": "Political",
                        "score": 12,
                        "explanation": "...",
                        "matches": ["radical", "radical", "mob"],
                        "count": 3
                    }]
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = service.analyze(request("The radical leftist mob attacked...")).await;

        // 3. Assert
        let result = result.unwrap();
        assert!(!result.is_neutral);
        assert_eq!(result.overall_score, 42.0);
        assert_eq!(result.biases[0].matches, vec!["radical", "radical", "mob"]);
    }

    #[tokio::test]
    async fn test_analyze_server_error_with_unparseable_body() {
        let mock_server = MockServer::start().await;
        let service = service_for(&mock_server);

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let result = service.analyze(request("Hello")).await;

        match result {
            Err(AnalysisError::Transport(cause)) => assert!(cause.contains("500")),
            other => panic!("Expected AnalysisError::Transport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_analyze_service_error_message_is_kept() {
        let mock_server = MockServer::start().await;
        let service = service_for(&mock_server);

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": "Text too short to analyze. Please provide at least 3 characters."
            })))
            .mount(&mock_server)
            .await;

        let result = service.analyze(request("Hi")).await;

        assert_eq!(
            result,
            Err(AnalysisError::Service(
                "Text too short to analyze. Please provide at least 3 characters.".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_analyze_connection_refused_is_transport_error() {
        // Nothing listens on the discarded server's port once it is dropped.
        let uri = {
            let mock_server = MockServer::start().await;
            mock_server.uri()
        };
        let config = ClientConfig {
            server_url: uri,
            ..ClientConfig::default()
        };
        let service = HttpAnalysisService::new(&config).unwrap();

        let result = service.analyze(request("Hello")).await;
        assert!(matches!(result, Err(AnalysisError::Transport(_))));
    }

    #[test]
    fn test_interpret_success_false_without_message() {
        let result = interpret_response(StatusCode::OK, r#"{"success": false}"#);
        assert_eq!(result, Err(AnalysisError::Service(GENERIC_SERVICE_MESSAGE.to_string())));

        let result = interpret_response(StatusCode::OK, r#"{"success": false, "error": ""}"#);
        assert_eq!(result, Err(AnalysisError::Service(GENERIC_SERVICE_MESSAGE.to_string())));
    }

    #[test]
    fn test_interpret_http_error_overrides_success_flag() {
        let body = r#"{"success": true, "result": {"is_neutral": true, "word_count": 1}}"#;
        let result = interpret_response(StatusCode::BAD_GATEWAY, body);
        assert_eq!(result, Err(AnalysisError::Service(GENERIC_SERVICE_MESSAGE.to_string())));
    }

    #[test]
    fn test_interpret_malformed_result_is_transport_error() {
        let missing = interpret_response(StatusCode::OK, r#"{"success": true}"#);
        assert!(matches!(missing, Err(AnalysisError::Transport(_))));

        let wrong_shape = interpret_response(
            StatusCode::OK,
            r#"{"success": true, "result": {"is_neutral": "maybe"}}"#,
        );
        assert!(matches!(wrong_shape, Err(AnalysisError::Transport(_))));

        let not_an_object = interpret_response(StatusCode::OK, "[1, 2, 3]");
        assert!(matches!(not_an_object, Err(AnalysisError::Transport(_))));
    }

    #[test]
    fn test_interpret_neutral_result_with_null_biases() {
        let body = r#"{"success": true, "result": {"is_neutral": true, "word_count": 3, "biases": null}}"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();
        assert!(result.is_neutral);
        assert_eq!(result.word_count, 3);
        assert!(result.biases.is_empty());
    }

    #[test]
    fn test_interpret_neutral_result() {
        let body = r#"{"success": true, "result": {"is_neutral": true, "word_count": 12, "overall_score": 0, "biases": []}}"#;
        let result = interpret_response(StatusCode::OK, body).unwrap();
        assert!(result.is_neutral);
        assert_eq!(result.word_count, 12);
    }
}
