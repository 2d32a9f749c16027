use crate::{
    config::DeploymentConfig,
    constants::{API_KEY_HEADER, EMPTY_REMOTE_REPLY},
    errors::{AssistantError, AssistantResult},
    logging::log_api_call,
    models::{ApiCallLog, RemoteRequest, SessionId},
};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

const SUMMARY_CHARS: usize = 60;

/// Client for the Lambda endpoint that fronts the Bedrock agent.
#[derive(Debug, Clone)]
pub struct LambdaClient {
    client: Client,
    deployment: DeploymentConfig,
}

impl LambdaClient {
    pub fn new(deployment: DeploymentConfig, timeout: Option<Duration>) -> AssistantResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            deployment,
        })
    }

    /// Posts one user message to `url` and returns the reply text.
    pub async fn invoke(
        &self,
        url: &str,
        text: &str,
        session_id: &SessionId,
    ) -> AssistantResult<String> {
        let payload = RemoteRequest {
            message: text,
            session_id: session_id.as_str(),
            agent_id: self.deployment.agent_id.as_deref(),
            agent_alias_id: self.deployment.agent_alias_id.as_deref(),
        };

        log::info!("calling Lambda function at: {}", url);
        let started = Instant::now();

        let mut request = self.client.post(url).json(&payload);
        if let Some(api_key) = &self.deployment.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                record_call(url, text, 0, started);
                return Err(e.into());
            }
        };

        let status = response.status();
        record_call(url, text, status.as_u16(), started);
        if !status.is_success() {
            return Err(AssistantError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))?;
        log::debug!("Lambda response: {}", data);

        Ok(data["message"]
            .as_str()
            .filter(|message| !message.is_empty())
            .unwrap_or(EMPTY_REMOTE_REPLY)
            .to_string())
    }
}

fn record_call(url: &str, text: &str, status: u16, started: Instant) {
    let summary: String = text.chars().take(SUMMARY_CHARS).collect();
    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: url.to_string(),
        request_summary: format!("message: {:?}", summary),
        response_status: status,
        response_time_ms: started.elapsed().as_millis(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn deployment() -> DeploymentConfig {
        DeploymentConfig {
            api_key: Some("test-api-key".to_string()),
            agent_id: Some("AGENT1".to_string()),
            agent_alias_id: Some("ALIAS1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "message": "hello",
                "sessionId": "session-1",
                "agentId": "AGENT1",
                "agentAliasId": "ALIAS1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Hi from Bedrock"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LambdaClient::new(deployment(), None).unwrap();
        let reply = client
            .invoke(
                &format!("{}/chat", mock_server.uri()),
                "hello",
                &SessionId::from("session-1"),
            )
            .await
            .unwrap();

        assert_eq!(reply, "Hi from Bedrock");
    }

    #[tokio::test]
    async fn test_invoke_missing_message_uses_fallback() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "x" })))
            .mount(&mock_server)
            .await;

        let client = LambdaClient::new(deployment(), None).unwrap();
        let reply = client
            .invoke(&mock_server.uri(), "hello", &SessionId::from("s"))
            .await
            .unwrap();

        assert_eq!(reply, EMPTY_REMOTE_REPLY);
    }

    #[tokio::test]
    async fn test_invoke_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = LambdaClient::new(deployment(), None).unwrap();
        let err = client
            .invoke(&mock_server.uri(), "hello", &SessionId::from("s"))
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::HttpStatus(500)));
    }

    #[tokio::test]
    async fn test_invoke_invalid_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = LambdaClient::new(deployment(), None).unwrap();
        let err = client
            .invoke(&mock_server.uri(), "hello", &SessionId::from("s"))
            .await
            .unwrap_err();

        assert!(matches!(err, AssistantError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_invoke_without_api_key_omits_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(json!({ "message": "hi", "sessionId": "s" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LambdaClient::new(DeploymentConfig::default(), None).unwrap();
        let reply = client
            .invoke(&mock_server.uri(), "hi", &SessionId::from("s"))
            .await
            .unwrap();
        assert_eq!(reply, "ok");

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("x-api-key").is_none());
    }

    #[tokio::test]
    async fn test_invoke_times_out_when_configured() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "message": "late" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = LambdaClient::new(deployment(), Some(Duration::from_millis(100))).unwrap();
        let err = client
            .invoke(&mock_server.uri(), "hello", &SessionId::from("s"))
            .await
            .unwrap_err();

        match err {
            AssistantError::Request(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
