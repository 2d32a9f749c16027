use crate::{
    api::LambdaClient,
    constants::MISSING_URL_ADVISORY,
    models::SessionId,
    responses::mock_reply,
    session::RequestId,
    settings::{ResponseMode, Settings},
};
use std::time::Duration;
use tokio::time::sleep;

/// Everything needed to answer one user message.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub request: RequestId,
    pub text: String,
    pub settings: Settings,
    pub session_id: SessionId,
}

/// Outcome of resolving an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A canned, advisory or remote answer.
    Text(String),
    /// The remote call failed; the text describes why.
    Failed(String),
}

pub struct ResponseResolver {
    lambda: LambdaClient,
    delay: Duration,
}

impl ResponseResolver {
    pub fn new(lambda: LambdaClient, delay: Duration) -> Self {
        Self { lambda, delay }
    }

    /// Produces the reply for `exchange`. Never fails: remote errors come
    /// back as `Reply::Failed`.
    pub async fn resolve(&self, exchange: &Exchange) -> Reply {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        log::debug!("current mode: {}", exchange.settings.mode);

        match exchange.settings.mode {
            ResponseMode::Mock => {
                log::debug!("using mock response for: {}", exchange.text);
                Reply::Text(mock_reply(&exchange.text))
            }
            ResponseMode::Remote => {
                let url = exchange.settings.remote_url.trim();
                if url.is_empty() {
                    return Reply::Text(MISSING_URL_ADVISORY.to_string());
                }

                match self
                    .lambda
                    .invoke(url, &exchange.text, &exchange.session_id)
                    .await
                {
                    Ok(text) => Reply::Text(text),
                    Err(e) => {
                        log::error!("error calling Lambda function: {}", e);
                        Reply::Failed(format!(
                            "Error calling Lambda function: {}. Please check your Lambda URL and connection.",
                            e
                        ))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DeploymentConfig, responses::MOCK_RESPONSES};
    use serde_json::json;
    use std::time::Instant;
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    fn resolver(delay: Duration) -> ResponseResolver {
        let lambda = LambdaClient::new(DeploymentConfig::default(), None).unwrap();
        ResponseResolver::new(lambda, delay)
    }

    fn exchange(text: &str, mode: ResponseMode, remote_url: &str) -> Exchange {
        Exchange {
            request: RequestId::new(1),
            text: text.to_string(),
            settings: Settings {
                mode,
                remote_url: remote_url.to_string(),
            },
            session_id: SessionId::from("test-session"),
        }
    }

    #[tokio::test]
    async fn test_mock_mode_what_is_devops() {
        let reply = resolver(Duration::ZERO)
            .resolve(&exchange("What is DevOps", ResponseMode::Mock, ""))
            .await;
        assert_eq!(reply, Reply::Text(MOCK_RESPONSES[0].1.to_string()));
    }

    #[tokio::test]
    async fn test_remote_mode_without_url_is_advisory() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "remote" })))
            .expect(0)
            .mount(&mock_server)
            .await;

        for blank in ["", "   ", "\t\n"] {
            let reply = resolver(Duration::ZERO)
                .resolve(&exchange("hello", ResponseMode::Remote, blank))
                .await;
            assert_eq!(reply, Reply::Text(MISSING_URL_ADVISORY.to_string()));
        }
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_url_is_trimmed_before_posting() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "remote" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let padded = format!("  {}  ", mock_server.uri());
        let reply = resolver(Duration::ZERO)
            .resolve(&exchange("hello", ResponseMode::Remote, &padded))
            .await;
        assert_eq!(reply, Reply::Text("remote".to_string()));
    }

    #[tokio::test]
    async fn test_remote_mode_ignores_mock_table() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "remote" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let reply = resolver(Duration::ZERO)
            .resolve(&exchange("what is devops", ResponseMode::Remote, &mock_server.uri()))
            .await;
        assert_eq!(reply, Reply::Text("remote".to_string()));
    }

    #[tokio::test]
    async fn test_remote_http_error_is_caught() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let reply = resolver(Duration::ZERO)
            .resolve(&exchange("hello", ResponseMode::Remote, &mock_server.uri()))
            .await;
        match reply {
            Reply::Failed(text) => {
                assert!(text.starts_with("Error calling Lambda function:"));
                assert!(text.contains("500"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_caught() {
        let reply = resolver(Duration::ZERO)
            .resolve(&exchange("hello", ResponseMode::Remote, "http://127.0.0.1:1/chat"))
            .await;
        assert!(matches!(reply, Reply::Failed(_)));
    }

    #[tokio::test]
    async fn test_delay_applies_in_mock_mode() {
        let started = Instant::now();
        resolver(Duration::from_millis(50))
            .resolve(&exchange("help", ResponseMode::Mock, ""))
            .await;
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
