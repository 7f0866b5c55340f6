use crate::{
    chat::Mode,
    config::{Config, TransportKind},
    error::{AResult, ChatError},
};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};

/// Delivers one user message to the chat backend and returns the reply text.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync + 'static {
    async fn send_chat(&self, text: &str, mode: Mode) -> AResult<String>;
    fn endpoint(&self) -> String;
}

#[derive(Serialize)]
struct ChatBody<'a> {
    text: &'a str,
    mode: Mode,
}

#[derive(Deserialize)]
struct ChatReply {
    response: String,
}

/// `POST <base>/chat` with `{"text", "mode"}`.
pub struct JsonTransport {
    client: reqwest::Client,
    url: String,
}

impl JsonTransport {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait::async_trait]
impl ChatTransport for JsonTransport {
    async fn send_chat(&self, text: &str, mode: Mode) -> AResult<String> {
        let res = self
            .client
            .post(&self.url)
            .json(&ChatBody { text, mode })
            .send()
            .await?;

        read_reply(res).await
    }

    fn endpoint(&self) -> String {
        format!("POST {}", self.url)
    }
}

/// `GET <base>/chat-response/?query=<text>&job_title=<mode>`.
pub struct QueryTransport {
    client: reqwest::Client,
    url: String,
}

impl QueryTransport {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/chat-response/", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait::async_trait]
impl ChatTransport for QueryTransport {
    async fn send_chat(&self, text: &str, mode: Mode) -> AResult<String> {
        let res = self
            .client
            .get(&self.url)
            .query(&[("query", text), ("job_title", mode.as_wire())])
            .send()
            .await?;

        read_reply(res).await
    }

    fn endpoint(&self) -> String {
        format!("GET {}", self.url)
    }
}

async fn read_reply(res: reqwest::Response) -> AResult<String> {
    let status = res.status();
    if !status.is_success() {
        return Err(ChatError::BadStatus(status));
    }

    let body = res.bytes().await?;
    let reply: ChatReply = serde_json::from_slice(&body)?;
    Ok(reply.response)
}

/// Builds the transport selected in `config`. A timeout of zero disables the timeout.
pub fn from_config(config: &Config) -> AResult<Arc<dyn ChatTransport>> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout_secs.filter(|s| *s > 0) {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build().map_err(ChatError::ClientBuild)?;

    let transport: Arc<dyn ChatTransport> = match config.transport {
        TransportKind::Json => Arc::new(JsonTransport::new(client, &config.base_url)),
        TransportKind::Query => Arc::new(QueryTransport::new(client, &config.base_url)),
    };

    tracing::info!(endpoint = %transport.endpoint(), "chat transport ready");
    Ok(transport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    #[tokio::test]
    async fn json_post_contract() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"text": "Hello", "mode": "job-match"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there"})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = JsonTransport::new(reqwest::Client::new(), &format!("{}/", server.uri()));
        let reply = transport.send_chat("Hello", Mode::JobMatch).await.unwrap();
        assert_eq!(reply, "Hi there");
    }

    #[tokio::test]
    async fn query_get_contract() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chat-response/"))
            .and(query_param("query", "what fits me?"))
            .and(query_param("job_title", "resume-job"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"query": "what fits me?", "response": "Data Engineer"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = QueryTransport::new(reqwest::Client::new(), &server.uri());
        let reply = transport
            .send_chat("what fits me?", Mode::ResumeJob)
            .await
            .unwrap();
        assert_eq!(reply, "Data Engineer");
    }

    #[tokio::test]
    async fn non_success_status_is_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"response": "busy"})))
            .mount(&server)
            .await;

        let transport = JsonTransport::new(reqwest::Client::new(), &server.uri());
        let err = transport.send_chat("Hello", Mode::Info).await.unwrap_err();
        assert!(matches!(err, ChatError::BadStatus(s) if s.as_u16() == 503));
        assert!(err.is_exchange_failure());
    }

    #[tokio::test]
    async fn malformed_body_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "wrong key"})))
            .mount(&server)
            .await;

        let transport = JsonTransport::new(reqwest::Client::new(), &server.uri());
        let err = transport.send_chat("Hello", Mode::Info).await.unwrap_err();
        assert!(matches!(err, ChatError::MalformedBody(_)));
        assert!(err.is_exchange_failure());
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let transport = JsonTransport::new(reqwest::Client::new(), &uri);
        let err = transport.send_chat("Hello", Mode::Info).await.unwrap_err();
        assert!(matches!(err, ChatError::Network(_)));
        assert!(err.is_exchange_failure());
    }

    #[test]
    fn from_config_picks_strategy() {
        let mut config = Config {
            base_url: "http://localhost:8000/".into(),
            ..Config::default()
        };
        let transport = from_config(&config).unwrap();
        assert_eq!(transport.endpoint(), "POST http://localhost:8000/chat");

        config.transport = TransportKind::Query;
        config.request_timeout_secs = Some(0);
        let transport = from_config(&config).unwrap();
        assert_eq!(
            transport.endpoint(),
            "GET http://localhost:8000/chat-response/"
        );
    }
}
