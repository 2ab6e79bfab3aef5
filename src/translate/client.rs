use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::interface::{Language, TranslationTransport};
use crate::error::TranslateError;

pub const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";

/// HTTP transport for the MyMemory `get` endpoint.
#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    client: Client,
    api_url: String,
    timeout: Duration,
}

impl MyMemoryClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TranslationTransport for MyMemoryClient {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        let langpair = target.direction().langpair();
        debug!("Requesting translation langpair={} chars={}", langpair, text.chars().count());

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", text), ("langpair", langpair)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslateError::RateLimited);
        }
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        // Reading the body can still hit the timeout; that is a transport failure.
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| TranslateError::Malformed(format!("body is not JSON: {}", e)))?;
        parse_response(&body)
    }
}

/// Accepts only `responseStatus == 200` with a non-empty `translatedText`.
fn parse_response(body: &Value) -> Result<String, TranslateError> {
    // MyMemory has been seen sending the code as a string, so "200" counts too.
    let status = match &body["responseStatus"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    if status != Some(200) {
        return Err(TranslateError::Malformed(format!(
            "responseStatus was {}",
            body["responseStatus"]
        )));
    }

    match body["responseData"]["translatedText"].as_str() {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(TranslateError::Malformed(
            "responseData.translatedText missing".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::io::Write;

    fn client_for(server: &Server) -> MyMemoryClient {
        MyMemoryClient::new(format!("{}/get", server.url()), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn returns_translated_text_verbatim() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/get")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Hello world".into()),
                Matcher::UrlEncoded("langpair".into(), "en|hi".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"responseStatus": 200, "responseData": {"translatedText": "नमस्ते दुनिया"}})
                    .to_string(),
            )
            .create_async()
            .await;

        let out = client_for(&server)
            .translate("Hello world", Language::Hindi)
            .await
            .unwrap();
        assert_eq!(out, "नमस्ते दुनिया");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn maps_429_to_rate_limited() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = client_for(&server)
            .translate("Hi", Language::English)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::RateLimited));
    }

    #[tokio::test]
    async fn maps_server_error_to_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server)
            .translate("Hi", Language::Hindi)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Status(503)));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>quota page</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .translate("Hi", Language::Hindi)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Malformed(_)));
    }

    #[tokio::test]
    async fn slow_response_times_out_as_transport_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/get")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(500));
                w.write_all(b"{}")
            })
            .create_async()
            .await;

        let client =
            MyMemoryClient::new(format!("{}/get", server.url()), Duration::from_millis(50));
        let err = client.translate("Hi", Language::Hindi).await.unwrap_err();

        assert!(matches!(err, TranslateError::Transport(_)));
    }

    #[test]
    fn parse_requires_success_code_and_text() {
        let ok = json!({"responseStatus": "200", "responseData": {"translatedText": "X"}});
        assert_eq!(parse_response(&ok).unwrap(), "X");

        let wrong_code = json!({"responseStatus": 403, "responseData": {"translatedText": "X"}});
        assert!(parse_response(&wrong_code).is_err());

        let empty = json!({"responseStatus": 200, "responseData": {"translatedText": ""}});
        assert!(parse_response(&empty).is_err());

        let missing = json!({"responseStatus": 200});
        assert!(parse_response(&missing).is_err());
    }
}
