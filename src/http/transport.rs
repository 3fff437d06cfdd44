// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport for the Salsa API
//!
//! One persistent reqwest client per connector: always POST, a short fixed
//! timeout, and a session-scoped cookie store that carries the login
//! session across calls. API paths resolve against the configured host;
//! TLS requests force the `https` scheme at send time.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::params::Params;
use super::xml::XmlElement;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// User agent string
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Accept invalid certificates (the legacy endpoints need this)
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(5),
            accept_invalid_certs: true,
        }
    }
}

/// HTTP transport with a session cookie store
pub struct Transport {
    client: Client,
    host: String,
}

impl Transport {
    /// Open a transport against a host base URL.
    ///
    /// The cookie store lives as long as the transport; dropping it ends
    /// the session.
    pub fn open(host: impl Into<String>, config: &TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            host: host.into(),
        })
    }

    /// The configured host base URL
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Resolve a path against the host; absolute URLs pass through.
    /// With `use_tls`, the scheme is upgraded to `https`.
    fn resolve(&self, path: &str, use_tls: bool) -> Result<Url> {
        let mut url = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.host, path)
        };
        if use_tls && url.starts_with("http://") {
            url = url.replacen("http://", "https://", 1);
        }
        Ok(Url::parse(&url)?)
    }

    /// POST a serialized parameter body and return the raw response text.
    /// An empty body counts as a failed connection.
    async fn send(&self, url: Url, body: String) -> Result<String> {
        tracing::debug!(%url, body_len = body.len(), "POST");
        let response = self
            .client
            .post(url.clone())
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::connection(format!("{url}: {e}")))?;

        let text = response
            .text()
            .await
            .map_err(|e| Error::connection(format!("{url}: {e}")))?;

        if text.trim().is_empty() {
            return Err(Error::connection(format!("empty response from {url}")));
        }
        tracing::debug!(%url, response_len = text.len(), "response received");
        Ok(text)
    }

    /// POST parameters and parse the response as XML.
    ///
    /// A response carrying an `<error>` marker is still returned; callers
    /// inspect the marker themselves.
    pub async fn post(&self, path: &str, params: &Params, use_tls: bool) -> Result<XmlElement> {
        let url = self.resolve(path, use_tls)?;
        let body = self.send(url, params.serialize()).await?;
        XmlElement::parse(&body)
    }

    /// POST parameters and parse the response as JSON
    pub async fn post_json(&self, path: &str, params: &Params) -> Result<serde_json::Value> {
        let url = self.resolve(path, false)?;
        let body = self.send(url, params.serialize()).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("malformed JSON: {e}")))
    }

    /// POST parameters to a non-API form endpoint and return the raw body,
    /// with no parsing or error extraction
    pub async fn submit_form(&self, path: &str, params: &Params) -> Result<String> {
        let url = self.resolve(path, false)?;
        self.send(url, params.serialize()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport_for(server: &MockServer) -> Transport {
        Transport::open(server.uri(), &TransportConfig::default()).unwrap()
    }

    #[test]
    fn test_resolve_paths() {
        let transport =
            Transport::open("http://salsa.example.org", &TransportConfig::default()).unwrap();

        let url = transport.resolve("/api/getCount.sjs", false).unwrap();
        assert_eq!(url.as_str(), "http://salsa.example.org/api/getCount.sjs");

        let url = transport.resolve("/api/authenticate.sjs", true).unwrap();
        assert_eq!(url.scheme(), "https");

        let url = transport
            .resolve("http://other.example.org/save", false)
            .unwrap();
        assert_eq!(url.host_str(), Some("other.example.org"));
    }

    #[tokio::test]
    async fn test_post_parses_xml() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/getObject.sjs"))
            .and(body_string("object=supporter&key=11"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<data><supporter><item/></supporter></data>"),
            )
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let mut params = Params::new();
        params.push("object", "supporter");
        params.push("key", "11");

        let xml = transport
            .post("/api/getObject.sjs", &params, false)
            .await
            .unwrap();
        assert!(xml.child("supporter").is_some());
    }

    #[tokio::test]
    async fn test_empty_body_is_connection_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let err = transport
            .post("/api/getObjects.sjs", &Params::new(), false)
            .await
            .unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn test_unparseable_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<data><broken>"))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let err = transport
            .post("/api/getObjects.sjs", &Params::new(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_post_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/getObjects.sjs"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{"Email":"a@b.com"}]"#))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let mut params = Params::new();
        params.push("object", "supporter");
        params.push("json", "true");

        let value = transport.post_json("/api/getObjects.sjs", &params).await.unwrap();
        assert_eq!(value[0]["Email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_submit_form_returns_raw_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/o/123/p/salsa/website/form"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>thanks</html>"))
            .mount(&server)
            .await;

        let transport = transport_for(&server);
        let body = transport
            .submit_form("/o/123/p/salsa/website/form", &Params::new())
            .await
            .unwrap();
        assert_eq!(body, "<html>thanks</html>");
    }
}
