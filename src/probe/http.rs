// src/probe/http.rs
use super::Probe;
use crate::check::CheckValue;
use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// GETs a URL. A 2xx response passes with the status code as its value.
pub struct HttpProbe {
    url: Url,
    client: Client,
    expected_status: Option<StatusCode>,
}

impl HttpProbe {
    pub fn new(url: Url) -> Result<Self> {
        // No client timeout: the engine timeboxes every check.
        let client = Client::builder().build()?;

        Ok(Self {
            url,
            client,
            expected_status: None,
        })
    }

    /// Require one exact status code instead of any 2xx.
    pub fn expect_status(mut self, status: StatusCode) -> Self {
        self.expected_status = Some(status);
        self
    }
}

#[async_trait]
impl Probe for HttpProbe {
    fn describe(&self) -> String {
        format!("GET {}", self.url)
    }

    async fn probe(&self) -> Result<CheckValue> {
        let response = self.client.get(self.url.as_str()).send().await?;
        let status = response.status();
        debug!("Probe {} answered {}", self.url, status);

        let passed = match self.expected_status {
            Some(expected) => status == expected,
            None => status.is_success(),
        };
        if !passed {
            bail!("HTTP {}", status);
        }

        Ok(CheckValue::from(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_returns_status_code() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body("OK")
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/health", server.url())).unwrap();
        let probe = HttpProbe::new(url).unwrap();

        assert_eq!(probe.probe().await.unwrap(), CheckValue::Text("200".into()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_fails() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(503)
            .create_async()
            .await;

        let url = Url::parse(&format!("{}/health", server.url())).unwrap();
        let probe = HttpProbe::new(url).unwrap();

        let err = probe.probe().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_expected_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(204)
            .create_async()
            .await;

        let url = Url::parse(&server.url()).unwrap();
        let probe = HttpProbe::new(url.clone())
            .unwrap()
            .expect_status(StatusCode::NO_CONTENT);
        assert!(probe.probe().await.is_ok());

        let probe = HttpProbe::new(url)
            .unwrap()
            .expect_status(StatusCode::OK);
        assert!(probe.probe().await.is_err());
    }
}
