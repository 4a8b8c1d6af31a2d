// src/probe/tcp.rs
use super::Probe;
use crate::check::CheckValue;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::net::TcpStream;

/// Passes when a TCP connection to `addr` can be opened.
pub struct TcpProbe {
    addr: String,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    fn describe(&self) -> String {
        format!("tcp://{}", self.addr)
    }

    async fn probe(&self) -> Result<CheckValue> {
        TcpStream::connect(&self.addr)
            .await
            .with_context(|| format!("connect to {}", self.addr))?;
        Ok(CheckValue::from("connected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connects_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let probe = TcpProbe::new(addr.to_string());
        assert_eq!(probe.probe().await.unwrap(), CheckValue::Text("connected".into()));
    }

    #[tokio::test]
    async fn test_refused_connection_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let probe = TcpProbe::new(addr.to_string());
        assert!(probe.probe().await.is_err());
    }
}
