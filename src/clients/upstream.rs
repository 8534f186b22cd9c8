use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AppError, Result};

#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}

#[derive(Clone)]
pub struct HttpUpstream(reqwest::Client);

impl HttpUpstream {
    pub fn new() -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self(inner))
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get_json(&self, url: &str) -> Result<Value> {
        let res = self.0.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!("{url} answered {status}")));
        }
        Ok(res.json::<Value>().await?)
    }
}
