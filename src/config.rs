use anyhow::Context;

use crate::services::page_select::PagePolicy;

pub const PORT: u16 = 6544;
const DEFAULT_DB: &str = "mydatabase";

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub page_policy: PagePolicy,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mongodb_uri = get("MONGODB_URI").context("MONGODB_URI must be set")?;
        let mongodb_db = get("MONGODB_DB").unwrap_or_else(|| DEFAULT_DB.to_string());
        let page_policy = match get("PAGE_POLICY") {
            Some(v) => v.parse()?,
            None => PagePolicy::default(),
        };
        Ok(Self { mongodb_uri, mongodb_db, page_policy })
    }
}
