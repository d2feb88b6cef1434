//! DigitalOcean Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_base_url};
use crate::types::ClientOptions;

pub(crate) use types::{
    AccountEnvelope, CreateDomainBody, DoDomainRecord, DoDroplet, DomainEnvelope,
    DomainRecordBody, DomainRecordEnvelope, DomainRecordsPage, DropletsPage,
};

pub(crate) const DO_API_BASE: &str = "https://api.digitalocean.com";
/// DigitalOcean 列表 API 单页最大条数
pub(crate) const MAX_PAGE_SIZE: u32 = 200;
/// 写权限探测使用的标签名前缀，后接随机 UUID，保证标签不存在
pub(crate) const PROBE_TAG_PREFIX: &str = "zone-migrator-write-probe-";

/// DigitalOcean hosting provider (API v2, bearer token auth).
#[derive(Debug)]
pub struct DigitalOceanProvider {
    pub(crate) client: Client,
    pub(crate) api_base: String,
}

impl DigitalOceanProvider {
    /// Client against the public API with default timeouts.
    pub fn new() -> Result<Self> {
        Self::with_options(&ClientOptions::default())
    }

    /// Client with explicit transport options (base URL override, timeouts).
    pub fn with_options(options: &ClientOptions) -> Result<Self> {
        let api_base = options
            .api_base
            .as_deref()
            .map_or_else(|| DO_API_BASE.to_string(), normalize_base_url);
        Ok(Self {
            client: create_http_client("digitalocean", options)?,
            api_base,
        })
    }
}
