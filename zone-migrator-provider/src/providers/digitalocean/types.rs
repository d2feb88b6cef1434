//! DigitalOcean API 类型定义

use serde::{Deserialize, Serialize};

/// DigitalOcean API 错误响应
#[derive(Debug, Deserialize)]
pub struct DoErrorBody {
    pub id: String,
    pub message: String,
}

/// 分页链接
#[derive(Debug, Default, Deserialize)]
pub struct DoLinks {
    pub pages: Option<DoPages>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DoPages {
    pub next: Option<String>,
}

impl DoLinks {
    pub fn has_next(&self) -> bool {
        self.pages.as_ref().is_some_and(|p| p.next.is_some())
    }
}

// ============ Droplets ============

/// `GET /v2/droplets` 响应
#[derive(Debug, Deserialize)]
pub struct DropletsPage {
    #[serde(default)]
    pub droplets: Vec<DoDroplet>,
    #[serde(default)]
    pub links: DoLinks,
}

/// Droplet 结构
#[derive(Debug, Deserialize)]
pub struct DoDroplet {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub networks: DoNetworks,
}

#[derive(Debug, Default, Deserialize)]
pub struct DoNetworks {
    #[serde(default)]
    pub v4: Vec<DoNetwork>,
    #[serde(default)]
    pub v6: Vec<DoNetwork>,
}

/// 网络接口，`type` 为 `public` 或 `private`
#[derive(Debug, Deserialize)]
pub struct DoNetwork {
    pub ip_address: String,
    #[serde(rename = "type")]
    pub network_type: String,
}

// ============ Domains ============

/// `POST /v2/domains` 请求体
#[derive(Debug, Serialize)]
pub struct CreateDomainBody<'a> {
    pub name: &'a str,
    pub ip_address: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct DomainEnvelope {
    pub domain: DoDomain,
}

#[derive(Debug, Deserialize)]
pub struct DoDomain {
    pub name: String,
    pub ttl: Option<u32>,
    pub zone_file: Option<String>,
}

// ============ Domain Records ============

/// `GET /v2/domains/{name}/records` 响应
#[derive(Debug, Deserialize)]
pub struct DomainRecordsPage {
    #[serde(default)]
    pub domain_records: Vec<DoDomainRecord>,
    #[serde(default)]
    pub links: DoLinks,
}

#[derive(Debug, Deserialize)]
pub struct DomainRecordEnvelope {
    pub domain_record: DoDomainRecord,
}

/// Domain Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct DoDomainRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub data: String,
    pub priority: Option<u32>,
    pub port: Option<u32>,
    pub weight: Option<u32>,
    pub ttl: Option<u32>,
}

/// 创建/更新记录请求体，`None` 字段不发送
#[derive(Debug, Default, Serialize)]
pub struct DomainRecordBody {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

// ============ Account ============

#[derive(Debug, Deserialize)]
pub struct AccountEnvelope {
    pub account: DoAccount,
}

#[derive(Debug, Deserialize)]
pub struct DoAccount {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub droplet_limit: u32,
    #[serde(default)]
    pub email_verified: bool,
}
