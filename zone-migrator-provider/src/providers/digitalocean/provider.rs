//! DigitalOcean `HostingProvider` 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::{ErrorContext, HostingProvider, ProviderErrorMapper};
use crate::types::{
    AccountInfo, CreateZoneRequest, Instance, NetworkInterface, NetworkSet, Zone, ZoneRecord,
    ZoneRecordPatch,
};

use super::types::{DoDomain, DoNetwork};
use super::{
    AccountEnvelope, CreateDomainBody, DigitalOceanProvider, DoDomainRecord, DoDroplet,
    DomainEnvelope, DomainRecordBody, DomainRecordEnvelope, DomainRecordsPage, DropletsPage,
    MAX_PAGE_SIZE, PROBE_TAG_PREFIX,
};

// ============ 类型转换 ============

fn to_interfaces(networks: Vec<DoNetwork>) -> Vec<NetworkInterface> {
    networks
        .into_iter()
        .map(|n| NetworkInterface::new(n.ip_address, n.network_type))
        .collect()
}

impl From<DoDroplet> for Instance {
    fn from(droplet: DoDroplet) -> Self {
        Self {
            id: droplet.id,
            name: droplet.name,
            networks: NetworkSet {
                v4: to_interfaces(droplet.networks.v4),
                v6: to_interfaces(droplet.networks.v6),
            },
        }
    }
}

impl From<DoDomainRecord> for ZoneRecord {
    fn from(r: DoDomainRecord) -> Self {
        Self {
            id: r.id,
            record_type: r.record_type,
            name: r.name,
            data: r.data,
            priority: r.priority,
            port: r.port,
            weight: r.weight,
            ttl: r.ttl,
        }
    }
}

impl From<DoDomain> for Zone {
    fn from(d: DoDomain) -> Self {
        Self {
            name: d.name,
            ttl: d.ttl,
            zone_file: d.zone_file,
        }
    }
}

impl From<&ZoneRecord> for DomainRecordBody {
    fn from(r: &ZoneRecord) -> Self {
        Self {
            record_type: Some(r.record_type.clone()),
            name: Some(r.name.clone()),
            data: Some(r.data.clone()),
            priority: r.priority,
            port: r.port,
            weight: r.weight,
            ttl: r.ttl,
        }
    }
}

impl From<&ZoneRecordPatch> for DomainRecordBody {
    fn from(p: &ZoneRecordPatch) -> Self {
        Self {
            record_type: p.record_type.clone(),
            name: p.name.clone(),
            data: p.data.clone(),
            priority: p.priority,
            port: p.port,
            weight: p.weight,
            ttl: p.ttl,
        }
    }
}

fn domain_path(zone_name: &str) -> String {
    format!(
        "/v2/domains/{}",
        urlencoding::encode(&normalize_domain_name(zone_name))
    )
}

#[async_trait]
impl HostingProvider for DigitalOceanProvider {
    fn id(&self) -> &'static str {
        "digitalocean"
    }

    async fn account_info(&self, token: &str) -> Result<AccountInfo> {
        let envelope: AccountEnvelope = self
            .get(token, "/v2/account", ErrorContext::default())
            .await?;
        let account = envelope.account;
        Ok(AccountInfo {
            email: account.email,
            uuid: account.uuid,
            status: account.status,
            droplet_limit: account.droplet_limit,
            email_verified: account.email_verified,
        })
    }

    async fn list_instances(&self, token: &str) -> Result<Vec<Instance>> {
        let mut instances = Vec::new();
        let mut page = 1u32;
        loop {
            let path = format!("/v2/droplets?page={page}&per_page={MAX_PAGE_SIZE}");
            let body: DropletsPage = self.get(token, &path, ErrorContext::default()).await?;
            instances.extend(body.droplets.into_iter().map(Instance::from));
            if !body.links.has_next() {
                break;
            }
            page += 1;
        }
        log::debug!("[digitalocean] 获取到 {} 个 droplet", instances.len());
        Ok(instances)
    }

    async fn list_zone_records(&self, token: &str, zone_name: &str) -> Result<Vec<ZoneRecord>> {
        let mut records = Vec::new();
        let mut page = 1u32;
        loop {
            let path = format!(
                "{}/records?page={page}&per_page={MAX_PAGE_SIZE}",
                domain_path(zone_name)
            );
            let body: DomainRecordsPage = self
                .get(token, &path, ErrorContext::zone(zone_name))
                .await?;
            records.extend(body.domain_records.into_iter().map(ZoneRecord::from));
            if !body.links.has_next() {
                break;
            }
            page += 1;
        }
        log::debug!(
            "[digitalocean] {zone_name} 共 {} 条记录",
            records.len()
        );
        Ok(records)
    }

    async fn create_zone(&self, token: &str, req: &CreateZoneRequest) -> Result<Zone> {
        let name = normalize_domain_name(&req.name);
        if name.is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "name".to_string(),
                detail: "zone name is empty".to_string(),
            });
        }
        let body = CreateDomainBody {
            name: &name,
            ip_address: &req.initial_address,
        };
        let envelope: DomainEnvelope = self
            .post(token, "/v2/domains", &body, ErrorContext::zone(&name))
            .await?;
        Ok(envelope.domain.into())
    }

    async fn create_zone_record(
        &self,
        token: &str,
        zone_name: &str,
        record: &ZoneRecord,
    ) -> Result<ZoneRecord> {
        let path = format!("{}/records", domain_path(zone_name));
        let body = DomainRecordBody::from(record);
        let envelope: DomainRecordEnvelope = self
            .post(token, &path, &body, ErrorContext::zone(zone_name))
            .await?;
        Ok(envelope.domain_record.into())
    }

    async fn update_zone_record(
        &self,
        token: &str,
        zone_name: &str,
        record_id: u64,
        patch: &ZoneRecordPatch,
    ) -> Result<ZoneRecord> {
        if patch.is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "patch".to_string(),
                detail: "no fields to update".to_string(),
            });
        }
        let path = format!("{}/records/{record_id}", domain_path(zone_name));
        let body = DomainRecordBody::from(patch);
        let envelope: DomainRecordEnvelope = self
            .patch(
                token,
                &path,
                &body,
                ErrorContext::record(zone_name, record_id),
            )
            .await?;
        Ok(envelope.domain_record.into())
    }

    async fn delete_zone(&self, token: &str, zone_name: &str) -> Result<()> {
        self.delete(token, &domain_path(zone_name), ErrorContext::zone(zone_name))
            .await
    }

    async fn probe_account_writable(&self, token: &str) -> Result<bool> {
        let tag = format!("{PROBE_TAG_PREFIX}{}", uuid::Uuid::new_v4().simple());
        let path = format!("/v2/tags/{tag}");
        let (status, text) = self.delete_raw(token, &path).await?;

        match status {
            404 => Ok(true),
            403 => Ok(false),
            _ => {
                let raw_message = serde_json::from_str::<super::types::DoErrorBody>(&text)
                    .map(|body| body.message)
                    .ok();
                log::warn!("[digitalocean] 写权限探测返回 HTTP {status}");
                Err(ProviderError::ProbeInconclusive {
                    provider: self.provider_name().to_string(),
                    status,
                    raw_message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn droplet_conversion_keeps_interface_order() {
        let droplet: DoDroplet = serde_json::from_str(
            r#"{
                "id": 3164444,
                "name": "web-1",
                "networks": {
                    "v4": [
                        {"ip_address": "10.128.0.2", "type": "private", "netmask": "255.255.0.0"},
                        {"ip_address": "203.0.113.7", "type": "public"}
                    ],
                    "v6": [{"ip_address": "2001:db8::7", "type": "public"}]
                }
            }"#,
        )
        .unwrap();

        let instance = Instance::from(droplet);
        assert_eq!(instance.id, 3_164_444);
        assert_eq!(instance.networks.v4[0].address, "10.128.0.2");
        assert!(!instance.networks.v4[0].is_public());
        assert!(instance.networks.v4[1].is_public());
        assert_eq!(instance.networks.v6.len(), 1);
    }

    #[test]
    fn droplet_without_networks() {
        let droplet: DoDroplet = serde_json::from_str(r#"{"id": 1, "name": "bare"}"#).unwrap();
        let instance = Instance::from(droplet);
        assert!(instance.networks.v4.is_empty());
        assert!(instance.networks.v6.is_empty());
    }

    #[test]
    fn record_conversion() {
        let record: DoDomainRecord = serde_json::from_str(
            r#"{"id": 28448433, "type": "MX", "name": "@", "data": "mail.example.com",
                "priority": 10, "port": null, "ttl": 1800, "weight": null, "flags": null, "tag": null}"#,
        )
        .unwrap();
        let record = ZoneRecord::from(record);
        assert_eq!(record.record_type, "MX");
        assert_eq!(record.priority, Some(10));
        assert_eq!(record.port, None);
        assert_eq!(record.ttl, Some(1800));
    }

    #[test]
    fn create_body_from_record_ignores_id() {
        let record = ZoneRecord::new(77, "A", "www", "203.0.113.7");
        let json = serde_json::to_value(DomainRecordBody::from(&record)).unwrap();
        assert_eq!(json["type"], "A");
        assert_eq!(json["name"], "www");
        assert!(json.get("id").is_none());
        assert!(json.get("ttl").is_none());
    }

    #[test]
    fn patch_body_only_sends_set_fields() {
        let patch = ZoneRecordPatch {
            data: Some("198.51.100.4".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(DomainRecordBody::from(&patch)).unwrap();
        assert_eq!(json, serde_json::json!({"data": "198.51.100.4"}));
    }

    #[test]
    fn domain_path_normalizes() {
        assert_eq!(domain_path("example.com."), "/v2/domains/example.com");
    }
}
