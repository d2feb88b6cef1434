use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Record Type Tags ============

/// Record types whose `data` is an instance address.
pub const ADDRESS_RECORD_TYPES: [&str; 2] = ["A", "AAAA"];

/// IPv4 address record type.
pub const RECORD_TYPE_A: &str = "A";

/// Delegation record type. The provider manages these itself, so they are never transferred.
pub const RECORD_TYPE_NS: &str = "NS";

/// Visibility tag of an externally routable network interface.
pub const PUBLIC_VISIBILITY: &str = "public";

// ============ Instance Types ============

/// Which address list of a [`NetworkSet`] an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4 interface list.
    V4,
    /// IPv6 interface list.
    V6,
}

impl AddressFamily {
    /// Lookup order used when searching an instance's interfaces.
    pub const SEARCH_ORDER: [Self; 2] = [Self::V4, Self::V6];
}

impl std::fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V4 => write!(f, "v4"),
            Self::V6 => write!(f, "v6"),
        }
    }
}

/// A single network interface address of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// Address in textual form (e.g., `"203.0.113.7"`).
    pub address: String,
    /// Visibility tag as reported by the provider (`"public"`, `"private"`, ...).
    pub visibility: String,
}

impl NetworkInterface {
    /// Create an interface with the given visibility tag.
    pub fn new(address: impl Into<String>, visibility: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            visibility: visibility.into(),
        }
    }

    /// Create a public interface.
    pub fn public(address: impl Into<String>) -> Self {
        Self::new(address, PUBLIC_VISIBILITY)
    }

    /// Create a private interface.
    pub fn private(address: impl Into<String>) -> Self {
        Self::new(address, "private")
    }

    /// Whether the interface is externally routable. Compared by exact tag.
    pub fn is_public(&self) -> bool {
        self.visibility == PUBLIC_VISIBILITY
    }
}

/// The ordered v4 and v6 interface lists of an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSet {
    /// IPv4 interfaces, in provider order.
    pub v4: Vec<NetworkInterface>,
    /// IPv6 interfaces, in provider order.
    pub v6: Vec<NetworkInterface>,
}

impl NetworkSet {
    /// All interfaces of one family, in provider order.
    pub fn interfaces(&self, family: AddressFamily) -> &[NetworkInterface] {
        match family {
            AddressFamily::V4 => &self.v4,
            AddressFamily::V6 => &self.v6,
        }
    }

    /// Public addresses of one family, preserving provider order.
    pub fn public_addresses(&self, family: AddressFamily) -> Vec<&str> {
        self.interfaces(family)
            .iter()
            .filter(|iface| iface.is_public())
            .map(|iface| iface.address.as_str())
            .collect()
    }
}

/// A compute instance ("droplet").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Provider-assigned instance identifier.
    pub id: u64,
    /// Instance name.
    pub name: String,
    /// Network interfaces.
    pub networks: NetworkSet,
}

impl Instance {
    /// Public addresses of one family, preserving provider order.
    pub fn public_addresses(&self, family: AddressFamily) -> Vec<&str> {
        self.networks.public_addresses(family)
    }

    /// Whether `address` is one of the public v4 or v6 addresses (exact match).
    pub fn has_public_address(&self, address: &str) -> bool {
        AddressFamily::SEARCH_ORDER
            .iter()
            .any(|family| self.public_addresses(*family).contains(&address))
    }
}

// ============ Zone Types ============

/// A DNS zone ("domain") hosted by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone name (e.g., `"example.com"`).
    pub name: String,
    /// Default TTL in seconds, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Raw zone file text, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_file: Option<String>,
}

impl Zone {
    /// A zone known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ttl: None,
            zone_file: None,
        }
    }
}

/// Request to create a zone.
///
/// The provider also creates an `A` record for the apex pointing at `initial_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequest {
    /// Zone name.
    pub name: String,
    /// Address for the implicitly created apex `A` record.
    pub initial_address: String,
}

/// A resource record within a zone.
///
/// `record_type` is kept as the provider's string tag so unknown types pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecord {
    /// Provider record identifier, scoped to its zone.
    pub id: u64,
    /// Record type tag (`"A"`, `"AAAA"`, `"CNAME"`, `"MX"`, `"NS"`, `"SRV"`, ...).
    pub record_type: String,
    /// Record name (`"@"` for apex).
    pub name: String,
    /// Address or text payload.
    pub data: String,
    /// MX/SRV priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// SRV port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    /// SRV weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Time to live in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl ZoneRecord {
    /// Minimal record with only the identifying fields set.
    pub fn new(
        id: u64,
        record_type: impl Into<String>,
        name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id,
            record_type: record_type.into(),
            name: name.into(),
            data: data.into(),
            priority: None,
            port: None,
            weight: None,
            ttl: None,
        }
    }

    /// Whether this is an `A` or `AAAA` record.
    pub fn is_address(&self) -> bool {
        ADDRESS_RECORD_TYPES.contains(&self.record_type.as_str())
    }

    /// Whether this is an `A` record.
    pub fn is_ipv4_address(&self) -> bool {
        self.record_type == RECORD_TYPE_A
    }

    /// Whether this is an `NS` record.
    pub fn is_delegation(&self) -> bool {
        self.record_type == RECORD_TYPE_NS
    }
}

/// Partial update of a zone record. `None` fields are left unchanged by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRecordPatch {
    /// New record type tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// New record name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// New port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    /// New weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// New TTL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl ZoneRecordPatch {
    /// Build a patch carrying every non-empty field of `record`.
    pub fn from_record(record: &ZoneRecord) -> Self {
        fn non_empty(value: &str) -> Option<String> {
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }

        Self {
            record_type: non_empty(&record.record_type),
            name: non_empty(&record.name),
            data: non_empty(&record.data),
            priority: record.priority,
            port: record.port,
            weight: record.weight,
            ttl: record.ttl,
        }
    }

    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ============ Account Types ============

/// Account details reported by the provider for a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Account e-mail.
    pub email: String,
    /// Account UUID.
    pub uuid: String,
    /// Account status (`"active"`, `"warning"`, `"locked"`).
    pub status: String,
    /// Maximum number of droplets.
    pub droplet_limit: u32,
    /// Whether the e-mail address has been verified.
    pub email_verified: bool,
}

// ============ Client Options ============

/// Transport settings for provider clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API base URL override (scheme + host, no trailing slash). `None` uses the provider default.
    pub api_base: Option<String>,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}
