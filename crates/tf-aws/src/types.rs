use std::collections::BTreeMap;

use serde::Serialize;
use tf_synth::Expr;

/// Resource tags, ordered for stable output.
pub type Tags = BTreeMap<String, String>;

/// CIDR matching every IPv4 address.
pub const ANYWHERE: &str = "0.0.0.0/0";

// ── AMI lookup ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct AmiFilter {
    pub name: String,
    pub values: Vec<String>,
}

impl AmiFilter {
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

// ── Routing ──────────────────────────────────────────────────────────

/// Inline `route` entry of a route table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_block: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<Expr>,
}

impl Route {
    /// Route `cidr` through an internet gateway.
    pub fn via_gateway(cidr: impl Into<String>, gateway_id: Expr) -> Self {
        Self {
            cidr_block: Some(cidr.into()),
            gateway_id: Some(gateway_id),
        }
    }
}

// ── Firewall ─────────────────────────────────────────────────────────

/// IP protocol of a security group rule. `All` serializes as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Protocol {
    #[serde(rename = "tcp")]
    Tcp,
    #[serde(rename = "udp")]
    Udp,
    #[serde(rename = "icmp")]
    Icmp,
    #[serde(rename = "-1")]
    All,
}

/// Inline `ingress` / `egress` rule of a security group.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupRule {
    pub from_port: u16,
    pub to_port: u16,
    pub protocol: Protocol,
    pub cidr_blocks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecurityGroupRule {
    /// Allow one port over `protocol` from (or to) `cidr`.
    pub fn port(protocol: Protocol, port: u16, cidr: impl Into<String>) -> Self {
        Self {
            from_port: port,
            to_port: port,
            protocol,
            cidr_blocks: vec![cidr.into()],
            description: None,
        }
    }

    /// Allow every protocol and port to (or from) `cidr`.
    pub fn all_traffic(cidr: impl Into<String>) -> Self {
        Self {
            from_port: 0,
            to_port: 0,
            protocol: Protocol::All,
            cidr_blocks: vec![cidr.into()],
            description: None,
        }
    }
}
