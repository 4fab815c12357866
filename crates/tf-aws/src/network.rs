use serde::Serialize;
use tf_synth::{Expr, Resource, ResourceRef};

use crate::types::{Route, SecurityGroupRule, Tags};

// ── VPC ──────────────────────────────────────────────────────────────

/// `aws_vpc`
#[derive(Debug, Clone, Serialize)]
pub struct Vpc {
    pub cidr_block: Expr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dns_hostnames: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dns_support: Option<bool>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct VpcRef(ResourceRef);

impl VpcRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }

    pub fn arn(&self) -> Expr {
        self.0.attr("arn")
    }
}

impl From<ResourceRef> for VpcRef {
    fn from(r: ResourceRef) -> Self {
        Self(r)
    }
}

impl Resource for Vpc {
    const TYPE: &'static str = "aws_vpc";
    type Ref = VpcRef;
}

// ── Internet gateway ─────────────────────────────────────────────────

/// `aws_internet_gateway`
#[derive(Debug, Clone, Serialize)]
pub struct InternetGateway {
    pub vpc_id: Expr,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct InternetGatewayRef(ResourceRef);

impl InternetGatewayRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }
}

impl From<ResourceRef> for InternetGatewayRef {
    fn from(r: ResourceRef) -> Self {
        Self(r)
    }
}

impl Resource for InternetGateway {
    const TYPE: &'static str = "aws_internet_gateway";
    type Ref = InternetGatewayRef;
}

// ── Subnet ───────────────────────────────────────────────────────────

/// `aws_subnet`
#[derive(Debug, Clone, Serialize)]
pub struct Subnet {
    pub vpc_id: Expr,
    pub cidr_block: Expr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_public_ip_on_launch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct SubnetRef(ResourceRef);

impl SubnetRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }
}

impl From<ResourceRef> for SubnetRef {
    fn from(r: ResourceRef) -> Self {
        Self(r)
    }
}

impl Resource for Subnet {
    const TYPE: &'static str = "aws_subnet";
    type Ref = SubnetRef;
}

// ── Route table ──────────────────────────────────────────────────────

/// `aws_route_table` with inline routes.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTable {
    pub vpc_id: Expr,
    pub route: Vec<Route>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct RouteTableRef(ResourceRef);

impl RouteTableRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }
}

impl From<ResourceRef> for RouteTableRef {
    fn from(r: ResourceRef) -> Self {
        Self(r)
    }
}

impl Resource for RouteTable {
    const TYPE: &'static str = "aws_route_table";
    type Ref = RouteTableRef;
}

/// `aws_route_table_association`
#[derive(Debug, Clone, Serialize)]
pub struct RouteTableAssociation {
    pub subnet_id: Expr,
    pub route_table_id: Expr,
}

#[derive(Debug, Clone)]
pub struct RouteTableAssociationRef(ResourceRef);

impl RouteTableAssociationRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }
}

impl From<ResourceRef> for RouteTableAssociationRef {
    fn from(r: ResourceRef) -> Self {
        Self(r)
    }
}

impl Resource for RouteTableAssociation {
    const TYPE: &'static str = "aws_route_table_association";
    type Ref = RouteTableAssociationRef;
}

// ── Security group ───────────────────────────────────────────────────

/// `aws_security_group` with inline rules.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub vpc_id: Expr,
    pub ingress: Vec<SecurityGroupRule>,
    pub egress: Vec<SecurityGroupRule>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct SecurityGroupRef(ResourceRef);

impl SecurityGroupRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }

    pub fn arn(&self) -> Expr {
        self.0.attr("arn")
    }
}

impl From<ResourceRef> for SecurityGroupRef {
    fn from(r: ResourceRef) -> Self {
        Self(r)
    }
}

impl Resource for SecurityGroup {
    const TYPE: &'static str = "aws_security_group";
    type Ref = SecurityGroupRef;
}
