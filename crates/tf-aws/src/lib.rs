//! Typed bindings for the AWS resources and data sources the web stack declares.
//!
//! Each config struct serializes to the Terraform JSON body of its block and
//! returns a typed handle exposing the attributes other declarations reference.

pub mod compute;
pub mod network;
pub mod types;

use serde::Serialize;
use tf_synth::Provider;

pub use compute::{AmiRef, DataAwsAmi, Instance, InstanceRef};
pub use network::{
    InternetGateway, InternetGatewayRef, RouteTable, RouteTableAssociation,
    RouteTableAssociationRef, RouteTableRef, SecurityGroup, SecurityGroupRef, Subnet, SubnetRef,
    Vpc, VpcRef,
};
pub use types::{AmiFilter, Protocol, Route, SecurityGroupRule, Tags};

/// `provider "aws"` configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AwsProvider {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_tags: Vec<DefaultTags>,
}

impl AwsProvider {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }
}

/// Tags applied to every resource the provider creates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DefaultTags {
    pub tags: Tags,
}

impl Provider for AwsProvider {
    const NAME: &'static str = "aws";
    const SOURCE: &'static str = "hashicorp/aws";
    const VERSION: &'static str = "~> 5.0";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_serializes_only_region_by_default() {
        let json = serde_json::to_value(AwsProvider::new("us-west-2")).unwrap();
        assert_eq!(json, serde_json::json!({ "region": "us-west-2" }));
    }

    #[test]
    fn default_tags_serialize_as_block_list() {
        let provider = AwsProvider {
            default_tags: vec![DefaultTags {
                tags: Tags::from([("team".to_string(), "web".to_string())]),
            }],
            ..AwsProvider::new("us-west-2")
        };
        let json = serde_json::to_value(provider).unwrap();
        assert_eq!(json["default_tags"][0]["tags"]["team"], "web");
    }
}
