use serde::Serialize;
use tf_synth::{DataRef, DataSource, Expr, Resource, ResourceRef};

use crate::types::{AmiFilter, Tags};

/// `data "aws_ami"`: image lookup resolved by Terraform at plan time.
#[derive(Debug, Clone, Serialize)]
pub struct DataAwsAmi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_recent: Option<bool>,
    pub owners: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<AmiFilter>,
}

#[derive(Debug, Clone)]
pub struct AmiRef(DataRef);

impl AmiRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }

    pub fn image_id(&self) -> Expr {
        self.0.attr("image_id")
    }
}

impl From<DataRef> for AmiRef {
    fn from(r: DataRef) -> Self {
        Self(r)
    }
}

impl DataSource for DataAwsAmi {
    const TYPE: &'static str = "aws_ami";
    type Ref = AmiRef;
}

/// `aws_instance`
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    pub ami: Expr,
    pub instance_type: Expr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<Expr>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vpc_security_group_ids: Vec<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
}

#[derive(Debug, Clone)]
pub struct InstanceRef(ResourceRef);

impl InstanceRef {
    pub fn id(&self) -> Expr {
        self.0.id()
    }

    pub fn arn(&self) -> Expr {
        self.0.attr("arn")
    }

    pub fn public_ip(&self) -> Expr {
        self.0.attr("public_ip")
    }

    pub fn public_dns(&self) -> Expr {
        self.0.attr("public_dns")
    }

    pub fn private_ip(&self) -> Expr {
        self.0.attr("private_ip")
    }
}

impl From<ResourceRef> for InstanceRef {
    fn from(r: ResourceRef) -> Self {
        Self(r)
    }
}

impl Resource for Instance {
    const TYPE: &'static str = "aws_instance";
    type Ref = InstanceRef;
}
