use tf_aws::types::ANYWHERE;
use tf_aws::{
    AmiFilter, AwsProvider, DataAwsAmi, Instance, InternetGateway, Protocol, Route, RouteTable,
    RouteTableAssociation, SecurityGroup, SecurityGroupRule, Subnet, Tags, Vpc,
};
use tf_synth::{Expr, Output, Stack, Variable};
use tracing::debug;

use crate::Result;

pub const REGION: &str = "us-west-2";

pub const DEFAULT_INSTANCE_TYPE: &str = "t3.micro";
pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";
pub const SUBNET_CIDR: &str = "10.0.1.0/24";

pub const HTTP_PORT: u16 = 80;

pub const AMI_OWNER: &str = "amazon";
pub const AMI_NAME_PATTERN: &str = "amzn2-ami-hvm-*";

/// Boot script: serve a static page on port 80.
pub const USER_DATA_LINES: &[&str] = &[
    "#!/bin/bash",
    "echo 'Hello, world!' > index.html",
    "nohup python -m SimpleHTTPServer 80 &",
];

pub fn user_data() -> String {
    USER_DATA_LINES.join("\n")
}

/// Expressions a consumer reads after apply.
#[derive(Debug, Clone)]
pub struct WebStackOutputs {
    pub ip: Expr,
    pub hostname: Expr,
    pub url: Expr,
}

/// Declare the public network and web server instance into `stack`.
pub fn build_web_stack(stack: &mut Stack) -> Result<WebStackOutputs> {
    stack.provider("aws", &AwsProvider::new(REGION))?;

    let instance_type = stack.variable(
        "instanceType",
        Variable::string(DEFAULT_INSTANCE_TYPE, "EC2 instance type"),
    )?;
    let vpc_network_cidr = stack.variable(
        "vpcNetworkCidr",
        Variable::string(DEFAULT_VPC_CIDR, "VPC network CIDR"),
    )?;

    // Latest Amazon Linux 2 image.
    let ami = stack.data_source(
        "ami",
        &DataAwsAmi {
            most_recent: Some(true),
            owners: vec![AMI_OWNER.into()],
            filter: vec![AmiFilter::new("name", &[AMI_NAME_PATTERN])],
        },
    )?;

    let vpc = stack.resource(
        "vpc",
        &Vpc {
            cidr_block: vpc_network_cidr,
            enable_dns_hostnames: Some(true),
            enable_dns_support: Some(true),
            tags: Tags::new(),
        },
    )?;

    let gateway = stack.resource(
        "gateway",
        &InternetGateway {
            vpc_id: vpc.id(),
            tags: Tags::new(),
        },
    )?;

    let subnet = stack.resource(
        "subnet",
        &Subnet {
            vpc_id: vpc.id(),
            cidr_block: SUBNET_CIDR.into(),
            map_public_ip_on_launch: Some(true),
            availability_zone: None,
            tags: Tags::new(),
        },
    )?;

    let route_table = stack.resource(
        "routeTable",
        &RouteTable {
            vpc_id: vpc.id(),
            route: vec![Route::via_gateway(ANYWHERE, gateway.id())],
            tags: Tags::new(),
        },
    )?;

    stack.resource(
        "routeTableAssociation",
        &RouteTableAssociation {
            subnet_id: subnet.id(),
            route_table_id: route_table.id(),
        },
    )?;

    let sec_group = stack.resource(
        "secGroup",
        &SecurityGroup {
            name: None,
            description: Some("Enable HTTP access".into()),
            vpc_id: vpc.id(),
            ingress: vec![SecurityGroupRule::port(Protocol::Tcp, HTTP_PORT, ANYWHERE)],
            egress: vec![SecurityGroupRule::all_traffic(ANYWHERE)],
            tags: Tags::new(),
        },
    )?;

    let server = stack.resource(
        "server",
        &Instance {
            ami: ami.id(),
            instance_type,
            subnet_id: Some(subnet.id()),
            vpc_security_group_ids: vec![sec_group.id()],
            user_data: Some(user_data()),
            tags: Tags::new(),
        },
    )?;

    let outputs = WebStackOutputs {
        ip: server.public_ip(),
        hostname: server.public_dns(),
        url: Expr::from(format!("http://{}", server.public_dns())),
    };

    stack.output("ip", Output::new(&outputs.ip))?;
    stack.output("hostname", Output::new(&outputs.hostname))?;
    stack.output("url", Output::new(&outputs.url))?;

    debug!(stack = stack.name(), "web stack declared");
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_is_newline_joined_script() {
        assert_eq!(
            user_data(),
            "#!/bin/bash\necho 'Hello, world!' > index.html\nnohup python -m SimpleHTTPServer 80 &"
        );
    }

    #[test]
    fn declaring_twice_into_one_stack_fails() {
        let mut stack = Stack::new("dev").unwrap();
        build_web_stack(&mut stack).unwrap();

        assert!(build_web_stack(&mut stack).is_err());
    }
}
