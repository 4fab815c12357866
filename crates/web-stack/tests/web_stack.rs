use std::fs;

use serde_json::{Value, json};
use tf_synth::{MANIFEST_FILE, Manifest, STACK_FILE, TerraformDocument};
use web_stack::stack::{DEFAULT_INSTANCE_TYPE, DEFAULT_VPC_CIDR, REGION};
use web_stack::{ENVIRONMENTS, build_app};

fn documents() -> Vec<(String, TerraformDocument)> {
    let app = build_app("unused").unwrap();
    app.stacks()
        .iter()
        .map(|s| (s.name().to_string(), s.to_document().unwrap()))
        .collect()
}

fn resource<'a>(doc: &'a TerraformDocument, resource_type: &str, name: &str) -> &'a Value {
    doc.resource(resource_type, name)
        .unwrap_or_else(|| panic!("{resource_type}.{name} not declared"))
}

#[test]
fn declares_dev_and_prod() {
    let names: Vec<_> = documents().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ENVIRONMENTS);
}

#[test]
fn region_is_fixed_for_every_environment() {
    for (name, doc) in documents() {
        let providers = &doc.provider["aws"];
        assert_eq!(providers.len(), 1, "{name}");
        assert_eq!(providers[0]["region"], REGION, "{name}");
        assert_eq!(doc.terraform.required_providers["aws"].source, "hashicorp/aws");
    }
}

#[test]
fn variable_defaults() {
    for (_, doc) in documents() {
        let instance_type = &doc.variable["instanceType"];
        assert_eq!(instance_type.var_type.as_deref(), Some("string"));
        assert_eq!(instance_type.default, Some(json!(DEFAULT_INSTANCE_TYPE)));
        assert_eq!(instance_type.default, Some(json!("t3.micro")));

        let cidr = &doc.variable["vpcNetworkCidr"];
        assert_eq!(cidr.default, Some(json!(DEFAULT_VPC_CIDR)));
        assert_eq!(cidr.default, Some(json!("10.0.0.0/16")));
        assert_eq!(cidr.description.as_deref(), Some("VPC network CIDR"));
    }
}

#[test]
fn vpc_uses_cidr_variable_with_dns() {
    for (_, doc) in documents() {
        let vpc = resource(&doc, "aws_vpc", "vpc");
        assert_eq!(vpc["cidr_block"], "${var.vpcNetworkCidr}");
        assert_eq!(vpc["enable_dns_hostnames"], true);
        assert_eq!(vpc["enable_dns_support"], true);
    }
}

#[test]
fn subnet_assigns_public_addresses() {
    for (_, doc) in documents() {
        let subnet = resource(&doc, "aws_subnet", "subnet");
        assert_eq!(subnet["map_public_ip_on_launch"], true);
        assert_eq!(subnet["cidr_block"], "10.0.1.0/24");
        assert_eq!(subnet["vpc_id"], "${aws_vpc.vpc.id}");
    }
}

#[test]
fn default_route_goes_through_gateway() {
    for (_, doc) in documents() {
        let gateway = resource(&doc, "aws_internet_gateway", "gateway");
        assert_eq!(gateway["vpc_id"], "${aws_vpc.vpc.id}");

        let table = resource(&doc, "aws_route_table", "routeTable");
        assert_eq!(
            table["route"],
            json!([{
                "cidr_block": "0.0.0.0/0",
                "gateway_id": "${aws_internet_gateway.gateway.id}",
            }])
        );

        let assoc = resource(&doc, "aws_route_table_association", "routeTableAssociation");
        assert_eq!(assoc["subnet_id"], "${aws_subnet.subnet.id}");
        assert_eq!(assoc["route_table_id"], "${aws_route_table.routeTable.id}");
    }
}

#[test]
fn firewall_allows_only_http_in_and_everything_out() {
    for (_, doc) in documents() {
        let group = resource(&doc, "aws_security_group", "secGroup");
        assert_eq!(group["description"], "Enable HTTP access");
        assert_eq!(
            group["ingress"],
            json!([{
                "from_port": 80,
                "to_port": 80,
                "protocol": "tcp",
                "cidr_blocks": ["0.0.0.0/0"],
            }])
        );
        assert_eq!(
            group["egress"],
            json!([{
                "from_port": 0,
                "to_port": 0,
                "protocol": "-1",
                "cidr_blocks": ["0.0.0.0/0"],
            }])
        );
    }
}

#[test]
fn instance_wires_image_type_subnet_and_group() {
    for (_, doc) in documents() {
        let ami = doc.data_source("aws_ami", "ami").unwrap();
        assert_eq!(ami["most_recent"], true);
        assert_eq!(ami["owners"], json!(["amazon"]));
        assert_eq!(
            ami["filter"],
            json!([{ "name": "name", "values": ["amzn2-ami-hvm-*"] }])
        );

        let server = resource(&doc, "aws_instance", "server");
        assert_eq!(server["ami"], "${data.aws_ami.ami.id}");
        assert_eq!(server["instance_type"], "${var.instanceType}");
        assert_eq!(server["subnet_id"], "${aws_subnet.subnet.id}");
        assert_eq!(
            server["vpc_security_group_ids"],
            json!(["${aws_security_group.secGroup.id}"])
        );
        assert!(
            server["user_data"]
                .as_str()
                .unwrap()
                .starts_with("#!/bin/bash\n")
        );
    }
}

#[test]
fn url_is_scheme_plus_hostname() {
    for (_, doc) in documents() {
        let hostname = doc.output["hostname"].value.as_str();
        let url = doc.output["url"].value.as_str();

        assert_eq!(hostname, "${aws_instance.server.public_dns}");
        assert_eq!(url, format!("http://{hostname}"));
        assert_eq!(
            doc.output["ip"].value.as_str(),
            "${aws_instance.server.public_ip}"
        );
        assert_eq!(doc.output.len(), 3);
    }
}

#[test]
fn environments_differ_only_by_stack_name() {
    let docs = documents();
    let (_, dev) = &docs[0];
    let (_, prod) = &docs[1];

    assert_eq!(dev.resource, prod.resource);
    assert_eq!(dev.data, prod.data);
    assert_eq!(dev.variable, prod.variable);
    assert_eq!(dev.output, prod.output);
    assert_eq!(dev.provider, prod.provider);
    assert_ne!(dev.terraform.backend, prod.terraform.backend);
    assert_eq!(prod.terraform.backend["local"]["path"], "terraform.prod.tfstate");
}

#[test]
fn synthesis_is_byte_stable() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    build_app(first.path()).unwrap().synth().unwrap();
    build_app(second.path()).unwrap().synth().unwrap();

    for env in ENVIRONMENTS {
        let rel = format!("stacks/{env}/{STACK_FILE}");
        let a = fs::read_to_string(first.path().join(&rel)).unwrap();
        let b = fs::read_to_string(second.path().join(&rel)).unwrap();
        assert_eq!(a, b, "{env}");
    }
}

#[test]
fn synth_writes_manifest_and_stack_files() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = build_app(dir.path()).unwrap().synth().unwrap();

    let raw = fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
    let read_back: Manifest = serde_json::from_str(&raw).unwrap();
    assert_eq!(read_back, manifest);

    for env in ENVIRONMENTS {
        let entry = &manifest.stacks[env];
        assert_eq!(entry.synthesized_stack_path, format!("stacks/{env}/cdk.tf.json"));

        let raw = fs::read_to_string(dir.path().join(&entry.synthesized_stack_path)).unwrap();
        let doc: TerraformDocument = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc.metadata.metadata.stack_name, env);
        assert!(doc.resource("aws_instance", "server").is_some());
    }
}
