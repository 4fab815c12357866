use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::token::Expr;

// ── Declarations ─────────────────────────────────────────────────────

/// An input variable (`variable` block).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

impl Variable {
    /// A `string` variable with a default value.
    pub fn string(default: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            var_type: Some("string".into()),
            default: Some(Value::String(default.into())),
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// An output value (`output` block).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub value: Expr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,
}

impl Output {
    pub fn new(value: impl Into<Expr>) -> Self {
        Self {
            value: value.into(),
            description: None,
            sensitive: None,
        }
    }
}

/// Where Terraform keeps state for a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Local {
        path: String,
    },
    S3 {
        bucket: String,
        key: String,
        region: String,
        encrypt: Option<bool>,
    },
}

impl Backend {
    /// Local state file named after the stack.
    pub fn local_for(stack: &str) -> Self {
        Self::Local {
            path: format!("terraform.{stack}.tfstate"),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::S3 { .. } => "s3",
        }
    }

    pub(crate) fn to_block(&self) -> BTreeMap<String, Value> {
        let settings = match self {
            Self::Local { path } => serde_json::json!({ "path": path }),
            Self::S3 {
                bucket,
                key,
                region,
                encrypt,
            } => {
                let mut settings = serde_json::json!({
                    "bucket": bucket,
                    "key": key,
                    "region": region,
                });
                if let Some(encrypt) = encrypt {
                    settings["encrypt"] = Value::Bool(*encrypt);
                }
                settings
            }
        };
        BTreeMap::from([(self.kind().to_string(), settings)])
    }
}

// ── Synthesized document ─────────────────────────────────────────────

/// Terraform JSON configuration for one stack (`cdk.tf.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformDocument {
    #[serde(rename = "//")]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub output: BTreeMap<String, Output>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub provider: BTreeMap<String, Vec<Value>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource: BTreeMap<String, BTreeMap<String, Value>>,
    pub terraform: TerraformSettings,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variable: BTreeMap<String, Variable>,
}

impl TerraformDocument {
    /// Config of `<resource_type>.<name>`, if declared.
    pub fn resource(&self, resource_type: &str, name: &str) -> Option<&Value> {
        self.resource.get(resource_type).and_then(|r| r.get(name))
    }

    /// Config of `data.<data_type>.<name>`, if declared.
    pub fn data_source(&self, data_type: &str, name: &str) -> Option<&Value> {
        self.data.get(data_type).and_then(|d| d.get(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub metadata: StackMetadata,
    /// Output name to the logical id that declared it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackMetadata {
    pub backend: String,
    pub stack_name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformSettings {
    pub backend: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub required_providers: BTreeMap<String, RequiredProvider>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredProvider {
    pub source: String,
    pub version: String,
}

// ── Manifest ─────────────────────────────────────────────────────────

/// Index of every stack written by a synthesis run (`manifest.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub outdir: String,
    pub stacks: BTreeMap<String, ManifestStack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestStack {
    pub name: String,
    pub construct_path: String,
    pub working_directory: String,
    pub synthesized_stack_path: String,
    pub annotations: Vec<String>,
    pub dependencies: Vec<String>,
}

impl ManifestStack {
    pub(crate) fn for_stack(name: &str) -> Self {
        let working_directory = format!("stacks/{name}");
        Self {
            name: name.to_string(),
            construct_path: name.to_string(),
            synthesized_stack_path: format!("{working_directory}/{}", crate::STACK_FILE),
            working_directory,
            annotations: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}
