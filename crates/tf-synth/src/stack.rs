use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::token::{self, DataRef, Expr, ResourceRef};
use crate::types::{
    Backend, DocumentMetadata, Output, RequiredProvider, StackMetadata, TerraformDocument,
    TerraformSettings, Variable,
};
use crate::{DataSource, Error, Provider, Resource, Result, SYNTH_VERSION};

static LOGICAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("logical id pattern is valid"));

/// Plain attribute traversals such as `aws_vpc.vpc.id` or `var.cidr`.
/// Function calls and operators are left for Terraform to check.
static TRAVERSAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*(\.[A-Za-z0-9_-]+|\[[0-9]+\])*$")
        .expect("traversal pattern is valid")
});

/// Root names Terraform provides without a declaration.
const BUILTIN_ROOTS: &[&str] = &["local", "module", "path", "terraform", "each", "count", "self"];

/// A named, independently synthesizable set of declarations.
///
/// Logical ids share one namespace across every element kind, so a variable
/// and a resource cannot both be called `vpc`.
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    backend: Backend,
    ids: BTreeSet<String>,
    providers: BTreeMap<String, Vec<Value>>,
    required_providers: BTreeMap<String, RequiredProvider>,
    variables: BTreeMap<String, Variable>,
    data: BTreeMap<String, BTreeMap<String, Value>>,
    resources: BTreeMap<String, BTreeMap<String, Value>>,
    outputs: BTreeMap<String, Output>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        check_id(&name)?;

        Ok(Self {
            backend: Backend::local_for(&name),
            name,
            ids: BTreeSet::new(),
            providers: BTreeMap::new(),
            required_providers: BTreeMap::new(),
            variables: BTreeMap::new(),
            data: BTreeMap::new(),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn set_backend(&mut self, backend: Backend) {
        self.backend = backend;
    }

    /// Configure a provider. Every config of one provider needs a distinct `alias`;
    /// at most one may go without.
    pub fn provider<P: Provider>(&mut self, id: &str, config: &P) -> Result<()> {
        let value = serde_json::to_value(config)?;
        let alias = alias_of(&value);
        let taken = self
            .providers
            .get(P::NAME)
            .is_some_and(|configs| configs.iter().any(|c| alias_of(c) == alias));
        if taken {
            return Err(Error::DuplicateProvider {
                stack: self.name.clone(),
                provider: P::NAME.to_string(),
            });
        }

        self.claim(id)?;
        self.required_providers
            .entry(P::NAME.to_string())
            .or_insert_with(|| RequiredProvider {
                source: P::SOURCE.to_string(),
                version: P::VERSION.to_string(),
            });
        self.providers
            .entry(P::NAME.to_string())
            .or_default()
            .push(value);

        debug!(stack = %self.name, provider = P::NAME, "provider configured");
        Ok(())
    }

    /// Declare an input variable and return its `${var.<id>}` expression.
    pub fn variable(&mut self, id: &str, variable: Variable) -> Result<Expr> {
        self.claim(id)?;
        self.variables.insert(id.to_string(), variable);
        Ok(Expr::reference(format!("var.{id}")))
    }

    pub fn data_source<D: DataSource>(&mut self, id: &str, config: &D) -> Result<D::Ref> {
        let value = serde_json::to_value(config)?;
        self.claim(id)?;
        self.data
            .entry(D::TYPE.to_string())
            .or_default()
            .insert(id.to_string(), value);

        debug!(stack = %self.name, data_type = D::TYPE, id, "data source declared");
        Ok(D::Ref::from(DataRef::new(D::TYPE, id)))
    }

    pub fn resource<R: Resource>(&mut self, id: &str, config: &R) -> Result<R::Ref> {
        let value = serde_json::to_value(config)?;
        self.claim(id)?;
        self.resources
            .entry(R::TYPE.to_string())
            .or_default()
            .insert(id.to_string(), value);

        debug!(stack = %self.name, resource_type = R::TYPE, id, "resource declared");
        Ok(R::Ref::from(ResourceRef::new(R::TYPE, id)))
    }

    pub fn output(&mut self, id: &str, output: Output) -> Result<()> {
        self.claim(id)?;
        self.outputs.insert(id.to_string(), output);
        Ok(())
    }

    /// Build the Terraform JSON document, rejecting references to undeclared elements.
    pub fn to_document(&self) -> Result<TerraformDocument> {
        self.check_references()?;

        Ok(TerraformDocument {
            metadata: DocumentMetadata {
                metadata: StackMetadata {
                    backend: self.backend.kind().to_string(),
                    stack_name: self.name.clone(),
                    version: SYNTH_VERSION.to_string(),
                },
                outputs: self
                    .outputs
                    .keys()
                    .map(|k| (k.clone(), k.clone()))
                    .collect(),
            },
            data: self.data.clone(),
            output: self.outputs.clone(),
            provider: self.providers.clone(),
            resource: self.resources.clone(),
            terraform: TerraformSettings {
                backend: self.backend.to_block(),
                required_providers: self.required_providers.clone(),
            },
            variable: self.variables.clone(),
        })
    }

    /// Pretty-printed `cdk.tf.json` contents.
    pub fn to_json(&self) -> Result<String> {
        let document = self.to_document()?;
        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn claim(&mut self, id: &str) -> Result<()> {
        check_id(id)?;
        if !self.ids.insert(id.to_string()) {
            return Err(Error::DuplicateConstruct {
                stack: self.name.clone(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn check_references(&self) -> Result<()> {
        let values = self
            .providers
            .values()
            .flatten()
            .chain(self.data.values().flat_map(BTreeMap::values))
            .chain(self.resources.values().flat_map(BTreeMap::values));

        let mut strings = Vec::new();
        for value in values {
            collect_strings(value, &mut strings);
        }
        strings.extend(self.outputs.values().map(|o| o.value.as_str()));

        for text in strings {
            for body in token::scan(text) {
                if !self.resolves(body) {
                    return Err(Error::UnresolvedReference {
                        stack: self.name.clone(),
                        reference: body.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn resolves(&self, body: &str) -> bool {
        if !TRAVERSAL.is_match(body) {
            return true;
        }

        let mut parts = body.split(['.', '[']);
        let root = parts.next().unwrap_or_default();
        match root {
            "var" => parts
                .next()
                .is_some_and(|name| self.variables.contains_key(name)),
            "data" => match (parts.next(), parts.next()) {
                (Some(data_type), Some(name)) => self
                    .data
                    .get(data_type)
                    .is_some_and(|d| d.contains_key(name)),
                _ => false,
            },
            r if BUILTIN_ROOTS.contains(&r) => true,
            resource_type => parts.next().is_some_and(|name| {
                self.resources
                    .get(resource_type)
                    .is_some_and(|r| r.contains_key(name))
            }),
        }
    }
}

fn check_id(id: &str) -> Result<()> {
    if LOGICAL_ID.is_match(id) {
        Ok(())
    } else {
        Err(Error::InvalidId(id.to_string()))
    }
}

fn alias_of(config: &Value) -> Option<&Value> {
    config.get("alias").filter(|a| !a.is_null())
}

fn collect_strings<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}
