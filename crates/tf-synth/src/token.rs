use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A run of `$` followed by `{...}`. Any longer run ends in `$${`, Terraform's
/// escape for a literal `${`, so only a lone `$` opens an interpolation.
static INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\$+)\{([^}]+)\}").expect("interpolation pattern is valid"));

/// A Terraform string value, possibly containing `${...}` interpolations.
///
/// References to other elements render as interpolations and are resolved by
/// Terraform at plan time, so an `Expr` can be embedded in larger strings with
/// `format!` and still point at the same attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expr(String);

impl Expr {
    /// A plain string value.
    pub fn literal(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// An interpolation of `path`, e.g. `aws_vpc.vpc.id` becomes `${aws_vpc.vpc.id}`.
    pub fn reference(path: impl fmt::Display) -> Self {
        Self(format!("${{{path}}}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bodies of every interpolation in the value, in order of appearance.
    pub fn references(&self) -> Vec<&str> {
        scan(&self.0)
    }

    /// `true` when the whole value is a single interpolation.
    pub fn is_reference(&self) -> bool {
        self.0.starts_with("${") && self.0.ends_with('}') && self.references().len() == 1
    }
}

/// Interpolation bodies found in an arbitrary string.
pub(crate) fn scan(text: &str) -> Vec<&str> {
    INTERPOLATION
        .captures_iter(text)
        .filter(|c| c[1].len() == 1)
        .filter_map(|c| c.get(2))
        .map(|m| m.as_str().trim())
        .collect()
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Expr> for Expr {
    fn from(value: &Expr) -> Self {
        value.clone()
    }
}

impl AsRef<str> for Expr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Handle to a declared resource, addressed as `<type>.<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    resource_type: &'static str,
    name: String,
}

impl ResourceRef {
    pub(crate) fn new(resource_type: &'static str, name: impl Into<String>) -> Self {
        Self {
            resource_type,
            name: name.into(),
        }
    }

    pub fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }

    pub fn attr(&self, attribute: &str) -> Expr {
        Expr::reference(format!("{}.{attribute}", self.address()))
    }

    pub fn id(&self) -> Expr {
        self.attr("id")
    }
}

/// Handle to a declared data source, addressed as `data.<type>.<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataRef {
    data_type: &'static str,
    name: String,
}

impl DataRef {
    pub(crate) fn new(data_type: &'static str, name: impl Into<String>) -> Self {
        Self {
            data_type,
            name: name.into(),
        }
    }

    pub fn data_type(&self) -> &'static str {
        self.data_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> String {
        format!("data.{}.{}", self.data_type, self.name)
    }

    pub fn attr(&self, attribute: &str) -> Expr {
        Expr::reference(format!("{}.{attribute}", self.address()))
    }

    pub fn id(&self) -> Expr {
        self.attr("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_wraps_path_in_interpolation() {
        let expr = Expr::reference("aws_vpc.vpc.id");
        assert_eq!(expr.as_str(), "${aws_vpc.vpc.id}");
        assert!(expr.is_reference());
    }

    #[test]
    fn literal_has_no_references() {
        let expr = Expr::literal("10.0.1.0/24");
        assert!(expr.references().is_empty());
        assert!(!expr.is_reference());
    }

    #[test]
    fn embedded_reference_is_found_by_scan() {
        let dns = ResourceRef::new("aws_instance", "server").attr("public_dns");
        let url = Expr::from(format!("http://{dns}"));

        assert_eq!(url.as_str(), "http://${aws_instance.server.public_dns}");
        assert_eq!(url.references(), vec!["aws_instance.server.public_dns"]);
        assert!(!url.is_reference());
    }

    #[test]
    fn two_interpolations_are_not_a_single_reference() {
        let expr = Expr::literal("${var.a}-${var.b}");
        assert_eq!(expr.references(), vec!["var.a", "var.b"]);
        assert!(!expr.is_reference());
    }

    #[test]
    fn escaped_dollar_is_not_an_interpolation() {
        let script = Expr::literal("echo $${HOME} ${var.greeting} $$${PATH}");
        assert_eq!(script.references(), vec!["var.greeting"]);

        let template = Expr::literal("%{ if true }on%{ endif }");
        assert!(template.references().is_empty());
    }

    #[test]
    fn data_ref_address_has_data_prefix() {
        let ami = DataRef::new("aws_ami", "ami");
        assert_eq!(ami.address(), "data.aws_ami.ami");
        assert_eq!(ami.id().as_str(), "${data.aws_ami.ami.id}");
    }
}
