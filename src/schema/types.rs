use crate::fields::Field;
use serde_json::Value;

/// Immutable description of one target-function parameter.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    name: String,
    default: Option<Value>,
    field: Option<Field>,
}

impl ParameterSpec {
    pub(crate) fn new(name: String, default: Option<Value>, field: Option<Field>) -> Self {
        ParameterSpec {
            name,
            default,
            field,
        }
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the parameter declares a default (a declared `null` counts).
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A parameter without a default must be present in every call.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// The declared default value, if any.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether a field constructor was configured for this parameter.
    #[must_use]
    pub fn has_field(&self) -> bool {
        self.field.is_some()
    }

    /// The seeded field template. Cloned into each per-call container so
    /// call-time writes never touch the schema.
    pub(crate) fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }
}

/// Ordered, immutable parameter schema for one handler.
///
/// Built once at bind time and never mutated afterwards; required names are
/// exactly the declared names minus those with defaults.
#[derive(Debug, Clone)]
pub struct Schema {
    handler_name: String,
    params: Vec<ParameterSpec>,
}

impl Schema {
    pub(crate) fn new(handler_name: String, params: Vec<ParameterSpec>) -> Self {
        Schema {
            handler_name,
            params,
        }
    }

    /// Name of the handler this schema describes.
    #[must_use]
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the handler declares no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Look up a parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Names that must be present in every call, in declaration order.
    #[must_use]
    pub fn required_names(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name())
            .collect()
    }
}
