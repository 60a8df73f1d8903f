use super::types::{ParameterSpec, Schema};
use crate::errors::ConfigError;
use crate::fields::FieldConfig;
use crate::signature::Signature;
use std::collections::HashMap;
use tracing::debug;

/// Validators mapping: parameter name → field constructor.
pub type Validators = HashMap<String, FieldConfig>;

/// Combine a parsed signature with the validators mapping into a [`Schema`].
///
/// For each parameter with a configured field, the declared default is
/// passed through the field constructor here, so a default that fails
/// coercion is rejected at bind time. Parameters without a field keep their
/// raw default unmodified.
///
/// # Errors
///
/// * [`ConfigError::UnknownParameter`] when the validators mapping names a
///   parameter absent from the signature.
/// * [`ConfigError::InvalidDefault`] when a declared default fails
///   build-time coercion.
pub fn build_schema(signature: &Signature, validators: &Validators) -> Result<Schema, ConfigError> {
    for name in validators.keys() {
        if !signature.params().iter().any(|p| &p.name == name) {
            return Err(ConfigError::UnknownParameter {
                handler: signature.name().to_string(),
                name: name.clone(),
            });
        }
    }

    let mut params = Vec::with_capacity(signature.params().len());
    for decl in signature.params() {
        let field = match validators.get(&decl.name) {
            Some(config) => Some(config.instantiate(decl.default.as_ref()).map_err(|e| {
                ConfigError::InvalidDefault {
                    name: decl.name.clone(),
                    detail: e.to_string(),
                }
            })?),
            None => None,
        };
        params.push(ParameterSpec::new(
            decl.name.clone(),
            decl.default.clone(),
            field,
        ));
    }

    let schema = Schema::new(signature.name().to_string(), params);
    debug!(
        handler_name = %schema.handler_name(),
        param_count = schema.len(),
        required = ?schema.required_names(),
        "Schema built"
    );
    Ok(schema)
}
