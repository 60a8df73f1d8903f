//! Per-call argument resolution.
//!
//! An [`ArgumentContainer`] is created for a single call from a shared
//! [`Schema`] and that call's merged raw arguments. It enforces
//! required-parameter presence, applies defaults, coerces supplied optional
//! values, and produces the resolved values in declaration order. Containers
//! are exclusively owned by their call and dropped when it returns — nothing
//! written during one call is visible to the next.

use crate::errors::BindError;
use crate::fields::Field;
use crate::schema::Schema;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Maximum resolved arguments held inline before heap allocation. Most
/// handlers declare well under eight parameters.
pub const MAX_INLINE_ARGS: usize = 8;

/// Stack-allocated resolved-argument list for the call path.
pub type ArgVec = SmallVec<[Value; MAX_INLINE_ARGS]>;

/// Per-call mapping from parameter name to raw request-derived value.
pub type RawArguments = HashMap<String, Value>;

#[derive(Debug)]
enum Slot {
    Field(Field),
    Plain(Option<Value>),
}

/// Per-call holder of resolved values for every parameter in a [`Schema`].
#[derive(Debug)]
pub struct ArgumentContainer<'s> {
    schema: &'s Schema,
    slots: Vec<Slot>,
}

impl<'s> ArgumentContainer<'s> {
    /// Resolve `raw` against the schema.
    ///
    /// Required parameters must all be present or the container fails with
    /// `ARGUMENT_MISSING`, listing exactly the absent names. Required values
    /// are stored verbatim; supplied optional values are written through the
    /// parameter's field when truthy (a present-but-falsy value keeps the
    /// schema default), so a malformed optional value fails here with
    /// `ARGUMENT_FORMAT`.
    pub fn bind(schema: &'s Schema, raw: &RawArguments) -> Result<Self, BindError> {
        let missing: Vec<String> = schema
            .params()
            .iter()
            .filter(|p| p.is_required() && !raw.contains_key(p.name()))
            .map(|p| p.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BindError::argument_missing(schema.handler_name(), &missing));
        }

        let mut slots = Vec::with_capacity(schema.len());
        for spec in schema.params() {
            let supplied = raw.get(spec.name());
            let slot = match spec.field() {
                Some(template) => {
                    let mut field = template.clone();
                    if spec.is_required() {
                        // Required values bypass write-time coercion; the
                        // format is still applied when args are produced.
                        if let Some(value) = supplied {
                            field.store_verbatim(value.clone());
                        }
                    } else if let Some(value) = supplied {
                        if is_truthy(value) {
                            field.write(value.clone())?;
                        }
                    }
                    Slot::Field(field)
                }
                None => {
                    if spec.is_required() {
                        Slot::Plain(supplied.cloned())
                    } else {
                        match supplied {
                            Some(value) if is_truthy(value) => Slot::Plain(Some(value.clone())),
                            _ => Slot::Plain(spec.default().cloned()),
                        }
                    }
                }
            };
            slots.push(slot);
        }

        Ok(ArgumentContainer { schema, slots })
    }

    /// The schema this container was bound against.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        self.schema
    }

    /// Resolved values in declaration order.
    ///
    /// Field-backed parameters re-apply their format on every call, so this
    /// recomputes coercion — a verbatim-stored required value that does not
    /// match its format fails here with `ARGUMENT_FORMAT`.
    pub fn args(&self) -> Result<ArgVec, BindError> {
        let mut out = ArgVec::new();
        for slot in &self.slots {
            out.push(Self::resolve(slot)?);
        }
        Ok(out)
    }

    /// Resolved value for a single parameter, `None` for unknown names.
    pub fn value(&self, name: &str) -> Option<Result<Value, BindError>> {
        let idx = self.schema.params().iter().position(|p| p.name() == name)?;
        Some(Self::resolve(&self.slots[idx]))
    }

    fn resolve(slot: &Slot) -> Result<Value, BindError> {
        match slot {
            Slot::Field(field) => field.read(),
            Slot::Plain(value) => Ok(value.clone().unwrap_or(Value::Null)),
        }
    }
}

/// Truthiness of a raw value, deciding whether a supplied optional value
/// overrides the schema default. Null, false, zero, and empty strings,
/// arrays, and objects all keep the default.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
