use crate::errors::BindError;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Pattern accepted and emitted by [`FieldKind::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pattern accepted and emitted by [`FieldKind::DateTime`].
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User-supplied coercion override.
///
/// Receives the raw value and returns the coerced one. Any error is surfaced
/// as an `ARGUMENT_FORMAT` binding failure naming the format.
pub type FormatFn = Arc<dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync>;

/// Canonical coercion selector for a [`Field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Base-10 integer. Strings are trimmed then parsed; JSON numbers are
    /// truncated toward zero.
    Integer,
    /// Decimal number. Strings are trimmed then parsed.
    Float,
    /// String representation of a scalar value.
    String,
    /// Comma-delimited sequence. Each element is trimmed, then the inner
    /// format (if any) is applied. Arrays are re-coerced element-wise.
    List {
        /// Element format; `None` leaves split elements as raw strings.
        inner: Option<Box<FieldKind>>,
    },
    /// Calendar date in [`DATE_FORMAT`].
    Date,
    /// Date and time in [`DATETIME_FORMAT`].
    DateTime,
}

impl FieldKind {
    /// List with elements coerced as integers (the default element format).
    #[must_use]
    pub fn list() -> Self {
        FieldKind::List {
            inner: Some(Box::new(FieldKind::Integer)),
        }
    }

    /// List with elements coerced by `inner`.
    #[must_use]
    pub fn list_of(inner: FieldKind) -> Self {
        FieldKind::List {
            inner: Some(Box::new(inner)),
        }
    }

    /// List with elements left as raw strings.
    #[must_use]
    pub fn raw_list() -> Self {
        FieldKind::List { inner: None }
    }

    /// Name of the canonical coercion, used in error messages.
    #[must_use]
    pub fn coercion_name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::String => "string",
            FieldKind::List { .. } => "list",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime",
        }
    }

    /// Apply the canonical coercion to a raw value.
    pub fn coerce(&self, value: &Value) -> Result<Value, BindError> {
        let coerced = match self {
            FieldKind::Integer => coerce_integer(value),
            FieldKind::Float => coerce_float(value),
            FieldKind::String => coerce_string(value),
            FieldKind::List { inner } => coerce_list(value, inner.as_deref()),
            FieldKind::Date => coerce_date(value),
            FieldKind::DateTime => coerce_datetime(value),
        };
        coerced.ok_or_else(|| BindError::argument_format(self.coercion_name(), value))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coercion_name())
    }
}

fn coerce_integer(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        Value::Number(n) => n
            .as_i64()
            .map(Value::from)
            .or_else(|| n.as_f64().map(|f| Value::from(f.trunc() as i64))),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok().map(Value::from),
        Value::Number(n) => n.as_f64().map(Value::from),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => Some(Value::String(s.clone())),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn coerce_list(value: &Value, inner: Option<&FieldKind>) -> Option<Value> {
    let elements: Vec<Value> = match value {
        Value::String(s) => s
            .trim()
            .split(',')
            .map(|part| Value::String(part.trim().to_string()))
            .collect(),
        Value::Array(items) => items.clone(),
        _ => return None,
    };
    match inner {
        Some(kind) => {
            let mut out = Vec::with_capacity(elements.len());
            for element in &elements {
                out.push(kind.coerce(element).ok()?);
            }
            Some(Value::Array(out))
        }
        None => Some(Value::Array(elements)),
    }
}

fn coerce_date(value: &Value) -> Option<Value> {
    let parsed = NaiveDate::parse_from_str(value.as_str()?, DATE_FORMAT).ok()?;
    Some(Value::String(parsed.format(DATE_FORMAT).to_string()))
}

fn coerce_datetime(value: &Value) -> Option<Value> {
    let parsed = NaiveDateTime::parse_from_str(value.as_str()?, DATETIME_FORMAT).ok()?;
    Some(Value::String(parsed.format(DATETIME_FORMAT).to_string()))
}

/// A typed value holder pairing a canonical coercion with an optional
/// custom override.
///
/// The holder stores at most one value. [`Field::write`] coerces and stores;
/// [`Field::read`] re-applies the format to the stored value on every call,
/// never caching the result. Reading a field that was never written (and
/// carries no default) applies the format to JSON null and fails.
#[derive(Clone)]
pub struct Field {
    kind: FieldKind,
    custom: Option<(Arc<str>, FormatFn)>,
    value: Option<Value>,
}

impl Field {
    /// Field with the canonical coercion for `kind`.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Field {
            kind,
            custom: None,
            value: None,
        }
    }

    /// Field whose coercion is replaced by a named custom format.
    pub fn with_format<F>(kind: FieldKind, name: &str, format: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Field {
            kind,
            custom: Some((Arc::from(name), Arc::new(format))),
            value: None,
        }
    }

    /// The coercion selector this field was built with.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Name of the coercion in effect, as used in error messages.
    #[must_use]
    pub fn format_name(&self) -> &str {
        match &self.custom {
            Some((name, _)) => name.as_ref(),
            None => self.kind.coercion_name(),
        }
    }

    /// Coerce `value` and store the result.
    pub fn write(&mut self, value: Value) -> Result<(), BindError> {
        let coerced = self.apply(&value)?;
        self.value = Some(coerced);
        Ok(())
    }

    /// Store `value` without coercing it. The stored value is still coerced
    /// by every subsequent [`Field::read`].
    pub(crate) fn store_verbatim(&mut self, value: Value) {
        self.value = Some(value);
    }

    /// Coerce a declared default into the field at build time. Null defaults
    /// are skipped and leave the field unwritten.
    pub(crate) fn seed(&mut self, default: &Value) -> Result<(), BindError> {
        if !default.is_null() {
            self.value = Some(self.apply(default)?);
        }
        Ok(())
    }

    /// Apply the format to the stored value, recomputing the coercion.
    pub fn read(&self) -> Result<Value, BindError> {
        match &self.value {
            Some(value) => self.apply(value),
            None => self.apply(&Value::Null),
        }
    }

    fn apply(&self, value: &Value) -> Result<Value, BindError> {
        match &self.custom {
            Some((name, format)) => {
                format(value).map_err(|_| BindError::argument_format(name, value))
            }
            None => self.kind.coerce(value),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("kind", &self.kind)
            .field("format", &self.format_name())
            .field("value", &self.value)
            .finish()
    }
}

/// Per-parameter field constructor placed in a binder's validators mapping.
///
/// Instantiated once per schema build; the parameter's declared default is
/// passed through the coercion at that point, so a bad default surfaces at
/// bind time rather than on the first request.
#[derive(Clone)]
pub struct FieldConfig {
    kind: FieldKind,
    custom: Option<(Arc<str>, FormatFn)>,
}

impl FieldConfig {
    /// Configuration using the canonical coercion for `kind`.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        FieldConfig { kind, custom: None }
    }

    /// Configuration whose coercion is replaced by a named custom format.
    pub fn with_format<F>(kind: FieldKind, name: &str, format: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        FieldConfig {
            kind,
            custom: Some((Arc::from(name), Arc::new(format))),
        }
    }

    /// The coercion selector this configuration produces fields for.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Produce a field, seeding the declared default through the coercion.
    pub(crate) fn instantiate(&self, default: Option<&Value>) -> Result<Field, BindError> {
        let mut field = Field {
            kind: self.kind.clone(),
            custom: self.custom.clone(),
            value: None,
        };
        if let Some(value) = default {
            field.seed(value)?;
        }
        Ok(field)
    }
}

impl From<FieldKind> for FieldConfig {
    fn from(kind: FieldKind) -> Self {
        FieldConfig::new(kind)
    }
}

impl fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match &self.custom {
            Some((name, _)) => name.as_ref(),
            None => self.kind.coercion_name(),
        };
        f.debug_struct("FieldConfig")
            .field("kind", &self.kind)
            .field("format", &format)
            .finish()
    }
}
