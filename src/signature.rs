//! Handler signature inspection.
//!
//! A handler declares its calling convention as a compact declaration
//! string, e.g. `"get_pet(pet_id, limit = 25)"`. The inspector parses it
//! into ordered parameter names plus the trailing subset carrying default
//! values (defaults are JSON literals). Only simple positional parameters
//! are supported: variadic markers (`*args`, `**kwargs`) are rejected
//! outright rather than silently ignored.

use crate::errors::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid"));

/// One declared parameter: its name and, if present, its default value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Declared default, parsed from its JSON literal. `None` means the
    /// parameter is required.
    pub default: Option<Value>,
}

/// Parsed handler signature: handler name, ordered parameter names, and the
/// trailing subset with declared defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    params: Vec<ParamDecl>,
}

impl Signature {
    /// Parse a declaration of the form `name(param, param = <json>, ...)`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed declarations, invalid or
    /// duplicate names, variadic markers, non-trailing defaults, and
    /// defaults that are not valid JSON.
    pub fn parse(decl: &str) -> Result<Self, ConfigError> {
        let decl = decl.trim();
        let invalid = |detail: &str| ConfigError::InvalidDeclaration {
            decl: decl.to_string(),
            detail: detail.to_string(),
        };

        let open = decl.find('(').ok_or_else(|| invalid("missing '('"))?;
        if !decl.ends_with(')') {
            return Err(invalid("missing trailing ')'"));
        }
        let name = decl[..open].trim();
        if !IDENT_RE.is_match(name) {
            return Err(invalid("handler name is not an identifier"));
        }
        let inner = &decl[open + 1..decl.len() - 1];

        let mut params: Vec<ParamDecl> = Vec::new();
        let mut last_defaulted: Option<String> = None;
        for entry in split_parameters(inner) {
            let entry = entry.trim();
            if entry.is_empty() {
                return Err(invalid("empty parameter entry"));
            }
            if entry.starts_with('*') {
                return Err(ConfigError::VariadicParameter {
                    name: entry.to_string(),
                });
            }

            let (param_name, default) = match entry.split_once('=') {
                Some((lhs, rhs)) => {
                    let param_name = lhs.trim();
                    let literal = rhs.trim();
                    let default: Value = serde_json::from_str(literal).map_err(|e| {
                        ConfigError::InvalidDefault {
                            name: param_name.to_string(),
                            detail: e.to_string(),
                        }
                    })?;
                    (param_name, Some(default))
                }
                None => (entry, None),
            };

            if !IDENT_RE.is_match(param_name) {
                return Err(ConfigError::InvalidParameterName {
                    name: param_name.to_string(),
                });
            }
            if params.iter().any(|p| p.name == param_name) {
                return Err(ConfigError::DuplicateParameter {
                    name: param_name.to_string(),
                });
            }
            match (&default, &last_defaulted) {
                (None, Some(prior)) => {
                    return Err(ConfigError::NonTrailingDefault {
                        name: prior.clone(),
                    });
                }
                (Some(_), _) => last_defaulted = Some(param_name.to_string()),
                (None, None) => {}
            }

            params.push(ParamDecl {
                name: param_name.to_string(),
                default,
            });
        }

        Ok(Signature {
            name: name.to_string(),
            params,
        })
    }

    /// Handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters in order.
    #[must_use]
    pub fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    /// Ordered parameter names.
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    /// The trailing defaulted parameters, in declaration order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params
            .iter()
            .filter_map(|p| p.default.as_ref().map(|d| (p.name.as_str(), d)))
    }
}

/// Split a parameter list on top-level commas.
///
/// Default values are JSON literals, so commas inside brackets, braces, and
/// string literals must not split entries.
fn split_parameters(inner: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0usize;
    for (idx, ch) in inner.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&inner[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    let tail = &inner[start..];
    if !entries.is_empty() || !tail.trim().is_empty() {
        entries.push(tail);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_parameters_respects_json() {
        let entries = split_parameters(r#"a, b = [1, 2], c = "x,y""#);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].trim(), "a");
        assert_eq!(entries[1].trim(), "b = [1, 2]");
        assert_eq!(entries[2].trim(), r#"c = "x,y""#);
    }

    #[test]
    fn test_split_parameters_empty() {
        assert!(split_parameters("").is_empty());
        assert!(split_parameters("   ").is_empty());
    }
}
