//! Flat form-field encoding for gateway requests.
//!
//! The gateway only accepts `application/x-www-form-urlencoded` bodies. Request
//! types declare their wire names with `#[serde(rename = "...")]` and their
//! omission policy with `#[serde(skip_serializing_if = "...")]`; this module
//! turns any such value into a flat [`FormFields`] map.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, ToyyibPayError};

/// Form field name to string value, ordered by name.
pub type FormFields = BTreeMap<String, String>;

/// Encodes a request value as flat form fields.
///
/// The value must serialize to a JSON object whose members are scalars.
/// Integers use plain decimal formatting, booleans become `true`/`false`,
/// and `null` members are dropped.
///
/// # Errors
///
/// Returns [`ToyyibPayError::InvalidInput`] if the value does not serialize
/// to an object, or if a member is an array or nested object.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use toyyibpay_client::form::encode;
///
/// #[derive(Serialize)]
/// struct Lookup {
///     #[serde(rename = "categoryCode")]
///     code: String,
///     #[serde(rename = "note", skip_serializing_if = "String::is_empty")]
///     note: String,
/// }
///
/// let fields = encode(&Lookup { code: "XGsIFKnx".into(), note: String::new() }).unwrap();
/// assert_eq!(fields.get("categoryCode").map(String::as_str), Some("XGsIFKnx"));
/// assert!(!fields.contains_key("note"));
/// ```
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<FormFields> {
    let value = serde_json::to_value(value)
        .map_err(|e| ToyyibPayError::InvalidInput(format!("cannot serialize form: {e}")))?;

    let Value::Object(members) = value else {
        return Err(ToyyibPayError::InvalidInput("form value must be a struct or map".to_owned()));
    };

    let mut fields = FormFields::new();
    for (name, member) in members {
        let text = match member {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(ToyyibPayError::InvalidInput(format!(
                    "form field '{name}' must be a scalar"
                )));
            }
        };
        fields.insert(name, text);
    }

    Ok(fields)
}

/// `skip_serializing_if` predicate for integer flags where zero means unset.
#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde passes skip_serializing_if arguments by reference"
)]
pub(crate) fn is_zero(value: &u32) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests;
