//! Response decoding for each gateway operation.
//!
//! The gateway is not a uniform JSON API. Bill creation in particular answers
//! with a JSON array on success, a status object on failure, and occasionally
//! something else entirely. Bodies are therefore decoded from raw bytes
//! against an ordered list of candidate shapes; the first shape that parses
//! decides the outcome.

use serde::{
    Deserialize,
    de::{DeserializeOwned, Error as _, Unexpected},
};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Result, ToyyibPayError},
    models::{BillCode, Category},
};

/// Status value the gateway uses for a successful call.
pub const STATUS_SUCCESS: &str = "success";

/// Outcome of one candidate shape: `Ok` when the body had this shape (the
/// inner result is the operation's answer), `Err` when it did not.
type ShapeResult<T> = std::result::Result<Result<T>, serde_json::Error>;

/// A named candidate response shape.
struct Shape<T> {
    name: &'static str,
    decode: fn(&[u8]) -> ShapeResult<T>,
}

/// Tries each shape in order and returns the first match.
///
/// When nothing matches, the error from the last candidate is reported.
fn first_match<T>(context: &str, body: &[u8], shapes: &[Shape<T>]) -> Result<T> {
    let mut last_error = None;
    for shape in shapes {
        match (shape.decode)(body) {
            Ok(outcome) => {
                debug!(context, shape = shape.name, "response shape matched");
                return outcome;
            }
            Err(e) => {
                debug!(context, shape = shape.name, error = %e, "response shape rejected");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(e) => ToyyibPayError::decode(context, e),
        None => ToyyibPayError::unusable(format!("{context}: no response shapes to try")),
    })
}

/// Builds `T` from a JSON object.
///
/// Derived struct impls also accept a JSON array and fill fields by
/// position; gateway replies are keyed objects, so anything else is
/// rejected here.
fn from_object<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    if value.is_object() {
        return T::deserialize(value);
    }
    let unexpected = match &value {
        Value::Object(_) => Unexpected::Map,
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
    };
    Err(serde_json::Error::invalid_type(unexpected, &"a JSON object"))
}

#[derive(Debug, Deserialize)]
struct CreatedBill {
    #[serde(rename = "billCode", alias = "BillCode")]
    bill_code: BillCode,
}

#[derive(Debug, Deserialize)]
struct StatusMessage {
    #[serde(default)]
    status: String,
    #[serde(rename = "msg", default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    #[serde(default)]
    status: String,
    #[serde(default)]
    result: String,
}

fn created_bill_list(body: &[u8]) -> ShapeResult<BillCode> {
    let bills: Vec<Value> = serde_json::from_slice(body)?;
    let Some(first) = bills.into_iter().next() else {
        return Ok(Err(ToyyibPayError::unusable("createBill returned an empty bill list")));
    };
    let bill: CreatedBill = from_object(first)?;
    Ok(Ok(bill.bill_code))
}

fn bill_status_message(body: &[u8]) -> ShapeResult<BillCode> {
    let reply: StatusMessage = from_object(serde_json::from_slice(body)?)?;
    if reply.status == STATUS_SUCCESS {
        // Success status but no bill list: nothing to hand back.
        return Ok(Err(ToyyibPayError::unusable(format!(
            "createBill reported success without a bill code: {}",
            reply.message
        ))));
    }
    Ok(Err(ToyyibPayError::BackendError(reply.message)))
}

const CREATE_BILL_SHAPES: &[Shape<BillCode>] = &[
    Shape { name: "bill_list", decode: created_bill_list },
    Shape { name: "status_message", decode: bill_status_message },
];

/// Decodes a `createBill` response body.
///
/// # Errors
///
/// - [`ToyyibPayError::BackendError`] with the gateway's `msg` when it
///   reports a failure status
/// - [`ToyyibPayError::DecodeError`] when the body matches no known shape,
///   holds an empty bill list, or reports success without a bill code
pub fn create_bill(body: &[u8]) -> Result<BillCode> {
    first_match("createBill response", body, CREATE_BILL_SHAPES)
}

/// Decodes a `getCategoryDetails` response body for `code`.
///
/// # Errors
///
/// - [`ToyyibPayError::InvalidResponse`] when the body is empty or `null`
/// - [`ToyyibPayError::InvalidCategoryCode`] when every field is blank
/// - [`ToyyibPayError::DecodeError`] when the body is not a category object
pub fn category(code: &str, body: &[u8]) -> Result<Category> {
    if body.trim_ascii().is_empty() {
        return Err(ToyyibPayError::InvalidResponse);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ToyyibPayError::decode("getCategoryDetails response", e))?;
    if value.is_null() {
        return Err(ToyyibPayError::InvalidResponse);
    }
    let mut category: Category = from_object(value)
        .map_err(|e| ToyyibPayError::decode("getCategoryDetails response", e))?;

    if category.is_blank() {
        return Err(ToyyibPayError::InvalidCategoryCode(code.to_owned()));
    }

    code.clone_into(&mut category.id);
    Ok(category)
}

/// Decodes an `inactiveBill` response body.
///
/// # Errors
///
/// - [`ToyyibPayError::BackendError`] with the gateway's `result` text when
///   the status is anything but `"success"`
/// - [`ToyyibPayError::DecodeError`] when the body is not a status object
pub fn deactivate_bill(body: &[u8]) -> Result<()> {
    let reply: StatusResult = serde_json::from_slice(body)
        .and_then(from_object)
        .map_err(|e| ToyyibPayError::decode("inactiveBill response", e))?;

    if reply.status != STATUS_SUCCESS {
        return Err(ToyyibPayError::BackendError(reply.result));
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unreachable,
    reason = "test code uses unreachable for expected-path assertions"
)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bill_success_array() {
        let code = create_bill(br#"[{"billCode":"xyz789"}]"#).unwrap();
        assert_eq!(code.as_str(), "xyz789");
    }

    #[test]
    fn test_create_bill_accepts_capitalised_key() {
        let code = create_bill(br#"[{"BillCode":"gcbhict9"}]"#).unwrap();
        assert_eq!(code.as_str(), "gcbhict9");
    }

    #[test]
    fn test_create_bill_takes_first_element() {
        let code = create_bill(br#"[{"billCode":"first"},{"billCode":"second"}]"#).unwrap();
        assert_eq!(code.as_str(), "first");
    }

    #[test]
    fn test_create_bill_backend_error() {
        match create_bill(br#"{"status":"fail","msg":"invalid category"}"#) {
            Err(ToyyibPayError::BackendError(msg)) => assert_eq!(msg, "invalid category"),
            other => unreachable!("expected BackendError, got {other:?}"),
        }
    }

    #[test]
    fn test_create_bill_object_without_status_is_backend_error() {
        match create_bill(br#"{"msg":"[KEY-DID-NOT-EXIST-OR-USER-IS-NOT-ACTIVE]"}"#) {
            Err(ToyyibPayError::BackendError(msg)) => {
                assert_eq!(msg, "[KEY-DID-NOT-EXIST-OR-USER-IS-NOT-ACTIVE]");
            }
            other => unreachable!("expected BackendError, got {other:?}"),
        }
    }

    #[test]
    fn test_create_bill_unparseable_body() {
        let result = create_bill(b"not json");
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: Some(_), .. })));
    }

    #[test]
    fn test_create_bill_html_body() {
        let result = create_bill(b"<html><body>Maintenance</body></html>");
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { .. })));
    }

    #[test]
    fn test_create_bill_success_status_without_code() {
        let result = create_bill(br#"{"status":"success","msg":"ok"}"#);
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: None, .. })));
    }

    #[test]
    fn test_create_bill_empty_array() {
        let result = create_bill(b"[]");
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: None, .. })));
    }

    #[test]
    fn test_create_bill_array_without_bill_code() {
        let result = create_bill(br#"[{"other":"x"}]"#);
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: Some(_), .. })));
    }

    #[test]
    fn test_create_bill_positional_array_is_decode_error() {
        let result = create_bill(br#"["fail","boom"]"#);
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: Some(_), .. })));

        let result = create_bill(br#"[["xyz789"]]"#);
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: Some(_), .. })));
    }

    #[test]
    fn test_category_array_body_is_decode_error() {
        assert!(matches!(
            category("X", br#"["Test","d","1"]"#),
            Err(ToyyibPayError::DecodeError { source: Some(_), .. })
        ));
        assert!(matches!(category("X", b"[]"), Err(ToyyibPayError::DecodeError { .. })));
        assert!(matches!(category("X", b"\"Test\""), Err(ToyyibPayError::DecodeError { .. })));
    }

    #[test]
    fn test_category_success() {
        let body = br#"{"CategoryName":"Test","categoryDescription":"d","categoryStatus":"1"}"#;
        let category = category("ABC123", body).unwrap();

        assert_eq!(category.id, "ABC123");
        assert_eq!(category.name, "Test");
        assert!(category.is_active());
    }

    #[test]
    fn test_category_blank_payload_is_invalid_code() {
        let body = br#"{"CategoryName":"","categoryDescription":"","categoryStatus":""}"#;
        match category("NOPE", body) {
            Err(ToyyibPayError::InvalidCategoryCode(code)) => assert_eq!(code, "NOPE"),
            other => unreachable!("expected InvalidCategoryCode, got {other:?}"),
        }
    }

    #[test]
    fn test_category_null_and_empty_are_invalid_response() {
        assert!(matches!(category("X", b"null"), Err(ToyyibPayError::InvalidResponse)));
        assert!(matches!(category("X", b""), Err(ToyyibPayError::InvalidResponse)));
        assert!(matches!(category("X", b"  \n"), Err(ToyyibPayError::InvalidResponse)));
    }

    #[test]
    fn test_category_garbage_is_decode_error() {
        assert!(matches!(category("X", b"oops"), Err(ToyyibPayError::DecodeError { .. })));
    }

    #[test]
    fn test_category_partial_payload_is_accepted() {
        let category = category("X", br#"{"CategoryName":"Only name"}"#).unwrap();
        assert_eq!(category.name, "Only name");
        assert!(!category.is_active());
    }

    #[test]
    fn test_deactivate_success() {
        assert!(deactivate_bill(br#"{"status":"success","result":""}"#).is_ok());
    }

    #[test]
    fn test_deactivate_failure() {
        match deactivate_bill(br#"{"status":"fail","result":"bill not found"}"#) {
            Err(ToyyibPayError::BackendError(msg)) => assert_eq!(msg, "bill not found"),
            other => unreachable!("expected BackendError, got {other:?}"),
        }
    }

    #[test]
    fn test_deactivate_array_body_is_decode_error() {
        assert!(matches!(
            deactivate_bill(br#"["success"]"#),
            Err(ToyyibPayError::DecodeError { source: Some(_), .. })
        ));
        assert!(matches!(deactivate_bill(b"null"), Err(ToyyibPayError::DecodeError { .. })));
    }

    #[test]
    fn test_deactivate_garbage_is_decode_error() {
        assert!(matches!(deactivate_bill(b"<html>"), Err(ToyyibPayError::DecodeError { .. })));
    }

    #[test]
    fn test_first_match_without_shapes() {
        let result: Result<u8> = first_match("nothing", b"{}", &[]);
        assert!(matches!(result, Err(ToyyibPayError::DecodeError { source: None, .. })));
    }
}
