//! Gateway data models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status value the gateway uses for an active category.
pub const CATEGORY_ACTIVE: &str = "1";

/// A billing category, as returned by a lookup.
///
/// The gateway does not echo the category code back; [`id`](Self::id) is
/// filled in from the code the caller looked up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    /// Category code the lookup was made with.
    #[serde(skip)]
    pub id: String,
    /// Display name.
    #[serde(rename = "CategoryName", alias = "categoryName", default)]
    pub name: String,
    /// Description.
    #[serde(rename = "categoryDescription", alias = "CategoryDescription", default)]
    pub description: String,
    /// Raw status flag, `"1"` when active.
    #[serde(rename = "categoryStatus", alias = "CategoryStatus", default)]
    pub status: String,
}

impl Category {
    /// Returns true if the gateway reports this category as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == CATEGORY_ACTIVE
    }

    /// Returns true if name, description and status are all blank.
    ///
    /// This is how the gateway answers a lookup for an unknown code.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.status.is_empty()
    }
}

/// Opaque handle identifying a created bill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BillCode(String);

impl BillCode {
    /// Wraps a bill code string.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the payment page URL for this bill on the given site root.
    ///
    /// # Examples
    ///
    /// ```
    /// use toyyibpay_client::BillCode;
    ///
    /// let code = BillCode::new("xyz789");
    /// assert_eq!(code.payment_url("https://toyyibpay.com/"), "https://toyyibpay.com/xyz789");
    /// assert_eq!(code.payment_url("https://toyyibpay.com"), "https://toyyibpay.com/xyz789");
    /// ```
    #[must_use]
    pub fn payment_url(&self, site_root: &str) -> String {
        format!("{}/{}", site_root.trim_end_matches('/'), self.0)
    }

    /// Consumes the handle, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BillCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BillCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for BillCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for BillCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_deserialize() {
        let json = r#"{"CategoryName":"Test","categoryDescription":"d","categoryStatus":"1"}"#;
        let category: Category = serde_json::from_str(json).unwrap();

        assert_eq!(category.id, "");
        assert_eq!(category.name, "Test");
        assert_eq!(category.description, "d");
        assert!(category.is_active());
        assert!(!category.is_blank());
    }

    #[test]
    fn test_category_accepts_key_case_variants() {
        let json = r#"{"categoryName":"Shop","CategoryDescription":"x","CategoryStatus":"1"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.name, "Shop");
        assert!(category.is_active());
    }

    #[test]
    fn test_category_inactive_status() {
        let json = r#"{"CategoryName":"Old","categoryDescription":"","categoryStatus":"0"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert!(!category.is_active());
    }

    #[test]
    fn test_category_missing_fields_are_blank() {
        let category: Category = serde_json::from_str("{}").unwrap();
        assert!(category.is_blank());
    }

    #[test]
    fn test_bill_code_conversions() {
        let code = BillCode::from("abc");
        assert_eq!(code.as_str(), "abc");
        assert_eq!(code.to_string(), "abc");
        assert_eq!(code.as_ref(), "abc");
        assert_eq!(code.into_inner(), "abc");
    }

    #[test]
    fn test_bill_code_transparent_serde() {
        let code: BillCode = serde_json::from_str(r#""xyz789""#).unwrap();
        assert_eq!(code, BillCode::new("xyz789"));
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""xyz789""#);
    }
}
