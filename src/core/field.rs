//! Field values used for dynamic lookups

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// A polymorphic field value that can hold the types stored by the rental entities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Uuid(Uuid),
    Boolean(bool),
    Date(NaiveDate),
    Decimal(Decimal),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare against a raw query-string value.
    ///
    /// The raw value is parsed into the variant's type first; a value that does
    /// not parse never matches. Strings compare exactly.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            FieldValue::String(s) => s == raw,
            FieldValue::Uuid(u) => Uuid::parse_str(raw).is_ok_and(|v| v == *u),
            FieldValue::Boolean(b) => raw.parse::<bool>().is_ok_and(|v| v == *b),
            FieldValue::Date(d) => NaiveDate::from_str(raw).is_ok_and(|v| v == *d),
            FieldValue::Decimal(d) => Decimal::from_str(raw).is_ok_and(|v| v == *d),
            FieldValue::Null => raw.is_empty(),
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Decimal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_string() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_uuid(), None);
        assert!(!value.is_null());
    }

    #[test]
    fn test_field_value_null_from_none() {
        let value: FieldValue = Option::<Uuid>::None.into();
        assert!(value.is_null());
        assert!(value.matches(""));
    }

    #[test]
    fn test_uuid_matches_parsed_value() {
        let id = Uuid::new_v4();
        let value = FieldValue::Uuid(id);
        assert!(value.matches(&id.to_string()));
        assert!(value.matches(&id.to_string().to_uppercase()));
        assert!(!value.matches("not-a-uuid"));
    }

    #[test]
    fn test_boolean_matches() {
        assert!(FieldValue::Boolean(true).matches("true"));
        assert!(!FieldValue::Boolean(true).matches("false"));
        assert!(!FieldValue::Boolean(true).matches("yes"));
    }

    #[test]
    fn test_decimal_matches_ignoring_scale() {
        let value = FieldValue::Decimal(Decimal::new(12000, 2));
        assert!(value.matches("120"));
        assert!(value.matches("120.00"));
        assert!(!value.matches("120.01"));
    }

    #[test]
    fn test_date_matches_iso_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        assert!(FieldValue::Date(date).matches("2024-03-01"));
        assert!(!FieldValue::Date(date).matches("01/03/2024"));
    }
}
