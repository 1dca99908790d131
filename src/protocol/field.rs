//! # Command Fields
//!
//! A field is one data value inside a command, wrapped or suffixed according
//! to its [`SeparatorKind`].
//!
//! ## Wire Forms
//!
//! | Kind | Literal | Output for `v` |
//! |------|---------|----------------|
//! | Value | `H` | `vH` |
//! | Multiply | `*` | `v*` |
//! | Decimal | `.` | `v` (the point is part of `v`) |
//! | Description | `"` | `"v"` |
//! | DescriptionDoubleHeight | `~"` | `~"v"` |
//!
//! Decimal fields append nothing: the terminator that follows supplies the
//! numeric class.

use crate::error::{Result, ScontrinoError};

/// How a field value is wrapped on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatorKind {
    /// Integer amount, suffixed with `H`
    Value,
    /// Decimal number, emitted as-is
    Decimal,
    /// Integer quantity, suffixed with `*`
    Multiply,
    /// Text in double quotes
    Description,
    /// Double-height text, opened with `~"` and closed with `"`
    DescriptionDoubleHeight,
}

impl SeparatorKind {
    /// The separator literal as written in the device manual.
    pub fn literal(self) -> &'static str {
        match self {
            SeparatorKind::Value => "H",
            SeparatorKind::Decimal => ".",
            SeparatorKind::Multiply => "*",
            SeparatorKind::Description => "\"",
            SeparatorKind::DescriptionDoubleHeight => "~\"",
        }
    }

    /// Look up a separator kind by its literal.
    ///
    /// ```
    /// use scontrino::protocol::field::SeparatorKind;
    ///
    /// assert_eq!(SeparatorKind::from_literal("*").unwrap(), SeparatorKind::Multiply);
    /// assert!(SeparatorKind::from_literal("%").is_err());
    /// ```
    pub fn from_literal(literal: &str) -> Result<Self> {
        match literal {
            "H" => Ok(SeparatorKind::Value),
            "." => Ok(SeparatorKind::Decimal),
            "*" => Ok(SeparatorKind::Multiply),
            "\"" => Ok(SeparatorKind::Description),
            "~\"" => Ok(SeparatorKind::DescriptionDoubleHeight),
            other => Err(ScontrinoError::UnsupportedSeparator(other.to_string())),
        }
    }
}

/// A single data value of a command.
///
/// Fields are not validated when built; [`Field::encode`] checks the value
/// against its kind so that a malformed field fails before any byte of its
/// command is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    value: String,
    kind: SeparatorKind,
}

impl Field {
    pub fn new(value: impl Into<String>, kind: SeparatorKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Integer amount field (`750H`).
    pub fn value(amount: u64) -> Self {
        Self::new(amount.to_string(), SeparatorKind::Value)
    }

    /// Quantity field (`2*`).
    pub fn multiply(quantity: u64) -> Self {
        Self::new(quantity.to_string(), SeparatorKind::Multiply)
    }

    /// Quoted text field (`"BREAD"`).
    pub fn description(text: impl Into<String>) -> Self {
        Self::new(text, SeparatorKind::Description)
    }

    pub fn raw_value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> SeparatorKind {
        self.kind
    }

    /// Render this field in wire form.
    ///
    /// ## Errors
    ///
    /// - [`ScontrinoError::InvalidNumericField`] for value/multiply fields
    ///   whose value is empty or has a non-digit
    /// - [`ScontrinoError::InvalidDecimalField`] for decimal fields without `.`
    pub fn encode(&self) -> Result<String> {
        let value = self.value.as_str();
        match self.kind {
            SeparatorKind::Value | SeparatorKind::Multiply => {
                if !is_unsigned_integer(value) {
                    return Err(ScontrinoError::InvalidNumericField(value.to_string()));
                }
                Ok(format!("{}{}", value, self.kind.literal()))
            }
            SeparatorKind::Decimal => {
                if !value.contains('.') {
                    return Err(ScontrinoError::InvalidDecimalField(value.to_string()));
                }
                Ok(value.to_string())
            }
            SeparatorKind::Description | SeparatorKind::DescriptionDoubleHeight => Ok(format!(
                "{}{}{}",
                self.kind.literal(),
                value,
                SeparatorKind::Description.literal()
            )),
        }
    }
}

fn is_unsigned_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_and_multiply() {
        assert_eq!(Field::value(750).encode().unwrap(), "750H");
        assert_eq!(Field::multiply(2).encode().unwrap(), "2*");
        assert_eq!(Field::new("0", SeparatorKind::Value).encode().unwrap(), "0H");
    }

    #[test]
    fn test_numeric_rejects_non_digits() {
        for bad in ["", "-5", "+5", "1.5", "12a", " 1"] {
            let err = Field::new(bad, SeparatorKind::Value).encode().unwrap_err();
            assert!(matches!(err, ScontrinoError::InvalidNumericField(_)), "{bad:?}");
        }
        let err = Field::new("x", SeparatorKind::Multiply).encode().unwrap_err();
        assert!(matches!(err, ScontrinoError::InvalidNumericField(_)));
    }

    #[test]
    fn test_decimal() {
        let field = Field::new("50.12", SeparatorKind::Decimal);
        assert_eq!(field.encode().unwrap(), "50.12");

        let err = Field::new("50", SeparatorKind::Decimal).encode().unwrap_err();
        assert!(matches!(err, ScontrinoError::InvalidDecimalField(_)));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(Field::description("BREAD").encode().unwrap(), "\"BREAD\"");
        assert_eq!(
            Field::new("BIG", SeparatorKind::DescriptionDoubleHeight)
                .encode()
                .unwrap(),
            "~\"BIG\""
        );
        assert_eq!(Field::description("").encode().unwrap(), "\"\"");
    }

    #[test]
    fn test_literal_lookup() {
        for kind in [
            SeparatorKind::Value,
            SeparatorKind::Decimal,
            SeparatorKind::Multiply,
            SeparatorKind::Description,
            SeparatorKind::DescriptionDoubleHeight,
        ] {
            assert_eq!(SeparatorKind::from_literal(kind.literal()).unwrap(), kind);
        }
        let err = SeparatorKind::from_literal("~").unwrap_err();
        assert!(matches!(err, ScontrinoError::UnsupportedSeparator(_)));
    }
}
