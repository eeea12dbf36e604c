//! Customer phone number type.
//!
//! Phone numbers are stored E.164-normalized with a leading `+`. The shop
//! serves Malaysian customers, so bare local numbers are normalized against
//! the `+60` country code.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Default country code applied to non-prefixed numbers.
const DEFAULT_COUNTRY_CODE: &str = "+60";

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The number contains a non-digit character after the `+`.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// The number has too few digits.
    #[error("phone number must have at least {min} digits")]
    TooShort {
        /// Minimum digit count.
        min: usize,
    },
    /// The number has too many digits (E.164 limit).
    #[error("phone number must have at most {max} digits")]
    TooLong {
        /// Maximum digit count.
        max: usize,
    },
}

/// An E.164-normalized phone number.
///
/// ## Normalization rules
///
/// - Input already starting with `+` passes through unchanged.
/// - Input starting with `0` has the leading zero replaced by `+60`.
/// - Any other input gets `+60` prepended as-is.
///
/// Spaces and dashes are stripped before normalization.
///
/// ## Examples
///
/// ```
/// use smile_tailor_core::PhoneNumber;
///
/// let phone = PhoneNumber::normalize("0123456789").unwrap();
/// assert_eq!(phone.as_str(), "+60123456789");
///
/// let phone = PhoneNumber::normalize("+6598765432").unwrap();
/// assert_eq!(phone.as_str(), "+6598765432");
///
/// // wa.me links use the number without the plus sign
/// assert_eq!(phone.wa_number(), "6598765432");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Minimum number of digits after the country code prefix.
    pub const MIN_DIGITS: usize = 7;

    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Normalize and validate a raw phone input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters other
    /// than digits (after separator stripping), or falls outside the
    /// 7-15 digit E.164 range.
    pub fn normalize(input: &str) -> Result<Self, PhoneError> {
        let compact: String = input
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        if compact.is_empty() {
            return Err(PhoneError::Empty);
        }

        let normalized = if let Some(rest) = compact.strip_prefix('+') {
            format!("+{rest}")
        } else if let Some(rest) = compact.strip_prefix('0') {
            format!("{DEFAULT_COUNTRY_CODE}{rest}")
        } else {
            format!("{DEFAULT_COUNTRY_CODE}{compact}")
        };

        let digits = normalized.trim_start_matches('+');
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(PhoneError::InvalidCharacter(bad));
        }
        if digits.len() < Self::MIN_DIGITS {
            return Err(PhoneError::TooShort {
                min: Self::MIN_DIGITS,
            });
        }
        if digits.len() > Self::MAX_DIGITS {
            return Err(PhoneError::TooLong {
                max: Self::MAX_DIGITS,
            });
        }

        Ok(Self(normalized))
    }

    /// Wrap a value that is already normalized (e.g. read back from the
    /// database). No validation is performed.
    #[must_use]
    pub fn from_normalized(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the phone number as a string slice, including the `+`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The number in wa.me deep-link form: digits only, no `+`.
    #[must_use]
    pub fn wa_number(&self) -> &str {
        self.0.trim_start_matches('+')
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PhoneNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PhoneNumber {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PhoneNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_rewritten_to_country_code() {
        let phone = PhoneNumber::normalize("0123456789").expect("valid");
        assert_eq!(phone.as_str(), "+60123456789");
    }

    #[test]
    fn test_bare_number_gets_country_code() {
        let phone = PhoneNumber::normalize("123456789").expect("valid");
        assert_eq!(phone.as_str(), "+60123456789");
    }

    #[test]
    fn test_plus_prefixed_passes_through() {
        let phone = PhoneNumber::normalize("+6598765432").expect("valid");
        assert_eq!(phone.as_str(), "+6598765432");
    }

    #[test]
    fn test_separators_stripped() {
        let phone = PhoneNumber::normalize("012-345 6789").expect("valid");
        assert_eq!(phone.as_str(), "+60123456789");
    }

    #[test]
    fn test_wa_number_strips_plus() {
        let phone = PhoneNumber::normalize("0123456789").expect("valid");
        assert_eq!(phone.wa_number(), "60123456789");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(PhoneNumber::normalize(""), Err(PhoneError::Empty)));
        assert!(matches!(
            PhoneNumber::normalize("   "),
            Err(PhoneError::Empty)
        ));
    }

    #[test]
    fn test_letters_rejected() {
        let err = PhoneNumber::normalize("01234abc89").expect_err("invalid");
        assert!(matches!(err, PhoneError::InvalidCharacter('a')));
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(matches!(
            PhoneNumber::normalize("+6012"),
            Err(PhoneError::TooShort { .. })
        ));
    }

    #[test]
    fn test_too_long_rejected() {
        assert!(matches!(
            PhoneNumber::normalize("+6012345678901234567"),
            Err(PhoneError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let phone = PhoneNumber::normalize("0123456789").expect("valid");
        let json = serde_json::to_string(&phone).expect("serialize");
        assert_eq!(json, "\"+60123456789\"");
    }
}
