//! Type-safe price representation using decimal arithmetic.
//!
//! All prices are in Malaysian Ringgit (RM); the shop quotes a single
//! currency, so no currency field is carried.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in Malaysian Ringgit.
///
/// Wraps [`Decimal`] to avoid floating-point money. A missing price
/// (`Option<Price>`) is distinct from a zero price and must never be
/// defaulted.
///
/// ```
/// use rust_decimal::Decimal;
/// use smile_tailor_core::Price;
///
/// let price = Price::new(Decimal::new(2550, 2));
/// assert_eq!(price.display(), "RM 25.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with the RM prefix, e.g. `RM 120.00`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("RM {:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(
        value: sqlx::postgres::PgValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<'_, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::new(Decimal::new(120, 0)).display(), "RM 120.00");
        assert_eq!(Price::new(Decimal::new(2550, 2)).display(), "RM 25.50");
        assert_eq!(Price::new(Decimal::new(5, 1)).display(), "RM 0.50");
    }

    #[test]
    fn test_zero_is_a_real_price() {
        // Absence of a price is modelled as Option::None, never Price zero.
        let zero = Price::new(Decimal::ZERO);
        assert_eq!(zero.display(), "RM 0.00");
        assert_ne!(Some(zero), None::<Price>);
    }
}
