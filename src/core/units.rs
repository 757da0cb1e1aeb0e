//! CT-e cargo unit codes (`infCarga/infQ/cUnid`).
//!
//! The layout defines six codes. Only the two mass units take part in the
//! declared weight; the rest are kept in the quantity list as read.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `cUnid`: unit of a cargo quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CargoUnit {
    /// 00: Cubic metre.
    CubicMetre,
    /// 01: Kilogram.
    Kilogram,
    /// 02: Metric ton.
    Ton,
    /// 03: Unit (count).
    Unit,
    /// 04: Litre.
    Litre,
    /// 05: MMBTU.
    Mmbtu,
}

impl CargoUnit {
    /// Two-digit `cUnid` code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CubicMetre => "00",
            Self::Kilogram => "01",
            Self::Ton => "02",
            Self::Unit => "03",
            Self::Litre => "04",
            Self::Mmbtu => "05",
        }
    }

    /// Parse from a `cUnid` code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "00" => Some(Self::CubicMetre),
            "01" => Some(Self::Kilogram),
            "02" => Some(Self::Ton),
            "03" => Some(Self::Unit),
            "04" => Some(Self::Litre),
            "05" => Some(Self::Mmbtu),
            _ => None,
        }
    }

    /// Convert `amount` in this unit to kilograms; `None` for non-mass units
    /// and for amounts whose conversion overflows `Decimal`.
    pub fn to_kilograms(&self, amount: Decimal) -> Option<Decimal> {
        match self {
            Self::Kilogram => Some(amount),
            Self::Ton => amount.checked_mul(dec!(1000)),
            _ => None,
        }
    }
}
