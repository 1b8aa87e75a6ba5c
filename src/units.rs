//! Physical length units used throughout the page geometry.
//!
//! All drawing happens in PDF points ([`Pt`], 1/72 inch). Millimetres ([`Mm`]) and
//! inches ([`In`]) exist so that layout constants can be written the way they are
//! measured on paper and converted at the edges.
//!
//! ```
//! use cert_gen::{Mm, Pt};
//!
//! let margin: Pt = Mm(25.4).into();
//! assert!((margin.0 - 72.0).abs() < 1e-4);
//! ```

use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};
use serde::Deserialize;
use std::ops::{Div, Mul, Neg};

/// A length in PDF points
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Sum,
    Display,
    From,
    Into,
    Deserialize,
)]
#[serde(transparent)]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, Deserialize)]
#[serde(transparent)]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, Deserialize)]
#[serde(transparent)]
pub struct In(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }
}

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * 72.0 / 25.4)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Self {
        Pt(inches.0 * 72.0)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 * 25.4 / 72.0)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Ratio of two lengths
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetres_convert_to_points() {
        let pt: Pt = Mm(210.0).into();
        assert!((pt.0 - 595.2756).abs() < 1e-3);
        let back: Mm = pt.into();
        assert!((back.0 - 210.0).abs() < 1e-3);
    }

    #[test]
    fn inches_convert_to_points() {
        assert_eq!(Pt::from(In(0.5)), Pt(36.0));
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let a = Pt(10.0) + Pt(5.0) - Pt(3.0);
        assert_eq!(a, Pt(12.0));
        assert_eq!(a * 2.0, Pt(24.0));
        assert_eq!(a / 4.0, Pt(3.0));
        assert_eq!(Pt(12.0) / Pt(4.0), 3.0);
        assert_eq!(-a, Pt(-12.0));
        let total: Pt = [Pt(1.0), Pt(2.0)].into_iter().sum();
        assert_eq!(total, Pt(3.0));
    }
}
