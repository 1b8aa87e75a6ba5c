//! Paper sizes, as `(width, height)` in points.
//!
//! ```
//! use cert_gen::pagesize::{self, A4};
//! use cert_gen::Mm;
//!
//! assert_eq!(A4, pagesize::from_mm(Mm(210.0), Mm(297.0)));
//! ```

use crate::units::{Mm, Pt};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// ISO A4, the size certificates are printed on
pub const A4: PageSize = from_mm(Mm(210.0), Mm(297.0));

/// A page size measured in millimetres
pub const fn from_mm(width: Mm, height: Mm) -> PageSize {
    (Pt(width.0 * 72.0 / 25.4), Pt(height.0 * 72.0 / 25.4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_portrait_in_points() {
        let (w, h) = A4;
        assert!(w < h);
        assert!((w.0 - 595.2756).abs() < 1e-3);
        assert!((h.0 - 841.8898).abs() < 1e-3);
    }
}
