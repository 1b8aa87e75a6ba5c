use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its lower-left corner and its size
    pub fn from_origin(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// Shrink the rectangle by `amount` on every side
    pub fn inset(&self, amount: Pt) -> Rect {
        Rect {
            x1: self.x1 + amount,
            y1: self.y1 + amount,
            x2: self.x2 - amount,
            y2: self.y2 - amount,
        }
    }

    /// The largest rectangle with the given aspect ratio (width / height) that fits
    /// inside `self`, centred on both axes
    pub fn fit_aspect(&self, aspect: f32) -> Rect {
        let (w, h) = (self.width(), self.height());
        let (fit_w, fit_h) = if w / h > aspect {
            (h * aspect, h)
        } else {
            (w, w / aspect)
        };
        Rect::from_origin(
            self.x1 + (w - fit_w) / 2.0,
            self.y1 + (h - fit_h) / 2.0,
            fit_w,
            fit_h,
        )
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inset_shrinks_every_side() {
        let r = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(100.0), Pt(50.0)).inset(Pt(10.0));
        assert_eq!(r.width(), Pt(80.0));
        assert_eq!(r.height(), Pt(30.0));
        assert_eq!((r.x1, r.y1), (Pt(10.0), Pt(10.0)));
    }

    #[test]
    fn wide_content_fits_to_box_width() {
        let bounds = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(100.0), Pt(50.0));
        let fitted = bounds.fit_aspect(4.0);
        assert_eq!(fitted.width(), Pt(100.0));
        assert_eq!(fitted.height(), Pt(25.0));
        assert_eq!(fitted.y1, Pt(12.5));
    }

    #[test]
    fn tall_content_fits_to_box_height() {
        let bounds = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(100.0), Pt(50.0));
        let fitted = bounds.fit_aspect(1.0);
        assert_eq!(fitted.width(), Pt(50.0));
        assert_eq!(fitted.x1, Pt(25.0));
        assert_eq!(fitted.height(), Pt(50.0));
    }
}
