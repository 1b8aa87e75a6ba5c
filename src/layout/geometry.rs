use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("page dimensions must be positive, got {width} x {height}")]
    NonPositivePage { width: Pt, height: Pt },

    #[error("margin must be positive, got {0}")]
    NonPositiveMargin(Pt),

    #[error("margin {margin} leaves no room on a {width} x {height} page")]
    MarginTooLarge { margin: Pt, width: Pt, height: Pt },
}

/// Fixed page dimensions with a uniform margin, in points
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct PageGeometry {
    width: Pt,
    height: Pt,
    margin: Pt,
}

#[derive(Deserialize)]
struct RawGeometry {
    width: Pt,
    height: Pt,
    margin: Pt,
}

impl TryFrom<RawGeometry> for PageGeometry {
    type Error = GeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        PageGeometry::new(raw.width, raw.height, raw.margin)
    }
}

impl PageGeometry {
    /// Validates that all dimensions are positive and that the margin is less
    /// than half of the shorter page side
    pub fn new(width: Pt, height: Pt, margin: Pt) -> Result<PageGeometry, GeometryError> {
        // written as negations so that NaN is rejected too
        if !(width.0 > 0.0 && height.0 > 0.0) {
            return Err(GeometryError::NonPositivePage { width, height });
        }
        if !(margin.0 > 0.0) {
            return Err(GeometryError::NonPositiveMargin(margin));
        }
        if !(margin < width.min(height) / 2.0) {
            return Err(GeometryError::MarginTooLarge {
                margin,
                width,
                height,
            });
        }
        Ok(PageGeometry {
            width,
            height,
            margin,
        })
    }

    /// For dimensions known to be valid at compile time
    pub(crate) const fn new_unchecked(width: Pt, height: Pt, margin: Pt) -> PageGeometry {
        PageGeometry {
            width,
            height,
            margin,
        }
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn height(&self) -> Pt {
        self.height
    }

    pub fn margin(&self) -> Pt {
        self.margin
    }

    pub fn size(&self) -> PageSize {
        (self.width, self.height)
    }

    /// Horizontal centre of the page
    pub fn centre_x(&self) -> Pt {
        self.width / 2.0
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> Pt {
        self.width - self.margin * 2.0
    }

    /// The page inset by the margin on every side
    pub fn content_box(&self) -> Rect {
        Rect::from_origin(Pt::ZERO, Pt::ZERO, self.width, self.height).inset(self.margin)
    }
}
