//! Honeycomb background tiling.
//!
//! Cells are pointy-top hexagons laid out on a grid whose rows are `size * √3/2`
//! apart and whose columns are `size * 1.5` apart, with every odd row shifted right
//! by half a column. The grid starts at the page origin and runs two cells past the
//! far edges, so the page is covered whatever its size; cells hanging off the page
//! are clipped by the viewer.

use crate::colour::Colour;
use crate::units::Pt;
use pdf_writer::Content;
use std::f32::consts::{FRAC_PI_3, FRAC_PI_6};

/// `√3 / 2`, rounded the same way the pattern has always been drawn
const ROW_PITCH_FACTOR: f32 = 0.866;
const COLUMN_PITCH_FACTOR: f32 = 1.5;

/// One hexagon of the background
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HexCell {
    pub centre: (Pt, Pt),
    pub radius: Pt,
}

impl HexCell {
    /// Corner points, starting at -30° and turning counter-clockwise
    pub fn vertices(&self) -> [(Pt, Pt); 6] {
        let (cx, cy) = self.centre;
        std::array::from_fn(|i| {
            let angle = FRAC_PI_3 * i as f32 - FRAC_PI_6;
            (cx + self.radius * angle.cos(), cy + self.radius * angle.sin())
        })
    }

    /// Whether a point lies inside (or on the edge of) the hexagon
    pub fn contains(&self, point: (Pt, Pt)) -> bool {
        let corners = self.vertices();
        (0..6).all(|i| {
            let (ax, ay) = corners[i];
            let (bx, by) = corners[(i + 1) % 6];
            let cross = (bx - ax).0 * (point.1 - ay).0 - (by - ay).0 * (point.0 - ax).0;
            cross >= -1e-3
        })
    }
}

/// A grid of hexagons covering a page
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HexTiling {
    size: Pt,
    rows: usize,
    cols: usize,
}

impl HexTiling {
    /// Plan a tiling of `size`-radius cells covering a `width` x `height` page.
    /// Non-positive inputs produce an empty tiling.
    pub fn covering(width: Pt, height: Pt, size: Pt) -> HexTiling {
        if !(size.0 > 0.0 && width.0 > 0.0 && height.0 > 0.0) {
            return HexTiling {
                size,
                rows: 0,
                cols: 0,
            };
        }
        let rows = (height / Self::row_pitch_of(size)).ceil() as usize + 2;
        let cols = (width / Self::column_pitch_of(size)).ceil() as usize + 2;
        HexTiling { size, rows, cols }
    }

    fn row_pitch_of(size: Pt) -> Pt {
        size * ROW_PITCH_FACTOR
    }

    fn column_pitch_of(size: Pt) -> Pt {
        size * COLUMN_PITCH_FACTOR
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells, row by row from the bottom of the page
    pub fn cells(&self) -> impl Iterator<Item = HexCell> + '_ {
        let h = Self::row_pitch_of(self.size);
        let w = Self::column_pitch_of(self.size);
        (0..self.rows).flat_map(move |row| {
            let offset = if row % 2 == 1 { w / 2.0 } else { Pt::ZERO };
            (0..self.cols).map(move |col| HexCell {
                centre: (w * col as f32 + offset, h * row as f32),
                radius: self.size,
            })
        })
    }

    /// Stroke every cell as a closed, unfilled path
    pub fn draw(&self, content: &mut Content, colour: Colour, line_width: Pt) {
        content.save_state();
        colour.set_stroke(content);
        content.set_line_width(line_width.0);
        for cell in self.cells() {
            let [first, rest @ ..] = cell.vertices();
            content.move_to(first.0 .0, first.1 .0);
            for (x, y) in rest {
                content.line_to(x.0, y.0);
            }
            content.close_path();
            content.stroke();
        }
        content.restore_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers(tiling: &HexTiling, point: (Pt, Pt)) -> bool {
        tiling.cells().any(|cell| cell.contains(point))
    }

    #[test]
    fn grid_counts_include_slack() {
        let tiling = HexTiling::covering(Pt(595.28), Pt(841.89), Pt(15.0));
        // 841.89 / 12.99 = 64.8 -> 65, 595.28 / 22.5 = 26.5 -> 27
        assert_eq!(tiling.rows(), 67);
        assert_eq!(tiling.cols(), 29);
        assert_eq!(tiling.cells().count(), 67 * 29);
    }

    #[test]
    fn odd_rows_are_shifted_half_a_column() {
        let tiling = HexTiling::covering(Pt(100.0), Pt(100.0), Pt(10.0));
        let cells: Vec<_> = tiling.cells().collect();
        assert_eq!(cells[0].centre, (Pt(0.0), Pt(0.0)));
        let second_row = cells[tiling.cols()];
        assert_eq!(second_row.centre.0, Pt(7.5));
        assert!((second_row.centre.1 .0 - 8.66).abs() < 1e-4);
    }

    #[test]
    fn vertices_are_pointy_top() {
        let cell = HexCell {
            centre: (Pt(0.0), Pt(0.0)),
            radius: Pt(10.0),
        };
        let v = cell.vertices();
        assert!((v[2].0 .0).abs() < 1e-4);
        assert!((v[2].1 .0 - 10.0).abs() < 1e-4);
        assert!((v[5].1 .0 + 10.0).abs() < 1e-4);
        assert!((v[0].0 .0 - 8.660254).abs() < 1e-4);
    }

    #[test]
    fn page_corners_are_covered_for_many_sizes() {
        let pages = [(595.28, 841.89), (10.0, 10.0), (1000.0, 3.0), (7.5, 400.0)];
        let sizes = [2.0, 3.0, 15.0, 40.0, 250.0];
        for &(w, h) in pages.iter() {
            for &s in sizes.iter() {
                let tiling = HexTiling::covering(Pt(w), Pt(h), Pt(s));
                for corner in [(0.0, 0.0), (w, 0.0), (0.0, h), (w, h)] {
                    assert!(
                        covers(&tiling, (Pt(corner.0), Pt(corner.1))),
                        "corner {corner:?} uncovered for page {w}x{h}, size {s}"
                    );
                }
            }
        }
    }

    #[test]
    fn interior_points_are_covered() {
        let tiling = HexTiling::covering(Pt(200.0), Pt(150.0), Pt(15.0));
        for ix in 0..=20 {
            for iy in 0..=15 {
                let p = (Pt(ix as f32 * 10.0), Pt(iy as f32 * 10.0));
                assert!(covers(&tiling, p), "gap at {p:?}");
            }
        }
    }

    #[test]
    fn degenerate_inputs_tile_nothing() {
        assert!(HexTiling::covering(Pt(100.0), Pt(100.0), Pt(0.0)).is_empty());
        assert!(HexTiling::covering(Pt(-1.0), Pt(100.0), Pt(5.0)).is_empty());
    }

    #[test]
    fn draw_emits_one_closed_path_per_cell() {
        let tiling = HexTiling::covering(Pt(30.0), Pt(30.0), Pt(15.0));
        let mut content = Content::new();
        tiling.draw(&mut content, crate::colours::MIST, Pt(0.5));
        let ops = String::from_utf8(content.finish()).expect("ascii");
        assert_eq!(ops.matches(" m\n").count(), tiling.len());
        assert_eq!(ops.matches("h\n").count(), tiling.len());
    }
}
