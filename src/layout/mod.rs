//! Page geometry, text measurement and the decorative background.
//!
//! Nothing in here draws text by itself: these are the measuring and planning
//! tools the certificate composer uses to decide where things go.
//!
//! - [`PageGeometry`](crate::layout::PageGeometry) - validated page size and margin
//! - [`width_of_text`](crate::layout::width_of_text) - exact width of a string in a standard font
//! - [`wrap_chars`](crate::layout::wrap_chars) - greedy character-level line breaking
//! - [`HexTiling`](crate::layout::HexTiling) - honeycomb pattern covering a page
//!
//! # Example
//!
//! ```
//! use cert_gen::{Font, Pt};
//! use cert_gen::layout::{wrap_chars, width_of_text};
//!
//! let fingerprint = "4fe7b050ae4020d6baf57ee6663f3790465ea6e22efc1f00cf2c0faa8adabbe2";
//! let lines = wrap_chars(fingerprint, &Font::Courier, Pt(9.0), Pt(200.0));
//!
//! assert_eq!(lines.concat(), fingerprint);
//! assert!(lines.iter().all(|l| width_of_text(l, &Font::Courier, Pt(9.0)) <= Pt(200.0)));
//! ```

mod geometry;
mod hexagon;
mod text;

pub use geometry::*;
pub use hexagon::*;
pub use text::*;
