//! Screen sampling seam.
//!
//! # Responsibility
//! - Define the capability a platform backend provides to read the pixel
//!   under the cursor.
//! - Convert logical cursor coordinates to physical pixels on high-DPI
//!   displays before sampling.
//!
//! # Invariants
//! - Sampling never panics; any backend failure is reported as `None`.

use crate::color::{Rgb, SwatchInfo};
use log::debug;

/// Cursor position in logical (DPI-independent) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalPoint {
    pub x: f64,
    pub y: f64,
}

/// Position in physical screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalPoint {
    pub x: i64,
    pub y: i64,
}

impl LogicalPoint {
    /// Scales by the display factor; a non-positive or non-finite factor
    /// is treated as 1.
    pub fn to_physical(self, scale_factor: f64) -> PhysicalPoint {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        PhysicalPoint {
            x: (self.x * scale).round() as i64,
            y: (self.y * scale).round() as i64,
        }
    }
}

/// Platform capability for reading screen pixels.
pub trait CursorColorSource {
    fn cursor_position(&self) -> Option<LogicalPoint>;
    /// Scale factor of the display nearest to `point`.
    fn scale_factor_at(&self, point: LogicalPoint) -> f64;
    fn pixel_color(&self, point: PhysicalPoint) -> Option<Rgb>;
}

/// Reads the color under the cursor, or `None` when no color is available.
pub fn get_cursor_color(source: &dyn CursorColorSource) -> Option<Rgb> {
    let Some(logical) = source.cursor_position() else {
        debug!("event=cursor_sample module=sampling status=error reason=no_cursor");
        return None;
    };
    let physical = logical.to_physical(source.scale_factor_at(logical));
    let color = source.pixel_color(physical);
    if color.is_none() {
        debug!(
            "event=cursor_sample module=sampling status=error reason=no_pixel x={} y={}",
            physical.x, physical.y
        );
    }
    color
}

/// Samples the cursor and derives the swatch views for display.
pub fn sample_cursor(source: &dyn CursorColorSource) -> Option<SwatchInfo> {
    get_cursor_color(source).map(SwatchInfo::from_rgb)
}
