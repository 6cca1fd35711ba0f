//! Core color math and palette storage for ChromaTap.
//! This crate is the single source of truth for color and palette invariants.

pub mod color;
pub mod logging;
pub mod model;
pub mod sampling;
pub mod service;
pub mod store;

pub use color::wheel::{ColorListener, ColorWheel, WheelGeometry};
pub use color::{
    hex_to_rgb, hsv_to_rgb, normalize_hex, rgb_to_cmyk, rgb_to_hex, rgb_to_hsv, Cmyk,
    HexParseError, Hsv, Rgb, SwatchInfo,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::palette::{
    validate_projects, ModelValidationError, Palette, PaletteUpdate, Project,
    DEFAULT_PALETTE_NAME, DEFAULT_PROJECT_NAME,
};
pub use sampling::{get_cursor_color, sample_cursor, CursorColorSource, LogicalPoint, PhysicalPoint};
pub use service::palette_service::{
    PaletteService, PaletteServiceError, PaletteTarget, LOCAL_PROJECT_NAME,
};
pub use store::{PaletteStore, ProjectRepository, StoreConfig, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
