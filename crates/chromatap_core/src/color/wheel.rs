//! HSV wheel geometry and color-selection notifications.
//!
//! # Responsibility
//! - Map a point on the wheel canvas to hue (angle) and saturation (radius).
//! - Hold the wheel's current HSV state and notify one listener on change.
//!
//! # Invariants
//! - Hue 0 sits at the top of the wheel and increases clockwise.
//! - Adopting an external color (`set_color`) never notifies the listener.

use super::{hex_to_rgb, hsv_to_rgb, HexParseError, Rgb};

/// Gap between the wheel edge and the canvas border, in pixels.
pub const WHEEL_MARGIN: f64 = 5.0;

/// Synchronous observer for the canonical selected color.
pub trait ColorListener {
    fn color_selected(&mut self, hex: &str, rgb: Rgb);
}

impl<F> ColorListener for F
where
    F: FnMut(&str, Rgb),
{
    fn color_selected(&mut self, hex: &str, rgb: Rgb) {
        self(hex, rgb)
    }
}

/// Circle inscribed in the wheel canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl WheelGeometry {
    pub fn for_canvas(width: f64, height: f64) -> Self {
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        Self {
            center_x,
            center_y,
            radius: center_x.min(center_y) - WHEEL_MARGIN,
        }
    }

    /// Returns `(hue, saturation)` for a point, or `None` outside the wheel.
    pub fn pick(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.radius <= 0.0 {
            return None;
        }
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance > self.radius {
            return None;
        }

        let mut hue = dy.atan2(dx).to_degrees() + 90.0;
        if hue < 0.0 {
            hue += 360.0;
        }
        let saturation = (distance / self.radius * 100.0).min(100.0);
        Some((hue, saturation))
    }
}

/// Interactive wheel state: hue from clicks, saturation and brightness
/// from clicks or sliders.
pub struct ColorWheel {
    geometry: WheelGeometry,
    hue: f64,
    saturation: f64,
    brightness: f64,
    listener: Option<Box<dyn ColorListener>>,
}

impl ColorWheel {
    pub fn new(geometry: WheelGeometry) -> Self {
        Self {
            geometry,
            hue: 0.0,
            saturation: 100.0,
            brightness: 100.0,
            listener: None,
        }
    }

    /// Registers the listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl ColorListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn geometry(&self) -> WheelGeometry {
        self.geometry
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn brightness(&self) -> f64 {
        self.brightness
    }

    /// Handles a click; points outside the wheel are ignored.
    ///
    /// Returns whether the click changed the selection.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        let Some((hue, saturation)) = self.geometry.pick(x, y) else {
            return false;
        };
        self.hue = hue;
        self.saturation = saturation;
        self.notify();
        true
    }

    pub fn set_brightness(&mut self, value: f64) {
        self.brightness = clamp_percent(value);
        self.notify();
    }

    pub fn set_saturation(&mut self, value: f64) {
        self.saturation = clamp_percent(value);
        self.notify();
    }

    /// Adopts a color from outside the wheel (sampler, swatch re-import).
    pub fn set_color(&mut self, hex: &str) -> Result<(), HexParseError> {
        let hsv = hex_to_rgb(hex)?.to_hsv();
        self.hue = hsv.h;
        self.saturation = hsv.s;
        self.brightness = hsv.v;
        Ok(())
    }

    pub fn current_color(&self) -> Rgb {
        hsv_to_rgb(self.hue, self.saturation, self.brightness)
    }

    fn notify(&mut self) {
        let rgb = self.current_color();
        if let Some(listener) = self.listener.as_mut() {
            listener.color_selected(&rgb.to_hex(), rgb);
        }
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
