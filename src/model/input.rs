use nalgebra::Vector2;

/// Size of the drawing surface in pixels. Read once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// Maps pixel coordinates (origin top-left, y down) to normalized device
    /// coordinates (origin center, y up). Points outside the viewport are
    /// clamped onto its edge. Returns None for a degenerate viewport.
    pub fn normalize(&self, client_x: f64, client_y: f64) -> Option<Vector2<f64>> {
        let usable = |d: f64| d.is_finite() && d > 0.0;
        if !usable(self.width) || !usable(self.height) {
            return None;
        }

        let x = (client_x / self.width) * 2.0 - 1.0;
        let y = -(client_y / self.height) * 2.0 + 1.0;
        Some(Vector2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)))
    }
}

/// Latest mouse position, in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    pub mouse_ndc: Vector2<f64>,
}

impl Default for InputState {
    fn default() -> Self {
        InputState {
            mouse_ndc: Vector2::zeros(),
        }
    }
}

/// Extra camera rotation driven by the mouse, in radians. Named after the
/// axis each angle turns around.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraTilt {
    pub rotation_x: f64,
    pub rotation_y: f64,
}

impl CameraTilt {
    /// Horizontal mouse position turns the camera around y, vertical around x.
    pub fn from_ndc(ndc: &Vector2<f64>, sensitivity: f64) -> Self {
        CameraTilt {
            rotation_x: ndc.y * sensitivity,
            rotation_y: ndc.x * sensitivity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_corners() {
        let viewport = Viewport::new(800.0, 600.0);

        assert_relative_eq!(viewport.normalize(0.0, 0.0).unwrap(), Vector2::new(-1.0, 1.0));
        assert_relative_eq!(
            viewport.normalize(800.0, 600.0).unwrap(),
            Vector2::new(1.0, -1.0)
        );
        assert_relative_eq!(
            viewport.normalize(400.0, 300.0).unwrap(),
            Vector2::new(0.0, 0.0)
        );
        assert_relative_eq!(
            viewport.normalize(200.0, 450.0).unwrap(),
            Vector2::new(-0.5, -0.5)
        );
    }

    #[test]
    fn test_normalize_clamps() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_relative_eq!(
            viewport.normalize(-100.0, 1200.0).unwrap(),
            Vector2::new(-1.0, -1.0)
        );
    }

    #[test]
    fn test_degenerate_viewport() {
        assert_eq!(Viewport::new(0.0, 600.0).normalize(1.0, 1.0), None);
        assert_eq!(Viewport::new(800.0, 0.0).normalize(1.0, 1.0), None);
        assert_eq!(Viewport::new(f64::NAN, 600.0).normalize(1.0, 1.0), None);
    }

    #[test]
    fn test_tilt_mapping() {
        let tilt = CameraTilt::from_ndc(&Vector2::new(1.0, 0.0), 0.1);
        assert_relative_eq!(tilt.rotation_y, 0.1);
        assert_relative_eq!(tilt.rotation_x, 0.0);

        let tilt = CameraTilt::from_ndc(&Vector2::new(-0.5, 0.25), 0.2);
        assert_relative_eq!(tilt.rotation_y, -0.1);
        assert_relative_eq!(tilt.rotation_x, 0.05);
    }
}
