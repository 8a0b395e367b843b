//! Quantization of proposed positions and rotations.
//!
//! Position snap is always on: a world coordinate is moved so that its
//! unit-grid value (`(raw − origin) / side`) is a multiple of the grid
//! pitch. Rotation snap is an independent toggle. Both are deterministic and
//! idempotent. Setters guard their domains and leave the previous value in
//! place on out-of-domain input, so a live config can never reach a
//! degenerate state (e.g. a zero pitch dividing the snap).

/// Smallest accepted grid pitch, in unit-square multiples.
pub const MIN_GRID_PITCH: f64 = 1e-5;

/// Snap configuration. Construct via `Default` and adjust through the
/// guarded setters.
#[derive(Clone, Copy, Debug)]
pub struct SnapCfg {
    grid_pitch: f64,
    rotation_snap: bool,
    rotation_step: f64,
}

impl Default for SnapCfg {
    fn default() -> Self {
        Self {
            grid_pitch: 0.1,
            rotation_snap: true,
            rotation_step: 15.0,
        }
    }
}

impl SnapCfg {
    #[inline]
    pub fn grid_pitch(&self) -> f64 {
        self.grid_pitch
    }

    /// Accepts the pitch only at [`MIN_GRID_PITCH`] or above; returns
    /// whether it was applied.
    pub fn set_grid_pitch(&mut self, pitch: f64) -> bool {
        if pitch.is_finite() && pitch >= MIN_GRID_PITCH {
            self.grid_pitch = pitch;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn rotation_snap(&self) -> bool {
        self.rotation_snap
    }

    pub fn set_rotation_snap(&mut self, enabled: bool) {
        self.rotation_snap = enabled;
    }

    #[inline]
    pub fn rotation_step(&self) -> f64 {
        self.rotation_step
    }

    /// Accepts a step in `(0, 180]` degrees; returns whether it was applied.
    pub fn set_rotation_step(&mut self, step: f64) -> bool {
        if step.is_finite() && step > 0.0 && step <= 180.0 {
            self.rotation_step = step;
            true
        } else {
            false
        }
    }

    /// Snap a world coordinate so its unit-grid value lands on a multiple of
    /// the grid pitch.
    #[inline]
    pub fn snap_position(&self, raw: f64, origin: f64, side: f64) -> f64 {
        let unit = (raw - origin) / side;
        let snapped = (unit / self.grid_pitch).round() * self.grid_pitch;
        origin + snapped * side
    }

    /// Nearest multiple of the angular step; identity when rotation snap is
    /// disabled.
    #[inline]
    pub fn snap_rotation(&self, deg: f64) -> f64 {
        if !self.rotation_snap {
            return deg;
        }
        (deg / self.rotation_step).round() * self.rotation_step
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to the modulus itself for tiny negatives.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Round to `n` decimal places. Used wherever a value crosses a display or
/// submission boundary so the same layout always reports the same numbers.
#[inline]
pub fn round_decimal(v: f64, n: i32) -> f64 {
    if n <= 0 {
        return v.round();
    }
    let p = 10f64.powi(n);
    (v * p).round() / p
}
