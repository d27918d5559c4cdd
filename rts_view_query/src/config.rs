/// View query configuration.
///
/// Engine-wide constants the queries and the ray caster depend on.
/// Callers normally take `ViewConfig::default()` and adjust the view
/// range to match the renderer.

use crate::error::{Error, Result};

/// Default world size of one quad (square side, in world units)
pub const DEFAULT_QUAD_SIZE: f32 = 128.0;

/// Upper bound on ground march samples per screen ray
pub const MAX_GROUND_TRACE_SAMPLES: f32 = 1_048_576.0;

/// Configuration for visibility queries and screen-ray tracing
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Maximum draw distance of the active camera
    pub view_range: f32,
    /// Ray trace length as a multiple of `view_range`
    pub trace_range_scale: f32,
    /// A trace distance beyond `trace range - void_margin` counts as a miss
    pub void_margin: f32,
    /// Side length of one quad-field cell
    pub quad_size: f32,
    /// Search radius (world units) for picking a unit from a minimap click
    pub minimap_select_radius: f32,
    /// Step length of the ground ray march before bisection refinement
    pub ground_trace_step: f32,
    /// Height of the water plane; rays stop there unless water is ignored
    pub water_level: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view_range: 8000.0,
            trace_range_scale: 1.4,
            void_margin: 300.0,
            quad_size: DEFAULT_QUAD_SIZE,
            minimap_select_radius: 64.0,
            ground_trace_step: 8.0,
            water_level: 0.0,
        }
    }
}

impl ViewConfig {
    /// Full trace length of a screen ray
    pub fn trace_range(&self) -> f32 {
        self.view_range * self.trace_range_scale
    }

    /// Trace distances beyond this count as "into the void"
    pub fn good_range(&self) -> f32 {
        self.trace_range() - self.void_margin
    }

    /// Reject configurations the queries cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.view_range > 0.0) || !self.view_range.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "view_range must be positive (got {})", self.view_range
            )));
        }
        if !(self.trace_range_scale >= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "trace_range_scale must be >= 1 (got {})", self.trace_range_scale
            )));
        }
        if !(self.quad_size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "quad_size must be positive (got {})", self.quad_size
            )));
        }
        if !(self.ground_trace_step > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "ground_trace_step must be positive (got {})", self.ground_trace_step
            )));
        }
        let trace_range = self.trace_range();
        if !trace_range.is_finite()
            || trace_range + self.ground_trace_step == trace_range
            || trace_range / self.ground_trace_step > MAX_GROUND_TRACE_SAMPLES
        {
            return Err(Error::InvalidConfig(format!(
                "ground_trace_step {} is too fine for a trace range of {}",
                self.ground_trace_step, trace_range
            )));
        }
        if self.minimap_select_radius < 0.0 || self.void_margin < 0.0 {
            return Err(Error::InvalidConfig(
                "minimap_select_radius and void_margin must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ViewConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ranges() {
        let config = ViewConfig {
            view_range: 1000.0,
            ..ViewConfig::default()
        };
        assert!((config.trace_range() - 1400.0).abs() < 1e-3);
        assert!((config.good_range() - 1100.0).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_zero_quad_size() {
        let config = ViewConfig {
            quad_size: 0.0,
            ..ViewConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_nan_view_range() {
        let config = ViewConfig {
            view_range: f32::NAN,
            ..ViewConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_margin() {
        let config = ViewConfig {
            void_margin: -1.0,
            ..ViewConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_step_too_fine_for_range() {
        let config = ViewConfig {
            view_range: 300_000.0,
            ground_trace_step: 0.01,
            ..ViewConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = ViewConfig {
            view_range: f32::INFINITY,
            ..ViewConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ViewConfig {
            view_range: 300_000.0,
            ground_trace_step: 8.0,
            ..ViewConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
