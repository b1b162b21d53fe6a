use crate::{motion::DecayMode, shape::MAX_SUBDIVISIONS};

/// Startup parameters of a viewing session.
///
/// Everything is fixed once the session starts. Inconsistent values are
/// repaired by [`Config::sanitize`] rather than reported.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub initial_level: u32,
    pub min_level: u32,
    pub max_level: u32,
    pub initial_scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Multiplier applied per wheel notch.
    pub scale_step: f32,
    /// Initial angular velocity, in velocity units (see [`crate::MotionModel`]).
    pub initial_velocity: glam::Vec2,
    /// Velocity lost per millisecond.
    pub resistance: f32,
    /// Radians of rotation per velocity unit per tick.
    pub rotation_gain: f32,
    pub decay_mode: DecayMode,
    /// Advance the motion model on every drag move, not only on frames.
    pub step_on_drag: bool,
    pub light_color: [f32; 3],
    pub light_position: [f32; 3],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_level: 2,
            min_level: 0,
            max_level: 8,
            initial_scale: 1.0,
            min_scale: 0.02,
            max_scale: 4.7,
            scale_step: 1.05,
            initial_velocity: glam::Vec2::new(40.0, 20.0),
            resistance: 0.02,
            rotation_gain: 0.004,
            decay_mode: DecayMode::Settle,
            step_on_drag: true,
            light_color: [1.0, 1.0, 1.0],
            light_position: [3.0, 1.0, 1.0],
        }
    }
}

impl Config {
    /// Repairs out-of-range or inconsistent values in place.
    pub fn sanitize(mut self) -> Self {
        let defaults = Self::default();

        if self.max_level > MAX_SUBDIVISIONS {
            log::warn!(
                "Maximum level {} capped at {}",
                self.max_level,
                MAX_SUBDIVISIONS
            );
            self.max_level = MAX_SUBDIVISIONS;
        }
        if self.min_level > MAX_SUBDIVISIONS {
            log::warn!(
                "Minimum level {} capped at {}",
                self.min_level,
                MAX_SUBDIVISIONS
            );
            self.min_level = MAX_SUBDIVISIONS;
        }
        if self.min_level > self.max_level {
            log::warn!(
                "Swapping level bounds {}..{}",
                self.min_level,
                self.max_level
            );
            std::mem::swap(&mut self.min_level, &mut self.max_level);
        }
        let level = self.initial_level.clamp(self.min_level, self.max_level);
        if level != self.initial_level {
            log::warn!("Initial level {} clamped to {}", self.initial_level, level);
            self.initial_level = level;
        }

        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            log::warn!("Invalid minimum scale {}", self.min_scale);
            self.min_scale = defaults.min_scale;
        }
        if !self.max_scale.is_finite() {
            log::warn!("Invalid maximum scale {}", self.max_scale);
            self.max_scale = defaults.max_scale;
        }
        if self.min_scale > self.max_scale {
            log::warn!(
                "Swapping scale bounds {}..{}",
                self.min_scale,
                self.max_scale
            );
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if !self.initial_scale.is_finite() {
            log::warn!("Invalid initial scale {}", self.initial_scale);
            self.initial_scale = defaults.initial_scale;
        }
        let scale = self.initial_scale.clamp(self.min_scale, self.max_scale);
        if scale != self.initial_scale {
            log::warn!("Initial scale {} clamped to {}", self.initial_scale, scale);
            self.initial_scale = scale;
        }
        if !(self.scale_step.is_finite() && self.scale_step > 1.0) {
            log::warn!("Invalid scale step {}", self.scale_step);
            self.scale_step = defaults.scale_step;
        }

        if !self.initial_velocity.is_finite() {
            log::warn!("Invalid initial velocity {}", self.initial_velocity);
            self.initial_velocity = glam::Vec2::ZERO;
        }
        if !(self.resistance.is_finite() && self.resistance >= 0.0) {
            log::warn!("Invalid resistance {}", self.resistance);
            self.resistance = defaults.resistance;
        }
        if !self.rotation_gain.is_finite() {
            log::warn!("Invalid rotation gain {}", self.rotation_gain);
            self.rotation_gain = defaults.rotation_gain;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_untouched() {
        assert_eq!(Config::default().sanitize(), Config::default());
    }

    #[test]
    fn test_sanitize_clamps_initial_values() {
        let config = Config {
            initial_level: 12,
            initial_scale: 10.0,
            ..Default::default()
        }
        .sanitize();
        assert_eq!(config.initial_level, 8);
        assert_eq!(config.initial_scale, 4.7);
    }

    #[test]
    fn test_sanitize_caps_level_bounds() {
        let config = Config {
            max_level: 40,
            ..Default::default()
        }
        .sanitize();
        assert_eq!(config.max_level, 8);

        let config = Config {
            min_level: 30,
            max_level: 50,
            initial_level: 40,
            ..Default::default()
        }
        .sanitize();
        assert_eq!((config.min_level, config.max_level), (8, 8));
        assert_eq!(config.initial_level, 8);
    }

    #[test]
    fn test_sanitize_repairs_bounds() {
        let config = Config {
            min_level: 5,
            max_level: 1,
            min_scale: -1.0,
            scale_step: 0.5,
            resistance: f32::NAN,
            ..Default::default()
        }
        .sanitize();
        assert_eq!((config.min_level, config.max_level), (1, 5));
        assert_eq!(config.initial_level, 2);
        assert_eq!(config.min_scale, 0.02);
        assert_eq!(config.scale_step, 1.05);
        assert_eq!(config.resistance, 0.02);
    }
}
