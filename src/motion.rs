use crate::Config;

/// How velocity loses magnitude near rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecayMode {
    /// Velocity that would cross zero within a tick stops at exactly zero.
    #[default]
    Settle,
    /// Decay is applied in full whenever velocity is non-zero, so it
    /// overshoots and keeps flipping sign around zero instead of resting.
    Wobble,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Up)
        } else if delta < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}

/// Inertial spin and zoom of the displayed object.
///
/// Velocity is measured in pointer-movement units; one unit turns the object
/// by `rotation_gain` radians per tick.
pub struct MotionModel {
    velocity: glam::Vec2,
    orientation: glam::Quat,
    scale: f32,
    resistance: f32,
    rotation_gain: f32,
    scale_step: f32,
    scale_range: (f32, f32),
    decay_mode: DecayMode,
}

fn decay_axis(velocity: f32, amount: f32, mode: DecayMode) -> f32 {
    match mode {
        DecayMode::Settle if velocity.abs() <= amount => 0.0,
        _ if velocity > 0.0 => velocity - amount,
        _ if velocity < 0.0 => velocity + amount,
        _ => velocity,
    }
}

impl MotionModel {
    pub fn new(config: &Config) -> Self {
        Self {
            velocity: config.initial_velocity,
            orientation: glam::Quat::IDENTITY,
            scale: config.initial_scale,
            resistance: config.resistance,
            rotation_gain: config.rotation_gain,
            scale_step: config.scale_step,
            scale_range: (config.min_scale, config.max_scale),
            decay_mode: config.decay_mode,
        }
    }

    pub fn velocity(&self) -> glam::Vec2 {
        self.velocity
    }

    pub fn orientation(&self) -> glam::Quat {
        self.orientation
    }

    /// Accumulated rotation; does not include scale.
    pub fn rotation(&self) -> glam::Mat4 {
        glam::Mat4::from_quat(self.orientation)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Replaces the current velocity with the latest drag delta.
    pub fn apply_impulse(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            log::warn!("Ignoring impulse ({}, {})", dx, dy);
            return;
        }
        self.velocity = glam::Vec2::new(dx, dy);
    }

    /// Decays velocity by `elapsed_ms` worth of resistance, then turns the
    /// object by the remaining velocity.
    pub fn tick(&mut self, elapsed_ms: f32) {
        let elapsed_ms = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };
        let amount = self.resistance * elapsed_ms;
        self.velocity = glam::Vec2::new(
            decay_axis(self.velocity.x, amount, self.decay_mode),
            decay_axis(self.velocity.y, amount, self.decay_mode),
        );

        let angles = self.rotation_gain * self.velocity;
        let increment =
            glam::Quat::from_rotation_y(angles.x) * glam::Quat::from_rotation_x(angles.y);
        // kept at unit length over long spins
        self.orientation = (increment * self.orientation).normalize();
    }

    pub fn scroll(&mut self, direction: ScrollDirection) {
        let scale = match direction {
            ScrollDirection::Up => self.scale * self.scale_step,
            ScrollDirection::Down => self.scale / self.scale_step,
        };
        self.set_scale(scale);
    }

    pub fn set_scale(&mut self, scale: f32) {
        if !scale.is_finite() {
            log::warn!("Ignoring scale {}", scale);
            return;
        }
        let (min, max) = self.scale_range;
        self.scale = scale.clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_rest(decay_mode: DecayMode) -> MotionModel {
        MotionModel::new(&Config {
            initial_velocity: glam::Vec2::ZERO,
            decay_mode,
            ..Default::default()
        })
    }

    #[test]
    fn test_initial_state() {
        let motion = MotionModel::new(&Config::default());
        assert_eq!(motion.velocity(), glam::Vec2::new(40.0, 20.0));
        assert_eq!(motion.rotation(), glam::Mat4::IDENTITY);
        assert_eq!(motion.scale(), 1.0);
    }

    #[test]
    fn test_tick_at_rest_is_identity() {
        let mut motion = at_rest(DecayMode::Settle);
        motion.tick(16.0);
        motion.tick(1000.0);
        assert_eq!(motion.rotation(), glam::Mat4::IDENTITY);
        assert_eq!(motion.scale(), 1.0);
        assert_eq!(motion.velocity(), glam::Vec2::ZERO);
    }

    #[test]
    fn test_impulse_replaces_velocity() {
        let mut motion = MotionModel::new(&Config::default());
        motion.apply_impulse(3.0, -2.0);
        assert_eq!(motion.velocity(), glam::Vec2::new(3.0, -2.0));
        motion.apply_impulse(f32::NAN, 1.0);
        motion.apply_impulse(1.0, f32::INFINITY);
        assert_eq!(motion.velocity(), glam::Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_settle_decays_monotonically() {
        let mut motion = at_rest(DecayMode::Settle);
        motion.apply_impulse(10.0, -7.0);
        let mut previous = motion.velocity();
        for _ in 0..100 {
            motion.tick(16.0);
            let current = motion.velocity();
            assert!(current.x.abs() <= previous.x.abs());
            assert!(current.y.abs() <= previous.y.abs());
            assert!(current.x >= 0.0 && current.y <= 0.0, "sign flipped: {current}");
            previous = current;
        }
        assert_eq!(motion.velocity(), glam::Vec2::ZERO);
    }

    #[test]
    fn test_settle_clamps_overshoot() {
        let mut motion = at_rest(DecayMode::Settle);
        motion.apply_impulse(10.0, 0.0);
        motion.tick(1000.0);
        assert_eq!(motion.velocity(), glam::Vec2::ZERO);
    }

    #[test]
    fn test_wobble_overshoots_zero() {
        let mut motion = at_rest(DecayMode::Wobble);
        motion.apply_impulse(10.0, 0.0);
        motion.tick(1000.0);
        assert_eq!(motion.velocity(), glam::Vec2::new(-10.0, 0.0));
        motion.tick(1000.0);
        assert_eq!(motion.velocity(), glam::Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_invalid_elapsed_is_ignored() {
        let mut motion = at_rest(DecayMode::Settle);
        motion.apply_impulse(10.0, 5.0);
        motion.tick(-50.0);
        motion.tick(f32::NAN);
        assert_eq!(motion.velocity(), glam::Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_rotation_composes_in_order() {
        let config = Config::default();
        let mut motion = at_rest(DecayMode::Settle);
        motion.apply_impulse(100.0, 0.0);
        motion.tick(0.0);
        motion.apply_impulse(0.0, 100.0);
        motion.tick(0.0);

        let angle = config.rotation_gain * 100.0;
        let expected = glam::Mat4::from_rotation_x(angle) * glam::Mat4::from_rotation_y(angle);
        assert!(motion.rotation().abs_diff_eq(expected, 1e-5));
        let swapped = glam::Mat4::from_rotation_y(angle) * glam::Mat4::from_rotation_x(angle);
        assert!(!motion.rotation().abs_diff_eq(swapped, 1e-6));
    }

    #[test]
    fn test_scroll_steps_and_clamps() {
        let mut motion = at_rest(DecayMode::Settle);
        for _ in 0..10 {
            motion.scroll(ScrollDirection::Up);
        }
        assert!((motion.scale() - 1.05f32.powi(10)).abs() < 1e-5);
        assert!((motion.scale() - 1.6289).abs() < 1e-4);

        for _ in 0..100 {
            motion.scroll(ScrollDirection::Up);
        }
        assert_eq!(motion.scale(), 4.7);
        for _ in 0..200 {
            motion.scroll(ScrollDirection::Down);
        }
        assert_eq!(motion.scale(), 0.02);
    }

    #[test]
    fn test_set_scale_clamps_and_rejects() {
        let mut motion = at_rest(DecayMode::Settle);
        motion.set_scale(2.0);
        assert_eq!(motion.scale(), 2.0);
        motion.set_scale(f32::NAN);
        assert_eq!(motion.scale(), 2.0);
        motion.set_scale(100.0);
        assert_eq!(motion.scale(), 4.7);
    }

    #[test]
    fn test_long_spin_stays_rigid() {
        let mut motion = MotionModel::new(&Config {
            resistance: 0.0,
            ..Default::default()
        });
        // one hour at 60 fps
        for _ in 0..216_000 {
            motion.tick(16.0);
        }
        assert_eq!(motion.velocity(), glam::Vec2::new(40.0, 20.0));
        let rotation = motion.rotation();
        assert!((rotation.determinant() - 1.0).abs() < 1e-4);
        for axis in [rotation.x_axis, rotation.y_axis, rotation.z_axis] {
            assert!((axis.truncate().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_scroll_direction_from_delta() {
        assert_eq!(ScrollDirection::from_delta(1.5), Some(ScrollDirection::Up));
        assert_eq!(ScrollDirection::from_delta(-0.1), Some(ScrollDirection::Down));
        assert_eq!(ScrollDirection::from_delta(0.0), None);
        assert_eq!(ScrollDirection::from_delta(f32::NAN), None);
    }
}
