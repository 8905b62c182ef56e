/// Monotonically increasing animation time fed to the shader uniform.
///
/// The clock advances by a fixed increment once per rendered frame
/// rather than tracking wall time, matching the shader's expectation
/// of a steady drift. It is owned by the engine and only mutated from
/// `render_frame`, so it freezes exactly when the loop stops and
/// resumes from the same value on the next `start()`.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    seconds: f32,
    increment: f32,
}

impl AnimationClock {
    /// Creates a clock at zero that advances by `increment` per frame.
    ///
    /// Non-positive increments would stall the animation and break the
    /// strictly-increasing guarantee, so they are clamped to epsilon.
    pub fn new(increment: f32) -> Self {
        Self {
            seconds: 0.0,
            increment: increment.max(f32::EPSILON),
        }
    }

    /// Advances one frame and returns the new clock value.
    pub fn advance(&mut self) -> f32 {
        self.seconds += self.increment;
        self.seconds
    }

    /// Current clock value in seconds.
    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Per-frame increment in seconds.
    pub fn increment(&self) -> f32 {
        self.increment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_by_fixed_increment() {
        let mut clock = AnimationClock::new(0.25);
        assert_eq!(clock.seconds(), 0.0);
        assert!((clock.advance() - 0.25).abs() < 1e-6);
        assert!((clock.advance() - 0.5).abs() < 1e-6);
        assert!((clock.seconds() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn strictly_increasing_over_many_frames() {
        let mut clock = AnimationClock::new(0.01);
        let mut last = clock.seconds();
        for _ in 0..240 {
            let next = clock.advance();
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn non_positive_increment_is_clamped() {
        let mut clock = AnimationClock::new(0.0);
        assert!(clock.advance() > 0.0);
        let mut negative = AnimationClock::new(-1.0);
        assert!(negative.advance() > 0.0);
    }
}
