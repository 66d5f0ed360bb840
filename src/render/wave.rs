//! Wave clock for the pour animation.
//!
//! While pouring, every layer bobs up and down and sways slightly around the
//! vertical axis. The clock only holds a phase; it is advanced from the frame
//! delta and never touches selection or layer data.

use std::f32::consts::PI;

use bevy::prelude::Resource;

/// Phase advance per frame at 1x speed, at the reference frame rate
pub const PHASE_STEP: f32 = 0.02;
pub const REFERENCE_FPS: f32 = 60.0;
/// Peak vertical offset of a layer
pub const BOB_AMPLITUDE: f32 = 0.01;
/// Peak rotation around Y, radians
pub const SWAY_AMPLITUDE: f32 = 0.05;

// sin(phase) and sin(phase / 2) both repeat after 4π
const PHASE_PERIOD: f32 = 4.0 * PI;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveOffset {
    pub bob: f32,
    pub sway: f32,
}

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WaveClock {
    phase: f32,
}

impl WaveClock {
    pub fn advance(&mut self, delta_secs: f32, speed: f32) {
        self.phase = (self.phase + speed * PHASE_STEP * REFERENCE_FPS * delta_secs).rem_euclid(PHASE_PERIOD);
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn offset(&self) -> WaveOffset {
        WaveOffset {
            bob: self.phase.sin() * BOB_AMPLITUDE,
            sway: (self.phase * 0.5).sin() * SWAY_AMPLITUDE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest() {
        assert_eq!(WaveClock::default().offset(), WaveOffset::default());
    }

    #[test]
    fn one_second_at_reference_rate() {
        let mut clock = WaveClock::default();
        clock.advance(1.0, 1.0);
        assert!((clock.phase() - 1.2).abs() < 1e-5);

        let mut fast = WaveClock::default();
        fast.advance(1.0, 2.0);
        assert!((fast.phase() - 2.4).abs() < 1e-5);
    }

    #[test]
    fn offsets_stay_within_amplitude() {
        let mut clock = WaveClock::default();
        for _ in 0..1000 {
            clock.advance(1.0 / 60.0, 3.0);
            let offset = clock.offset();
            assert!(offset.bob.abs() <= BOB_AMPLITUDE);
            assert!(offset.sway.abs() <= SWAY_AMPLITUDE);
            assert!(clock.phase() < PHASE_PERIOD);
        }
    }
}
