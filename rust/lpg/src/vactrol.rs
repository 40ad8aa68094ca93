//! Vactrol dynamics: LED current in, photoresistor resistance out.
//!
//! The light level is tracked by a trapezoidal one-pole filter with separate
//! attack and decay cutoffs. The cutoff is only recomputed when the current
//! changes direction and is held otherwise, which is what gives the vactrol
//! its fast-on, slow-off memory. Resistance follows the Parker & D'Angelo
//! inverse power law fit.

use crate::current::MAX_CURRENT;
use crate::timing::Timing;

#[cfg(test)]
mod tests;

/// Attack time constant, in seconds.
pub const TAU_ON: f32 = 0.012;

/// Decay time constant, in seconds.
pub const TAU_OFF: f32 = 0.25;

/// How strongly the drive current speeds up the attack.
pub const RHO_ON: f32 = 0.9;

/// How strongly the light level slows down the decay.
pub const RHO_OFF: f32 = 0.9;

/// Nominal attack cutoff, in radians per second.
pub const WC_ON: f32 = 5.0 / TAU_ON;

/// Nominal decay cutoff, in radians per second.
pub const WC_OFF: f32 = 5.0 / TAU_OFF;

/// Power law scale, in ohms times amps^1.4.
pub const A_VAC: f32 = 3.464_591_2;

/// Resistance under full light, in ohms.
pub const B_VAC: f32 = 1_136.213;

/// The envelope is floored here before the power law.
pub const ENVELOPE_FLOOR: f32 = 1.01e-5;

const EXPONENT: f32 = 1.4;

/// Sign of the change in drive current between two samples.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Current decreased.
    Falling,
    /// Current unchanged.
    #[default]
    Steady,
    /// Current increased.
    Rising,
}

impl Direction {
    /// Direction of a change of `delta`.
    #[must_use]
    pub fn of(delta: f32) -> Self {
        if delta > 0.0 {
            Self::Rising
        } else if delta < 0.0 {
            Self::Falling
        } else {
            Self::Steady
        }
    }
}

/// Cutoff entered when the current starts rising. Grows with the drive.
#[must_use]
pub fn attack_cutoff(current: f32) -> f32 {
    WC_ON * (1.0 - RHO_ON + RHO_ON * current / MAX_CURRENT)
}

/// Cutoff entered when the current starts falling. Shrinks as the light
/// level (not the current) grows.
#[must_use]
pub fn decay_cutoff(envelope: f32) -> f32 {
    WC_OFF * (1.0 + RHO_OFF - RHO_OFF * envelope / MAX_CURRENT)
}

/// Photoresistor resistance for a light level, in ohms.
///
/// Always positive: the envelope is floored at [`ENVELOPE_FLOOR`] first.
#[must_use]
pub fn resistance(envelope: f32) -> f32 {
    A_VAC / envelope.max(ENVELOPE_FLOOR).powf(EXPONENT) + B_VAC
}

/// State of one vactrol. Starts dark, with a zero cutoff, until the drive
/// current first moves.
#[derive(Debug, Default, Clone)]
pub struct Vactrol {
    previous_current: f32,
    previous_direction: Direction,
    cutoff: f32,
    envelope: f32,
    state: f32,
}

impl Vactrol {
    /// A dark vactrol.
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns to the dark state.
    pub fn reset(&mut self) {
        *self = Default::default();
    }

    /// Cutoff currently in effect, in radians per second.
    #[must_use]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Smoothed light level after the last processed sample.
    #[must_use]
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Advances one sample and returns the resulting resistance.
    pub fn process(&mut self, current: f32, timing: &Timing) -> f32 {
        let direction = Direction::of(current - self.previous_current);
        if direction != self.previous_direction {
            match direction {
                Direction::Rising => self.cutoff = attack_cutoff(current),
                Direction::Falling => self.cutoff = decay_cutoff(self.envelope),
                Direction::Steady => {}
            }
        }

        let g = self.cutoff * timing.period() * 0.5;
        let v = (current - self.state) * g / (1.0 + g);
        self.envelope = v + self.state;
        self.state = self.envelope + v;

        self.previous_current = current;
        self.previous_direction = direction;

        resistance(self.envelope)
    }
}
