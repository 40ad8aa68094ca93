//! The gate's RC network, with every resistor that the vactrol shunts
//! replaced by the vactrol resistance `rf`.
//!
//! Three capacitor states are integrated with the trapezoidal rule. The
//! feedback path through `D2` is delay-free, so the intermediate node is
//! found by substitution instead of evaluating the nodes in sequence.

use crate::timing::Timing;


/// Output capacitor, in farads.
pub const C1: f32 = 1.0e-9;

/// Intermediate node capacitor, in farads.
pub const C2: f32 = 220.0e-12;

/// Feedback branch capacitor, in farads. Not fitted, so the branch is open.
pub const C3: f32 = 0.0;

/// Output load resistance, in ohms.
pub const RA: f32 = 5.0e6;

/// Normalized feedback amount.
pub const FEEDBACK: f32 = 0.0;

const D2: f32 = -1.0;

/// Network coefficients at a given vactrol resistance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coeffs {
    /// Intermediate node into the output node.
    pub a1: f32,
    /// Output node self term.
    pub a2: f32,
    /// Input into the intermediate node.
    pub b1: f32,
    /// Intermediate node self term.
    pub b2: f32,
    /// Output node into the intermediate node.
    pub b3: f32,
    /// Feedback branch into the intermediate node.
    pub b4: f32,
    /// Output node into the feedback branch.
    pub d1: f32,
}

impl Coeffs {
    /// Coefficients for vactrol resistance `rf`, in ohms.
    #[must_use]
    pub fn new(rf: f32) -> Self {
        let b1 = 1.0 / (rf * C2);
        Self {
            a1: 1.0 / (rf * C1),
            a2: -(1.0 / rf + 1.0 / RA) / C1,
            b1,
            b2: -2.0 / (rf * C2),
            b3: b1,
            b4: C3 / C2,
            d1: FEEDBACK,
        }
    }
}

/// Steady-state gain from input to output at resistance `rf`.
#[must_use]
pub fn dc_gain(rf: f32) -> f32 {
    RA / (RA + 2.0 * rf)
}

/// Capacitor states of the network.
#[derive(Debug, Default, Clone)]
pub struct Network {
    sx: f32,
    so: f32,
    sd: f32,
}

impl Network {
    /// A discharged network.
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Discharges every capacitor.
    pub fn reset(&mut self) {
        *self = Default::default();
    }

    /// The intermediate, output and feedback branch states, in that order.
    #[must_use]
    pub fn state(&self) -> [f32; 3] {
        [self.sx, self.so, self.sd]
    }

    /// Advances one sample at resistance `rf` and returns the output node.
    pub fn process(&mut self, rf: f32, input: f32, timing: &Timing) -> f32 {
        let Coeffs {
            a1,
            a2,
            b1,
            b2,
            b3,
            b4,
            d1,
        } = Coeffs::new(rf);
        let f = timing.half_period();
        let f_inv = timing.half_period_inv();

        let d_o = 1.0 / (1.0 - f * a2);
        let d_x = 1.0 / (1.0 - f * b2);

        let yx = (self.sx + f * (b1 * input + b3 * d_o * self.so + b4 * self.sd)
            + b4 * d1 * d_o * self.so)
            * d_x;
        let yx = yx / (1.0 - d_x * (f * f * b3 * d_o * a1 + b4 * f * d1 * d_o * a1 + b4 * D2));
        let yo = (self.so + f * a1 * yx) * d_o;
        let yd = self.sd + f_inv * (d1 * yo + D2 * yx);

        self.sx += 2.0 * f * (b1 * input + b2 * yx + b3 * yo + b4 * yd);
        self.so += 2.0 * f * (a1 * yx + a2 * yo);
        self.sd = -self.sd - 2.0 * f_inv * (d1 * yo + D2 * yx);

        yo
    }
}
