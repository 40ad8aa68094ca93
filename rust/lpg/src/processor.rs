//! The complete gate: current converter, vactrol and network in series.

use std::fmt::Display;

use itertools::izip;
use num_derive::FromPrimitive;

use crate::current::{self, Smoothing, DEFAULT_OFFSET};
use crate::network::{self, Network};
use crate::timing::Timing;
use crate::vactrol::Vactrol;


/// Which half of the gate is active.
///
/// Host parameters map onto this through `num_traits::FromPrimitive`, in
/// declaration order.
#[derive(FromPrimitive, Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Filter and amplitude respond together, like the hardware.
    #[default]
    Full,
    /// Amplitude only: the input is scaled by the network's DC gain.
    Vca,
    /// Filter only: the network output is normalized to unity DC gain.
    Filter,
}

/// How the network is solved each sample.
#[derive(FromPrimitive, Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Solver {
    /// Closed-form solve of the linear network.
    #[default]
    Linear,
    /// Diode-clipping network. There is no model for this yet, so selecting it
    /// is rejected.
    Nonlinear,
}

/// Rejected configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested solver has no implementation.
    UnsupportedSolver(Solver),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnsupportedSolver(solver) => {
                write!(f, "Solver {solver:?} is not supported")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// One channel of low pass gate.
///
/// All state lives here and nothing allocates after construction, so
/// processing is safe to call from an audio callback. Independent instances
/// share nothing.
#[derive(Debug, Clone)]
pub struct Lpg {
    timing: Timing,
    mode: Mode,
    solver: Solver,
    vactrol: Vactrol,
    network: Network,
}

impl Lpg {
    /// A dark, discharged gate in [`Mode::Full`].
    ///
    /// # Panics
    ///
    /// If `sampling_rate` is not a finite, positive number.
    #[must_use]
    pub fn new(sampling_rate: f32) -> Self {
        log::debug!("Creating low pass gate at {sampling_rate} Hz");
        Self {
            timing: Timing::new(sampling_rate),
            mode: Default::default(),
            solver: Default::default(),
            vactrol: Vactrol::new(),
            network: Network::new(),
        }
    }

    /// Changes the sampling rate. The vactrol and network keep their state;
    /// call [`Self::reset`] as well for a clean start.
    ///
    /// # Panics
    ///
    /// If `sampling_rate` is not a finite, positive number.
    pub fn init(&mut self, sampling_rate: f32) {
        log::debug!(
            "Changing sampling rate from {} Hz to {sampling_rate} Hz",
            self.timing.sampling_rate()
        );
        self.timing = Timing::new(sampling_rate);
    }

    /// Sampling rate in Hz.
    #[must_use]
    pub fn sampling_rate(&self) -> f32 {
        self.timing.sampling_rate()
    }

    /// Darkens the vactrol and discharges the network. Configuration is kept.
    pub fn reset(&mut self) {
        log::debug!("Resetting low pass gate");
        self.vactrol.reset();
        self.network.reset();
    }

    /// The vactrol, for inspecting its cutoff and light level.
    #[must_use]
    pub fn vactrol(&self) -> &Vactrol {
        &self.vactrol
    }

    /// Active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Selects the mode.
    ///
    /// Switching modes discharges the network, since the other modes leave it
    /// idle and its charge would otherwise be stale.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            self.network.reset();
        }
        self.mode = mode;
    }

    /// Active solver.
    #[must_use]
    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// Selects the network solver.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedSolver` for [`Solver::Nonlinear`]. The current
    /// solver is kept.
    pub fn set_solver(&mut self, solver: Solver) -> Result<(), ConfigError> {
        match solver {
            Solver::Linear => {
                self.solver = solver;
                Ok(())
            }
            Solver::Nonlinear => {
                log::warn!("Nonlinear solver requested, staying on {:?}", self.solver);
                Err(ConfigError::UnsupportedSolver(solver))
            }
        }
    }

    /// True when the nonlinear solver is active.
    #[must_use]
    pub fn nonlinear(&self) -> bool {
        self.solver == Solver::Nonlinear
    }

    /// Shorthand for [`Self::set_solver`].
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedSolver` when `nonlinear` is `true`.
    pub fn set_nonlinear(&mut self, nonlinear: bool) -> Result<(), ConfigError> {
        self.set_solver(if nonlinear {
            Solver::Nonlinear
        } else {
            Solver::Linear
        })
    }

    /// Processes a single sample: `cv` is the control voltage, in volts.
    pub fn process(&mut self, cv: f32, input: f32) -> f32 {
        let current = current::current(cv, DEFAULT_OFFSET, Smoothing::Raw);
        let rf = self.vactrol.process(current, &self.timing);
        self.process_audio_sample(rf, input)
    }

    /// Processes a block. On return `cv` holds the vactrol resistance for
    /// each sample.
    ///
    /// All three slices should have the same length; only the shortest
    /// length is processed.
    pub fn process_block(&mut self, cv: &mut [f32], input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(cv.len(), input.len());
        debug_assert_eq!(cv.len(), output.len());
        current::convert_in_place(cv, DEFAULT_OFFSET, Smoothing::Raw);
        self.process_current_in_place(cv);
        self.process_audio(cv, input, output);
    }

    /// Runs diode currents through the vactrol, writing resistances.
    pub fn process_current(&mut self, current: &[f32], resistance: &mut [f32]) {
        debug_assert_eq!(current.len(), resistance.len());
        for (current, resistance) in current.iter().zip(resistance.iter_mut()) {
            *resistance = self.vactrol.process(*current, &self.timing);
        }
    }

    /// Like [`Self::process_current`], overwriting currents with resistances.
    pub fn process_current_in_place(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.vactrol.process(*sample, &self.timing);
        }
    }

    /// Filters `input` into `output` with one resistance per sample.
    pub fn process_audio(&mut self, resistance: &[f32], input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(resistance.len(), input.len());
        debug_assert_eq!(resistance.len(), output.len());
        for (rf, input, output) in izip!(resistance, input, output.iter_mut()) {
            *output = self.process_audio_sample(*rf, *input);
        }
    }

    fn process_audio_sample(&mut self, rf: f32, input: f32) -> f32 {
        match self.mode {
            Mode::Full => self.network.process(rf, input, &self.timing),
            Mode::Vca => input * network::dc_gain(rf),
            Mode::Filter => {
                self.network.process(rf, input, &self.timing) / network::dc_gain(rf)
            }
        }
    }
}
