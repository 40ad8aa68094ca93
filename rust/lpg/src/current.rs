//! Control voltage to vactrol LED current, following an exponential diode law.


/// Highest control voltage (including offset) the converter accepts, in volts.
pub const MAX_VOLTAGE: f32 = 10.7;

/// Diode saturation current, in amps.
pub const SATURATION_CURRENT: f32 = 10.1e-5;

/// Thermal voltage, in volts.
pub const THERMAL_VOLTAGE: f32 = 26e-3;

/// Fitted exponent scale of the drive circuit.
pub const BETA: f32 = 87.0;

/// Diode ideality constant.
pub const DIODE_CONSTANT: f32 = 3.9696;

/// The drive current never exceeds this, in amps.
pub const MAX_CURRENT: f32 = 0.04;

/// Offset added to the control voltage by [`crate::Lpg`].
pub const DEFAULT_OFFSET: f32 = 0.0;

/// Whether the control voltage has been smoothed upstream.
///
/// Both variants currently map through the same diode law.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Smoothing {
    /// Straight from the control input.
    #[default]
    Raw,
    /// Already slew limited.
    Smoothed,
}

/// Converts one control voltage into a diode current.
///
/// Voltages past [`MAX_VOLTAGE`] are pinned to it so the exponential stays
/// finite, and the result is clamped to [`MAX_CURRENT`]. Very negative inputs
/// produce a small negative leakage current; that is not clamped.
#[must_use]
pub fn current(vc: f32, offset: f32, _smoothing: Smoothing) -> f32 {
    let vc = if vc + offset > MAX_VOLTAGE {
        MAX_VOLTAGE - offset
    } else {
        vc
    };
    let current =
        SATURATION_CURRENT * (((vc + offset) * BETA / DIODE_CONSTANT * THERMAL_VOLTAGE).exp() - 1.0);
    current.min(MAX_CURRENT)
}

/// Converts `input` into `output` element by element.
///
/// Both slices should have the same length; extra elements in either are
/// left alone.
pub fn convert(input: &[f32], output: &mut [f32], offset: f32, smoothing: Smoothing) {
    debug_assert_eq!(input.len(), output.len());
    for (vc, out) in input.iter().zip(output.iter_mut()) {
        *out = current(*vc, offset, smoothing);
    }
}

/// Like [`convert`], overwriting the control voltages with currents.
pub fn convert_in_place(buffer: &mut [f32], offset: f32, smoothing: Smoothing) {
    for sample in buffer.iter_mut() {
        *sample = current(*sample, offset, smoothing);
    }
}
