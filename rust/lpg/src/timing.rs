/// Sample-rate dependent constants shared by the vactrol and the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    sampling_rate: f32,
    period: f32,
    half_period: f32,
    half_period_inv: f32,
}

impl Timing {
    /// Timing for `sampling_rate`, in Hz.
    ///
    /// # Panics
    ///
    /// If `sampling_rate` is not a finite, positive number.
    #[must_use]
    pub fn new(sampling_rate: f32) -> Self {
        assert!(sampling_rate.is_finite() && sampling_rate > 0.0);
        let half_period = 1.0 / (2.0 * sampling_rate);
        Self {
            sampling_rate,
            period: 1.0 / sampling_rate,
            half_period,
            half_period_inv: 1.0 / half_period,
        }
    }

    /// Sampling rate in Hz.
    #[must_use]
    pub fn sampling_rate(&self) -> f32 {
        self.sampling_rate
    }

    /// Seconds per sample.
    #[must_use]
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Half of [`Self::period`], the trapezoidal integration step.
    #[must_use]
    pub fn half_period(&self) -> f32 {
        self.half_period
    }

    /// Reciprocal of [`Self::half_period`].
    #[must_use]
    pub fn half_period_inv(&self) -> f32 {
        self.half_period_inv
    }
}
