use crate::common::{CpxVector, Real};
use crate::error::{check_positive, StapResult};

use ndarray::Array1;
use num::complex::Complex64;
use num::traits::FloatConst;

fn chirp_linear(t: &Array1<Real>, f0: Real, k: Real) -> CpxVector {
    t.map(|&t| -2.0 * Real::PI() * (f0 * t + k * t * t / 2.0))
        .map(|&im| Complex64::new(0.0, im).exp())
}

/// A single-pulse complex baseband waveform, consumed read-only by the
/// pulse-train synthesizer and the matched-filter processor.
#[derive(Clone, Debug)]
pub struct Waveform {
    pub data: CpxVector,
    /// Pulse duration, s.
    pub pulse_width: Real,
    /// Sample rate, Hz.
    pub samp_rate: Real,
}

impl Waveform {
    pub fn new(data: CpxVector, pulse_width: Real, samp_rate: Real) -> StapResult<Self> {
        Ok(Self {
            data,
            pulse_width: check_positive("pulse_width", pulse_width)?,
            samp_rate: check_positive("samp_rate", samp_rate)?,
        })
    }

    /// Linear-FM chirp sweeping `sweep_freq` Hz over the pulse width.
    pub fn lfm(pulse_width: Real, samp_rate: Real, sweep_freq: Real) -> StapResult<Self> {
        let n = (pulse_width * samp_rate).round() as usize;
        let i = (n as Real - 1.0) / 2.0;
        let t = Array1::linspace(-i, i, n);
        let sweep_rate = sweep_freq / samp_rate / n as Real;
        Self::new(chirp_linear(&t, 0.0, sweep_rate), pulse_width, samp_rate)
    }

    pub fn nof_samples(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lfm_sample_count_and_unit_envelope() {
        let wf = Waveform::lfm(10.0e-6, 1.0e6, 0.5e6).unwrap();
        assert_eq!(wf.nof_samples(), 10);
        for &c in wf.data.iter() {
            assert_relative_eq!(c.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_non_positive_parameters() {
        assert!(Waveform::lfm(0.0, 1.0e6, 0.5e6).is_err());
        assert!(Waveform::lfm(10.0e-6, Real::NAN, 0.5e6).is_err());
    }
}
