use crate::common::{CpxMatrix, CpxVector};
use crate::error::{StapError, StapResult};
use crate::radar::Radar;
use crate::waveform::Waveform;

use ndarray::{s, Array1, Array2};
use num::complex::Complex64;
use num::Zero;

impl Radar {
    /// The single pulse zero-padded to exactly one PRI of samples.
    fn padded_pulse(&self, waveform: &Waveform) -> StapResult<CpxVector> {
        self.doppler_unambiguous()?; // non-zero rate required
        let pri = self.timing.pri();
        if pri < waveform.pulse_width {
            return Err(StapError::Validation {
                name: "pri",
                value: pri,
            });
        }
        let nof_pad = ((pri - waveform.pulse_width) * waveform.samp_rate).round() as usize;
        let mut padded = Array1::from_elem(waveform.nof_samples() + nof_pad, Complex64::zero());
        padded
            .slice_mut(s![..waveform.nof_samples()])
            .assign(&waveform.data);
        Ok(padded)
    }

    /// The transmitted burst: the padded pulse repeated M times,
    /// concatenated into a length `round(pri·samp_rate)·M` sequence.
    pub fn pulse_burst_waveform(&self, waveform: &Waveform) -> StapResult<CpxVector> {
        let pulse = self.padded_pulse(waveform)?;
        let len = pulse.len();
        let m = self.nof_pulses();
        let mut burst = Array1::from_elem(len * m, Complex64::zero());
        for i in 0..m {
            burst.slice_mut(s![i * len..(i + 1) * len]).assign(&pulse);
        }
        Ok(burst)
    }

    /// The padded pulse tiled as an L×M matrix, one column per pulse.
    pub fn pulse_matrix(&self, waveform: &Waveform) -> StapResult<CpxMatrix> {
        let pulse = self.padded_pulse(waveform)?;
        let len = pulse.len();
        Ok(Array2::from_shape_fn((len, self.nof_pulses()), |(n, _)| {
            pulse[n]
        }))
    }

    /// Time-reversed conjugate of the full burst.
    pub fn pulse_burst_matched_filter(&self, waveform: &Waveform) -> StapResult<CpxVector> {
        let burst = self.pulse_burst_waveform(waveform)?;
        Ok(burst.iter().rev().map(|&c| c.conj()).collect())
    }
}
