use crate::common::{CpxMatrix, CpxVector, Real};
use crate::error::{StapError, StapResult};
use crate::radar::Radar;

use ndarray::{Array1, Array2};
use num::complex::Complex64;
use num::traits::FloatConst;

/// Column-vector Kronecker product, `out[m·N + n] = a[m]·b[n]`.
pub fn kron(a: &CpxVector, b: &CpxVector) -> CpxVector {
    let n = b.len();
    Array1::from_shape_fn(a.len() * n, |i| a[i / n] * b[i % n])
}

fn phase_progression(freqs: &[Real], len: usize) -> CpxMatrix {
    Array2::from_shape_fn((len, freqs.len()), |(n, i)| {
        Complex64::from_polar(1.0, 2.0 * Real::PI() * freqs[i] * n as Real)
    })
}

impl Radar {
    /// Spatial steering vectors, one N-element column per normalized
    /// spatial frequency. A single frequency yields an N×1 matrix.
    pub fn spatial_steering_vector(&self, freq_spatial: &[Real]) -> CpxMatrix {
        phase_progression(freq_spatial, self.nof_elements())
    }

    /// Temporal steering vectors across the pulse burst, one M-element
    /// column per Doppler frequency (Hz, normalized internally by PRF).
    pub fn temporal_steering_vector(&self, freq_doppler: &[Real]) -> StapResult<CpxMatrix> {
        self.doppler_unambiguous()?; // non-zero rate required
        let prf = self.timing.prf();
        let normalized: Vec<Real> = freq_doppler.iter().map(|&f| f / prf).collect();
        Ok(phase_progression(&normalized, self.nof_pulses()))
    }

    /// Space-time steering vectors: per column the Kronecker product of
    /// the temporal and spatial columns. With no spatial aperture the
    /// spatial factor degenerates to the scalar 1.
    pub fn space_time_steering_vector(
        &self,
        freq_spatial: &[Real],
        freq_doppler: &[Real],
    ) -> StapResult<CpxMatrix> {
        if freq_spatial.len() != freq_doppler.len() {
            return Err(StapError::DimensionMismatch {
                expected: freq_spatial.len(),
                actual: freq_doppler.len(),
            });
        }
        let spatial = self.spatial_steering_vector(freq_spatial);
        let temporal = self.temporal_steering_vector(freq_doppler)?;
        let (m, n) = (temporal.nrows(), spatial.nrows());

        let mut out = CpxMatrix::zeros((m * n, freq_spatial.len()));
        for (i, mut col) in out.gencolumns_mut().into_iter().enumerate() {
            col.assign(&kron(
                &temporal.column(i).to_owned(),
                &spatial.column(i).to_owned(),
            ));
        }
        Ok(out)
    }

    /// Normalized spatial frequency of a plane wave from (az, el):
    /// `d/λ · cos(el) · sin(az)`.
    pub fn spatial_frequency(&self, azimuth: Real, elevation: Real) -> Real {
        self.geometry.spacing() / self.wavelength() * elevation.cos() * azimuth.sin()
    }
}
