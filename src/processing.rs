use crate::common::{CpxMatrix, CpxVector, RangeDoppler, RangePulse, Real, SPEED_OF_LIGHT};
use crate::error::StapResult;
use crate::radar::Radar;
use crate::waveform::Waveform;

use ndarray::{s, Array1, Array2};
use num::complex::Complex64;
use num::Zero;
use rustfft::FFTplanner;

pub trait Reshape2d<T> {
    fn to_1d(self) -> Array1<T>;
}

pub trait Reshape1d<T> {
    /// Column-wise reshape of a flat pulse burst into an L×M grid,
    /// one length-`nof_rows` chunk per column.
    fn to_pulse_grid(self, nof_rows: usize) -> Array2<T>;
}

impl<T: Clone> Reshape2d<T> for Array2<T> {
    fn to_1d(self) -> Array1<T> {
        // column-major readout, the inverse of `to_pulse_grid`
        let (l, m) = (self.nrows(), self.ncols());
        Array1::from_shape_fn(l * m, |i| self[[i % l, i / l]].clone())
    }
}

impl<T: Clone> Reshape1d<T> for Array1<T> {
    fn to_pulse_grid(self, nof_rows: usize) -> Array2<T> {
        let nof_cols = self.len() / nof_rows;
        Array2::from_shape_fn((nof_rows, nof_cols), |(n, i)| {
            self[i * nof_rows + n].clone()
        })
    }
}

fn fft(input: &CpxVector, inverse: bool) -> CpxVector {
    let mut planner: FFTplanner<f64> = FFTplanner::new(inverse);
    let fft = planner.plan_fft(input.len());
    let mut scratch = input.to_owned();
    let mut output = Array1::from_elem(input.len(), Complex64::zero());
    fft.process(
        scratch.as_slice_mut().unwrap(),
        output.as_slice_mut().unwrap(),
    );
    if inverse {
        output.map(|&c| c / input.len() as Real)
    } else {
        output
    }
}

fn zero_padded(input: &CpxVector, len: usize) -> CpxVector {
    let mut padded = Array1::from_elem(len, Complex64::zero());
    padded.slice_mut(s![..input.len()]).assign(input);
    padded
}

impl Radar {
    /// Per-pulse pulse compression: the unit-norm single-pulse waveform,
    /// time-reversed and conjugated, convolved with every fast-time
    /// column via frequency-domain multiplication. The returned range
    /// axis is shifted so that a zero-range target peaks where the axis
    /// reads zero, at sample index `L_filter - 1`.
    pub fn matched_filter_response(
        &self,
        waveform: &Waveform,
        data: &RangePulse<CpxMatrix>,
    ) -> StapResult<(RangePulse<CpxMatrix>, Array1<Real>)> {
        let norm = waveform.data.map(|c| c.norm_sqr()).sum().sqrt();
        let filter: CpxVector = waveform.data.iter().rev().map(|&c| c.conj() / norm).collect();

        let (l, m) = data.size();
        let l_filter = filter.len();
        let n_con = l + l_filter - 1;

        let filter_freq = fft(&zero_padded(&filter, n_con), false);

        let mut compressed = CpxMatrix::zeros((n_con, m));
        for i in 0..m {
            let col_freq = fft(&zero_padded(&data.matrix.column(i).to_owned(), n_con), false);
            let product: CpxVector = &col_freq * &filter_freq;
            compressed.column_mut(i).assign(&fft(&product, true));
        }

        let scale = SPEED_OF_LIGHT / (2.0 * waveform.samp_rate);
        let range_axis =
            Array1::from_shape_fn(n_con, |n| (n as Real - (l_filter as Real - 1.0)) * scale);

        Ok((RangePulse::new(compressed), range_axis))
    }

    /// Slow-time FFT across the pulse dimension, zero-padded to
    /// `M·oversampling` bins and re-centered so zero Doppler sits in the
    /// middle of the map. The velocity axis spans
    /// `[-v_ua, v_ua)` in `2·v_ua / (M·oversampling)` steps.
    pub fn doppler_processing(
        &self,
        data: RangePulse<CpxMatrix>,
        oversampling: usize,
    ) -> StapResult<(RangeDoppler<CpxMatrix>, Array1<Real>)> {
        let v_ua = self.velocity_unambiguous()?;
        let (l, m) = data.size();
        let n_dop = m * oversampling.max(1);

        let mut map = CpxMatrix::zeros((l, n_dop));
        for n in 0..l {
            let mut spectrum = fft(&zero_padded(&data.matrix.row(n).to_owned(), n_dop), false);
            spectrum
                .as_slice_mut()
                .unwrap()
                .rotate_right((n_dop + 1) / 2);
            map.row_mut(n).assign(&spectrum);
        }

        let velocity_axis =
            Array1::from_shape_fn(n_dop, |i| -v_ua + i as Real * 2.0 * v_ua / n_dop as Real);

        Ok((RangeDoppler::new(map), velocity_axis))
    }
}
