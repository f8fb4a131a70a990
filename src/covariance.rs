use crate::common::{CpxMatrix, CpxVector, Radians, Ratio, Real, Units};
use crate::error::{check_positive, StapError, StapResult};
use crate::radar::Radar;
use crate::steering::kron;

use ndarray::{Array1, Axis};
use num::complex::Complex64;
use num::traits::FloatConst;
use num::Zero;

use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;

/// Clutter collaborator contract: per-patch power ratios and the
/// space-time structure of the patch returns.
pub trait Clutter {
    fn nof_patches(&self) -> usize;

    /// Per-patch clutter-to-noise ratio, linear.
    fn cnr(&self, radar: &Radar) -> StapResult<Vec<Ratio>>;

    /// Space-time clutter covariance and the MN×P steering vectors it
    /// is built from.
    fn covariance(&self, radar: &Radar) -> StapResult<(CpxMatrix, CpxMatrix)>;
}

/// Jammer collaborator contract. Angles are radians, ranges meters.
pub trait Jammer {
    fn azimuth(&self) -> Real;

    fn elevation(&self) -> Real;

    fn range(&self) -> Real;

    /// Jammer-to-noise ratio per element, linear.
    fn jnr(&self, radar: &Radar) -> StapResult<Ratio>;
}

/// Iso-range ring of clutter patches at uniformly spaced azimuths, all
/// with the same per-patch CNR. Patch Doppler comes from the platform
/// motion projected onto the patch direction.
#[derive(Clone, Debug)]
pub struct ClutterRing {
    pub nof_patches: usize,
    pub range: Real,
    pub elevation: Real,
    pub cnr_per_patch: Ratio,
}

impl ClutterRing {
    pub fn new<E, C>(nof_patches: usize, range: Real, elevation: E, cnr: C) -> Self
    where
        E: Into<Radians>,
        C: Into<Ratio>,
    {
        let elevation: Radians = elevation.into();
        Self {
            nof_patches,
            range,
            elevation: elevation.into(),
            cnr_per_patch: cnr.into(),
        }
    }

    fn patch_azimuths(&self) -> Vec<Real> {
        (0..self.nof_patches)
            .map(|p| -Real::PI() + 2.0 * Real::PI() * p as Real / self.nof_patches as Real)
            .collect()
    }
}

impl Clutter for ClutterRing {
    fn nof_patches(&self) -> usize {
        self.nof_patches
    }

    fn cnr(&self, _radar: &Radar) -> StapResult<Vec<Ratio>> {
        Ok(vec![self.cnr_per_patch; self.nof_patches])
    }

    fn covariance(&self, radar: &Radar) -> StapResult<(CpxMatrix, CpxMatrix)> {
        let wavelength = radar.wavelength();
        let azimuths = self.patch_azimuths();

        let freq_spatial: Vec<Real> = azimuths
            .iter()
            .map(|&az| radar.spatial_frequency(az, self.elevation))
            .collect();
        let freq_doppler: Vec<Real> = azimuths
            .iter()
            .map(|&az| {
                let u = [
                    self.elevation.cos() * az.cos(),
                    self.elevation.cos() * az.sin(),
                    self.elevation.sin(),
                ];
                2.0 * crate::geometry::dot(&radar.velocity, &u) / wavelength
            })
            .collect();

        let steering = radar.space_time_steering_vector(&freq_spatial, &freq_doppler)?;

        let mn = steering.nrows();
        let mut covariance = CpxMatrix::zeros((mn, mn));
        let xi = self.cnr_per_patch.value() * radar.noise_power;
        for p in 0..self.nof_patches {
            let v = steering.column(p);
            for i in 0..mn {
                for j in 0..mn {
                    covariance[[i, j]] += xi * v[i] * v[j].conj();
                }
            }
        }
        Ok((covariance, steering))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JammerKind {
    /// Wideband noise jammer, temporally uncorrelated pulse to pulse.
    Barrage,
    /// Coherent repeater. No JNR model is defined for it here.
    Repeater,
}

/// A stand-off noise jammer described by its direction, range and
/// effective radiated power.
#[derive(Clone, Debug)]
pub struct BarrageJammer {
    pub kind: JammerKind,
    azimuth: Real,
    elevation: Real,
    range: Real,
    /// Effective radiated power density, W/Hz.
    pub erp: Real,
}

impl BarrageJammer {
    pub fn new<A, E>(azimuth: A, elevation: E, range: Real, erp: Real) -> StapResult<Self>
    where
        A: Into<Radians>,
        E: Into<Radians>,
    {
        let azimuth: Radians = azimuth.into();
        let elevation: Radians = elevation.into();
        Ok(Self {
            kind: JammerKind::Barrage,
            azimuth: azimuth.into(),
            elevation: elevation.into(),
            range: check_positive("range", range)?,
            erp: check_positive("erp", erp)?,
        })
    }
}

impl Jammer for BarrageJammer {
    fn azimuth(&self) -> Real {
        self.azimuth
    }

    fn elevation(&self) -> Real {
        self.elevation
    }

    fn range(&self) -> Real {
        self.range
    }

    /// One-way link budget over the receive element gain,
    /// `ERP·B·g·λ² / ((4π)²·L·R²)` relative to noise power.
    fn jnr(&self, radar: &Radar) -> StapResult<Ratio> {
        if self.kind != JammerKind::Barrage {
            return Err(StapError::UnsupportedSourceType(
                "only the barrage-jammer interference model is supported",
            ));
        }
        let gain = radar.antenna.array()?.element_gain.value();
        let wavelength = radar.wavelength();
        let received = self.erp * radar.bandwidth * gain * wavelength * wavelength
            / ((4.0 * Real::PI()).powi(2)
                * radar.loss_system.value()
                * self.range
                * self.range);
        Ok((received / radar.noise_power).ratio())
    }
}

fn complex_gaussian(len: usize, sigma: &[Real]) -> CpxVector {
    let re: Array1<Real> = Array1::random(len, StandardNormal);
    let im: Array1<Real> = Array1::random(len, StandardNormal);
    Array1::from_shape_fn(len, |i| Complex64::new(re[i] * sigma[i], im[i] * sigma[i]))
}

/// Sample-matrix-inversion covariance estimator: Monte-Carlo space-time
/// snapshots of clutter + jammer + noise reduced to one MN×MN sample
/// covariance.
pub struct SmiEstimator {
    pub nof_snapshots: usize,
}

impl SmiEstimator {
    pub fn new(nof_snapshots: usize) -> Self {
        Self { nof_snapshots }
    }

    /// `Ru = (1/K)·S·Sᴴ − mean(S)`, the per-row snapshot mean broadcast
    /// subtracted from every column of the averaged outer product.
    pub fn estimate(
        &self,
        radar: &Radar,
        clutter: &dyn Clutter,
        jammers: &[&dyn Jammer],
    ) -> StapResult<CpxMatrix> {
        let mn = radar.nof_pulses() * radar.nof_elements();
        let m = radar.nof_pulses();
        let noise = radar.noise_power;
        let k = self.nof_snapshots;
        if k == 0 {
            return Err(StapError::Validation {
                name: "nof_snapshots",
                value: 0.0,
            });
        }

        let (_, clutter_steering) = clutter.covariance(radar)?;
        let clutter_sigma: Vec<Real> = clutter
            .cnr(radar)?
            .iter()
            .map(|cnr| (noise * cnr.value() / 2.0).sqrt())
            .collect();

        let jammer_spatial: Vec<CpxVector> = jammers
            .iter()
            .map(|j| {
                let fs = radar.spatial_frequency(j.azimuth(), j.elevation());
                radar.spatial_steering_vector(&[fs]).column(0).to_owned()
            })
            .collect();
        let jammer_sigma: Vec<Vec<Real>> = jammers
            .iter()
            .map(|j| Ok(vec![(noise * j.jnr(radar)?.value() / 2.0).sqrt(); m]))
            .collect::<StapResult<_>>()?;

        let noise_sigma = vec![(noise / 2.0).sqrt(); mn];

        let mut snapshots = CpxMatrix::zeros((mn, k));
        for s in 0..k {
            let mut snapshot: CpxVector = Array1::from_elem(mn, Complex64::zero());

            if clutter.nof_patches() > 0 {
                let amplitudes = complex_gaussian(clutter_steering.ncols(), &clutter_sigma);
                snapshot = snapshot + clutter_steering.dot(&amplitudes);
            }

            for (spatial, sigma) in jammer_spatial.iter().zip(jammer_sigma.iter()) {
                let alpha = complex_gaussian(m, sigma);
                snapshot = snapshot + kron(&alpha, spatial);
            }

            snapshot = snapshot + complex_gaussian(mn, &noise_sigma);
            snapshots.column_mut(s).assign(&snapshot);
        }

        let conj_t = snapshots.map(|c| c.conj()).reversed_axes();
        let outer = snapshots.dot(&conj_t);
        let mean = snapshots.sum_axis(Axis(1)).map(|&c| c / k as Real);

        let mut estimate = outer.map(|&c| c / k as Real);
        for ((i, _), e) in estimate.indexed_iter_mut() {
            *e -= mean[i];
        }
        Ok(estimate)
    }
}
