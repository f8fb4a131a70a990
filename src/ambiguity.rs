use crate::common::Real;
use crate::error::StapResult;
use crate::geometry::{dot, norm, sub, Target};
use crate::radar::Radar;

use ndarray::Array1;
use num::traits::FloatConst;

/// Fold a true Doppler into the measurable interval `[-prf/2, prf/2)`.
/// The fold is only applied at or beyond the half-PRF boundary, so
/// exactly `+prf/2` maps to `-prf/2`.
fn fold_doppler(doppler: Real, prf: Real) -> Real {
    if doppler.abs() < prf / 2.0 {
        doppler
    } else {
        let aliased = doppler.rem_euclid(prf);
        if aliased < prf / 2.0 {
            aliased
        } else {
            aliased - prf
        }
    }
}

impl Radar {
    /// Euclidean distance from the radar to each target.
    pub fn true_range(&self, targets: &[Target]) -> Array1<Real> {
        targets
            .iter()
            .map(|tgt| norm(&sub(&tgt.position, &self.position)))
            .collect()
    }

    /// True range folded into `[0, range_unambiguous)`.
    pub fn measured_range(&self, targets: &[Target]) -> StapResult<Array1<Real>> {
        let r_ua = self.range_unambiguous()?;
        Ok(self.true_range(targets).map(|&r| r.rem_euclid(r_ua)))
    }

    /// True Doppler `-2·(v·r̂)/λ` per target, folded into
    /// `[-prf/2, prf/2)`. Receding targets have negative Doppler.
    pub fn measured_doppler(&self, targets: &[Target]) -> StapResult<Array1<Real>> {
        self.doppler_unambiguous()?;
        let prf = self.timing.prf();
        let wavelength = self.wavelength();
        Ok(targets
            .iter()
            .map(|tgt| {
                let offset = sub(&tgt.position, &self.position);
                let range = norm(&offset);
                let radial = if range > 0.0 {
                    dot(&tgt.velocity, &offset) / range
                } else {
                    0.0
                };
                fold_doppler(-2.0 * radial / wavelength, prf)
            })
            .collect())
    }

    /// Measured Doppler scaled to radial velocity, `f_d·λ/2`.
    pub fn measured_velocity(&self, targets: &[Target]) -> StapResult<Array1<Real>> {
        let wavelength = self.wavelength();
        Ok(self
            .measured_doppler(targets)?
            .map(|&f| f * wavelength / 2.0))
    }

    /// Two-way carrier phase of the aliased range, in `[0, 2π)`.
    pub fn round_trip_phase(&self, targets: &[Target]) -> StapResult<Array1<Real>> {
        let wavelength = self.wavelength();
        Ok(self
            .measured_range(targets)?
            .map(|&r| (-4.0 * Real::PI() * r / wavelength).rem_euclid(2.0 * Real::PI())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radar::test_radar;
    use approx::assert_relative_eq;

    fn target_at(position: [Real; 3], velocity: [Real; 3]) -> Target {
        Target {
            position,
            velocity,
            rcs: 1.0,
        }
    }

    #[test]
    fn true_range_is_euclidean_distance() {
        let radar = test_radar();
        let targets = vec![
            target_at([3.0e3, 4.0e3, 0.0], [0.0; 3]),
            target_at([0.0, 0.0, 1.0e3], [0.0; 3]),
        ];
        let r = radar.true_range(&targets);
        assert_relative_eq!(r[0], 5.0e3);
        assert_relative_eq!(r[1], 1.0e3);
    }

    #[test]
    fn measured_range_stays_in_unambiguous_interval() {
        let radar = test_radar();
        let r_ua = radar.range_unambiguous().unwrap();
        for k in 0..5 {
            let range = 0.37 * r_ua + k as Real * r_ua;
            let targets = vec![target_at([range, 0.0, 0.0], [0.0; 3])];
            let measured = radar.measured_range(&targets).unwrap();
            assert!(measured[0] >= 0.0 && measured[0] < r_ua);
            assert_relative_eq!(measured[0], 0.37 * r_ua, max_relative = 1e-9);
        }
    }

    #[test]
    fn doppler_sign_is_negative_radial_rate_over_half_wavelength() {
        let radar = test_radar();
        // receding at 3 m/s along the line of sight: v·r̂ = +3
        let receding = vec![target_at([1.0e4, 0.0, 0.0], [3.0, 0.0, 0.0])];
        let doppler = radar.measured_doppler(&receding).unwrap();
        assert_relative_eq!(doppler[0], -2.0 * 3.0 / 0.03, max_relative = 1e-9);
        assert!(doppler[0] < 0.0);

        let approaching = vec![target_at([1.0e4, 0.0, 0.0], [-3.0, 0.0, 0.0])];
        assert!(radar.measured_doppler(&approaching).unwrap()[0] > 0.0);

        let velocity = radar.measured_velocity(&receding).unwrap();
        assert_relative_eq!(velocity[0], doppler[0] * 0.03 / 2.0);
    }

    #[test]
    fn doppler_fold_is_prf_periodic() {
        let radar = test_radar();
        let prf = radar.timing.prf();
        let wavelength = radar.wavelength();
        // radial speed producing 120 Hz true Doppler, then k·prf on top
        for &k in &[0, 1, 3, 10] {
            let doppler_true = 120.0 + k as Real * prf;
            let radial = -doppler_true * wavelength / 2.0;
            let targets = vec![target_at([1.0e4, 0.0, 0.0], [radial, 0.0, 0.0])];
            let measured = radar.measured_doppler(&targets).unwrap();
            assert_relative_eq!(measured[0], 120.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn doppler_fold_boundary_maps_half_prf_negative() {
        let radar = test_radar();
        let prf = radar.timing.prf();
        assert_relative_eq!(fold_doppler(prf / 2.0, prf), -prf / 2.0);
        assert_relative_eq!(fold_doppler(-prf / 2.0, prf), -prf / 2.0);
        assert_relative_eq!(fold_doppler(0.499 * prf, prf), 0.499 * prf);
    }

    #[test]
    fn round_trip_phase_is_wrapped() {
        let radar = test_radar();
        let targets = vec![target_at([1.234e4, 0.0, 0.0], [0.0; 3])];
        let phase = radar.round_trip_phase(&targets).unwrap();
        assert!(phase[0] >= 0.0 && phase[0] < 2.0 * Real::PI());

        let r = radar.measured_range(&targets).unwrap()[0];
        let expected = (-4.0 * Real::PI() * r / 0.03).rem_euclid(2.0 * Real::PI());
        assert_relative_eq!(phase[0], expected);
    }
}
