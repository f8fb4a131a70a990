use crate::antenna::GainPattern;
use crate::common::{Ratio, Real, Units};
use crate::error::StapResult;
use crate::geometry::{cart_to_spherical, sub, Target};
use crate::radar::Radar;

use num::traits::FloatConst;

impl Radar {
    /// Radar range equation per target,
    /// `P_r = P_t·G²·λ²·σ / ((4π)³·L·R⁴)` with
    /// `G = element_gain · norm_power_gain(az, el)` and R the true
    /// (unaliased) range. All arithmetic is linear; callers wanting dB
    /// convert the returned `Ratio`s at the boundary.
    pub fn received_power(&self, targets: &[Target]) -> StapResult<Vec<Ratio>> {
        let array = self.antenna.array()?;
        let wavelength = self.wavelength();
        let spreading = (4.0 * Real::PI()).powi(3) * self.loss_system.value();

        Ok(targets
            .iter()
            .map(|tgt| {
                let (az, el, range) = cart_to_spherical(&sub(&tgt.position, &self.position));
                let gain =
                    array.element_gain.value() * array.pattern.norm_power_gain(az, el);
                let power = self.power_tx * gain * gain * wavelength * wavelength * tgt.rcs
                    / (spreading * range.powi(4));
                power.ratio()
            })
            .collect())
    }

    /// Received power over receiver noise power, linear.
    pub fn snr(&self, targets: &[Target]) -> StapResult<Vec<Ratio>> {
        Ok(self
            .received_power(targets)?
            .into_iter()
            .map(|p| (p.value() / self.noise_power).ratio())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antenna::{Antenna, GainPattern, SingleElement};
    use crate::error::StapError;
    use crate::radar::test_radar;
    use approx::assert_relative_eq;

    fn boresight_target(range: Real, rcs: Real) -> Target {
        Target {
            position: [range, 0.0, 0.0],
            velocity: [0.0; 3],
            rcs,
        }
    }

    #[test]
    fn boresight_power_matches_closed_form() {
        let radar = test_radar();
        let range = 20.0e3;
        let p = radar.received_power(&[boresight_target(range, 2.0)]).unwrap();

        // boresight: full element gain of 100, pattern gain 1
        let expected = 1.0e3 * 100.0 * 100.0 * 0.03 * 0.03 * 2.0
            / ((4.0 * Real::PI()).powi(3) * range.powi(4));
        assert_relative_eq!(p[0].value(), expected, max_relative = 1e-12);
    }

    #[test]
    fn off_boresight_power_is_weighted_by_the_pattern() {
        let radar = test_radar();
        let target = Target {
            position: [10.0e3, 10.0e3, 0.0],
            velocity: [0.0; 3],
            rcs: 1.0,
        };
        let p_off = radar.received_power(&[target]).unwrap()[0].value();
        let range = (2.0 as Real).sqrt() * 10.0e3;
        let p_on = radar.received_power(&[boresight_target(range, 1.0)]).unwrap()[0].value();

        let pattern = radar.antenna.array().unwrap().pattern.clone();
        let g = pattern.norm_power_gain(Real::FRAC_PI_4(), 0.0);
        assert_relative_eq!(p_off, p_on * g * g, max_relative = 1e-9);
    }

    #[test]
    fn power_uses_true_range_not_aliased() {
        let radar = test_radar();
        let r_ua = radar.range_unambiguous().unwrap();
        let near = radar.received_power(&[boresight_target(0.3 * r_ua, 1.0)]).unwrap();
        let far = radar.received_power(&[boresight_target(1.3 * r_ua, 1.0)]).unwrap();
        let expected = (0.3 as Real / 1.3).powi(4);
        assert_relative_eq!(far[0].value() / near[0].value(), expected, max_relative = 1e-9);
    }

    #[test]
    fn snr_is_power_over_noise() {
        let radar = test_radar();
        let targets = [boresight_target(15.0e3, 1.0)];
        let p = radar.received_power(&targets).unwrap()[0].value();
        let snr = radar.snr(&targets).unwrap()[0].value();
        assert_relative_eq!(snr, p / radar.noise_power, max_relative = 1e-12);
    }

    #[test]
    fn single_element_antenna_is_rejected() {
        let mut radar = test_radar();
        radar.antenna = Antenna::Single(SingleElement { gain: 1.0.ratio() });
        assert!(matches!(
            radar.received_power(&[boresight_target(1.0e4, 1.0)]),
            Err(StapError::UnsupportedGeometry(_))
        ));
    }
}
