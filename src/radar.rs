use crate::antenna::Antenna;
use crate::common::{Ratio, Real, Units, BOLTZMANN, REFERENCE_TEMP, SPEED_OF_LIGHT};
use crate::error::{check_positive, StapResult};
use crate::geometry::{ArrayGeometry, Vec3};
use crate::timing::PulseTiming;

/// Everything the signal chain needs to know about one radar: array
/// geometry, pulse timing, antenna, platform state and the power budget.
/// Every pipeline stage takes `&Radar` and leaves it untouched.
#[derive(Clone, Debug)]
pub struct Radar {
    pub geometry: ArrayGeometry,
    pub timing: PulseTiming,
    pub antenna: Antenna,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Peak transmit power, W.
    pub power_tx: Real,
    /// Combined system losses, linear (>= 1).
    pub loss_system: Ratio,
    /// Receiver noise power, W.
    pub noise_power: Real,
    /// Receiver bandwidth, Hz.
    pub bandwidth: Real,
}

impl Radar {
    pub fn new(
        geometry: ArrayGeometry,
        timing: PulseTiming,
        antenna: Antenna,
        power_tx: Real,
        loss_system: Ratio,
        noise_power: Real,
        bandwidth: Real,
    ) -> StapResult<Self> {
        Ok(Self {
            geometry,
            timing,
            antenna,
            position: [0.0; 3],
            velocity: [0.0; 3],
            power_tx: check_positive("power_tx", power_tx)?,
            loss_system,
            noise_power: check_positive("noise_power", noise_power)?,
            bandwidth: check_positive("bandwidth", bandwidth)?,
        })
    }

    pub fn wavelength(&self) -> Real {
        self.geometry.wavelength()
    }

    pub fn nof_elements(&self) -> usize {
        if self.antenna.has_aperture() {
            self.geometry.nof_elements()
        } else {
            1
        }
    }

    pub fn nof_pulses(&self) -> usize {
        self.timing.nof_pulses()
    }

    pub fn range_unambiguous(&self) -> StapResult<Real> {
        self.timing.range_unambiguous()
    }

    pub fn doppler_unambiguous(&self) -> StapResult<Real> {
        self.timing.doppler_unambiguous()
    }

    pub fn velocity_unambiguous(&self) -> StapResult<Real> {
        self.timing.velocity_unambiguous(self.wavelength())
    }

    pub fn range_resolution(&self) -> StapResult<Real> {
        Ok(SPEED_OF_LIGHT / (2.0 * check_positive("bandwidth", self.bandwidth)?))
    }

    /// Thermal noise power `k·T₀·B·F` for a given noise figure.
    pub fn noise_power_from_temperature<F: Into<Ratio>>(noise_figure: F, bandwidth: Real) -> Real {
        BOLTZMANN * REFERENCE_TEMP * bandwidth * noise_figure.into().value()
    }
}

/// Reference scenario shared by the unit tests: 8 elements at λ/2,
/// λ = 3 cm, PRF 1 kHz, 16 pulses.
#[cfg(test)]
pub(crate) fn test_radar() -> Radar {
    use crate::common::Units;

    let mut geometry = ArrayGeometry::new(8, 0.015, 10.0e9).unwrap();
    geometry.set_wavelength(0.03).unwrap();
    Radar::new(
        geometry,
        PulseTiming::new(1000.0, 16).unwrap(),
        Antenna::uniform_array(100.0.ratio(), 2.0),
        1.0e3,
        1.0.ratio(),
        1.0e-12,
        1.0e6,
    )
    .unwrap()
}
