use crate::common::{Real, SPEED_OF_LIGHT};
use crate::error::{check_non_negative, StapError, StapResult};

/// Pulse-burst timing: repetition frequency/interval and pulse count.
/// PRF and PRI are mutually inverse; setting either atomically updates
/// the other. Derived ambiguity limits require a non-zero rate.
#[derive(Clone, Debug)]
pub struct PulseTiming {
    prf: Real,
    pri: Real,
    nof_pulses: usize,
}

impl PulseTiming {
    pub fn new(prf: Real, nof_pulses: usize) -> StapResult<Self> {
        let mut timing = Self {
            prf: 0.0,
            pri: 0.0,
            nof_pulses,
        };
        timing.set_prf(prf)?;
        Ok(timing)
    }

    pub fn prf(&self) -> Real {
        self.prf
    }

    pub fn pri(&self) -> Real {
        self.pri
    }

    pub fn nof_pulses(&self) -> usize {
        self.nof_pulses
    }

    pub fn set_prf(&mut self, prf: Real) -> StapResult<()> {
        self.prf = check_non_negative("prf", prf)?;
        self.pri = if prf > 0.0 { 1.0 / prf } else { 0.0 };
        Ok(())
    }

    pub fn set_pri(&mut self, pri: Real) -> StapResult<()> {
        self.pri = check_non_negative("pri", pri)?;
        self.prf = if pri > 0.0 { 1.0 / pri } else { 0.0 };
        Ok(())
    }

    fn require_rate(&self) -> StapResult<()> {
        if self.prf > 0.0 {
            Ok(())
        } else {
            Err(StapError::Validation {
                name: "prf",
                value: self.prf,
            })
        }
    }

    pub fn range_unambiguous(&self) -> StapResult<Real> {
        self.require_rate()?;
        Ok(SPEED_OF_LIGHT * self.pri / 2.0)
    }

    pub fn doppler_unambiguous(&self) -> StapResult<Real> {
        self.require_rate()?;
        Ok(self.prf / 2.0)
    }

    pub fn velocity_unambiguous(&self, wavelength: Real) -> StapResult<Real> {
        self.require_rate()?;
        Ok(wavelength * self.prf / 4.0)
    }
}
