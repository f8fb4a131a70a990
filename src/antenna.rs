use crate::common::{Ratio, Real};
use crate::error::{StapError, StapResult};

/// Normalized element power gain over angle. Values are linear in [0, 1];
/// angles are radians off boresight.
pub trait GainPattern {
    fn norm_power_gain(&self, azimuth: Real, elevation: Real) -> Real;
}

/// Cosine-power element pattern, zero behind the array face.
#[derive(Clone, Debug)]
pub struct CosinePattern {
    pub exponent: Real,
}

impl GainPattern for CosinePattern {
    fn norm_power_gain(&self, azimuth: Real, elevation: Real) -> Real {
        if azimuth.abs() >= std::f64::consts::FRAC_PI_2
            || elevation.abs() >= std::f64::consts::FRAC_PI_2
        {
            return 0.0;
        }
        (azimuth.cos() * elevation.cos()).powf(self.exponent)
    }
}

/// An antenna with a steerable aperture: identical elements at uniform
/// spacing, each with the same gain and pattern.
#[derive(Clone, Debug)]
pub struct ArrayAntenna {
    pub element_gain: Ratio,
    pub pattern: CosinePattern,
}

/// A single radiating element without spatial aperture. Steering-vector
/// generation degenerates to the scalar 1; gain-pattern lookups for the
/// power budget are unavailable.
#[derive(Clone, Debug)]
pub struct SingleElement {
    pub gain: Ratio,
}

#[derive(Clone, Debug)]
pub enum Antenna {
    Array(ArrayAntenna),
    Single(SingleElement),
}

impl Antenna {
    pub fn uniform_array<G: Into<Ratio>>(element_gain: G, exponent: Real) -> Self {
        Antenna::Array(ArrayAntenna {
            element_gain: element_gain.into(),
            pattern: CosinePattern { exponent },
        })
    }

    pub fn has_aperture(&self) -> bool {
        matches!(self, Antenna::Array(_))
    }

    /// The array aperture, or `UnsupportedGeometry` for a single element.
    pub fn array(&self) -> StapResult<&ArrayAntenna> {
        match self {
            Antenna::Array(array) => Ok(array),
            Antenna::Single(_) => Err(StapError::UnsupportedGeometry(
                "array aperture required for gain-pattern lookup",
            )),
        }
    }
}
