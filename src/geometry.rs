use crate::common::{Real, SPEED_OF_LIGHT};
use crate::error::{check_positive, StapResult};

pub type Vec3 = [Real; 3];

pub fn dot(a: &Vec3, b: &Vec3) -> Real {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn norm(a: &Vec3) -> Real {
    dot(a, a).sqrt()
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn add_scaled(a: &Vec3, b: &Vec3, s: Real) -> Vec3 {
    [a[0] + s * b[0], a[1] + s * b[1], a[2] + s * b[2]]
}

/// Cartesian offset to (azimuth, elevation, range), angles in radians.
/// Azimuth is measured in the x-y plane from the x axis, elevation from
/// the x-y plane towards z.
pub fn cart_to_spherical(v: &Vec3) -> (Real, Real, Real) {
    let range = norm(v);
    let azimuth = v[1].atan2(v[0]);
    let elevation = v[2].atan2((v[0] * v[0] + v[1] * v[1]).sqrt());
    (azimuth, elevation, range)
}

/// Element count, spacing and operating wavelength of a uniform linear
/// array. Wavelength and center frequency are kept mutually consistent:
/// setting one recomputes the other.
#[derive(Clone, Debug)]
pub struct ArrayGeometry {
    nof_elements: usize,
    spacing: Real,
    wavelength: Real,
    center_freq: Real,
}

impl ArrayGeometry {
    pub fn new(nof_elements: usize, spacing: Real, center_freq: Real) -> StapResult<Self> {
        let center_freq = check_positive("center_freq", center_freq)?;
        Ok(Self {
            nof_elements,
            spacing: check_positive("spacing", spacing)?,
            wavelength: SPEED_OF_LIGHT / center_freq,
            center_freq,
        })
    }

    pub fn nof_elements(&self) -> usize {
        self.nof_elements
    }

    pub fn spacing(&self) -> Real {
        self.spacing
    }

    pub fn wavelength(&self) -> Real {
        self.wavelength
    }

    pub fn center_freq(&self) -> Real {
        self.center_freq
    }

    pub fn set_center_freq(&mut self, center_freq: Real) -> StapResult<()> {
        self.center_freq = check_positive("center_freq", center_freq)?;
        self.wavelength = SPEED_OF_LIGHT / self.center_freq;
        Ok(())
    }

    pub fn set_wavelength(&mut self, wavelength: Real) -> StapResult<()> {
        self.wavelength = check_positive("wavelength", wavelength)?;
        self.center_freq = SPEED_OF_LIGHT / self.wavelength;
        Ok(())
    }
}

/// A point scatterer. The echo simulator clones targets before advancing
/// their positions, so a caller's `Target` is never mutated.
#[derive(Clone, Debug)]
pub struct Target {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Radar cross-section, linear m².
    pub rcs: Real,
}
