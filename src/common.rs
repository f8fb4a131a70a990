use core::marker::PhantomData;

use std::fs::File;
use std::io::Write;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

use ndarray::{Array1, Array2};
use num::complex::Complex64;
use num::traits::{Num, ToPrimitive};
use serde::Serialize;

pub type Real = f64;

pub const SPEED_OF_LIGHT: Real = 2.997e8;
pub const BOLTZMANN: Real = 1.380649e-23;
pub const REFERENCE_TEMP: Real = 290.0;

pub type CpxMatrix = Array2<Complex64>;
pub type CpxVector = Array1<Complex64>;

/// A power level expressed in dB relative to some common reference.
#[derive(Copy, Clone, Debug)]
pub struct Decibel(Real);

/// The same power level as a linear ratio.
#[derive(Copy, Clone, Debug)]
pub struct Ratio(Real);

impl Add for Decibel {
    type Output = Decibel;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Decibel {
    type Output = Decibel;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Decibel {
    type Output = Decibel;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<Decibel> for Ratio {
    fn from(db: Decibel) -> Self {
        Self(Real::powf(10.0, db.0 / 10.0))
    }
}

impl From<Ratio> for Decibel {
    fn from(ratio: Ratio) -> Self {
        Self(10.0 * Real::log10(ratio.0))
    }
}

macro_rules! impl_from_primitive_for {
    ($DR: ty) => {
        impl<T: Num + ToPrimitive> From<T> for $DR {
            #[inline]
            fn from(value: T) -> Self {
                Self(value.to_f64().unwrap())
            }
        }
    };
}

impl_from_primitive_for!(Decibel);
impl_from_primitive_for!(Ratio);

impl From<Decibel> for Real {
    fn from(db: Decibel) -> Self {
        db.0
    }
}

impl From<Ratio> for Real {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

/// Scale-tag conversions. Algorithms in this crate consume linear power
/// ratios only; dB exists at the caller boundary.
pub trait Units {
    fn db(self) -> Decibel;

    fn ratio(self) -> Ratio;

    fn value(self) -> Real;
}

impl<T: Into<Decibel> + Into<Ratio> + Into<Real>> Units for T {
    fn db(self) -> Decibel {
        self.into()
    }

    fn ratio(self) -> Ratio {
        self.into()
    }

    fn value(self) -> Real {
        self.into()
    }
}

/// An angle tagged as radians.
#[derive(Copy, Clone, Debug)]
pub struct Radians(Real);

/// An angle tagged as degrees.
#[derive(Copy, Clone, Debug)]
pub struct Degrees(Real);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Self(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Self(rad.0.to_degrees())
    }
}

impl_from_primitive_for!(Radians);
impl_from_primitive_for!(Degrees);

impl From<Radians> for Real {
    fn from(rad: Radians) -> Self {
        rad.0
    }
}

impl From<Degrees> for Real {
    fn from(deg: Degrees) -> Self {
        deg.0
    }
}

/// Angle-tag conversions. Algorithms in this crate consume radians only.
pub trait Angles {
    fn rad(self) -> Radians;

    fn deg(self) -> Degrees;

    fn angle(self) -> Real;
}

impl<T: Into<Radians> + Into<Degrees> + Into<Real>> Angles for T {
    fn rad(self) -> Radians {
        self.into()
    }

    fn deg(self) -> Degrees {
        self.into()
    }

    fn angle(self) -> Real {
        self.into()
    }
}

pub trait DataMatrix<T = Self>: Add<T, Output = T> + Serialize {
    fn zero(size: (usize, usize)) -> Self;

    fn size(&self) -> (usize, usize);
}

impl<T: Num + Clone + Serialize + Add> DataMatrix for Array2<T> {
    fn zero(size: (usize, usize)) -> Self {
        Array2::from_elem(size, T::zero())
    }

    fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

#[derive(Debug, Serialize)]
pub struct FastTime {}

#[derive(Debug, Serialize)]
pub struct DopplerFreq {}

/// A pulse-burst data grid tagged with its slow-time domain: fast-time
/// samples per pulse before Doppler processing, Doppler bins after.
#[derive(Debug, Serialize)]
pub struct Frame<M, D> {
    pub matrix: M,
    _domain: PhantomData<D>,
}

impl<M: DataMatrix, D> Frame<M, D> {
    pub fn new(matrix: M) -> Self {
        Self {
            matrix,
            _domain: PhantomData,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        self.matrix.size()
    }
}

impl<M: DataMatrix, D> Add for Frame<M, D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output::new(self.matrix + rhs.matrix)
    }
}

impl<M: DataMatrix, D> Sum for Frame<M, D> {
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        if let Some(init) = iter.next() {
            iter.fold(init, |acc, item| acc + item)
        } else {
            Self {
                matrix: M::zero((0, 0)),
                _domain: PhantomData,
            }
        }
    }
}

pub trait Storable: Serialize {
    fn to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let mut file = File::create(&path)?;
        let s = serde_json::to_string(self)?;
        file.write_all(s.as_bytes())?;
        Ok(())
    }
}

impl<M: DataMatrix, D> Storable for Frame<M, D> {}

pub type RangePulse<M> = Frame<M, FastTime>;
pub type RangeDoppler<M> = Frame<M, DopplerFreq>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn db_ratio_round_trip() {
        let r: Real = 3.0.db().ratio().value();
        assert_relative_eq!(r, 1.9952623149688795, epsilon = 1e-12);
        let db: Real = r.ratio().db().value();
        assert_relative_eq!(db, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_db_is_unity() {
        assert_relative_eq!(0.0.db().ratio().value(), 1.0);
    }

    #[test]
    fn degree_radian_round_trip() {
        let rad: Real = 180.0.deg().rad().angle();
        assert_relative_eq!(rad, std::f64::consts::PI, epsilon = 1e-12);
        let deg: Real = rad.rad().deg().angle();
        assert_relative_eq!(deg, 180.0, epsilon = 1e-12);
    }
}
