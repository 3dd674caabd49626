//! Value types shared by the record kinds.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Number of fractional bits in a [`Fixed`].
pub const FRACBITS: u32 = 16;

/// One unit in 16.16 fixed point.
pub const FRACUNIT: i32 = 1 << FRACBITS;

/// A 16.16 fixed-point number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fixed(pub i32);

impl Fixed {
    /// Zero.
    pub const ZERO: Fixed = Fixed(0);
    /// One.
    pub const ONE: Fixed = Fixed(FRACUNIT);

    /// Convert a whole number.
    pub const fn from_int(value: i32) -> Self {
        Fixed(value.wrapping_shl(FRACBITS))
    }

    /// The whole part, rounded toward negative infinity.
    pub const fn to_int(self) -> i32 {
        self.0 >> FRACBITS
    }

    /// The raw 32-bit representation.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Approximate value as a float, for display.
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(FRACUNIT)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Fixed {
        Fixed(self.0.wrapping_neg())
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

/// A binary angle: the full circle maps onto the whole `u32` range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(pub u32);

impl Angle {
    /// 45 degrees.
    pub const ANG45: Angle = Angle(0x2000_0000);
    /// 90 degrees.
    pub const ANG90: Angle = Angle(0x4000_0000);
    /// 180 degrees.
    pub const ANG180: Angle = Angle(0x8000_0000);
    /// 270 degrees.
    pub const ANG270: Angle = Angle(0xc000_0000);

    /// Approximate value in degrees.
    pub fn to_degrees(self) -> f64 {
        f64::from(self.0) * 360.0 / 4_294_967_296.0
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

/// One 32-bit state argument cell.
///
/// The cell is untyped in the tables; each codepointer decides how to read its
/// arguments, so every interpretation is available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateArg(pub i32);

impl StateArg {
    /// As a signed integer.
    pub fn as_int(self) -> i32 {
        self.0
    }

    /// As an unsigned integer (bit pattern preserved).
    pub fn as_uint(self) -> u32 {
        self.0 as u32
    }

    /// As a 16.16 fixed-point value.
    pub fn as_fixed(self) -> Fixed {
        Fixed(self.0)
    }

    /// As a binary angle (bit pattern preserved).
    pub fn as_angle(self) -> Angle {
        Angle(self.0 as u32)
    }

    /// As a thing type index.
    pub fn as_mobj_type(self) -> i32 {
        self.0
    }

    /// As a state index.
    pub fn as_state(self) -> i32 {
        self.0
    }

    /// As a sound index.
    pub fn as_sound(self) -> i32 {
        self.0
    }
}

impl From<i32> for StateArg {
    fn from(value: i32) -> Self {
        StateArg(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_whole_numbers() {
        assert_eq!(Fixed::from_int(1), Fixed::ONE);
        assert_eq!(Fixed::from_int(-3).to_int(), -3);
        assert_eq!(Fixed::from_int(64).raw(), 64 * FRACUNIT);
        assert_eq!(Fixed(FRACUNIT / 2).to_f64(), 0.5);
        assert_eq!(Fixed(FRACUNIT / 2).to_string(), "0.5");
    }

    #[test]
    fn fixed_arithmetic_wraps() {
        assert_eq!(Fixed::ONE + Fixed::ONE, Fixed::from_int(2));
        assert_eq!(Fixed::ZERO - Fixed::ONE, -Fixed::ONE);
        assert_eq!(Fixed(i32::MAX) + Fixed(1), Fixed(i32::MIN));
    }

    #[test]
    fn angles_wrap_around_the_circle() {
        assert_eq!(Angle::ANG180 + Angle::ANG180, Angle(0));
        assert_eq!(Angle::ANG90.to_degrees(), 90.0);
        assert_eq!(Angle::ANG270.to_degrees(), 270.0);
    }

    #[test]
    fn state_arg_views_share_bits() {
        let arg = StateArg(-1);
        assert_eq!(arg.as_int(), -1);
        assert_eq!(arg.as_uint(), u32::MAX);
        assert_eq!(arg.as_angle(), Angle(u32::MAX));
        assert_eq!(StateArg(FRACUNIT * 8).as_fixed(), Fixed::from_int(8));
        assert_eq!(StateArg::from(12).as_state(), 12);
    }
}
