use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{Bounded, One, PrimInt, Signed, Zero};

/// Scalar representation shared by every quantity a controller touches:
/// gains, time constants, control errors, outputs and the derived
/// difference-equation coefficients.
///
/// Two families implement it. Native floats (`f32`, `f64`) evaluate the
/// control law directly. [`Scaled`] wraps a signed integer carrying a
/// fixed number of decimal digits after the point; a product of two such
/// quantities carries the scale twice and is collapsed back to working
/// scale with [`rescale`](Value::rescale).
pub trait Value:
    Copy
    + PartialEq
    + PartialOrd
    + Debug
    + Zero
    + One
    + Bounded
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Collapses a product of two scaled quantities back to working scale.
    /// Identity under floating point.
    fn rescale(self) -> Self;

    /// Retained fraction of the previous derivative term for filter time
    /// constant `tf` and sample time `ts`: the filter pole `1 - ts/tf`,
    /// expressed so its fractional part survives integer arithmetic.
    fn filter_pole(tf: Self, ts: Self) -> Self;
}

macro_rules! impl_value_float {
    ($($t:ty),*) => {$(
        impl Value for $t {
            #[inline]
            fn rescale(self) -> Self {
                self
            }

            #[inline]
            fn filter_pole(tf: Self, ts: Self) -> Self {
                1.0 - ts / tf
            }
        }
    )*};
}

impl_value_float!(f32, f64);

/// Decimal fixed-point value: a signed integer `I` interpreted with
/// `DIGITS` decimal digits after the point, i.e. a unit factor of
/// `10^DIGITS`.
///
/// All arithmetic is plain integer arithmetic on the raw representation;
/// overflow behaves as it does for `I`. The unit factor must be
/// representable in `I` (at most 2 digits for `i8`, 4 for `i16`, 9 for
/// `i32`), otherwise the first scaling operation panics. That is a build
/// configuration mistake, not a runtime input condition.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Scaled<I, const DIGITS: u32>(I);

/// 8-bit fixed-point value.
pub type Fixed8<const DIGITS: u32> = Scaled<i8, DIGITS>;
/// 16-bit fixed-point value.
pub type Fixed16<const DIGITS: u32> = Scaled<i16, DIGITS>;
/// 32-bit fixed-point value.
pub type Fixed32<const DIGITS: u32> = Scaled<i32, DIGITS>;
/// 64-bit fixed-point value.
pub type Fixed64<const DIGITS: u32> = Scaled<i64, DIGITS>;

impl<I: PrimInt + Signed, const DIGITS: u32> Scaled<I, DIGITS> {
    /// Wraps an already-scaled raw integer, e.g. `Scaled::<i32, 4>::new(5000)`
    /// for 0.5.
    pub const fn new(raw: I) -> Self {
        Scaled(raw)
    }

    /// Scales a whole number into the representation, e.g.
    /// `Scaled::<i32, 4>::from_whole(2)` for 2.0 (raw 20000).
    pub fn from_whole(n: I) -> Self {
        Scaled(n * Self::unit())
    }

    /// The raw scaled integer.
    pub fn raw(self) -> I {
        self.0
    }

    /// The unit factor `10^DIGITS` in the underlying integer type.
    pub fn unit() -> I {
        match I::from(10u64.pow(DIGITS)) {
            Some(unit) => unit,
            None => panic!("fixed-point unit 10^DIGITS exceeds the integer type's range"),
        }
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> Add for Scaled<I, DIGITS> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Scaled(self.0 + rhs.0)
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> Sub for Scaled<I, DIGITS> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Scaled(self.0 - rhs.0)
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> Mul for Scaled<I, DIGITS> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Scaled(self.0 * rhs.0)
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> Div for Scaled<I, DIGITS> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Scaled(self.0 / rhs.0)
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> Neg for Scaled<I, DIGITS> {
    type Output = Self;

    fn neg(self) -> Self {
        Scaled(-self.0)
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> Zero for Scaled<I, DIGITS> {
    fn zero() -> Self {
        Scaled(I::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> One for Scaled<I, DIGITS> {
    /// The smallest representable increment (raw 1), not the scaled 1.0.
    /// Whole-number literals in the control law, such as the divisor in the
    /// trapezoidal rule, are raw integers.
    fn one() -> Self {
        Scaled(I::one())
    }
}

impl<I: PrimInt + Signed, const DIGITS: u32> Bounded for Scaled<I, DIGITS> {
    fn min_value() -> Self {
        Scaled(I::min_value())
    }

    fn max_value() -> Self {
        Scaled(I::max_value())
    }
}

impl<I: PrimInt + Signed + Debug, const DIGITS: u32> Value for Scaled<I, DIGITS> {
    #[inline]
    fn rescale(self) -> Self {
        Scaled(self.0 / Self::unit())
    }

    #[inline]
    fn filter_pole(tf: Self, ts: Self) -> Self {
        // unit*(tf - ts)/tf rather than 1 - ts/tf, so the fractional pole
        // keeps its DIGITS decimal digits in integer arithmetic.
        Scaled(Self::unit() * (tf.0 - ts.0) / tf.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Q4 = Fixed64<4>;

    #[test]
    fn whole_numbers_carry_the_unit_factor() {
        assert_eq!(Q4::unit(), 10_000);
        assert_eq!(Q4::from_whole(2).raw(), 20_000);
        assert_eq!(Q4::from_whole(-3).raw(), -30_000);
    }

    #[test]
    fn rescale_collapses_a_double_scaled_product() {
        // 2.0 * 1.5 carries the unit twice until rescaled.
        let product = Q4::from_whole(2) * Q4::new(15_000);
        assert_eq!(product.raw(), 300_000_000);
        assert_eq!(product.rescale(), Q4::from_whole(3));
    }

    #[test]
    fn rescale_is_identity_for_floats() {
        assert_eq!(3.25_f64.rescale(), 3.25);
        assert_eq!((-0.5_f32).rescale(), -0.5);
    }

    #[test]
    fn filter_pole_keeps_fractional_precision() {
        // tf = 2.0 s, ts = 0.5 s in tenths of a second: 20 and 5.
        let pole = Q4::filter_pole(Q4::new(20), Q4::new(5));
        assert_eq!(pole.raw(), 7_500); // 0.75

        let float_pole = f64::filter_pole(2.0, 0.5);
        assert_eq!(float_pole, 0.75);
    }

    #[test]
    fn bounds_are_the_integer_extremes() {
        assert_eq!(Q4::min_value().raw(), i64::MIN);
        assert_eq!(Q4::max_value().raw(), i64::MAX);
        assert_eq!(<f32 as Bounded>::max_value(), f32::MAX);
    }

    #[test]
    fn narrow_widths_scale_within_range() {
        assert_eq!(Fixed8::<2>::unit(), 100);
        assert_eq!(Fixed16::<4>::unit(), 10_000);
        assert_eq!(Fixed32::<9>::unit(), 1_000_000_000);
    }
}
