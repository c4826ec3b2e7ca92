// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::context::{Form, Rounding};
use crate::error::{ArithmeticError, ParseDecimalError};
use crate::round::{count_digits, pow10, round_digits, round_quotient};

/// Largest exponent magnitude a parsed or context-rounded value may carry.
pub(crate) const MAX_EXP: i64 = 999_999_999;

/// An arbitrary-precision signed decimal number.
///
/// A value is a sign-carrying coefficient paired with a power-of-ten
/// exponent; the numeric value is `coefficient * 10^exponent`. The
/// coefficient is never silently normalized, so `2.4` and `2.40` are
/// numerically equal but distinct values with different coefficients and
/// exponents.
///
/// Methods on `BigDecimal` itself form the exact kernel: they track scale
/// algebraically and never round except where an explicit scale and rounding
/// mode are supplied. The same operations under a digit limit live on
/// [`Context`](crate::Context).
///
/// For convenience, `BigDecimal` overloads many of the standard Rust
/// operators, which delegate to the exact kernel:
///
/// ```
/// use bigdec::BigDecimal;
/// let a = BigDecimal::from(1);
/// let b = BigDecimal::from(2);
/// assert_eq!(a + b, BigDecimal::from(3));
/// ```
#[derive(Clone)]
pub struct BigDecimal {
    pub(crate) coefficient: BigInt,
    pub(crate) exponent: i64,
    pub(crate) form: Form,
}

impl BigDecimal {
    /// Constructs a decimal from a coefficient and a power-of-ten exponent.
    pub fn new(coefficient: BigInt, exponent: i64) -> BigDecimal {
        BigDecimal {
            coefficient,
            exponent,
            form: Form::Plain,
        }
    }

    /// Constructs a decimal representing the number 0.
    pub fn zero() -> BigDecimal {
        BigDecimal::new(BigInt::zero(), 0)
    }

    /// Constructs a decimal representing the number 1.
    pub fn one() -> BigDecimal {
        BigDecimal::new(BigInt::one(), 0)
    }

    /// Constructs a decimal representing the number 10.
    pub fn ten() -> BigDecimal {
        BigDecimal::new(BigInt::from(10), 0)
    }

    /// Returns the coefficient of the number.
    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    /// Returns the exponent of the number.
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Returns the scale of the number: the count of digits after the
    /// decimal point.
    ///
    /// The scale is the negation of the exponent, and 0 for values whose
    /// exponent is positive; it is never negative.
    pub fn scale(&self) -> i64 {
        if self.exponent >= 0 {
            0
        } else {
            -self.exponent
        }
    }

    /// Computes the number of significant digits in the coefficient.
    ///
    /// A zero coefficient has one digit.
    pub fn digits(&self) -> u64 {
        count_digits(self.coefficient.magnitude())
    }

    /// Returns the notation form the value renders in.
    pub fn form(&self) -> Form {
        self.form
    }

    /// Returns the sign of the number: -1, 0, or 1.
    ///
    /// The sign is 0 exactly when the coefficient is zero, independent of
    /// the exponent.
    pub fn sign(&self) -> i32 {
        match self.coefficient.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Reports whether the number is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Reports whether the number is less than zero.
    pub fn is_negative(&self) -> bool {
        self.coefficient.sign() == Sign::Minus
    }

    /// Reports whether the number is greater than zero.
    pub fn is_positive(&self) -> bool {
        self.coefficient.sign() == Sign::Plus
    }

    /// Reports whether the number has a zero fractional part.
    ///
    /// The check inspects the value's own digits: `5.00` is an integer even
    /// though it carries fraction digits.
    pub fn is_integer(&self) -> bool {
        if self.exponent >= 0 {
            return true;
        }
        let scale = exponent_gap(0, self.exponent);
        (self.coefficient.magnitude() % pow10(scale)).is_zero()
    }

    /// Returns the coefficient and exponent of this decimal.
    pub fn to_parts(&self) -> (BigInt, i64) {
        (self.coefficient.clone(), self.exponent)
    }

    /// Compares the numeric values of `self` and `rhs`, ignoring
    /// representation: `2.4` compares equal to `2.40`.
    ///
    /// An absent comparand ranks below every value, so comparing against
    /// `None` always yields [`Ordering::Greater`].
    pub fn cmp_value(&self, rhs: Option<&BigDecimal>) -> Ordering {
        let rhs = match rhs {
            Some(rhs) => rhs,
            None => return Ordering::Greater,
        };
        let exp = self.exponent.min(rhs.exponent);
        self.coeff_at(exp).cmp(&rhs.coeff_at(exp))
    }

    /// Returns an equivalent value whose coefficient has no trailing zeros.
    ///
    /// Zero reduces to coefficient 0 at exponent 0.
    pub fn reduce(&self) -> BigDecimal {
        if self.is_zero() {
            return BigDecimal {
                coefficient: BigInt::zero(),
                exponent: 0,
                form: self.form,
            };
        }
        let ten = BigInt::from(10);
        let mut coefficient = self.coefficient.clone();
        let mut exponent = self.exponent;
        loop {
            let q = &coefficient / &ten;
            let r = &coefficient % &ten;
            if !r.is_zero() {
                break;
            }
            coefficient = q;
            exponent += 1;
        }
        BigDecimal {
            coefficient,
            exponent,
            form: self.form,
        }
    }

    /// Computes the absolute value.
    pub fn abs(&self) -> BigDecimal {
        BigDecimal {
            coefficient: signed(self.coefficient.magnitude().clone(), false),
            exponent: self.exponent,
            form: self.form,
        }
    }

    /// Adds `rhs` to `self` exactly.
    ///
    /// The result's exponent is the smaller of the operand exponents, so the
    /// result's scale is exactly the larger of the operand scales.
    pub fn add(&self, rhs: &BigDecimal) -> BigDecimal {
        let exp = self.exponent.min(rhs.exponent);
        BigDecimal::new(self.coeff_at(exp) + rhs.coeff_at(exp), exp)
    }

    /// Subtracts `rhs` from `self` exactly.
    pub fn sub(&self, rhs: &BigDecimal) -> BigDecimal {
        let exp = self.exponent.min(rhs.exponent);
        BigDecimal::new(self.coeff_at(exp) - rhs.coeff_at(exp), exp)
    }

    /// Multiplies `self` by `rhs` exactly.
    ///
    /// The result's coefficient is the product of the coefficients and its
    /// exponent the sum of the exponents.
    pub fn mul(&self, rhs: &BigDecimal) -> BigDecimal {
        BigDecimal::new(
            &self.coefficient * &rhs.coefficient,
            self.exponent
                .checked_add(rhs.exponent)
                .expect("exponent sum does not fit into i64"),
        )
    }

    /// Divides `self` by `rhs`, producing a result with the dividend's own
    /// scale.
    ///
    /// The divisor's scale does not influence the target scale. A quotient
    /// that terminates at or before the target scale is zero-padded to
    /// exactly that scale; a non-terminating quotient is rounded half-up.
    /// The only failure is a zero divisor.
    pub fn div(&self, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.divide_at_scale(rhs, self.scale(), Rounding::HalfUp)
    }

    /// Divides `self` by `rhs`, rounding the exact quotient to `scale`
    /// fractional digits with the given mode.
    ///
    /// A negative scale raises [`ArithmeticError::InvalidScale`], and
    /// [`Rounding::Unnecessary`] raises [`ArithmeticError::RoundingRequired`]
    /// unless the exact quotient already terminates at the requested scale.
    pub fn div_to_scale(
        &self,
        rhs: &BigDecimal,
        scale: i64,
        mode: Rounding,
    ) -> Result<BigDecimal, ArithmeticError> {
        if scale < 0 {
            return Err(ArithmeticError::InvalidScale);
        }
        self.divide_at_scale(rhs, scale, mode)
    }

    /// Divides `self` by `rhs` and returns the integer part of the quotient,
    /// truncated toward zero, with an exponent of 0.
    ///
    /// The operands' scales are irrelevant here; the result is always the
    /// exact truncated quotient.
    pub fn div_integer(&self, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let exp = self.exponent.min(rhs.exponent);
        let num = self.coeff_at(exp);
        let den = rhs.coeff_at(exp);
        Ok(BigDecimal::new(num / den, 0))
    }

    /// Computes the remainder of dividing `self` by `rhs`.
    ///
    /// The remainder is `self - (self.div_integer(rhs) * rhs)`, always
    /// exact; its sign follows the dividend and its scale is whatever that
    /// subtraction implies.
    pub fn rem(&self, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        let q = self.div_integer(rhs)?;
        Ok(self.sub(&BigDecimal::mul(&q, rhs)))
    }

    /// Re-expresses the value at exactly `scale` fractional digits.
    ///
    /// A negative scale raises [`ArithmeticError::InvalidScale`]. Increasing
    /// the scale zero-pads the coefficient and is always exact; decreasing
    /// the scale rounds with `mode`, and [`Rounding::Unnecessary`] raises if
    /// any dropped digit is nonzero.
    pub fn rescale(&self, scale: i64, mode: Rounding) -> Result<BigDecimal, ArithmeticError> {
        if scale < 0 {
            return Err(ArithmeticError::InvalidScale);
        }
        let target = -scale;
        if target <= self.exponent {
            return Ok(BigDecimal {
                coefficient: self.coeff_at(target),
                exponent: target,
                form: self.form,
            });
        }
        let digits = self.digit_bytes();
        let keep = digits.len() as i64 - (target - self.exponent);
        let (out, exp_inc) = round_digits(self.is_negative(), &digits, keep, mode)?;
        let mut value = BigDecimal {
            coefficient: from_ascii(self.coefficient.sign(), &out),
            exponent: self.exponent + exp_inc,
            form: self.form,
        };
        if value.exponent > target {
            // A full carry (e.g. 9.99 -> 10.0) rippled one digit past the
            // target; pad back down so the scale is exact.
            value.coefficient = value.coeff_at(target);
            value.exponent = target;
        }
        Ok(value)
    }

    /// Moves the decimal point `n` places to the left.
    ///
    /// This is a pure exponent adjustment and never rounds.
    pub fn move_point_left(&self, n: u32) -> BigDecimal {
        self.shift_point(-i64::from(n))
    }

    /// Moves the decimal point `n` places to the right, zero-padding the
    /// coefficient as needed so the scale never goes negative.
    ///
    /// This never rounds.
    pub fn move_point_right(&self, n: u32) -> BigDecimal {
        self.shift_point(i64::from(n))
    }

    /// Raises `self` to the power of `rhs` exactly.
    ///
    /// `rhs` must have a zero fractional part. The result is the exact
    /// fixed-point power: coefficient `c^n` at exponent `e * n`. A negative
    /// exponent yields the exact reciprocal of the positive power, which
    /// exists only when the positive power's coefficient factors into twos
    /// and fives; otherwise [`ArithmeticError::RoundingRequired`] is raised.
    /// An exponent of exactly 0 yields exactly 1, even for a zero base.
    pub fn pow(&self, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        let n = rhs.integer_exponent()?;
        if n == 0 {
            return Ok(BigDecimal::one());
        }
        let magnitude = n.unsigned_abs();
        if self.digits().saturating_mul(u64::from(magnitude)) > MAX_EXP as u64 {
            return Err(ArithmeticError::PrecisionExceeded);
        }
        let coeff = self.coefficient.magnitude().pow(magnitude);
        let exponent = self
            .exponent
            .checked_mul(i64::from(magnitude))
            .ok_or(ArithmeticError::ExponentOverflow)?;
        let negative = self.is_negative() && magnitude % 2 == 1;
        let value = BigDecimal::new(signed(coeff, negative), exponent);
        if n > 0 {
            Ok(value)
        } else {
            exact_reciprocal(&value)
        }
    }

    /// Extracts a power operator's exponent as a machine integer.
    ///
    /// Raises when the value has a nonzero fractional part or lies outside
    /// ±999,999,999.
    pub(crate) fn integer_exponent(&self) -> Result<i32, ArithmeticError> {
        let n = self.to_integer()?;
        let n = i32::try_from(&n).map_err(|_| ArithmeticError::OutOfRange)?;
        if i64::from(n).abs() > MAX_EXP {
            return Err(ArithmeticError::OutOfRange);
        }
        Ok(n)
    }

    /// Returns the exact integer value, raising if any fractional digit is
    /// nonzero.
    pub(crate) fn to_integer(&self) -> Result<BigInt, ArithmeticError> {
        if self.exponent >= 0 {
            return Ok(self.coeff_at(0));
        }
        let p = BigInt::from(pow10(exponent_gap(0, self.exponent)));
        let q = &self.coefficient / &p;
        let r = &self.coefficient % &p;
        if r.is_zero() {
            Ok(q)
        } else {
            Err(ArithmeticError::NotAnInteger)
        }
    }

    /// The coefficient re-expressed at a smaller-or-equal exponent.
    pub(crate) fn coeff_at(&self, exponent: i64) -> BigInt {
        let gap = exponent_gap(self.exponent, exponent);
        if gap == 0 {
            self.coefficient.clone()
        } else {
            &self.coefficient * BigInt::from(pow10(gap))
        }
    }

    /// The coefficient magnitude's ASCII digits, most significant first.
    pub(crate) fn digit_bytes(&self) -> Vec<u8> {
        self.coefficient.magnitude().to_str_radix(10).into_bytes()
    }

    pub(crate) fn with_form(mut self, form: Form) -> BigDecimal {
        self.form = form;
        self
    }

    fn shift_point(&self, delta: i64) -> BigDecimal {
        let exponent = self.exponent + delta;
        if exponent > 0 {
            BigDecimal {
                coefficient: &self.coefficient * BigInt::from(pow10(exponent_gap(exponent, 0))),
                exponent: 0,
                form: self.form,
            }
        } else {
            BigDecimal {
                coefficient: self.coefficient.clone(),
                exponent,
                form: self.form,
            }
        }
    }

    fn divide_at_scale(
        &self,
        rhs: &BigDecimal,
        scale: i64,
        mode: Rounding,
    ) -> Result<BigDecimal, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(BigDecimal::new(BigInt::zero(), -scale));
        }
        let shift = self.exponent - rhs.exponent + scale;
        let mut num = self.coefficient.magnitude().clone();
        let mut den = rhs.coefficient.magnitude().clone();
        if shift >= 0 {
            num *= pow10(exponent_gap(shift, 0));
        } else {
            den *= pow10(exponent_gap(0, shift));
        }
        let q = &num / &den;
        let r = &num % &den;
        let negative = self.is_negative() != rhs.is_negative();
        let q = round_quotient(q, &r, &den, negative, mode)?;
        Ok(BigDecimal::new(signed(q, negative), -scale))
    }
}

/// Builds a signed coefficient from an unsigned magnitude.
pub(crate) fn signed(magnitude: BigUint, negative: bool) -> BigInt {
    let sign = if magnitude.is_zero() {
        Sign::NoSign
    } else if negative {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_biguint(sign, magnitude)
}

/// Builds a coefficient from rounded ASCII digits, preserving `sign` unless
/// the digits collapsed to zero.
pub(crate) fn from_ascii(sign: Sign, digits: &[u8]) -> BigInt {
    let magnitude = BigUint::parse_bytes(digits, 10).expect("rounded digits are valid decimal");
    signed(magnitude, sign == Sign::Minus)
}

/// The width of the gap between two exponents, as a power-of-ten exponent.
///
/// A gap wider than `u32` would describe a coefficient with more digits than
/// memory can hold, so the conversion cannot fail for representable values.
pub(crate) fn exponent_gap(high: i64, low: i64) -> u32 {
    u32::try_from(high - low).expect("exponent gap exceeds addressable digits")
}

fn exact_reciprocal(value: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
    if value.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    let (rest, twos) = factor_out(value.coefficient.magnitude().clone(), 2);
    let (rest, fives) = factor_out(rest, 5);
    if !rest.is_one() {
        return Err(ArithmeticError::RoundingRequired);
    }
    let m = twos.max(fives);
    let coeff = pow10(m) / value.coefficient.magnitude();
    Ok(BigDecimal::new(
        signed(coeff, value.is_negative()),
        -i64::from(m) - value.exponent,
    ))
}

fn factor_out(mut n: BigUint, factor: u32) -> (BigUint, u32) {
    let factor = BigUint::from(factor);
    let mut count = 0;
    while !n.is_zero() {
        let q = &n / &factor;
        let r = &n % &factor;
        if !r.is_zero() {
            break;
        }
        n = q;
        count += 1;
    }
    (n, count)
}

impl Default for BigDecimal {
    fn default() -> BigDecimal {
        BigDecimal::zero()
    }
}

impl fmt::Debug for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let form = if f.alternate() {
            Form::Engineering
        } else {
            self.form
        };
        f.write_str(&crate::format::layout(self, form))
    }
}

impl FromStr for BigDecimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<BigDecimal, ParseDecimalError> {
        crate::parse::parse_decimal(s)
    }
}

impl PartialEq for BigDecimal {
    /// Equality is representation-sensitive: sign, coefficient, and exponent
    /// must all match, so `2.4` and `2.40` compare equal by value but are
    /// not equal.
    fn eq(&self, other: &BigDecimal) -> bool {
        self.coefficient == other.coefficient && self.exponent == other.exponent
    }
}

impl Eq for BigDecimal {}

impl Hash for BigDecimal {
    /// Hashes the canonical rendered form `<coefficient>E<exponent>`, so
    /// equal values always hash identically while value-equal,
    /// representation-different values may not.
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write(self.coefficient.to_str_radix(10).as_bytes());
        state.write_u8(b'E');
        state.write_i64(self.exponent);
    }
}

impl Neg for BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        BigDecimal {
            coefficient: -self.coefficient,
            exponent: self.exponent,
            form: self.form,
        }
    }
}

impl Add<BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    fn add(self, rhs: BigDecimal) -> BigDecimal {
        BigDecimal::add(&self, &rhs)
    }
}

impl AddAssign<BigDecimal> for BigDecimal {
    fn add_assign(&mut self, rhs: BigDecimal) {
        *self = BigDecimal::add(self, &rhs);
    }
}

impl Sub<BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    fn sub(self, rhs: BigDecimal) -> BigDecimal {
        BigDecimal::sub(&self, &rhs)
    }
}

impl SubAssign<BigDecimal> for BigDecimal {
    fn sub_assign(&mut self, rhs: BigDecimal) {
        *self = BigDecimal::sub(self, &rhs);
    }
}

impl Mul<BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    fn mul(self, rhs: BigDecimal) -> BigDecimal {
        BigDecimal::mul(&self, &rhs)
    }
}

impl MulAssign<BigDecimal> for BigDecimal {
    fn mul_assign(&mut self, rhs: BigDecimal) {
        *self = BigDecimal::mul(self, &rhs);
    }
}

impl Div<BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    /// Divides with the exact kernel's dividend-scale semantics.
    ///
    /// Panics on division by zero, like primitive integer division.
    fn div(self, rhs: BigDecimal) -> BigDecimal {
        match BigDecimal::div(&self, &rhs) {
            Ok(q) => q,
            Err(e) => panic!("{}", e),
        }
    }
}

impl DivAssign<BigDecimal> for BigDecimal {
    fn div_assign(&mut self, rhs: BigDecimal) {
        *self = self.clone() / rhs;
    }
}

impl Rem<BigDecimal> for BigDecimal {
    type Output = BigDecimal;

    /// Computes the remainder with the exact kernel.
    ///
    /// Panics on division by zero, like primitive integer remainder.
    fn rem(self, rhs: BigDecimal) -> BigDecimal {
        match BigDecimal::rem(&self, &rhs) {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        }
    }
}

impl RemAssign<BigDecimal> for BigDecimal {
    fn rem_assign(&mut self, rhs: BigDecimal) {
        *self = self.clone() % rhs;
    }
}

impl Sum for BigDecimal {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = BigDecimal>,
    {
        let mut sum = BigDecimal::zero();
        for d in iter {
            sum = BigDecimal::add(&sum, &d);
        }
        sum
    }
}

impl<'a> Sum<&'a BigDecimal> for BigDecimal {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a BigDecimal>,
    {
        let mut sum = BigDecimal::zero();
        for d in iter {
            sum = BigDecimal::add(&sum, d);
        }
        sum
    }
}

impl Product for BigDecimal {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = BigDecimal>,
    {
        let mut product = BigDecimal::one();
        for d in iter {
            product = BigDecimal::mul(&product, &d);
        }
        product
    }
}

impl<'a> Product<&'a BigDecimal> for BigDecimal {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a BigDecimal>,
    {
        let mut product = BigDecimal::one();
        for d in iter {
            product = BigDecimal::mul(&product, d);
        }
        product
    }
}

impl Zero for BigDecimal {
    fn zero() -> BigDecimal {
        BigDecimal::zero()
    }

    fn is_zero(&self) -> bool {
        BigDecimal::is_zero(self)
    }
}

impl One for BigDecimal {
    fn one() -> BigDecimal {
        BigDecimal::one()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BigDecimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BigDecimal {
    fn deserialize<D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

static_assertions::assert_impl_all!(BigDecimal: Send, Sync);
