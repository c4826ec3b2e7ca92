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

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::decimal::{exponent_gap, from_ascii, signed, BigDecimal, MAX_EXP};
use crate::error::{ArithmeticError, InvalidPrecisionError};
use crate::round::{count_digits, pow10, round_digits, round_quotient};

/// A context for performing decimal operations under a rounding policy.
///
/// A context bundles four settings:
///
///   * a limit on the number of significant digits results may carry
///     (`digits`, where 0 means unbounded);
///   * the notation [`Form`] results render in;
///   * whether operations are strict about operands that already exceed the
///     digit limit (`lost_digits`);
///   * the [`Rounding`] algorithm used when digits must be discarded.
///
/// Operations hosted on the context compute the exact result first and then
/// clamp it to the digit limit, select the notation form, and detect
/// exponent overflow. A context with a digit limit of 0 only selects the
/// notation form: it never rounds and never raises the strictness,
/// precision-limit, or exponent-overflow conditions.
///
/// The default context has nine digits, scientific form, strictness off, and
/// half-up rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    digits: u32,
    form: Form,
    lost_digits: bool,
    rounding: Rounding,
}

impl Default for Context {
    fn default() -> Context {
        Context {
            digits: 9,
            form: Form::Scientific,
            lost_digits: false,
            rounding: Rounding::HalfUp,
        }
    }
}

/// Algorithms for rounding decimal numbers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rounding {
    /// Round towards positive infinity.
    Ceiling,
    /// Round towards zero (truncation).
    Down,
    /// Round towards negative infinity.
    Floor,
    /// Round to nearest; if equidistant, round towards zero.
    HalfDown,
    /// Round to nearest; if equidistant, round so that the final digit is
    /// even.
    HalfEven,
    /// Round to nearest; if equidistant, round away from zero.
    HalfUp,
    /// Never round: raise an error if any discarded digit is nonzero.
    Unnecessary,
    /// Round away from zero.
    Up,
}

impl Default for Rounding {
    fn default() -> Rounding {
        Rounding::HalfUp
    }
}

/// Notation forms for rendering decimal numbers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Form {
    /// Never use exponent notation.
    Plain,
    /// Use exponent notation where needed, normalized to exactly one nonzero
    /// digit before the decimal point (or the digit 0 for a zero value).
    Scientific,
    /// Use exponent notation where needed, normalized to one to three digits
    /// before the decimal point such that the exponent is a multiple of
    /// three.
    Engineering,
}

impl Default for Form {
    fn default() -> Form {
        Form::Plain
    }
}

impl Context {
    /// Constructs a context with the given digit limit and otherwise default
    /// settings.
    pub fn with_digits(digits: u32) -> Result<Context, InvalidPrecisionError> {
        let mut cx = Context::default();
        cx.set_digits(digits)?;
        Ok(cx)
    }

    /// Constructs a context that never rounds and renders results plainly.
    pub fn unlimited() -> Context {
        Context {
            digits: 0,
            form: Form::Plain,
            lost_digits: false,
            rounding: Rounding::HalfUp,
        }
    }

    /// Returns the context's significant-digit limit.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Sets the context's significant-digit limit.
    ///
    /// The limit must be no greater than 999,999,999; 0 means unbounded.
    pub fn set_digits(&mut self, digits: u32) -> Result<(), InvalidPrecisionError> {
        if i64::from(digits) > MAX_EXP {
            return Err(InvalidPrecisionError);
        }
        self.digits = digits;
        Ok(())
    }

    /// Returns the context's notation form.
    pub fn form(&self) -> Form {
        self.form
    }

    /// Sets the context's notation form.
    pub fn set_form(&mut self, form: Form) {
        self.form = form;
    }

    /// Reports whether the context checks operands against the digit limit.
    pub fn lost_digits(&self) -> bool {
        self.lost_digits
    }

    /// Sets whether the context checks operands against the digit limit.
    ///
    /// When enabled, an operation raises
    /// [`ArithmeticError::PrecisionExceeded`] before computing if an
    /// operand carries more significant digits than the digit limit allows.
    /// The check is skipped entirely when the digit limit is 0.
    pub fn set_lost_digits(&mut self, lost_digits: bool) {
        self.lost_digits = lost_digits;
    }

    /// Returns the context's rounding algorithm.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Sets the context's rounding algorithm.
    pub fn set_rounding(&mut self, rounding: Rounding) {
        self.rounding = rounding;
    }

    /// Adds `lhs` and `rhs`.
    pub fn add(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        self.finish(lhs.add(rhs))
    }

    /// Subtracts `rhs` from `lhs`.
    pub fn sub(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        self.finish(lhs.sub(rhs))
    }

    /// Multiplies `lhs` by `rhs`.
    pub fn mul(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        self.finish(lhs.mul(rhs))
    }

    /// Divides `lhs` by `rhs`, correctly rounded to the digit limit.
    ///
    /// Exact quotients are expressed with their exponent as close to the
    /// ideal exponent (the difference of the operand exponents) as removing
    /// trailing zeros permits, so `100 / 10` is `10` and `1 / 2` is `0.5`.
    /// With a digit limit of 0 the exact kernel's dividend-scale rule
    /// applies.
    pub fn div(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        if self.digits == 0 {
            return self.finish(lhs.div(rhs)?);
        }
        self.finish(self.divide(lhs, rhs)?)
    }

    /// Divides `lhs` by `rhs` and returns the integer part of the quotient,
    /// truncated toward zero.
    pub fn div_integer(
        &self,
        lhs: &BigDecimal,
        rhs: &BigDecimal,
    ) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        self.finish(lhs.div_integer(rhs)?)
    }

    /// Computes the remainder of dividing `lhs` by `rhs`.
    pub fn rem(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        self.finish(lhs.rem(rhs)?)
    }

    /// Computes the absolute value of `n`.
    pub fn abs(&self, n: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[n])?;
        self.finish(n.abs())
    }

    /// Negates `n`.
    pub fn neg(&self, n: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[n])?;
        self.finish(-n.clone())
    }

    /// Rounds `n` to the context, without performing any arithmetic.
    ///
    /// This is the unary round-to-policy operation: the result is `n`
    /// clamped to the digit limit and re-expressed in the context's form.
    pub fn round(&self, n: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[n])?;
        self.finish(n.clone())
    }

    /// Returns the larger of `lhs` and `rhs`, by numeric value, rounded to
    /// the context.
    ///
    /// `lhs` wins ties.
    pub fn max(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        let winner = if lhs.cmp_value(Some(rhs)) != Ordering::Less {
            lhs
        } else {
            rhs
        };
        self.finish(winner.clone())
    }

    /// Returns the smaller of `lhs` and `rhs`, by numeric value, rounded to
    /// the context.
    ///
    /// `lhs` wins ties.
    pub fn min(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[lhs, rhs])?;
        let winner = if lhs.cmp_value(Some(rhs)) != Ordering::Greater {
            lhs
        } else {
            rhs
        };
        self.finish(winner.clone())
    }

    /// Compares the numeric values of `lhs` and `rhs` after applying the
    /// context's strictness check.
    ///
    /// An absent `rhs` ranks below every value.
    pub fn cmp(
        &self,
        lhs: &BigDecimal,
        rhs: Option<&BigDecimal>,
    ) -> Result<Ordering, ArithmeticError> {
        match rhs {
            Some(rhs) => self.check_operands(&[lhs, rhs])?,
            None => self.check_operands(&[lhs])?,
        }
        Ok(lhs.cmp_value(rhs))
    }

    /// Raises `base` to the power of `exponent`.
    ///
    /// The exponent must be an exact integer after rounding to the context;
    /// when the digit limit is nonzero its digit count may not exceed the
    /// limit. A negative exponent yields the reciprocal of the positive
    /// power. An exponent of exactly 0 yields exactly 1, even for a zero
    /// base.
    ///
    /// The power is computed by repeated squaring at a working precision of
    /// `digits + digit_count(exponent) + 1`, rounding to the context's digit
    /// limit only once at the very end; the extra internal precision is what
    /// prevents double-rounding errors on wide-magnitude operands.
    pub fn pow(
        &self,
        base: &BigDecimal,
        exponent: &BigDecimal,
    ) -> Result<BigDecimal, ArithmeticError> {
        self.check_operands(&[base])?;
        let n = if self.digits > 0 {
            self.limit(exponent.clone())?.integer_exponent()?
        } else {
            exponent.integer_exponent()?
        };
        let elength = count_digits(&BigUint::from(n.unsigned_abs()));
        if self.digits > 0 && elength > u64::from(self.digits) {
            return Err(ArithmeticError::PrecisionExceeded);
        }
        if n == 0 {
            return self.finish(BigDecimal::one());
        }
        if self.digits == 0 {
            return self.finish(base.pow(&BigDecimal::from(n))?);
        }
        let mut work = *self;
        work.digits = self.digits + elength as u32 + 1;
        work.lost_digits = false;
        let mag = n.unsigned_abs();
        let mut result = work.limit(base.clone())?;
        let bits = 32 - mag.leading_zeros();
        for i in (0..bits - 1).rev() {
            result = work.limit(result.mul(&result))?;
            if mag >> i & 1 == 1 {
                result = work.limit(result.mul(base))?;
            }
        }
        if n < 0 {
            result = work.divide(&BigDecimal::one(), &result)?;
        }
        self.finish(result)
    }

    /// Correctly rounded division to `self.digits` significant digits, with
    /// exact results drawn toward the ideal exponent.
    fn divide(&self, lhs: &BigDecimal, rhs: &BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let ideal = lhs.exponent - rhs.exponent;
        if lhs.is_zero() {
            return Ok(BigDecimal::new(BigInt::zero(), ideal));
        }
        let want = i64::from(self.digits);
        let shift = want + rhs.digits() as i64 - lhs.digits() as i64;
        let mut num = lhs.coefficient.magnitude().clone();
        let mut den = rhs.coefficient.magnitude().clone();
        if shift >= 0 {
            num *= pow10(exponent_gap(shift, 0));
        } else {
            den *= pow10(exponent_gap(0, shift));
        }
        let mut q = &num / &den;
        let mut r = &num % &den;
        let mut exp = lhs.exponent - rhs.exponent - shift;
        let ten = BigUint::from(10u32);
        if count_digits(&q) as i64 > want {
            // One digit long; fold the low digit into the remainder so the
            // rounding decision still sees the exact dropped value.
            let low = &q % &ten;
            q = &q / &ten;
            r += low * &den;
            den *= &ten;
            exp += 1;
        }
        let negative = lhs.is_negative() != rhs.is_negative();
        let exact = r.is_zero();
        let mut q = round_quotient(q, &r, &den, negative, self.rounding)?;
        if count_digits(&q) as i64 > want {
            // Rounding carried 999... into 1000...; the dropped digit is 0.
            q = &q / &ten;
            exp += 1;
        }
        if exact {
            while exp < ideal {
                let rest = &q / &ten;
                if !(&q % &ten).is_zero() {
                    break;
                }
                q = rest;
                exp += 1;
            }
        }
        Ok(BigDecimal::new(signed(q, negative), exp))
    }

    /// The strictness check: with `lost_digits` set and a nonzero digit
    /// limit, operands wider than the limit are rejected before computing.
    fn check_operands(&self, operands: &[&BigDecimal]) -> Result<(), ArithmeticError> {
        if !self.lost_digits || self.digits == 0 {
            return Ok(());
        }
        for operand in operands {
            if operand.digits() > u64::from(self.digits) {
                return Err(ArithmeticError::PrecisionExceeded);
            }
        }
        Ok(())
    }

    /// Clamps `value` to the digit limit with the context's rounding mode.
    fn limit(&self, value: BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        if self.digits == 0 || value.digits() <= u64::from(self.digits) {
            return Ok(value);
        }
        let digits = value.digit_bytes();
        let (out, exp_inc) = round_digits(
            value.is_negative(),
            &digits,
            i64::from(self.digits),
            self.rounding,
        )?;
        Ok(BigDecimal {
            coefficient: from_ascii(value.coefficient.sign(), &out),
            exponent: value.exponent + exp_inc,
            form: value.form,
        })
    }

    /// Applies the tail of the uniform operation pipeline: digit limiting,
    /// notation-form selection, and exponent-overflow detection.
    fn finish(&self, value: BigDecimal) -> Result<BigDecimal, ArithmeticError> {
        let value = self.limit(value)?.with_form(self.form);
        if self.digits == 0 || value.is_zero() {
            return Ok(value);
        }
        let adjusted = value.exponent + value.digits() as i64 - 1;
        let rendered = match self.form {
            Form::Plain => value.exponent,
            Form::Scientific => adjusted,
            Form::Engineering => adjusted - adjusted.rem_euclid(3),
        };
        if rendered.abs() > MAX_EXP {
            return Err(ArithmeticError::ExponentOverflow);
        }
        Ok(value)
    }
}

static_assertions::assert_impl_all!(Context: Send, Sync);
