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

//! Conversions between decimals and machine numeric types.
//!
//! Two conversion families exist for every fixed-width integer type: a lossy
//! `to_*_wrapping` method that truncates the fraction toward zero and wraps
//! the integer part into the target's range, and a strict `TryFrom` that
//! raises unless the value is an exact in-range integer.

use std::convert::TryFrom;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, ToPrimitive};
use paste::paste;

use crate::decimal::{signed, BigDecimal};
use crate::error::{TryFromDecimalError, TryIntoDecimalError};
use crate::round::pow10;

macro_rules! from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for BigDecimal {
                fn from(n: $t) -> BigDecimal {
                    BigDecimal::new(BigInt::from(n), 0)
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for BigDecimal {
    fn from(n: BigInt) -> BigDecimal {
        BigDecimal::new(n, 0)
    }
}

macro_rules! wrapping_to_int {
    ($($t:ty),* $(,)?) => {
        paste! {
            impl BigDecimal {
                $(
                    #[doc = "Converts the value to a `" $t "`, truncating any \
                             fractional part toward zero and wrapping the \
                             integer part into the target's range."]
                    #[doc = ""]
                    #[doc = "This conversion never fails."]
                    pub fn [<to_ $t _wrapping>](&self) -> $t {
                        self.wrapped_bits() as $t
                    }
                )*
            }
        }
    };
}

wrapping_to_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

macro_rules! strict_to_int {
    ($($t:ty),* $(,)?) => {
        $(
            paste! {
                impl TryFrom<&BigDecimal> for $t {
                    type Error = TryFromDecimalError;

                    fn try_from(n: &BigDecimal) -> Result<$t, TryFromDecimalError> {
                        let int = n
                            .to_integer()
                            .map_err(|_| TryFromDecimalError::NotAnInteger)?;
                        int.[<to_ $t>]().ok_or(TryFromDecimalError::OutOfRange)
                    }
                }

                impl TryFrom<BigDecimal> for $t {
                    type Error = TryFromDecimalError;

                    fn try_from(n: BigDecimal) -> Result<$t, TryFromDecimalError> {
                        <$t>::try_from(&n)
                    }
                }
            }
        )*
    };
}

strict_to_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl BigDecimal {
    /// Returns the integer part of the value, truncated toward zero.
    pub fn to_bigint(&self) -> BigInt {
        if self.exponent >= 0 {
            self.coeff_at(0)
        } else {
            &self.coefficient / BigInt::from(pow10(crate::decimal::exponent_gap(0, self.exponent)))
        }
    }

    /// The integer part reduced to its low 128 bits, two's-complement style.
    fn wrapped_bits(&self) -> u128 {
        let modulus = BigInt::one() << 128u32;
        let mut r = self.to_bigint() % &modulus;
        if r.is_negative() {
            r += &modulus;
        }
        r.to_u128().expect("residue fits in 128 bits")
    }
}

impl TryFrom<&BigDecimal> for BigInt {
    type Error = TryFromDecimalError;

    /// The strict conversion to a big integer rejects any value carrying
    /// fractional digits, even all-zero ones like `5.00`.
    fn try_from(n: &BigDecimal) -> Result<BigInt, TryFromDecimalError> {
        if n.exponent() < 0 {
            Err(TryFromDecimalError::NotAnInteger)
        } else {
            Ok(n.coeff_at(0))
        }
    }
}

impl TryFrom<BigDecimal> for BigInt {
    type Error = TryFromDecimalError;

    fn try_from(n: BigDecimal) -> Result<BigInt, TryFromDecimalError> {
        BigInt::try_from(&n)
    }
}

impl TryFrom<f32> for BigDecimal {
    type Error = TryIntoDecimalError;

    /// Converts the exact binary value of `n`; NaN and infinities are
    /// rejected.
    fn try_from(n: f32) -> Result<BigDecimal, TryIntoDecimalError> {
        if !n.is_finite() {
            return Err(TryIntoDecimalError);
        }
        let bits = n.to_bits();
        let negative = bits >> 31 == 1;
        let biased = i64::from((bits >> 23) & 0xff);
        let frac = bits & ((1 << 23) - 1);
        let (mantissa, exp2) = if biased == 0 {
            (frac, -149)
        } else {
            (frac | (1 << 23), biased - 150)
        };
        Ok(binary_to_decimal(u64::from(mantissa), exp2, negative))
    }
}

impl TryFrom<f64> for BigDecimal {
    type Error = TryIntoDecimalError;

    /// Converts the exact binary value of `n`; NaN and infinities are
    /// rejected.
    fn try_from(n: f64) -> Result<BigDecimal, TryIntoDecimalError> {
        if !n.is_finite() {
            return Err(TryIntoDecimalError);
        }
        let bits = n.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let frac = bits & ((1 << 52) - 1);
        let (mantissa, exp2) = if biased == 0 {
            (frac, -1074)
        } else {
            (frac | (1 << 52), biased - 1075)
        };
        Ok(binary_to_decimal(mantissa, exp2, negative))
    }
}

/// Expands `±mantissa * 2^exp2` into an exact decimal.
///
/// A negative binary exponent factors as `2^-k = 5^k * 10^-k`, so the value
/// is always exactly representable. The result is reduced to its shortest
/// form, so `0.25f64` converts to `0.25` rather than a 54-digit fraction.
fn binary_to_decimal(mantissa: u64, exp2: i64, negative: bool) -> BigDecimal {
    if mantissa == 0 {
        return BigDecimal::zero();
    }
    let m = BigUint::from(mantissa);
    let (coefficient, exponent) = if exp2 >= 0 {
        (m << exp2 as u32, 0)
    } else {
        let k = (-exp2) as u32;
        (m * BigUint::from(5u32).pow(k), exp2)
    };
    BigDecimal::new(signed(coefficient, negative), exponent).reduce()
}
