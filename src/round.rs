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

//! Shared rounding machinery.
//!
//! All rounding in the crate funnels through two functions: [`round_digits`],
//! which trims a coefficient's digit string to a target length, and
//! [`round_quotient`], which finishes a long division from its exact
//! remainder. Keeping the eight rounding modes in one decision table makes
//! the behavior exhaustively testable.

use std::cmp::Ordering;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::context::Rounding;
use crate::error::ArithmeticError;

/// Returns 10^n.
pub(crate) fn pow10(n: u32) -> BigUint {
    BigUint::from(10u32).pow(n)
}

/// Returns the number of decimal digits in `mag`; zero counts as one digit.
pub(crate) fn count_digits(mag: &BigUint) -> u64 {
    if mag.is_zero() {
        1
    } else {
        mag.to_str_radix(10).len() as u64
    }
}

/// Decides whether the retained digits must be incremented.
///
/// `first` is the most significant dropped digit (as a value, not ASCII),
/// `rest_nonzero` whether anything nonzero lies beyond it, and `last_odd`
/// the parity of the least significant retained digit.
fn should_increment(
    mode: Rounding,
    negative: bool,
    first: u8,
    rest_nonzero: bool,
    last_odd: bool,
) -> Result<bool, ArithmeticError> {
    Ok(match mode {
        Rounding::Unnecessary => return Err(ArithmeticError::RoundingRequired),
        Rounding::Down => false,
        Rounding::Up => true,
        Rounding::Ceiling => !negative,
        Rounding::Floor => negative,
        Rounding::HalfUp => first >= 5,
        Rounding::HalfDown => first > 5 || (first == 5 && rest_nonzero),
        Rounding::HalfEven => {
            if first != 5 {
                first > 5
            } else if rest_nonzero {
                true
            } else {
                last_odd
            }
        }
    })
}

/// Rounds the ASCII digit string `digits` down to at most `keep` significant
/// digits, returning the new digit string and the amount to add to the
/// exponent.
///
/// `keep` may be zero or negative, in which case every digit is dropped and
/// the result is either `0` or, after an increment, `1`. The returned digit
/// string never has a leading zero unless it is `"0"`.
pub(crate) fn round_digits(
    negative: bool,
    digits: &[u8],
    keep: i64,
    mode: Rounding,
) -> Result<(Vec<u8>, i64), ArithmeticError> {
    let len = digits.len() as i64;
    if keep >= len {
        return Ok((digits.to_vec(), 0));
    }
    let dropped = len - keep;
    let (kept, first, rest): (Vec<u8>, u8, &[u8]) = match keep.cmp(&0) {
        Ordering::Greater => {
            let k = keep as usize;
            (digits[..k].to_vec(), digits[k] - b'0', &digits[k + 1..])
        }
        Ordering::Equal => (vec![b'0'], digits[0] - b'0', &digits[1..]),
        // The dropped window starts above the most significant digit, so the
        // first dropped digit is an implied zero.
        Ordering::Less => (vec![b'0'], 0, digits),
    };
    let rest_nonzero = rest.iter().any(|&d| d != b'0');
    if first == 0 && !rest_nonzero {
        // Only zeros dropped: exact under every mode.
        return Ok((kept, dropped));
    }
    let last_odd = (kept[kept.len() - 1] - b'0') % 2 == 1;
    if !should_increment(mode, negative, first, rest_nonzero, last_odd)? {
        return Ok((kept, dropped));
    }
    let mut out = kept;
    let mut i = out.len();
    loop {
        if i == 0 {
            out.insert(0, b'1');
            break;
        }
        i -= 1;
        if out[i] == b'9' {
            out[i] = b'0';
        } else {
            out[i] += 1;
            break;
        }
    }
    let mut exp_inc = dropped;
    if out.len() as i64 > keep.max(1) {
        // The carry rippled all the way up (999... became 1000...); the new
        // trailing digit is zero and folds into the exponent.
        out.pop();
        exp_inc += 1;
    }
    Ok((out, exp_inc))
}

/// Finishes a division `q = num / den` given its exact remainder, bumping
/// the quotient magnitude by one when the mode asks for it.
pub(crate) fn round_quotient(
    q: BigUint,
    rem: &BigUint,
    den: &BigUint,
    negative: bool,
    mode: Rounding,
) -> Result<BigUint, ArithmeticError> {
    if rem.is_zero() {
        return Ok(q);
    }
    let twice = rem << 1u32;
    let up = match mode {
        Rounding::Unnecessary => return Err(ArithmeticError::RoundingRequired),
        Rounding::Down => false,
        Rounding::Up => true,
        Rounding::Ceiling => !negative,
        Rounding::Floor => negative,
        Rounding::HalfUp => twice >= *den,
        Rounding::HalfDown => twice > *den,
        Rounding::HalfEven => match twice.cmp(den) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => (&q % 2u32).is_one(),
        },
    };
    Ok(if up { q + 1u32 } else { q })
}
