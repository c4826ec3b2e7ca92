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

//! Text layout of decimal values.
//!
//! [`layout`] renders a value in a notation form with its natural digit
//! counts; [`BigDecimal::format`] adds explicit control over the integer
//! width, fraction digits, and exponent digits.

use crate::context::{Form, Rounding};
use crate::decimal::BigDecimal;
use crate::error::ArithmeticError;
use crate::round::round_digits;

/// Formatting parameters for [`BigDecimal::format`].
///
/// Every field's `None` is the sentinel meaning "use the value's own digit
/// counts, unrounded"; `FormatSpec::default()` therefore reproduces the
/// `Display` rendering exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatSpec {
    /// Minimum number of characters before the decimal point, space-padded
    /// on the left.
    pub integer_width: Option<usize>,
    /// Exact number of digits after the decimal point, zero-padding or
    /// rounding the value as needed.
    pub fraction_digits: Option<u32>,
    /// Minimum number of digits in a rendered exponent, zero-padded.
    pub exponent_digits: Option<u32>,
    /// Notation form; `None` uses the value's own form.
    pub form: Option<Form>,
    /// Rounding mode applied when `fraction_digits` discards digits; `None`
    /// rounds half-up.
    pub rounding: Option<Rounding>,
}

impl BigDecimal {
    /// Renders the value under explicit formatting parameters.
    ///
    /// With `FormatSpec::default()` this is the `Display` rendering, and
    /// parsing the output yields back a representation-equal value.
    /// Supplying [`Rounding::Unnecessary`] with too few fraction digits to
    /// render the value exactly raises
    /// [`ArithmeticError::RoundingRequired`].
    pub fn format(&self, spec: FormatSpec) -> Result<String, ArithmeticError> {
        let form = spec.form.unwrap_or(self.form);
        let mode = spec.rounding.unwrap_or(Rounding::HalfUp);
        let body = if uses_exponent(self, form) {
            exponential_with_spec(self, form, spec.fraction_digits, spec.exponent_digits, mode)?
        } else {
            let value = match spec.fraction_digits {
                Some(fd) => self.rescale(i64::from(fd), mode)?,
                None => self.clone(),
            };
            plain_layout(value.is_negative(), &value.digit_bytes(), value.exponent())
        };
        Ok(match spec.integer_width {
            Some(width) => {
                let int_len = body
                    .find('.')
                    .or_else(|| body.find('E'))
                    .unwrap_or_else(|| body.len());
                let mut s = " ".repeat(width.saturating_sub(int_len));
                s.push_str(&body);
                s
            }
            None => body,
        })
    }
}

/// Renders `value` in `form` with its natural digit counts.
pub(crate) fn layout(value: &BigDecimal, form: Form) -> String {
    let digits = value.digit_bytes();
    if uses_exponent(value, form) {
        exponential_layout(value.is_negative(), &digits, value.exponent(), form, None)
    } else {
        plain_layout(value.is_negative(), &digits, value.exponent())
    }
}

/// Whether rendering `value` in `form` requires exponent notation.
///
/// Plain never does. The exponential forms use it only when a plain
/// rendering would fabricate padding zeros: when the exponent is positive,
/// or when the digits end more than just below the decimal point.
fn uses_exponent(value: &BigDecimal, form: Form) -> bool {
    if form == Form::Plain {
        return false;
    }
    let exp = value.exponent();
    !(exp <= 0 && exp + value.digits() as i64 >= 0)
}

/// Plain notation: digits and a decimal point, zero-padded as required,
/// never an exponent.
fn plain_layout(negative: bool, digits: &[u8], exp: i64) -> String {
    let len = digits.len() as i64;
    let mut s = String::with_capacity(digits.len() + 4);
    if negative {
        s.push('-');
    }
    if exp >= 0 {
        for &d in digits {
            s.push(char::from(d));
        }
        if digits[0] != b'0' {
            for _ in 0..exp {
                s.push('0');
            }
        }
    } else if len > -exp {
        let point = (len + exp) as usize;
        for &d in &digits[..point] {
            s.push(char::from(d));
        }
        s.push('.');
        for &d in &digits[point..] {
            s.push(char::from(d));
        }
    } else {
        s.push_str("0.");
        for _ in 0..(-exp - len) {
            s.push('0');
        }
        for &d in digits {
            s.push(char::from(d));
        }
    }
    s
}

/// Exponent notation: a normalized mantissa followed by `E` and a signed
/// exponent (elided when the exponent works out to zero).
fn exponential_layout(
    negative: bool,
    digits: &[u8],
    exp: i64,
    form: Form,
    exp_pad: Option<u32>,
) -> String {
    let len = digits.len() as i64;
    let adjusted = exp + len - 1;
    // A leading zero digit only occurs for a zero value, which always lays
    // out in the scientific shape.
    let sig = if form == Form::Engineering && digits[0] != b'0' {
        adjusted.rem_euclid(3) + 1
    } else {
        1
    };
    let euse = adjusted - (sig - 1);
    let mut s = String::with_capacity(digits.len() + 8);
    if negative {
        s.push('-');
    }
    if sig >= len {
        for &d in digits {
            s.push(char::from(d));
        }
        for _ in 0..sig - len {
            s.push('0');
        }
    } else {
        for &d in &digits[..sig as usize] {
            s.push(char::from(d));
        }
        s.push('.');
        for &d in &digits[sig as usize..] {
            s.push(char::from(d));
        }
    }
    if euse != 0 {
        s.push('E');
        s.push(if euse < 0 { '-' } else { '+' });
        let rendered = euse.abs().to_string();
        if let Some(width) = exp_pad {
            for _ in rendered.len()..width as usize {
                s.push('0');
            }
        }
        s.push_str(&rendered);
    }
    s
}

/// Exponential layout with an explicit mantissa fraction width.
fn exponential_with_spec(
    value: &BigDecimal,
    form: Form,
    fraction_digits: Option<u32>,
    exp_pad: Option<u32>,
    mode: Rounding,
) -> Result<String, ArithmeticError> {
    let fd = match fraction_digits {
        Some(fd) => fd,
        None => {
            return Ok(exponential_layout(
                value.is_negative(),
                &value.digit_bytes(),
                value.exponent(),
                form,
                exp_pad,
            ))
        }
    };
    let digits = value.digit_bytes();
    let len = digits.len() as i64;
    let adjusted = value.exponent() + len - 1;
    let sig = if form == Form::Engineering && digits[0] != b'0' {
        adjusted.rem_euclid(3) + 1
    } else {
        1
    };
    let keep = sig + i64::from(fd);
    let (mut out, exp_inc) = round_digits(value.is_negative(), &digits, keep, mode)?;
    let mut exp = value.exponent() + exp_inc;
    let pad = keep - out.len() as i64;
    if pad > 0 {
        out.extend(std::iter::repeat(b'0').take(pad as usize));
        exp -= pad;
    }
    Ok(exponential_layout(
        value.is_negative(),
        &out,
        exp,
        form,
        exp_pad,
    ))
}
