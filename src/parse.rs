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

//! Parsing of decimal literals.
//!
//! The accepted grammar is an optional sign, digits with at most one decimal
//! point (digits required on at least one side of the point), and an
//! optional `e`/`E` exponent marker with an optional sign and mandatory
//! digits. Values parsed with an exponent marker render in scientific form;
//! all others render plainly.

use num_bigint::BigUint;

use crate::context::Form;
use crate::decimal::{signed, BigDecimal, MAX_EXP};
use crate::error::ParseDecimalError;

pub(crate) fn parse_decimal(s: &str) -> Result<BigDecimal, ParseDecimalError> {
    let bytes = s.as_bytes();
    let mut i = 0;

    let mut negative = false;
    if let Some(&b) = bytes.first() {
        if b == b'+' || b == b'-' {
            negative = b == b'-';
            i = 1;
        }
    }

    let mut digits = Vec::with_capacity(bytes.len());
    let mut frac_len: i64 = 0;
    let mut seen_point = false;
    let mut seen_digit = false;
    while i < bytes.len() {
        match bytes[i] {
            b @ b'0'..=b'9' => {
                digits.push(b);
                seen_digit = true;
                if seen_point {
                    frac_len += 1;
                }
            }
            b'.' if !seen_point => seen_point = true,
            b'e' | b'E' => break,
            _ => return Err(ParseDecimalError),
        }
        i += 1;
    }
    if !seen_digit {
        return Err(ParseDecimalError);
    }

    let mut form = Form::Plain;
    let mut marker_exp: i64 = 0;
    if i < bytes.len() {
        // The main loop only breaks on an exponent marker.
        form = Form::Scientific;
        i += 1;
        let mut exp_negative = false;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            exp_negative = bytes[i] == b'-';
            i += 1;
        }
        let start = i;
        while i < bytes.len() {
            match bytes[i] {
                b @ b'0'..=b'9' => {
                    marker_exp = marker_exp
                        .checked_mul(10)
                        .and_then(|e| e.checked_add(i64::from(b - b'0')))
                        .ok_or(ParseDecimalError)?;
                }
                _ => return Err(ParseDecimalError),
            }
            i += 1;
        }
        if i == start {
            return Err(ParseDecimalError);
        }
        if exp_negative {
            marker_exp = -marker_exp;
        }
    }

    let exponent = marker_exp
        .checked_sub(frac_len)
        .ok_or(ParseDecimalError)?;
    if exponent.abs() > MAX_EXP {
        return Err(ParseDecimalError);
    }

    let magnitude =
        BigUint::parse_bytes(&digits, 10).expect("scanned digits are valid decimal");
    Ok(BigDecimal::new(signed(magnitude, negative), exponent).with_form(form))
}
