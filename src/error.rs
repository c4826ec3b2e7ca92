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

use std::error::Error;
use std::fmt;

/// An error indicating that a string is not a valid decimal number.
///
/// Also raised when the text carries an exponent that would put the value's
/// exponent outside the range ±999,999,999.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseDecimalError;

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid decimal syntax")
    }
}

impl Error for ParseDecimalError {}

/// An error indicating that a precision is not valid for a given context.
#[derive(Debug, Eq, PartialEq)]
pub struct InvalidPrecisionError;

impl fmt::Display for InvalidPrecisionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid decimal precision")
    }
}

impl Error for InvalidPrecisionError {}

/// An error indicating a value cannot be precisely cast to a decimal value,
/// e.g. a floating-point NaN or infinity.
#[derive(Debug, Eq, PartialEq)]
pub struct TryIntoDecimalError;

impl fmt::Display for TryIntoDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("value cannot be precisely expressed as decimal")
    }
}

impl Error for TryIntoDecimalError {}

/// An error indicating that a value cannot be cast to a primitive type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TryFromDecimalError {
    /// The value lies outside the range representable by the target type.
    OutOfRange,
    /// The value carries a nonzero fractional part.
    NotAnInteger,
}

impl fmt::Display for TryFromDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TryFromDecimalError::OutOfRange => {
                f.write_str("decimal cannot be expressed in target primitive type")
            }
            TryFromDecimalError::NotAnInteger => {
                f.write_str("decimal has a nonzero fractional part")
            }
        }
    }
}

impl Error for TryFromDecimalError {}

/// An exceptional condition raised by an arithmetic operation.
///
/// Each variant is a stable kind tag: callers match on the variant rather
/// than inspecting the message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ArithmeticError {
    /// The divisor in a division operation was zero.
    DivisionByZero,
    /// The exponent of a result fell outside the range ±999,999,999.
    ExponentOverflow,
    /// An operand carries more significant digits than the context permits,
    /// or a power's exponent is wider than the context's digit limit.
    PrecisionExceeded,
    /// Rounding was required but the rounding mode forbids it.
    RoundingRequired,
    /// A value that must be an exact integer has a nonzero fractional part.
    NotAnInteger,
    /// A requested scale is negative.
    InvalidScale,
    /// A power's exponent lies outside the supported integer range.
    OutOfRange,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArithmeticError::DivisionByZero => f.write_str("division by zero"),
            ArithmeticError::ExponentOverflow => f.write_str("exponent out of range"),
            ArithmeticError::PrecisionExceeded => f.write_str("too many digits"),
            ArithmeticError::RoundingRequired => f.write_str("rounding necessary"),
            ArithmeticError::NotAnInteger => f.write_str("decimal part non-zero"),
            ArithmeticError::InvalidScale => f.write_str("invalid scale"),
            ArithmeticError::OutOfRange => f.write_str("exponent outside supported range"),
        }
    }
}

impl Error for ArithmeticError {}
