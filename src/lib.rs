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

//! bigdec is an arbitrary-precision decimal arithmetic library for Rust.
//!
//! # Introduction
//!
//! Binary floating-point numbers can only approximate common decimal
//! numbers. The value 0.1, for example, would need an infinitely recurring
//! binary fraction. In contrast, a decimal number system can represent 0.1
//! exactly, as one tenth (that is, 10<sup>-1</sup>). Consequently, binary
//! floating-point cannot be used for financial calculations, or indeed for
//! any calculations where the results achieved are required to match those
//! which might be calculated by hand.
//!
//! bigdec represents numbers as an arbitrary-precision coefficient paired
//! with a power-of-ten exponent, and offers the same operator set in two
//! arithmetic regimes: an exact regime that tracks scale algebraically and
//! never loses a digit, and a context-driven regime that rounds results to a
//! configured number of significant digits and selects a notation form.
//!
//! # Details
//!
//! The main types exposed by this library are as follows:
//!
//!  * [`BigDecimal`], the decimal number itself. Methods on the value
//!    implement the exact regime: addition, subtraction, and multiplication
//!    are always exact, and division tracks the dividend's scale. Trailing
//!    zeros are significant, so `2.40` keeps its two fraction digits.
//!
//!  * [`Context`], which hosts the rounded counterparts of those operations.
//!    A context configures the significant-digit limit, the notation form
//!    ([`Form`]), strictness about overly-precise operands, and the rounding
//!    algorithm ([`Rounding`]) used to discard digits.
//!
//!  * [`OrderedDecimal`], a wrapper that orders and hashes decimals by
//!    numeric value rather than representation.
//!
//! The coefficient is stored as a [`num_bigint::BigInt`], so precision is
//! bounded only by memory; exponents of parsed and context-rounded values
//! are confined to ±999,999,999.
//!
//! # Examples
//!
//! The following example demonstrates the basic usage of the library:
//!
//! ```
//! # use std::error::Error;
//! use bigdec::BigDecimal;
//!
//! let x: BigDecimal = ".1".parse()?;
//! let y: BigDecimal = ".2".parse()?;
//! let z: BigDecimal = ".3".parse()?;
//!
//! assert_eq!((x + y).to_string(), z.to_string());
//! # Ok::<_, Box<dyn Error>>(())
//! ```
//!
//! Rounded arithmetic goes through a context:
//!
//! ```
//! # use std::error::Error;
//! use bigdec::{BigDecimal, Context};
//!
//! let cx = Context::default(); // nine digits, scientific form, half-up
//! let one: BigDecimal = "1".parse()?;
//! let three: BigDecimal = "3".parse()?;
//!
//! assert_eq!(cx.div(&one, &three)?.to_string(), "0.333333333");
//! # Ok::<_, Box<dyn Error>>(())
//! ```

#![deny(missing_debug_implementations, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod context;
mod conv;
mod decimal;
mod error;
mod format;
mod macros;
mod ordered;
mod parse;
mod round;

pub use context::{Context, Form, Rounding};
pub use decimal::BigDecimal;
pub use error::{
    ArithmeticError, InvalidPrecisionError, ParseDecimalError, TryFromDecimalError,
    TryIntoDecimalError,
};
pub use format::FormatSpec;
pub use ordered::OrderedDecimal;
