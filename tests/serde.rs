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

use serde_json::json;
use serde_test::{assert_tokens, Token};

use bigdec::{BigDecimal, OrderedDecimal};

#[test]
fn test_serde() {
    let d: BigDecimal = "-12.34".parse().unwrap();
    assert_tokens(&d, &[Token::Str("-12.34")]);

    let d: BigDecimal = "1E-8".parse().unwrap();
    assert_tokens(&d, &[Token::Str("1E-8")]);

    // Trailing zeros survive the round trip.
    let d: BigDecimal = "2.40".parse().unwrap();
    assert_tokens(&d, &[Token::Str("2.40")]);

    let d: BigDecimal = "1234567890123456789012345678901234567890".parse().unwrap();
    assert_tokens(
        &d,
        &[Token::Str("1234567890123456789012345678901234567890")],
    );
}

#[test]
fn test_serde_ordered() {
    let d: OrderedDecimal<BigDecimal> = OrderedDecimal("-12.34".parse().unwrap());
    assert_tokens(
        &d,
        &[
            Token::NewtypeStruct {
                name: "OrderedDecimal",
            },
            Token::Str("-12.34"),
        ],
    );
}

#[test]
fn test_serde_json() {
    let d: BigDecimal = "0.333333333".parse().unwrap();
    let encoded = serde_json::to_value(&d).unwrap();
    assert_eq!(encoded, json!("0.333333333"));
    let decoded: BigDecimal = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, d);

    let err = serde_json::from_value::<BigDecimal>(json!("not a number"));
    assert!(err.is_err());
}
