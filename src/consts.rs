// Copyright (C) 2017 1aim GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared constants for the parser's preprocessing step (§4.5).

use regex::Regex;

pub const PLUS_SIGN: char = '+';

/// The calling code that triggers the Argentina mobile-token adjustment.
pub const ARGENTINA_CALLING_CODE: &str = "54";

/// The digit Argentina mobile numbers are prefixed with once the "15"
/// mobile token has been stripped out of a locally-dialed number.
pub const ARGENTINA_MOBILE_PREFIX: &str = "9";

/// `U+FF10` (fullwidth digit zero); fullwidth digits run contiguously up to
/// `U+FF19` and map onto ASCII `0`..=`9` by subtracting this offset.
const FULLWIDTH_DIGIT_ZERO: u32 = 0xFF10;

/// Normalizes a single character to its ASCII digit if it is either an
/// ASCII digit or a fullwidth digit (`U+FF10`..=`U+FF19`); otherwise `None`.
pub fn normalize_digit(c: char) -> Option<char> {
    if c.is_ascii_digit() {
        return Some(c);
    }

    let point = c as u32;
    if (FULLWIDTH_DIGIT_ZERO..=FULLWIDTH_DIGIT_ZERO + 9).contains(&point) {
        return char::from_digit(point - FULLWIDTH_DIGIT_ZERO, 10);
    }

    None
}

/// Whether `c` is one of the characters preprocessing retains before digit
/// extraction: ASCII/fullwidth digits, ASCII/fullwidth whitespace, `+`, or a
/// grouping separator (dashes, slashes, dots, parentheses and their
/// fullwidth/small variants, plus the ideographic space).
pub fn is_allowed_input_char(c: char) -> bool {
    if normalize_digit(c).is_some() {
        return true;
    }

    matches!(
        c,
        '+' | ' ' | '\u{3000}' | '\u{2060}' // plus sign, space, ideographic space, word joiner
            | '-' | '\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{FF0D}' // hyphens/dashes
            | '/' | '\u{FF0F}' // slashes
            | '.' | '\u{FF0E}' // dots
            | '(' | ')' | '\u{FF08}' | '\u{FF09}' | '\u{FE59}' | '\u{FE5A}' // parens, fullwidth/small variants
    )
}

lazy_static::lazy_static! {
    /// The Argentine mobile-token pattern from §4.5: an optional leading
    /// `0`, a 2-4 digit area code, the literal token `15`, then 6-8 more
    /// digits.
    pub static ref ARGENTINA_MOBILE_TOKEN: Regex =
        Regex::new(r"^0?(\d{2,4})15(\d{6,8})$").unwrap();
}
