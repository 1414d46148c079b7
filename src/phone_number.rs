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

//! `PhoneNumber`: the calling-code/national-number pair at the center of
//! the data model.

use std::fmt;

use crate::digit_sequence::DigitSequence;

/// An E.164-shaped phone number: a calling code paired with the national
/// number that follows it.
///
/// The constructors enforce the data model's invariant — `calling_code`'s
/// length is 1, 2 or 3, and the concatenation of both parts is at most 17
/// digits — but do not otherwise validate the number against any
/// classifier; a `PhoneNumber` can perfectly well hold a syntactically
/// shaped but semantically invalid number (that's what [`crate::matcher::MatchResult::Invalid`]
/// is for).
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PhoneNumber {
    calling_code: DigitSequence,
    national_number: DigitSequence,
}

/// `PhoneNumber` construction failed the E.164 shape invariant.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum PhoneNumberError {
    #[error("calling code must be 1 to 3 digits, got {0}")]
    CallingCodeLength(usize),

    #[error("calling code + national number must be at most 17 digits, got {0}")]
    TooLong(usize),
}

impl PhoneNumber {
    pub fn new(
        calling_code: DigitSequence,
        national_number: DigitSequence,
    ) -> Result<PhoneNumber, PhoneNumberError> {
        let cc_len = calling_code.length();
        if !(1..=3).contains(&cc_len) {
            return Err(PhoneNumberError::CallingCodeLength(cc_len));
        }

        let total = cc_len + national_number.length();
        if total > 17 {
            return Err(PhoneNumberError::TooLong(total));
        }

        Ok(PhoneNumber {
            calling_code,
            national_number,
        })
    }

    pub fn calling_code(&self) -> DigitSequence {
        self.calling_code
    }

    pub fn national_number(&self) -> DigitSequence {
        self.national_number
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}{}", self.calling_code, self.national_number)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ds(s: &str) -> DigitSequence {
        DigitSequence::parse(s).unwrap()
    }

    #[test]
    fn display_is_e164() {
        let n = PhoneNumber::new(ds("41"), ds("781234567")).unwrap();
        assert_eq!(n.to_string(), "+41781234567");
    }

    #[test]
    fn rejects_calling_code_out_of_range() {
        assert_eq!(
            PhoneNumber::new(ds(""), ds("781234567")).unwrap_err(),
            PhoneNumberError::CallingCodeLength(0)
        );
        assert_eq!(
            PhoneNumber::new(ds("1234"), ds("781234567")).unwrap_err(),
            PhoneNumberError::CallingCodeLength(4)
        );
    }

    #[test]
    fn rejects_combined_length_over_17() {
        assert_eq!(
            PhoneNumber::new(ds("123"), ds("123456789012345")).unwrap_err(),
            PhoneNumberError::TooLong(18)
        );
    }

    #[test]
    fn accepts_max_length_boundary() {
        assert!(PhoneNumber::new(ds("123"), ds("12345678901234")).is_ok());
    }
}
