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

//! `MatcherFunction`: the five-valued digit-sequence matcher that sits
//! under every classifier and calling-code validity check.

pub mod dfa;
mod length_mask;

use std::sync::Arc;

use regex::Regex;
use thiserror::Error;

use crate::digit_sequence::DigitSequence;
use dfa::{DfaOutcome, DfaTable};
pub use length_mask::LengthMask;

/// How strongly a digit sequence relates to a matcher's range set.
///
/// Ordered strictly decreasing in strength:
/// `Matched > PartialMatch > ExcessDigits > PossibleLength > Invalid`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MatchResult {
    Matched,
    PartialMatch,
    ExcessDigits,
    PossibleLength,
    Invalid,
}

impl MatchResult {
    fn rank(self) -> u8 {
        match self {
            MatchResult::Matched => 4,
            MatchResult::PartialMatch => 3,
            MatchResult::ExcessDigits => 2,
            MatchResult::PossibleLength => 1,
            MatchResult::Invalid => 0,
        }
    }

    /// Whether `self` is strictly stronger than `other` in the ordering
    /// above.
    pub fn is_better_than(self, other: MatchResult) -> bool {
        self.rank() > other.rank()
    }
}

/// The outcome of testing a digit sequence's length alone against a
/// matcher's possible-length set.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LengthResult {
    Possible,
    TooShort,
    TooLong,
    InvalidLength,
}

/// Errors raised while constructing a [`Matcher`] from decoded metadata.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MatcherError {
    #[error(transparent)]
    Dfa(#[from] dfa::DfaTableError),

    #[error("invalid regex pattern {pattern:?}: {message}")]
    Regex { pattern: String, message: String },
}

/// A compiled digit-sequence matcher. One of four tagged variants: a
/// compact DFA, a compiled regex, an ordered disjunction of other matchers,
/// or the always-`Invalid` empty matcher.
#[derive(Clone, Debug)]
pub enum Matcher {
    Dfa {
        table: Arc<DfaTable>,
        mask: LengthMask,
    },
    Regex {
        pattern: Regex,
        mask: LengthMask,
    },
    Combined(Vec<Matcher>),
    Empty,
}

impl Matcher {
    /// Build a DFA-backed matcher from a decoded byte table and its
    /// possible-lengths mask.
    pub fn from_dfa(bytes: Vec<u8>, mask: LengthMask) -> Result<Matcher, MatcherError> {
        Ok(Matcher::Dfa {
            table: Arc::new(DfaTable::new(bytes)?),
            mask,
        })
    }

    /// Build a regex-backed matcher. `pattern` is the national-number
    /// pattern body; it is anchored at both ends internally.
    pub fn from_regex(pattern: &str, mask: LengthMask) -> Result<Matcher, MatcherError> {
        let anchored = format!("^(?:{pattern})$");
        let compiled = Regex::new(&anchored).map_err(|err| MatcherError::Regex {
            pattern: pattern.to_owned(),
            message: err.to_string(),
        })?;
        Ok(Matcher::Regex {
            pattern: compiled,
            mask,
        })
    }

    /// Build an ordered disjunction of matchers. Evaluated in order;
    /// returns `Matched` on the first constituent match.
    pub fn combined(matchers: Vec<Matcher>) -> Matcher {
        Matcher::Combined(matchers)
    }

    /// The possible-lengths mask for this matcher (for `Combined`, the
    /// union of its constituents').
    pub fn length_mask(&self) -> LengthMask {
        match self {
            Matcher::Dfa { mask, .. } | Matcher::Regex { mask, .. } => *mask,
            Matcher::Combined(matchers) => matchers
                .iter()
                .fold(LengthMask::EMPTY, |acc, m| acc.union(&m.length_mask())),
            Matcher::Empty => LengthMask::EMPTY,
        }
    }

    /// `testLength`: depends only on `length_mask()` and `s.length()`.
    pub fn test_length(&self, s: DigitSequence) -> LengthResult {
        self.length_mask().test_length(s.length())
    }

    /// `isMatch(s) == (match(s) == MATCHED)`.
    pub fn is_match(&self, s: DigitSequence) -> bool {
        matches!(self.match_digits(s), MatchResult::Matched)
    }

    /// The full five-valued match result for `s`.
    pub fn match_digits(&self, s: DigitSequence) -> MatchResult {
        match self {
            Matcher::Dfa { table, mask } => finish(table.walk(s), mask, s.length()),

            Matcher::Regex { pattern, mask } => {
                let outcome = if pattern.is_match(&s.to_string()) {
                    DfaOutcome::Matched
                } else {
                    match mask.test_length(s.length()) {
                        LengthResult::TooShort => DfaOutcome::TooShort,
                        LengthResult::TooLong => DfaOutcome::TooLong,
                        LengthResult::Possible | LengthResult::InvalidLength => DfaOutcome::Invalid,
                    }
                };
                finish(outcome, mask, s.length())
            }

            Matcher::Combined(matchers) => {
                let mut best = MatchResult::Invalid;
                for m in matchers {
                    let result = m.match_digits(s);
                    if result == MatchResult::Matched {
                        return MatchResult::Matched;
                    }
                    if result.is_better_than(best) {
                        best = result;
                    }
                }
                best
            }

            Matcher::Empty => MatchResult::Invalid,
        }
    }
}

/// Shared conversion from a raw DFA-shaped outcome to the five-valued
/// `MatchResult`, applying the upgrade rule from §4.2 / invariant 7: a raw
/// `Invalid` at a possible length is not a concrete match of anything, but
/// the length itself remains plausible, so it is reported as
/// `PossibleLength` rather than a flat `Invalid`.
fn finish(outcome: DfaOutcome, mask: &LengthMask, len: usize) -> MatchResult {
    match outcome {
        DfaOutcome::Matched => MatchResult::Matched,
        DfaOutcome::TooShort => MatchResult::PartialMatch,
        DfaOutcome::TooLong => MatchResult::ExcessDigits,
        DfaOutcome::Invalid => {
            if mask.test_length(len) == LengthResult::Possible {
                MatchResult::PossibleLength
            } else {
                MatchResult::Invalid
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn dfa_mask(lengths: &[usize]) -> LengthMask {
        LengthMask::from_lengths(lengths.iter().copied())
    }

    #[test]
    fn dfa_matcher_reports_all_five_results() {
        // "123" exactly, mask {3}.
        let mask = dfa_mask(&[3]);
        let table = Arc::new(dfa::DfaTable::exact("123"));
        let m = Matcher::Dfa { table, mask };

        assert_eq!(m.match_digits(DigitSequence::parse("123").unwrap()), MatchResult::Matched);
        assert_eq!(m.match_digits(DigitSequence::parse("12").unwrap()), MatchResult::PartialMatch);
        assert_eq!(m.match_digits(DigitSequence::parse("1234").unwrap()), MatchResult::ExcessDigits);
        // "129" never matches and is at a possible length (3) -> PossibleLength.
        assert_eq!(
            m.match_digits(DigitSequence::parse("129").unwrap()),
            MatchResult::PossibleLength
        );
        // "9" never matches and 1 is not a possible length -> Invalid.
        assert_eq!(m.match_digits(DigitSequence::parse("9").unwrap()), MatchResult::Invalid);
    }

    #[test]
    fn is_match_agrees_with_match_digits() {
        let m = Matcher::from_regex("[0-9]{7,10}", dfa_mask(&[7, 8, 9, 10])).unwrap();
        for s in ["1234567", "123456789", "12345", "123456789012"] {
            let seq = DigitSequence::parse(s).unwrap();
            assert_eq!(m.is_match(seq), m.match_digits(seq) == MatchResult::Matched);
        }
    }

    #[test]
    fn regex_matcher_partial_and_excess() {
        let m = Matcher::from_regex("[0-9]{7,10}", dfa_mask(&[7, 8, 9, 10])).unwrap();
        assert_eq!(
            m.match_digits(DigitSequence::parse("123").unwrap()),
            MatchResult::PartialMatch
        );
        assert_eq!(
            m.match_digits(DigitSequence::parse("123456789012345").unwrap()),
            MatchResult::ExcessDigits
        );
        assert_eq!(
            m.match_digits(DigitSequence::parse("1234567").unwrap()),
            MatchResult::Matched
        );
    }

    #[test]
    fn empty_matcher_is_always_invalid() {
        let m = Matcher::Empty;
        assert_eq!(
            m.match_digits(DigitSequence::parse("123").unwrap()),
            MatchResult::Invalid
        );
        assert!(!m.is_match(DigitSequence::parse("123").unwrap()));
    }

    #[test]
    fn combined_matcher_returns_first_match_and_best_partial() {
        let short = Matcher::from_regex("[0-9]{3}", dfa_mask(&[3])).unwrap();
        let long = Matcher::from_regex("[0-9]{6}", dfa_mask(&[6])).unwrap();
        let combined = Matcher::combined(vec![short, long]);

        assert_eq!(
            combined.match_digits(DigitSequence::parse("999999").unwrap()),
            MatchResult::Matched
        );
        // "9999" is too long for the 3-digit branch (excess) and too short
        // for the 6-digit branch (partial); partial is the stronger signal.
        assert_eq!(
            combined.match_digits(DigitSequence::parse("9999").unwrap()),
            MatchResult::PartialMatch
        );
        assert_eq!(combined.length_mask(), dfa_mask(&[3, 6]));
    }

    #[test]
    fn match_result_ordering() {
        assert!(MatchResult::Matched.is_better_than(MatchResult::PartialMatch));
        assert!(MatchResult::PartialMatch.is_better_than(MatchResult::ExcessDigits));
        assert!(MatchResult::ExcessDigits.is_better_than(MatchResult::PossibleLength));
        assert!(MatchResult::PossibleLength.is_better_than(MatchResult::Invalid));
    }
}
