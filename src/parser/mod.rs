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

//! `PhoneNumberParser` (C6): lenient/strict parsing that reconciles a
//! "national" parse (given an assumed calling code or region) with an
//! "international" parse (a calling code extracted straight out of the
//! text), per §4.5.

use std::sync::Arc;

use crate::classifier::RawClassifier;
use crate::consts::{self, ARGENTINA_MOBILE_TOKEN, PLUS_SIGN};
use crate::digit_sequence::DigitSequence;
use crate::error::ParseError;
use crate::formatter::FormatType;
use crate::matcher::{LengthResult, MatchResult};
use crate::phone_number::PhoneNumber;

/// The outcome of [`PhoneNumberParser::parse_strictly`]: the reconciled
/// number, how well it matched the active classifier, and which of the two
/// parse paths (national or international) it was inferred to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseResult {
    pub number: PhoneNumber,
    pub match_result: MatchResult,
    pub format_type: FormatType,
}

struct BestResult {
    cc: DigitSequence,
    nn: DigitSequence,
    match_result: MatchResult,
}

/// The dual-path parser façade (C6), built once over a loaded classifier.
pub struct PhoneNumberParser<'r> {
    classifier: &'r RawClassifier,
}

impl<'r> PhoneNumberParser<'r> {
    pub fn new(classifier: &'r RawClassifier) -> PhoneNumberParser<'r> {
        PhoneNumberParser { classifier }
    }

    /// Resolve a region string to its calling code via the active
    /// classifier, for callers that only know the region.
    pub fn calling_code_for_region(&self, region: &str) -> Option<DigitSequence> {
        self.classifier.get_calling_code(region)
    }

    pub fn get_regions(&self, cc: DigitSequence) -> Option<&[Arc<str>]> {
        self.classifier
            .get_parser_data(cc)
            .map(|data| data.regions.as_slice())
    }

    pub fn get_example_number(&self, cc: DigitSequence) -> Option<DigitSequence> {
        self.classifier.get_parser_data(cc).and_then(|data| data.example_number)
    }

    pub fn get_example_number_for_region(&self, region: &str) -> Option<DigitSequence> {
        self.get_example_number(self.calling_code_for_region(region)?)
    }

    /// Lenient parsing (§4.5): `None` if preprocessing rejects the input
    /// outright or no calling code could be resolved either from
    /// `assumed_calling_code` or by extraction; otherwise the reconciled
    /// number regardless of how well it matched (it may carry
    /// [`MatchResult::Invalid`]).
    pub fn parse_leniently(
        &self,
        text: &str,
        assumed_calling_code: Option<DigitSequence>,
    ) -> Option<PhoneNumber> {
        self.parse(text, assumed_calling_code).ok().map(|r| r.number)
    }

    /// Strict parsing (§4.5): fails with [`ParseError::UnparseableInput`]
    /// under the same conditions `parse_leniently` would return `None`;
    /// otherwise returns the full reconciled result.
    pub fn parse_strictly(
        &self,
        text: &str,
        assumed_calling_code: Option<DigitSequence>,
    ) -> Result<ParseResult, ParseError> {
        self.parse(text, assumed_calling_code)
    }

    fn parse(&self, text: &str, assumed_calling_code: Option<DigitSequence>) -> Result<ParseResult, ParseError> {
        let normalized = normalize(text)?;
        let digit_text = digits_only(&normalized);
        if digit_text.is_empty() {
            return Err(ParseError::UnparseableInput);
        }
        let full = DigitSequence::parse(&digit_text)?;

        let extracted = self.extract_calling_code(full, normalized.starts_with(PLUS_SIGN));

        let national = match assumed_calling_code {
            Some(cc) => Some(self.get_best_result(cc, full, FormatType::National)),
            None => None,
        };
        let international = extracted.map(|(cc, suffix)| (cc, self.get_best_result(cc, suffix, FormatType::International)));

        let (best, format_type) = reconcile(
            national,
            international.as_ref().map(|(_, best)| best),
            assumed_calling_code,
            international.as_ref().map(|(cc, _)| *cc),
            &normalized,
        )
        .ok_or(ParseError::UnparseableInput)?;

        let number = PhoneNumber::new(best.cc, best.nn).map_err(|_| ParseError::UnparseableInput)?;

        Ok(ParseResult {
            number,
            match_result: best.match_result,
            format_type,
        })
    }

    fn extract_calling_code(&self, full: DigitSequence, plus_prefixed: bool) -> Option<(DigitSequence, DigitSequence)> {
        let max_len = full.length().min(3);
        for len in (1..=max_len).rev() {
            if let Ok(prefix) = full.get_prefix(len) {
                if self.classifier.is_supported_calling_code(prefix) {
                    if let Ok(suffix) = full.get_suffix(full.length() - len) {
                        return Some((prefix, suffix));
                    }
                }
            }
        }

        // No supported prefix at any length. A `+`-prefixed input still
        // names an international number even when its calling code is
        // outside this classifier's supported set; split it at the
        // conventional two-digit calling-code length (the modal width
        // across the ITU plan) so `getBestResult` sees it and reports
        // `INVALID` rather than the parse failing to find a candidate at
        // all.
        if plus_prefixed {
            let len = max_len.min(2);
            if let Ok(prefix) = full.get_prefix(len) {
                if let Ok(suffix) = full.get_suffix(full.length() - len) {
                    return Some((prefix, suffix));
                }
            }
        }
        None
    }

    /// `getBestResult(cc, nn, formatType)` (§4.5).
    fn get_best_result(&self, cc: DigitSequence, nn: DigitSequence, format_type: FormatType) -> BestResult {
        let nn = self.maybe_adjust_argentine_fixed_line_number(cc, nn);

        if !self.classifier.is_supported_calling_code(cc) {
            return BestResult {
                cc,
                nn,
                match_result: MatchResult::Invalid,
            };
        }

        let parser_data = self.classifier.get_parser_data(cc);
        let national_prefixes = parser_data.map(|data| data.national_prefixes.as_slice()).unwrap_or(&[]);
        let national_prefix_optional = parser_data.map(|data| data.national_prefix_optional).unwrap_or(false);

        let mut best_number = nn;
        let mut best_result = MatchResult::Invalid;

        if format_type == FormatType::International || national_prefixes.is_empty() || national_prefix_optional {
            best_result = self.classifier.match_number(cc, nn);
            best_number = nn;
        }

        if best_result != MatchResult::Matched {
            for np in national_prefixes {
                if np.length() > nn.length() {
                    continue;
                }
                let Ok(prefix) = nn.get_prefix(np.length()) else { continue };
                if prefix != *np {
                    continue;
                }
                let Ok(candidate) = nn.get_suffix(nn.length() - np.length()) else { continue };
                let candidate_result = self.classifier.match_number(cc, candidate);
                if candidate_result.is_better_than(best_result) {
                    best_result = candidate_result;
                    best_number = candidate;
                    if best_result == MatchResult::Matched {
                        break;
                    }
                }
            }
        }

        BestResult {
            cc,
            nn: best_number,
            match_result: best_result,
        }
    }

    /// `maybeAdjustArgentineFixedLineNumber` (§4.5): strips the mobile
    /// token `15` out of a too-long Argentine number and prefixes `9`,
    /// provided the result lands back at a possible length.
    fn maybe_adjust_argentine_fixed_line_number(&self, cc: DigitSequence, nn: DigitSequence) -> DigitSequence {
        if cc.to_string() != consts::ARGENTINA_CALLING_CODE {
            return nn;
        }
        if self.classifier.test_length(cc, nn) != LengthResult::TooLong {
            return nn;
        }
        let Some(caps) = ARGENTINA_MOBILE_TOKEN.captures(&nn.to_string()) else {
            return nn;
        };
        let candidate_text = format!("{}{}{}", consts::ARGENTINA_MOBILE_PREFIX, &caps[1], &caps[2]);
        let Ok(candidate) = DigitSequence::parse(&candidate_text) else {
            return nn;
        };
        if self.classifier.test_length(cc, candidate) == LengthResult::Possible {
            candidate
        } else {
            nn
        }
    }
}

/// Retain only preprocessing-allowed characters, normalizing fullwidth
/// digits to ASCII and dropping every grouping separator; `+` is kept so
/// `looksLikeInternationalFormat` can examine its position later.
fn normalize(text: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(d) = consts::normalize_digit(c) {
            out.push(d);
        } else if c == PLUS_SIGN {
            out.push(c);
        } else if consts::is_allowed_input_char(c) {
            // Other grouping separators and whitespace contribute nothing
            // beyond being allowed; drop them.
        } else {
            return Err(ParseError::UnparseableInput);
        }
    }
    Ok(out)
}

fn digits_only(normalized: &str) -> String {
    normalized.chars().filter(char::is_ascii_digit).collect()
}

/// `looksLikeInternationalFormat(text, extractedCc)` (§4.5): the first
/// digit position is immediately preceded by a single `+`, and the digits
/// right after it equal `extracted_cc`.
fn looks_like_international_format(normalized: &str, extracted_cc: DigitSequence) -> bool {
    let chars: Vec<char> = normalized.chars().collect();
    let Some(d_idx) = chars.iter().position(char::is_ascii_digit) else {
        return false;
    };
    if d_idx == 0 || chars[d_idx - 1] != PLUS_SIGN {
        return false;
    }
    if chars.iter().filter(|&&c| c == PLUS_SIGN).count() != 1 {
        return false;
    }

    let needed = extracted_cc.length();
    let following: String = chars[d_idx..]
        .iter()
        .filter(|c| c.is_ascii_digit())
        .take(needed)
        .collect();
    following.len() == needed
        && DigitSequence::parse(&following)
            .map(|d| d == extracted_cc)
            .unwrap_or(false)
}

/// Reconcile the national and international paths per §4.5's table. `CHK`
/// resolves to whichever of `assumed_calling_code == extracted_cc` or
/// `looksLikeInternationalFormat` holds; the table itself reduces to "`CHK`
/// whenever `I` is at least as good a match as `N`, otherwise `N`, and `I`
/// or `N` alone whenever the other path was never attempted".
fn reconcile(
    national: Option<BestResult>,
    international: Option<&BestResult>,
    assumed_calling_code: Option<DigitSequence>,
    extracted_cc: Option<DigitSequence>,
    normalized: &str,
) -> Option<(BestResult, FormatType)> {
    match (national, international) {
        (None, None) => None,
        (None, Some(i)) => Some((
            BestResult {
                cc: i.cc,
                nn: i.nn,
                match_result: i.match_result,
            },
            FormatType::International,
        )),
        (Some(n), None) => Some((n, FormatType::National)),
        (Some(n), Some(i)) => {
            let i_at_least_as_good = i.match_result == n.match_result || i.match_result.is_better_than(n.match_result);
            let chk = i_at_least_as_good
                && (assumed_calling_code == extracted_cc
                    || extracted_cc
                        .map(|cc| looks_like_international_format(normalized, cc))
                        .unwrap_or(false));

            if chk {
                Some((
                    BestResult {
                        cc: i.cc,
                        nn: i.nn,
                        match_result: i.match_result,
                    },
                    FormatType::International,
                ))
            } else {
                Some((n, FormatType::National))
            }
        }
    }
}
