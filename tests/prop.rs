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

//! Property tests against the invariants listed in the design's testable
//! properties section: `DigitSequence` round-tripping and ordering, and
//! the parser's never-panics and international-path behaviors.

use std::sync::Arc;

use phone_classifier::classifier::{CallingCodeRecord, ParserData, RawClassifier, TypeClassifier, TypeFunction, VersionInfo};
use phone_classifier::digit_sequence::DigitSequence;
use phone_classifier::matcher::{LengthMask, Matcher};
use phone_classifier::parser::PhoneNumberParser;
use proptest::prelude::*;

fn digits(len: impl Into<proptest::collection::SizeRange>) -> impl Strategy<Value = String> {
    proptest::collection::vec(0..=9u32, len).prop_map(|ds| ds.iter().map(|d| std::char::from_digit(*d, 10).unwrap()).collect())
}

fn fixture_classifier() -> RawClassifier {
    let mobile = Matcher::from_regex("7[0-9]{8}", LengthMask::from_lengths([9])).unwrap();
    let record = CallingCodeRecord::new(
        DigitSequence::parse("41").unwrap(),
        mobile.clone(),
        vec![TypeClassifier::new(
            vec![TypeFunction::new(Arc::from("MOBILE"), mobile)],
            None,
            true,
            false,
        )],
        ParserData {
            main_region: Arc::from("CH"),
            regions: vec![Arc::from("CH")],
            national_prefixes: vec![DigitSequence::parse("0").unwrap()],
            national_prefix_optional: false,
            example_number: Some(DigitSequence::parse("781234567").unwrap()),
        },
        Vec::new(),
    );
    RawClassifier::new(VersionInfo::new("urn:test", 1, 1, 0), vec![Arc::from("TYPE")], vec![record])
}

proptest! {
    /// Property 1: `parse(s).toString() == s` for digit strings up to 19 chars.
    #[test]
    fn digit_sequence_round_trips(s in digits(0..=19)) {
        prop_assert_eq!(DigitSequence::parse(&s).unwrap().to_string(), s);
    }

    /// Property 2/3: splitting and rejoining a sequence at any valid cut
    /// point reconstructs the original.
    #[test]
    fn prefix_suffix_append_round_trip(s in digits(0..=19), cut in 0usize..=19) {
        let seq = DigitSequence::parse(&s).unwrap();
        let n = cut.min(seq.length());
        let prefix = seq.get_prefix(n).unwrap();
        let suffix = seq.get_suffix(seq.length() - n).unwrap();
        prop_assert_eq!(DigitSequence::append(prefix, suffix).unwrap(), seq);
    }

    /// Property 4: `DigitSequence` ordering agrees with shortlex order over
    /// the digit strings — length first, then character content — exactly
    /// like comparing strings of different lengths without padding.
    #[test]
    fn ordering_matches_lexical_compare(a in digits(0..=19), b in digits(0..=19)) {
        let sa = DigitSequence::parse(&a).unwrap();
        let sb = DigitSequence::parse(&b).unwrap();
        let expected = a.len().cmp(&b.len()).then_with(|| a.cmp(&b));
        prop_assert_eq!(sa.cmp(&sb), expected);
    }

    /// Property 5: `isMatch(s) == (match(s) == MATCHED)` for an arbitrary
    /// regex-backed matcher.
    #[test]
    fn is_match_agrees_with_match_digits(s in digits(0..=15)) {
        let matcher = Matcher::from_regex("7[0-9]{8}", LengthMask::from_lengths([9])).unwrap();
        let seq = DigitSequence::parse(&s).unwrap();
        prop_assert_eq!(matcher.is_match(seq), matcher.match_digits(seq) == phone_classifier::MatchResult::Matched);
    }

    /// Property 11: `classify` never returns the empty token or anything
    /// outside the declared token set.
    #[test]
    fn classify_only_returns_known_tokens(s in digits(0..=15)) {
        let classifier = fixture_classifier();
        let nn = DigitSequence::parse(&s).unwrap();
        let values = classifier.classify(DigitSequence::parse("41").unwrap(), nn, "TYPE").unwrap();
        for value in &values {
            prop_assert!(!value.is_empty());
            prop_assert_eq!(value.as_ref(), "MOBILE");
        }
    }

    /// Parsing never panics regardless of input shape.
    #[test]
    fn parser_never_panics(s in "\\PC*") {
        let classifier = fixture_classifier();
        let parser = PhoneNumberParser::new(&classifier);
        let _ = parser.parse_strictly(&s, None);
    }

    /// Property 9: a leading `+` followed by a supported calling code and
    /// valid digits is recognized via the international path regardless of
    /// whether a national calling code was also assumed.
    #[test]
    fn international_plus_prefix_is_recognized(rest in digits(9..=9)) {
        let classifier = fixture_classifier();
        let parser = PhoneNumberParser::new(&classifier);
        let text = format!("+41{rest}");
        let result = parser.parse_strictly(&text, None).unwrap();
        prop_assert_eq!(result.number.calling_code(), DigitSequence::parse("41").unwrap());
    }
}
