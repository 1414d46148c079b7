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

//! Thin convenience wrappers over [`RawClassifier`]'s raw `match`/`testLength`
//! queries, for callers who just want a yes/no/maybe answer without handling
//! the full five- or four-valued result themselves.

use crate::classifier::RawClassifier;
use crate::matcher::{LengthResult, MatchResult};
use crate::phone_number::PhoneNumber;

/// Whether `number` is a concrete match against `classifier`'s metadata,
/// i.e. `match(cc, nn) == MATCHED`.
pub fn is_valid(classifier: &RawClassifier, number: &PhoneNumber) -> bool {
    classifier.match_number(number.calling_code(), number.national_number()) == MatchResult::Matched
}

/// Whether `number`'s length alone is plausible for its calling code,
/// i.e. `testLength(cc, nn) == POSSIBLE`.
pub fn is_possible(classifier: &RawClassifier, number: &PhoneNumber) -> bool {
    classifier.test_length(number.calling_code(), number.national_number()) == LengthResult::Possible
}
