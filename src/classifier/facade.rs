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

//! Value-typed classifier façades (C5) layered over [`super::RawClassifier`].
//!
//! The engine itself only ever deals in token strings; a façade supplies the
//! string-to-`V` (and `V`-to-string, for `Matcher::supports`) conversion the
//! caller wants — identity for `String`, a `FromStr`/`strum` mapping for an
//! enum, a region-table lookup for a rich region type. Conversion is always
//! injected at construction time rather than assumed, per the Design Notes'
//! "duck-typed value conversions become an explicit injected converter".

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::classifier::{ClassifierError, RawClassifier};
use crate::digit_sequence::DigitSequence;

/// Converts token strings emitted by a [`RawClassifier`] into caller values
/// and back. `to_token` only needs to round-trip values the caller actually
/// constructs; it is used by [`SingleValuedMatcher`] to build its default
/// value and is not required by [`Matcher::get_possible_values`] alone.
pub trait ValueConverter<V>: Send + Sync {
    fn from_token(&self, token: &str) -> Option<V>;
}

impl<V, F> ValueConverter<V> for F
where
    F: Fn(&str) -> Option<V> + Send + Sync,
{
    fn from_token(&self, token: &str) -> Option<V> {
        self(token)
    }
}

/// Multi-valued façade over a named type column: returns every value whose
/// matcher reports `MATCHED` for a given number. The natural shape for
/// inherently multi-valued types such as region.
pub struct Matcher<V> {
    classifier: Arc<RawClassifier>,
    type_name: String,
    converter: Arc<dyn ValueConverter<V>>,
}

impl<V> Matcher<V> {
    pub fn new(
        classifier: Arc<RawClassifier>,
        type_name: impl Into<String>,
        converter: Arc<dyn ValueConverter<V>>,
    ) -> Result<Matcher<V>, ClassifierError> {
        let type_name = type_name.into();
        // Validate eagerly so construction-time mistakes (a typo'd type
        // name) surface immediately rather than at first query.
        classifier.is_single_valued(&type_name)?;
        Ok(Matcher {
            classifier,
            type_name,
            converter,
        })
    }

    /// All values whose matcher reports `MATCHED` for `(cc, nn)`.
    pub fn get_possible_values(&self, cc: DigitSequence, nn: DigitSequence) -> BTreeSet<V>
    where
        V: Ord,
    {
        self.classifier
            .classify(cc, nn, &self.type_name)
            .unwrap_or_default()
            .iter()
            .filter_map(|token| self.converter.from_token(token))
            .collect()
    }
}

/// Single-valued façade: additionally asserts at most one match and exposes
/// it as `Option<V>` rather than a set.
pub struct SingleValuedMatcher<V> {
    inner: Matcher<V>,
}

impl<V> SingleValuedMatcher<V> {
    pub fn new(
        classifier: Arc<RawClassifier>,
        type_name: impl Into<String>,
        converter: Arc<dyn ValueConverter<V>>,
    ) -> Result<SingleValuedMatcher<V>, ClassifierError> {
        let type_name = type_name.into();
        if !classifier.is_single_valued(&type_name)? {
            return Err(ClassifierError::UnknownType(format!(
                "{type_name} is not declared single-valued"
            )));
        }
        Ok(SingleValuedMatcher {
            inner: Matcher::new(classifier, type_name, converter)?,
        })
    }

    /// The one value the classifier produced for `(cc, nn)`, if any.
    pub fn identify(&self, cc: DigitSequence, nn: DigitSequence) -> Option<V>
    where
        V: Ord,
    {
        self.inner
            .get_possible_values(cc, nn)
            .into_iter()
            .next()
    }

    pub fn get_possible_values(&self, cc: DigitSequence, nn: DigitSequence) -> BTreeSet<V>
    where
        V: Ord,
    {
        self.inner.get_possible_values(cc, nn)
    }
}
