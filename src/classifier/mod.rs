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

//! The metadata-backed classifier registry (`CallingCodeRecord`, C3, and
//! `RawClassifier`, C4) and the typed façades built on top of it (C5).

mod facade;
pub mod well_known;

use std::collections::BTreeSet;
use std::sync::Arc;

use fnv::FnvHashMap;

use crate::digit_sequence::DigitSequence;
use crate::formatter::FormatRule;
use crate::matcher::{LengthResult, MatchResult, Matcher};

pub use facade::{Matcher as ValueMatcher, SingleValuedMatcher};

/// One `(value -> MatcherFunction)` arm of a [`TypeClassifier`].
#[derive(Clone, Debug)]
pub struct TypeFunction {
    pub(crate) value: Arc<str>,
    pub(crate) matcher: Matcher,
}

impl TypeFunction {
    pub fn new(value: Arc<str>, matcher: Matcher) -> TypeFunction {
        TypeFunction { value, matcher }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

/// A named classifier type (e.g. `"TYPE"`, `"REGION"`) as it applies to one
/// calling code: an ordered list of value/matcher pairs plus the flags from
/// the data model.
#[derive(Clone, Debug)]
pub struct TypeClassifier {
    pub(crate) functions: Vec<TypeFunction>,
    pub(crate) default_value: Option<Arc<str>>,
    pub(crate) single_valued: bool,
    pub(crate) classifier_only: bool,
}

impl TypeClassifier {
    pub fn new(
        functions: Vec<TypeFunction>,
        default_value: Option<Arc<str>>,
        single_valued: bool,
        classifier_only: bool,
    ) -> TypeClassifier {
        TypeClassifier {
            functions,
            default_value,
            single_valued,
            classifier_only,
        }
    }

    pub fn is_single_valued(&self) -> bool {
        self.single_valued
    }

    pub fn is_classifier_only(&self) -> bool {
        self.classifier_only
    }

    /// The set of values whose matcher reports `MATCHED` for `nn`, falling
    /// back to `defaultValue` (as a singleton set) when nothing matched and
    /// a default is declared. Stops at the first match when
    /// `single_valued` is set.
    fn classify(&self, nn: DigitSequence) -> BTreeSet<Arc<str>> {
        let mut out = BTreeSet::new();
        for function in &self.functions {
            if function.matcher.is_match(nn) {
                out.insert(Arc::clone(&function.value));
                if self.single_valued {
                    return out;
                }
            }
        }
        if out.is_empty() {
            if let Some(default) = &self.default_value {
                out.insert(Arc::clone(default));
            }
        }
        out
    }
}

/// Parser-facing metadata for one calling code: regions, national prefixes,
/// and the example number, independent of the type-classification system.
#[derive(Clone, Debug)]
pub struct ParserData {
    pub main_region: Arc<str>,
    pub regions: Vec<Arc<str>>,
    pub national_prefixes: Vec<DigitSequence>,
    pub national_prefix_optional: bool,
    pub example_number: Option<DigitSequence>,
}

/// Immutable per-calling-code bundle (C3): validity matcher, typed
/// classifiers (parallel to the global type list), national prefixes, and
/// parser metadata.
#[derive(Clone, Debug)]
pub struct CallingCodeRecord {
    pub(crate) calling_code: DigitSequence,
    pub(crate) validity_matcher: Matcher,
    pub(crate) type_classifiers: Vec<TypeClassifier>,
    pub(crate) parser_data: ParserData,
    pub(crate) format_rules: Vec<FormatRule>,
}

impl CallingCodeRecord {
    pub fn new(
        calling_code: DigitSequence,
        validity_matcher: Matcher,
        type_classifiers: Vec<TypeClassifier>,
        parser_data: ParserData,
        format_rules: Vec<FormatRule>,
    ) -> CallingCodeRecord {
        CallingCodeRecord {
            calling_code,
            validity_matcher,
            type_classifiers,
            parser_data,
            format_rules,
        }
    }

    pub fn calling_code(&self) -> DigitSequence {
        self.calling_code
    }

    pub fn parser_data(&self) -> &ParserData {
        &self.parser_data
    }

    pub fn format_rules(&self) -> &[FormatRule] {
        &self.format_rules
    }
}

/// `(schemaUri, schemaVersion, majorDataVersion, minorDataVersion)` as
/// defined in the data model, with the `satisfies` compatibility predicate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionInfo {
    pub schema_uri: String,
    pub schema_version: u32,
    pub major_data_version: u32,
    pub minor_data_version: u32,
}

impl VersionInfo {
    pub fn new(
        schema_uri: impl Into<String>,
        schema_version: u32,
        major_data_version: u32,
        minor_data_version: u32,
    ) -> VersionInfo {
        VersionInfo {
            schema_uri: schema_uri.into(),
            schema_version,
            major_data_version,
            minor_data_version,
        }
    }

    /// Whether `self` (a loaded blob's declared version) satisfies
    /// `requested` (a consumer's desired version).
    pub fn satisfies(&self, requested: &VersionInfo) -> bool {
        self.schema_uri == requested.schema_uri
            && self.schema_version >= requested.schema_version
            && self.major_data_version == requested.major_data_version
            && self.minor_data_version >= requested.minor_data_version
    }
}

/// Errors raised by [`RawClassifier`] queries against malformed or absent
/// type names. Unknown-type lookups are programmer errors, not data errors:
/// the type list is declared once at load time and callers are expected to
/// know it, so this is a distinct, narrower family from [`MetadataError`](crate::error::MetadataError).
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("unknown classifier type {0:?}")]
    UnknownType(String),
}

/// Process-wide metadata registry (C4): every calling code this snapshot
/// supports, keyed for O(1) lookup, plus the global ordered type-name list
/// every [`CallingCodeRecord`]'s classifiers parallel.
///
/// Built once at load time by the metadata codec and never mutated
/// afterwards; queries borrow it by shared reference.
#[derive(Clone, Debug)]
pub struct RawClassifier {
    version: VersionInfo,
    types: Vec<Arc<str>>,
    by_calling_code: FnvHashMap<DigitSequence, CallingCodeRecord>,
    supported: BTreeSet<DigitSequence>,
    by_region: FnvHashMap<Arc<str>, DigitSequence>,
}

impl RawClassifier {
    pub fn new(
        version: VersionInfo,
        types: Vec<Arc<str>>,
        records: Vec<CallingCodeRecord>,
    ) -> RawClassifier {
        let mut by_calling_code = FnvHashMap::default();
        let mut supported = BTreeSet::new();
        let mut by_region = FnvHashMap::default();

        for record in records {
            supported.insert(record.calling_code);
            for region in &record.parser_data.regions {
                by_region.insert(Arc::clone(region), record.calling_code);
            }
            by_calling_code.insert(record.calling_code, record);
        }

        RawClassifier {
            version,
            types,
            by_calling_code,
            supported,
            by_region,
        }
    }

    pub fn get_version(&self) -> &VersionInfo {
        &self.version
    }

    pub fn types(&self) -> &[Arc<str>] {
        &self.types
    }

    fn type_index(&self, type_name: &str) -> Result<usize, ClassifierError> {
        self.types
            .iter()
            .position(|t| t.as_ref() == type_name)
            .ok_or_else(|| ClassifierError::UnknownType(type_name.to_owned()))
    }

    /// All calling codes this snapshot supports, in ascending order.
    pub fn get_supported_calling_codes(&self) -> impl Iterator<Item = DigitSequence> + '_ {
        self.supported.iter().copied()
    }

    pub fn is_supported_calling_code(&self, cc: DigitSequence) -> bool {
        self.by_calling_code.contains_key(&cc)
    }

    fn record(&self, cc: DigitSequence) -> Option<&CallingCodeRecord> {
        self.by_calling_code.get(&cc)
    }

    /// The raw calling-code record backing `cc`, for callers (such as the
    /// formatter) that need more than the matcher/classify surface above.
    pub fn calling_code_record(&self, cc: DigitSequence) -> Option<&CallingCodeRecord> {
        self.record(cc)
    }

    /// `INVALID` for an unsupported calling code, per §4.3.
    pub fn match_number(&self, cc: DigitSequence, nn: DigitSequence) -> MatchResult {
        match self.record(cc) {
            Some(record) => record.validity_matcher.match_digits(nn),
            None => MatchResult::Invalid,
        }
    }

    pub fn test_length(&self, cc: DigitSequence, nn: DigitSequence) -> LengthResult {
        match self.record(cc) {
            Some(record) => record.validity_matcher.test_length(nn),
            None => LengthResult::TooShort,
        }
    }

    /// `classify(cc, nn, typeName)`; size ≤ 1 when the type is declared
    /// single-valued. Returns [`ClassifierError::UnknownType`] for a type
    /// name not present in `types()`; an unsupported calling code simply
    /// yields an empty set, consistent with "query operations never
    /// produce exceptions for merely-unmatchable inputs" (§7).
    pub fn classify(
        &self,
        cc: DigitSequence,
        nn: DigitSequence,
        type_name: &str,
    ) -> Result<BTreeSet<Arc<str>>, ClassifierError> {
        let index = self.type_index(type_name)?;
        Ok(match self.record(cc) {
            Some(record) => match record.type_classifiers.get(index) {
                Some(classifier) => classifier.classify(nn),
                None => BTreeSet::new(),
            },
            None => BTreeSet::new(),
        })
    }

    pub fn is_single_valued(&self, type_name: &str) -> Result<bool, ClassifierError> {
        let index = self.type_index(type_name)?;
        // Single-valuedness is declared per type, globally; any calling
        // code that carries the type agrees, so the first record found
        // (if any) is authoritative. A type with no records at all is
        // vacuously single-valued.
        Ok(self
            .by_calling_code
            .values()
            .filter_map(|record| record.type_classifiers.get(index))
            .next()
            .map(TypeClassifier::is_single_valued)
            .unwrap_or(true))
    }

    pub fn get_parser_data(&self, cc: DigitSequence) -> Option<&ParserData> {
        self.record(cc).map(CallingCodeRecord::parser_data)
    }

    /// `getCallingCode(region)`; not defined for `"001"` since that region
    /// string may be shared by several calling codes.
    pub fn get_calling_code(&self, region: &str) -> Option<DigitSequence> {
        if region == "001" {
            return None;
        }
        self.by_region.get(region).copied()
    }
}
