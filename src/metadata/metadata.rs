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

//! The metadata codec (C8): the top-level wire document and the decode
//! step that turns it into a [`crate::classifier::RawClassifier`].

use std::sync::Arc;

use serde_derive::{Deserialize, Serialize};

use crate::classifier::{
    CallingCodeRecord, ParserData, RawClassifier, TypeClassifier, TypeFunction, VersionInfo,
};
use crate::digit_sequence::DigitSequence;
use crate::error::MetadataError;
use crate::matcher::{LengthMask, Matcher};

use super::descriptor::CallingCodeDoc;

/// Wire shape of [`VersionInfo`], field names per §6's compact JSON form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VersionDoc {
    pub maj: u32,
    pub min: u32,
    pub uri: String,
    pub ver: u32,
}

impl From<&VersionDoc> for VersionInfo {
    fn from(doc: &VersionDoc) -> VersionInfo {
        VersionInfo::new(doc.uri.clone(), doc.ver, doc.maj, doc.min)
    }
}

impl From<&VersionInfo> for VersionDoc {
    fn from(info: &VersionInfo) -> VersionDoc {
        VersionDoc {
            maj: info.major_data_version,
            min: info.minor_data_version,
            uri: info.schema_uri.clone(),
            ver: info.schema_version,
        }
    }
}

/// The top-level metadata document (§6): a version header, the global type
/// list with its flag bitsets, every calling code's record, and the shared
/// token table every index in the document above refers into.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub ver: VersionDoc,

    /// Token indices naming each global classifier type, e.g. `"TYPE"`.
    pub typ: Vec<u32>,

    /// Bit `i` set iff `typ[i]` is declared single-valued.
    pub svm: u64,

    /// Bit `i` set iff `typ[i]` is declared classifier-only.
    pub com: u64,

    pub ccd: Vec<CallingCodeDoc>,

    /// Index `0` is always `""`.
    pub tok: Vec<String>,
}

fn token<'a>(tokens: &'a [String], index: u32) -> Result<&'a str, MetadataError> {
    tokens.get(index as usize).map(String::as_str).ok_or_else(|| {
        MetadataError::InternalAssertion(format!(
            "token index {index} out of range ({} tokens)",
            tokens.len()
        ))
    })
}

fn token_digits(tokens: &[String], index: u32) -> Result<DigitSequence, MetadataError> {
    let text = token(tokens, index)?;
    DigitSequence::parse(text)
        .map_err(|err| MetadataError::CorruptMetadata(format!("token {index} ({text:?}): {err}")))
}

fn build_matcher(doc: &CallingCodeDoc, indices: &[u32]) -> Result<Matcher, MetadataError> {
    let built: Result<Vec<Matcher>, MetadataError> = indices
        .iter()
        .map(|&index| {
            let entry = doc.matcher_data.get(index as usize).ok_or_else(|| {
                MetadataError::InternalAssertion(format!(
                    "matcher index {index} out of range ({} entries) for calling code {}",
                    doc.matcher_data.len(),
                    doc.calling_code
                ))
            })?;
            let mask = LengthMask::from_bits(entry.possible_lengths_mask);
            match (&entry.matcher_bytes, &entry.regex) {
                (Some(bytes), _) => Ok(Matcher::from_dfa(bytes.clone(), mask)?),
                (None, Some(pattern)) => Ok(Matcher::from_regex(pattern, mask)?),
                (None, None) => Ok(Matcher::Empty),
            }
        })
        .collect();
    let mut matchers = built?;
    Ok(match matchers.len() {
        0 => Matcher::Empty,
        1 => matchers.remove(0),
        _ => Matcher::combined(matchers),
    })
}

fn decode_calling_code(
    doc: &CallingCodeDoc,
    tokens: &[String],
    types: &[Arc<str>],
    single_valued: u64,
    classifier_only: u64,
) -> Result<CallingCodeRecord, MetadataError> {
    let calling_code = DigitSequence::parse(doc.calling_code.to_string())
        .map_err(|err| MetadataError::CorruptMetadata(format!("calling code {}: {err}", doc.calling_code)))?;

    let validity_matcher = build_matcher(doc, &doc.validity_matcher_index)?;

    if doc.national_number_data.len() != types.len() {
        return Err(MetadataError::InternalAssertion(format!(
            "calling code {} has {} national-number entries, expected {} (one per declared type)",
            doc.calling_code,
            doc.national_number_data.len(),
            types.len()
        )));
    }

    let mut type_classifiers = Vec::with_capacity(types.len());
    for (i, entry) in doc.national_number_data.iter().enumerate() {
        let mut functions = Vec::with_capacity(entry.functions.len());
        for function in &entry.functions {
            let value: Arc<str> = Arc::from(token(tokens, function.value)?);
            let matcher = build_matcher(doc, &function.matcher_index)?;
            functions.push(TypeFunction::new(value, matcher));
        }
        let default_value = if entry.default_value == 0 {
            None
        } else {
            Some(Arc::from(token(tokens, entry.default_value)?))
        };
        type_classifiers.push(TypeClassifier::new(
            functions,
            default_value,
            single_valued & (1 << i) != 0,
            classifier_only & (1 << i) != 0,
        ));
    }

    let national_prefixes: Result<Vec<DigitSequence>, MetadataError> = doc
        .national_prefix
        .iter()
        .map(|&index| token_digits(tokens, index))
        .collect();

    let main_region: Arc<str> = Arc::from(token(tokens, doc.primary_region)?);
    let mut regions: Vec<Arc<str>> = doc
        .regions
        .iter()
        .map(|&index| token(tokens, index).map(Arc::from))
        .collect::<Result<_, _>>()?;
    if !regions.iter().any(|r| r == &main_region) {
        regions.insert(0, Arc::clone(&main_region));
    }
    regions.sort();
    regions.dedup();
    // Main region first, rest alphabetical, per the data model.
    if let Some(pos) = regions.iter().position(|r| r == &main_region) {
        let main = regions.remove(pos);
        regions.insert(0, main);
    }

    let example_number = if doc.example_number.is_empty() {
        None
    } else {
        Some(DigitSequence::parse(&doc.example_number).map_err(|err| {
            MetadataError::CorruptMetadata(format!(
                "example number for calling code {}: {err}",
                doc.calling_code
            ))
        })?)
    };

    let format_rules: Result<Vec<_>, MetadataError> = doc
        .formats
        .iter()
        .map(|rule| {
            rule.decode()
                .map_err(|err| MetadataError::CorruptMetadata(err.to_string()))
        })
        .collect();

    Ok(CallingCodeRecord::new(
        calling_code,
        validity_matcher,
        type_classifiers,
        ParserData {
            main_region,
            regions,
            national_prefixes: national_prefixes?,
            national_prefix_optional: doc.national_prefix_optional,
            example_number,
        },
        format_rules?,
    ))
}

impl MetadataDocument {
    /// Decode this document into a [`RawClassifier`], checking that
    /// `ver` satisfies `requested` first (§6's load-time contract).
    pub fn decode(&self, requested: &VersionInfo) -> Result<RawClassifier, MetadataError> {
        let found: VersionInfo = (&self.ver).into();
        if !found.satisfies(requested) {
            return Err(MetadataError::IncompatibleMetadata {
                found,
                requested: requested.clone(),
            });
        }

        let types: Result<Vec<Arc<str>>, MetadataError> =
            self.typ.iter().map(|&index| token(&self.tok, index).map(Arc::from)).collect();
        let types = types?;

        let records: Result<Vec<CallingCodeRecord>, MetadataError> = self
            .ccd
            .iter()
            .map(|doc| decode_calling_code(doc, &self.tok, &types, self.svm, self.com))
            .collect();

        Ok(RawClassifier::new(found, types, records?))
    }
}
