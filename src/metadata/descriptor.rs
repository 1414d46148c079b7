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

//! Wire-shape documents for a single calling code's classifier data (§6).
//!
//! These mirror the binary/JSON record shape field-by-field and carry no
//! behavior beyond (de)serialization; [`super::metadata`] decodes them into
//! [`crate::classifier::CallingCodeRecord`].

use serde_derive::{Deserialize, Serialize};

use super::format::FormatRuleDoc;

/// One matcher-pool entry: a possible-lengths mask plus at most one of a
/// DFA byte table or a regex pattern body. Neither present means the
/// always-`INVALID` empty matcher.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatcherDoc {
    #[serde(rename = "l")]
    pub possible_lengths_mask: u32,

    #[serde(
        rename = "b",
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes_opt"
    )]
    pub matcher_bytes: Option<Vec<u8>>,

    #[serde(rename = "rx", default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

mod base64_bytes_opt {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => {
                ser.serialize_str(&base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
            }
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Vec<u8>>, D::Error> {
        let text = Option::<String>::deserialize(de)?;
        text.map(|text| {
            base64::engine::general_purpose::URL_SAFE_NO_PAD
                .decode(text)
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

/// One `(value -> matcher)` arm of a type's classification function list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeFunctionDoc {
    /// Token index naming the value this function reports (e.g. `"MOBILE"`).
    #[serde(rename = "val")]
    pub value: u32,

    /// Indices into this record's `matcher_data` pool; more than one entry
    /// is combined via [`crate::matcher::Matcher::combined`].
    #[serde(rename = "mi")]
    pub matcher_index: Vec<u32>,
}

/// One global type's classification data for a single calling code,
/// positioned in parallel with the document's global `types` list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NationalNumberEntryDoc {
    /// Token index for the value returned when no function matches; `0`
    /// (the empty token) means "no default".
    #[serde(rename = "d", default)]
    pub default_value: u32,

    #[serde(rename = "f", default)]
    pub functions: Vec<TypeFunctionDoc>,
}

/// The full wire record for one calling code.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallingCodeDoc {
    /// Decimal calling code value, `1..999`.
    #[serde(rename = "c")]
    pub calling_code: u32,

    /// Indices into `matcher_data`, combined into the validity matcher.
    #[serde(rename = "v")]
    pub validity_matcher_index: Vec<u32>,

    /// One entry per global type, in the same order as `types`.
    #[serde(rename = "n")]
    pub national_number_data: Vec<NationalNumberEntryDoc>,

    /// This record's private pool of matcher definitions, referenced by
    /// index from `validity_matcher_index` and each function's
    /// `matcher_index`.
    #[serde(rename = "m")]
    pub matcher_data: Vec<MatcherDoc>,

    /// Token indices of national prefixes, preferred one first.
    #[serde(rename = "p", default)]
    pub national_prefix: Vec<u32>,

    /// Token index of the main/primary CLDR region.
    #[serde(rename = "r")]
    pub primary_region: u32,

    /// Token indices of every served region. The main region need not be
    /// repeated here; the decoder prepends it if it is absent.
    #[serde(rename = "rg", default)]
    pub regions: Vec<u32>,

    /// Whether the (preferred) national prefix may be omitted even when
    /// dialing domestically.
    #[serde(rename = "po", default)]
    pub national_prefix_optional: bool,

    /// Decimal digit string of an example national number; empty means
    /// "none supplied".
    #[serde(rename = "x", default)]
    pub example_number: String,

    /// Auxiliary formatting rules for this calling code, evaluated in
    /// order against the national number's leading digits.
    #[serde(rename = "ft", default)]
    pub formats: Vec<FormatRuleDoc>,
}
