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

//! Entry points turning an encoded metadata blob into a
//! [`crate::classifier::RawClassifier`] (C8).
//!
//! This crate only ever reads a blob handed to it by the caller (via
//! [`super::loader::MetadataProvider`] or directly); compiling one from
//! CLDR/ITU source data is offline tooling out of this crate's scope.

use bincode::Options;

use crate::classifier::{RawClassifier, VersionInfo};
use crate::error::MetadataError;

use super::metadata::MetadataDocument;

/// Namespace for the two wire-format entry points into the codec.
pub struct Database;

impl Database {
    /// Decode a `bincode`-encoded blob (varint integer encoding, matching
    /// how this schema family is produced offline) into a classifier,
    /// checking `requested` against the blob's declared version.
    pub fn from_binary(bytes: &[u8], requested: &VersionInfo) -> Result<RawClassifier, MetadataError> {
        let document: MetadataDocument = bincode::options()
            .with_varint_encoding()
            .deserialize(bytes)
            .map_err(|err| MetadataError::CorruptMetadata(err.to_string()))?;
        document.decode(requested)
    }

    /// Decode a JSON document of the same logical shape into a classifier.
    pub fn from_json(text: &str, requested: &VersionInfo) -> Result<RawClassifier, MetadataError> {
        let document: MetadataDocument = serde_json::from_str(text)
            .map_err(|err| MetadataError::CorruptMetadata(err.to_string()))?;
        document.decode(requested)
    }
}
