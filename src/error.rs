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

//! The crate-wide error taxonomy (C10), realized as one `thiserror` enum
//! family per component rather than a single flat error type, matching how
//! the library this crate is modelled on separates its `error` module by
//! concern.

use thiserror::Error;

pub use crate::classifier::ClassifierError;
pub use crate::digit_sequence::DigitSequenceError;
pub use crate::matcher::MatcherError;

/// Errors raised while parsing free-form text into a [`crate::phone_number::PhoneNumber`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    /// Preprocessing rejected the input outright (disallowed character, or
    /// no digits at all) or no calling code could be resolved for it.
    #[error("unparseable input")]
    UnparseableInput,

    /// A region string did not resolve to a known calling code.
    #[error("unknown region {0:?}")]
    UnknownRegion(String),

    /// A calling code was not recognized by the active classifier.
    #[error("unknown calling code {0}")]
    UnknownCallingCode(String),

    #[error(transparent)]
    DigitSequence(#[from] DigitSequenceError),
}

/// Errors raised while decoding a metadata blob (C8) into a [`crate::classifier::RawClassifier`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MetadataError {
    /// The blob's declared [`crate::classifier::VersionInfo`] does not
    /// satisfy the version requested by the consumer.
    #[error("incompatible metadata: {found:?} does not satisfy {requested:?}")]
    IncompatibleMetadata {
        found: crate::classifier::VersionInfo,
        requested: crate::classifier::VersionInfo,
    },

    /// The blob could not be decoded at all (malformed bincode/JSON, or a
    /// well-formed document whose shape violates the schema).
    #[error("corrupt metadata: {0}")]
    CorruptMetadata(String),

    /// A decode-time invariant was violated that indicates a bug in the
    /// codec or in the metadata producer, not a mere data-quality issue
    /// (e.g. a calling code's per-type function list is longer than the
    /// declared global type list). Still a plain `Result::Err`: malformed
    /// metadata must never bring down a host process.
    #[error("internal assertion failed: {0}")]
    InternalAssertion(String),

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Errors raised by a single [`crate::loader::MetadataProvider`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ProviderError {
    #[error("provider {label} failed to load: {message}")]
    LoadFailed { label: String, message: String },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// The aggregate failure of [`crate::loader::load_all`]: every provider
/// that failed, paired with its cause. Raised instead of the first error
/// alone, per §5: "any provider failure contributes its cause as a
/// suppressed exception on an aggregate `LoadError`".
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{} of {} metadata providers failed to load", causes.len(), causes.len() + succeeded)]
pub struct AggregateLoadError {
    pub causes: Vec<(String, ProviderError)>,
    pub succeeded: usize,
}
