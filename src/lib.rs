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

//! A compact, metadata-driven runtime for phone-number validation,
//! classification, parsing and formatting.
//!
//! This crate is deliberately oblivious to any particular numbering plan:
//! every calling code, range, and classifier value it knows about comes
//! from a metadata blob decoded by [`metadata`] at load time. A host
//! application supplies that blob (compiled offline, out of scope for this
//! crate) through one or more [`metadata::MetadataProvider`]s, builds a
//! [`classifier::RawClassifier`] from it, and layers [`parser`],
//! [`formatter`] and [`classifier`] façades on top.

#[macro_use]
extern crate lazy_static;

pub mod digit_sequence;
pub use digit_sequence::DigitSequence;

pub mod matcher;
pub use matcher::{LengthResult, MatchResult, Matcher};

pub mod classifier;
pub use classifier::RawClassifier;

pub mod phone_number;
pub use phone_number::PhoneNumber;

pub mod formatter;
pub use formatter::{FormatType, PhoneNumberFormatter, Template};

pub mod parser;
pub use parser::PhoneNumberParser;

pub mod region;

pub mod validator;

pub mod metadata;

pub mod error;
pub use error::{AggregateLoadError, MetadataError, ParseError, ProviderError};

mod consts;
