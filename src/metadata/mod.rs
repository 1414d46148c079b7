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

//! The metadata codec (C8) and loader (C9): wire-format documents, the
//! decode step that turns them into a [`crate::classifier::RawClassifier`],
//! and the concurrent multi-provider loading pipeline built on top.

pub mod descriptor;
pub use descriptor::{CallingCodeDoc, MatcherDoc, NationalNumberEntryDoc, TypeFunctionDoc};

pub mod format;
pub use format::{FormatRuleDoc, FormatRuleDocError};

pub mod metadata;
pub use metadata::{MetadataDocument, VersionDoc};

pub mod database;
pub use database::Database;

pub mod loader;
pub use loader::{load_all, MetadataProvider};
