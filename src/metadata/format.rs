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

//! Wire shape for one [`crate::formatter::FormatRule`] (§3's supplemented
//! `format_rules` field on `CallingCodeRecord`, see `SPEC_FULL.md` §3).

use regex::Regex;
use serde_derive::{Deserialize, Serialize};

use crate::formatter::{FormatRule, Template, TemplateError};

/// One `(leadingDigits, template)` wire entry. `leading_digits` is the
/// regex body (unanchored at the start; matched against a prefix of the
/// national number) or absent for a catch-all rule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormatRuleDoc {
    #[serde(rename = "ld", default, skip_serializing_if = "Option::is_none")]
    pub leading_digits: Option<String>,

    #[serde(rename = "tmpl")]
    pub template: String,
}

/// Errors raised decoding a [`FormatRuleDoc`] into a runtime
/// [`FormatRule`].
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FormatRuleDocError {
    #[error("invalid leading-digits pattern {pattern:?}: {message}")]
    LeadingDigits { pattern: String, message: String },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl FormatRuleDoc {
    pub fn decode(&self) -> Result<FormatRule, FormatRuleDocError> {
        let leading_digits = self
            .leading_digits
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|err| FormatRuleDocError::LeadingDigits {
                pattern: self.leading_digits.clone().unwrap_or_default(),
                message: err.to_string(),
            })?;
        let template = Template::parse(&self.template)?;
        Ok(FormatRule::new(leading_digits, template))
    }
}
