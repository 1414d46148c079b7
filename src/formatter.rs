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

//! `PhoneNumberFormatter` (C7): template-driven national/international
//! formatting, including partial numbers.
//!
//! A format template is a string over `{X, literal, '{', '}', '>', '#',
//! '*'}` (§4.6). `#` stands for the preferred national prefix (national
//! format only; omitted internationally), runs of `X` consume that many
//! national-number digits, `{...}` marks an optional group elided when not
//! enough digits remain to fill it, `{X>}` drops one digit without
//! emitting it (the Argentine mobile-mangling group), and a trailing `*`
//! right after a group's closing `}` marks it as the repeat target for any
//! digits left over once the rest of the template is exhausted.

use std::collections::VecDeque;

use regex::Regex;

use crate::classifier::RawClassifier;
use crate::digit_sequence::DigitSequence;
use crate::phone_number::PhoneNumber;

/// Whether a number is being rendered in its national or international
/// presentation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FormatType {
    National,
    International,
}

#[derive(Clone, Debug)]
enum Token {
    Literal(char),
    NationalPrefix,
    Digits(usize),
    DropDigit,
    Optional { tokens: Vec<Token>, repeat: bool },
}

/// Errors raised while parsing a format template string.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("unterminated optional group in template {0:?}")]
    UnterminatedGroup(String),
}

/// A parsed, reusable format template.
#[derive(Clone, Debug)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    /// Parse a template string per the grammar in the module docs.
    pub fn parse(template: &str) -> Result<Template, TemplateError> {
        Ok(Template {
            tokens: parse_tokens(template)?,
        })
    }

    /// Render `national_number`'s digits through this template.
    /// `national_prefix` is `Some` for national format (substituted at `#`)
    /// and `None` for international format (where `#` contributes
    /// nothing).
    pub fn format(&self, national_number: DigitSequence, national_prefix: Option<&str>) -> String {
        let mut remaining: VecDeque<char> = national_number.to_string().chars().collect();
        let mut out = String::new();
        apply(&self.tokens, &mut remaining, national_prefix, &mut out);

        if !remaining.is_empty() {
            if let Some(repeat_tokens) = find_repeatable(&self.tokens) {
                loop {
                    if remaining.is_empty() {
                        break;
                    }
                    let before = remaining.len();
                    apply(repeat_tokens, &mut remaining, national_prefix, &mut out);
                    if remaining.len() == before {
                        break;
                    }
                }
            }
            // No repeat group, or the repeat group still couldn't make
            // progress (malformed metadata): append whatever is left
            // verbatim, per the conservative rule for unrepresentable
            // overflow digits.
            out.extend(remaining.drain(..));
        }

        out
    }
}

fn parse_tokens(template: &str) -> Result<Vec<Token>, TemplateError> {
    let chars: Vec<char> = template.chars().collect();
    let mut i = 0;
    let mut tokens = Vec::new();

    while i < chars.len() {
        match chars[i] {
            '#' => {
                tokens.push(Token::NationalPrefix);
                i += 1;
            }
            'X' => {
                let start = i;
                while i < chars.len() && chars[i] == 'X' {
                    i += 1;
                }
                tokens.push(Token::Digits(i - start));
            }
            '{' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&c| c == '}')
                    .map(|p| i + 1 + p)
                    .ok_or_else(|| TemplateError::UnterminatedGroup(template.to_owned()))?;
                let inner: String = chars[i + 1..close].iter().collect();
                i = close + 1;

                let repeat = i < chars.len() && chars[i] == '*';
                if repeat {
                    i += 1;
                }

                if inner == "X>" {
                    tokens.push(Token::DropDigit);
                } else {
                    tokens.push(Token::Optional {
                        tokens: parse_tokens(&inner)?,
                        repeat,
                    });
                }
            }
            c => {
                tokens.push(Token::Literal(c));
                i += 1;
            }
        }
    }

    Ok(tokens)
}

fn apply(tokens: &[Token], remaining: &mut VecDeque<char>, national_prefix: Option<&str>, out: &mut String) {
    for token in tokens {
        match token {
            Token::Literal(c) => {
                if !remaining.is_empty() {
                    out.push(*c);
                }
            }
            Token::NationalPrefix => {
                if let Some(np) = national_prefix {
                    out.push_str(np);
                }
            }
            Token::Digits(n) => {
                for _ in 0..*n {
                    match remaining.pop_front() {
                        Some(d) => out.push(d),
                        None => break,
                    }
                }
            }
            Token::DropDigit => {
                remaining.pop_front();
            }
            Token::Optional { tokens: inner, .. } => {
                if !remaining.is_empty() {
                    apply(inner, remaining, national_prefix, out);
                }
            }
        }
    }
}

fn find_repeatable(tokens: &[Token]) -> Option<&[Token]> {
    for token in tokens {
        if let Token::Optional { tokens: inner, repeat } = token {
            if *repeat {
                return Some(inner);
            }
            if let Some(found) = find_repeatable(inner) {
                return Some(found);
            }
        }
    }
    None
}

/// One `(leadingDigits, template)` rule, selected by matching against the
/// leading digits of the national number; `leading_digits` of `None`
/// always matches (the single-rule case needs no leading-digit pattern).
#[derive(Clone, Debug)]
pub struct FormatRule {
    leading_digits: Option<Regex>,
    template: Template,
}

impl FormatRule {
    pub fn new(leading_digits: Option<Regex>, template: Template) -> FormatRule {
        FormatRule {
            leading_digits,
            template,
        }
    }

    /// Whether this rule's leading-digits pattern matches a prefix of
    /// `national_number` (not merely appears somewhere within it — a
    /// pattern like `[1-3]` is meant to constrain the number's first
    /// digit, not any digit).
    fn matches(&self, national_number: &str) -> bool {
        match &self.leading_digits {
            Some(pattern) => pattern
                .find(national_number)
                .map_or(false, |m| m.start() == 0),
            None => true,
        }
    }
}

/// Select the first matching rule, falling back to the last declared rule
/// if none of the leading-digit patterns match (metadata convention: the
/// final rule in the list is the catch-all).
fn select_rule<'a>(rules: &'a [FormatRule], national_number: DigitSequence) -> Option<&'a FormatRule> {
    let text = national_number.to_string();
    rules
        .iter()
        .find(|rule| rule.matches(&text))
        .or_else(|| rules.last())
}

/// Errors raised while formatting a number for a calling code the active
/// classifier does not know about.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("unsupported calling code {0}")]
    UnsupportedCallingCode(String),

    #[error("no format rules available for calling code {0}")]
    NoFormatRules(String),
}

/// The template-driven formatter façade (C7), built once over a loaded
/// classifier and reused across numbers.
pub struct PhoneNumberFormatter<'r> {
    classifier: &'r RawClassifier,
}

impl<'r> PhoneNumberFormatter<'r> {
    pub fn new(classifier: &'r RawClassifier) -> PhoneNumberFormatter<'r> {
        PhoneNumberFormatter { classifier }
    }

    /// Format `number` per `format_type`.
    pub fn format(&self, number: &PhoneNumber, format_type: FormatType) -> Result<String, FormatError> {
        let cc = number.calling_code();
        let record = self
            .classifier
            .calling_code_record(cc)
            .ok_or_else(|| FormatError::UnsupportedCallingCode(cc.to_string()))?;

        let rule = select_rule(record.format_rules(), number.national_number())
            .ok_or_else(|| FormatError::NoFormatRules(cc.to_string()))?;

        Ok(match format_type {
            FormatType::National => {
                let prefix = record
                    .parser_data()
                    .national_prefixes
                    .first()
                    .map(DigitSequence::to_string);
                rule.template
                    .format(number.national_number(), prefix.as_deref())
            }
            FormatType::International => {
                format!(
                    "+{} {}",
                    cc,
                    rule.template.format(number.national_number(), None)
                )
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ds(s: &str) -> DigitSequence {
        DigitSequence::parse(s).unwrap()
    }

    #[test]
    fn simple_grouping_template() {
        let template = Template::parse("XX XXX XXXX").unwrap();
        assert_eq!(template.format(ds("12345678"), None), "12 345 678");
    }

    #[test]
    fn national_prefix_placeholder() {
        let template = Template::parse("#XX XXX XXXX").unwrap();
        assert_eq!(template.format(ds("12345678"), Some("0")), "012 345 678");
        assert_eq!(template.format(ds("12345678"), None), "12 345 678");
    }

    #[test]
    fn optional_group_elided_when_short() {
        let template = Template::parse("XXX{-XXXX}").unwrap();
        assert_eq!(template.format(ds("123"), None), "123");
        assert_eq!(template.format(ds("1234567"), None), "123-4567");
    }

    #[test]
    fn drop_digit_group_consumes_without_emitting() {
        // Argentine-style mangling: drop the mobile token digit, then group
        // the rest normally.
        let template = Template::parse("{X>}XX XXXX XXXX").unwrap();
        assert_eq!(template.format(ds("91123451234"), None), "11 2345 1234");
    }

    #[test]
    fn overflow_without_repeat_group_appends_verbatim() {
        let template = Template::parse("XXX XXXX").unwrap();
        assert_eq!(template.format(ds("12345678901"), None), "123 45678901");
    }

    #[test]
    fn overflow_with_repeat_group_repeats_pattern() {
        let template = Template::parse("XXX {-XXXX}*").unwrap();
        assert_eq!(template.format(ds("1234567890123"), None), "123 -4567-8901-23");
    }

    #[test]
    fn parse_rejects_unterminated_group() {
        assert!(matches!(
            Template::parse("XX{XXX"),
            Err(TemplateError::UnterminatedGroup(_))
        ));
    }
}
