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

//! The compact deterministic finite-state matcher (`MatcherFunction` variant
//! 1 in the spec).
//!
//! Wire format: a flat table of fixed-width state records, 11 bytes each —
//! one "accepting" flag byte followed by ten transition bytes, one per
//! digit `0`..=`9`. A transition byte of `0xFF` means "dead" (no valid
//! continuation); any other byte is the next state's index. Execution
//! starts at state 0 and is a single pass over the input with one `u8` of
//! scratch state, exactly as required by §4.2's "deterministic single-pass
//! execution in O(len(s)) with bounded scratch state".

use thiserror::Error;

use crate::digit_sequence::DigitSequence;

const RECORD_LEN: usize = 11;
const DEAD: u8 = 0xFF;
const ACCEPTING_BIT: u8 = 0b0000_0001;

/// The four raw outcomes a DFA walk can produce, before the engine folds in
/// the possible-length mask (see [`crate::matcher::Matcher::match_digits`]).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DfaOutcome {
    /// Input was fully consumed in an accepting state.
    Matched,
    /// Input ran out before reaching an accepting state.
    TooShort,
    /// Input diverged from every valid pattern past an accepting state.
    TooLong,
    /// Input diverged from every valid pattern before ever matching.
    Invalid,
}

/// Errors raised while decoding a DFA byte table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum DfaTableError {
    #[error("dfa table length {0} is not a multiple of the {RECORD_LEN}-byte record size")]
    Misaligned(usize),

    #[error("dfa table is empty")]
    Empty,

    #[error("state {state} transitions to out-of-range state {target} (table has {states} states)")]
    OutOfRangeTransition { state: usize, target: u8, states: usize },
}

/// A decoded, immutable DFA byte table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DfaTable {
    bytes: Vec<u8>,
}

impl DfaTable {
    /// Validate and wrap a raw byte table as decoded from metadata.
    pub fn new(bytes: Vec<u8>) -> Result<DfaTable, DfaTableError> {
        if bytes.is_empty() {
            return Err(DfaTableError::Empty);
        }
        if bytes.len() % RECORD_LEN != 0 {
            return Err(DfaTableError::Misaligned(bytes.len()));
        }

        let states = bytes.len() / RECORD_LEN;
        for state in 0..states {
            let base = state * RECORD_LEN;
            for digit in 0..10 {
                let target = bytes[base + 1 + digit];
                if target != DEAD && target as usize >= states {
                    return Err(DfaTableError::OutOfRangeTransition {
                        state,
                        target,
                        states,
                    });
                }
            }
        }

        Ok(DfaTable { bytes })
    }

    fn states(&self) -> usize {
        self.bytes.len() / RECORD_LEN
    }

    fn accepting(&self, state: u8) -> bool {
        self.bytes[state as usize * RECORD_LEN] & ACCEPTING_BIT != 0
    }

    fn transition(&self, state: u8, digit: u32) -> u8 {
        self.bytes[state as usize * RECORD_LEN + 1 + digit as usize]
    }

    /// Walk `digits` through the table, producing the raw four-valued
    /// outcome described in the module docs.
    pub fn walk(&self, digits: DigitSequence) -> DfaOutcome {
        let mut state: u8 = 0;
        let mut was_accepting = self.accepting(state);

        for digit in digits.iterate() {
            let next = self.transition(state, digit);
            if next == DEAD {
                return if was_accepting {
                    DfaOutcome::TooLong
                } else {
                    DfaOutcome::Invalid
                };
            }
            state = next;
            was_accepting = self.accepting(state);
        }

        if was_accepting {
            DfaOutcome::Matched
        } else {
            DfaOutcome::TooShort
        }
    }

    /// Encode a simple "fixed length or nothing" table as used in tests and
    /// small fixtures: digits must exactly equal `template` to match, with
    /// no room for variation at any position.
    #[cfg(test)]
    pub fn exact(template: &str) -> DfaTable {
        let digits: Vec<u32> = template.chars().map(|c| c.to_digit(10).unwrap()).collect();
        let states = digits.len() + 1;
        let mut bytes = vec![DEAD; states * RECORD_LEN];
        for i in 0..states {
            let base = i * RECORD_LEN;
            if i == digits.len() {
                bytes[base] = ACCEPTING_BIT;
            }
            if i < digits.len() {
                bytes[base + 1 + digits[i] as usize] = (i + 1) as u8;
            }
        }
        DfaTable { bytes }
    }
}
