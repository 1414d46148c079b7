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

//! Conventional type names used by most metadata schemas. The engine never
//! hardcodes these; they exist purely for ergonomic façade construction in
//! callers, tests, and examples.

/// The per-number-category classification (mobile, fixed line, toll-free,
/// ...), conventionally single-valued.
pub const TYPE: &str = "TYPE";

/// The CLDR region a number belongs to, conventionally multi-valued (a
/// calling code may serve several regions).
pub const REGION: &str = "REGION";
