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

//! The metadata loader (C9): a caller-supplied [`MetadataProvider`] trait
//! plus a [`load_all`] driver that fans out to every provider on its own OS
//! thread, decodes each blob through the C8 codec, and aggregates failures
//! rather than stopping at the first one.
//!
//! Compiling a metadata blob from CLDR/ITU source data is offline tooling
//! out of this crate's scope (§4.8 of the design); a `MetadataProvider` only
//! has to hand back bytes already in this crate's wire format.

use std::cmp::Ordering;
use std::sync::Arc;
use std::thread;

use log::warn;

use crate::classifier::{RawClassifier, VersionInfo};
use crate::error::{AggregateLoadError, ProviderError};

use super::database::Database;

/// A source of one metadata blob, e.g. a file on disk or an embedded
/// resource. `load` is expected to do its own I/O; `load_all` is what
/// parallelizes across many of them.
pub trait MetadataProvider: Send + Sync {
    /// Produce the blob's declared version and its encoded bytes (the C8
    /// binary wire format, decodable with [`Database::from_binary`]).
    fn load(&self) -> Result<(VersionInfo, Vec<u8>), ProviderError>;

    /// A human-readable label for this provider, used only to identify it
    /// in an [`AggregateLoadError`]. Defaults to the provider's type name.
    fn label(&self) -> String {
        std::any::type_name::<Self>().to_owned()
    }
}

fn load_one(provider: &(dyn MetadataProvider + '_), requested: &VersionInfo) -> Result<RawClassifier, ProviderError> {
    let (_declared, bytes) = provider.load()?;
    Database::from_binary(&bytes, requested).map_err(ProviderError::from)
}

/// Invoke every provider's [`MetadataProvider::load`] concurrently, one OS
/// thread per provider, and join all of them before returning.
///
/// Any failure — provider I/O, codec decode, or a version that doesn't
/// satisfy `requested` — is collected rather than raised immediately; if
/// one or more providers failed, every cause is returned together in an
/// [`AggregateLoadError`] and nothing succeeds, matching "any provider
/// failure ... aborts loading". On full success the decoded classifiers
/// are sorted ascending using `compare`.
pub fn load_all(
    providers: &[Arc<dyn MetadataProvider>],
    requested: &VersionInfo,
    compare: impl Fn(&VersionInfo, &VersionInfo) -> Ordering,
) -> Result<Vec<RawClassifier>, AggregateLoadError> {
    let handles: Vec<_> = providers
        .iter()
        .map(|provider| {
            let provider = Arc::clone(provider);
            let requested = requested.clone();
            thread::spawn(move || {
                let label = provider.label();
                let result = load_one(provider.as_ref(), &requested);
                (label, result)
            })
        })
        .collect();

    let mut succeeded = Vec::with_capacity(handles.len());
    let mut causes = Vec::new();

    for handle in handles {
        match handle.join() {
            Ok((label, Ok(classifier))) => succeeded.push(classifier),
            Ok((label, Err(err))) => {
                warn!("metadata provider {label} failed to load: {err}");
                causes.push((label, err));
            }
            Err(_) => causes.push((
                "<unknown>".to_owned(),
                ProviderError::LoadFailed {
                    label: "<unknown>".to_owned(),
                    message: "provider thread panicked".to_owned(),
                },
            )),
        }
    }

    if !causes.is_empty() {
        return Err(AggregateLoadError {
            succeeded: succeeded.len(),
            causes,
        });
    }

    succeeded.sort_by(|a, b| compare(a.get_version(), b.get_version()));
    Ok(succeeded)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::metadata::descriptor::{CallingCodeDoc, MatcherDoc, NationalNumberEntryDoc, TypeFunctionDoc};
    use crate::metadata::metadata::{MetadataDocument, VersionDoc};
    use bincode::Options;

    struct Fixed {
        label: &'static str,
        version: VersionInfo,
        calling_code: u32,
        fail: bool,
    }

    impl MetadataProvider for Fixed {
        fn load(&self) -> Result<(VersionInfo, Vec<u8>), ProviderError> {
            if self.fail {
                return Err(ProviderError::LoadFailed {
                    label: self.label.to_owned(),
                    message: "simulated failure".to_owned(),
                });
            }
            let doc = MetadataDocument {
                ver: VersionDoc {
                    maj: self.version.major_data_version,
                    min: self.version.minor_data_version,
                    uri: self.version.schema_uri.clone(),
                    ver: self.version.schema_version,
                },
                typ: vec![1],
                svm: 0b1,
                com: 0,
                tok: vec!["".to_owned(), "TYPE".to_owned(), "ZZ".to_owned(), "MOBILE".to_owned()],
                ccd: vec![CallingCodeDoc {
                    calling_code: self.calling_code,
                    validity_matcher_index: vec![0],
                    national_number_data: vec![NationalNumberEntryDoc {
                        default_value: 0,
                        functions: vec![TypeFunctionDoc {
                            value: 3,
                            matcher_index: vec![0],
                        }],
                    }],
                    matcher_data: vec![MatcherDoc {
                        possible_lengths_mask: 1 << 9,
                        matcher_bytes: None,
                        regex: Some("[0-9]{9}".to_owned()),
                    }],
                    national_prefix: vec![],
                    primary_region: 2,
                    regions: vec![2],
                    national_prefix_optional: false,
                    example_number: String::new(),
                    formats: Vec::new(),
                }],
            };
            let bytes = bincode::options()
                .with_varint_encoding()
                .serialize(&doc)
                .unwrap();
            Ok((self.version.clone(), bytes))
        }

        fn label(&self) -> String {
            self.label.to_owned()
        }
    }

    fn requested() -> VersionInfo {
        VersionInfo::new("urn:example:schema", 1, 1, 0)
    }

    #[test]
    fn loads_and_sorts_every_provider() {
        let providers: Vec<Arc<dyn MetadataProvider>> = vec![
            Arc::new(Fixed {
                label: "b",
                version: VersionInfo::new("urn:example:schema", 1, 1, 2),
                calling_code: 2,
                fail: false,
            }),
            Arc::new(Fixed {
                label: "a",
                version: VersionInfo::new("urn:example:schema", 1, 1, 1),
                calling_code: 3,
                fail: false,
            }),
        ];

        let loaded = load_all(&providers, &requested(), |a, b| {
            a.minor_data_version.cmp(&b.minor_data_version)
        })
        .unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].get_version().minor_data_version, 1);
        assert_eq!(loaded[1].get_version().minor_data_version, 2);
    }

    #[test]
    fn aggregates_every_failure() {
        let providers: Vec<Arc<dyn MetadataProvider>> = vec![
            Arc::new(Fixed {
                label: "good",
                version: VersionInfo::new("urn:example:schema", 1, 1, 0),
                calling_code: 2,
                fail: false,
            }),
            Arc::new(Fixed {
                label: "bad-one",
                version: VersionInfo::new("urn:example:schema", 1, 1, 0),
                calling_code: 3,
                fail: true,
            }),
            Arc::new(Fixed {
                label: "bad-two",
                version: VersionInfo::new("urn:example:schema", 1, 1, 0),
                calling_code: 4,
                fail: true,
            }),
        ];

        let err = load_all(&providers, &requested(), |a, b| {
            a.minor_data_version.cmp(&b.minor_data_version)
        })
        .unwrap_err();
        assert_eq!(err.causes.len(), 2);
        assert_eq!(err.succeeded, 1);
    }

    #[test]
    fn version_mismatch_is_a_provider_failure() {
        let providers: Vec<Arc<dyn MetadataProvider>> = vec![Arc::new(Fixed {
            label: "stale",
            version: VersionInfo::new("urn:example:schema", 1, 0, 0),
            calling_code: 2,
            fail: false,
        })];

        let requested = VersionInfo::new("urn:example:schema", 2, 1, 0);
        let err = load_all(&providers, &requested, |a, b| a.schema_version.cmp(&b.schema_version)).unwrap_err();
        assert_eq!(err.causes.len(), 1);
    }
}
