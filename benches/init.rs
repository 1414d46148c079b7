use std::sync::Arc;

use bincode::Options;
use criterion::{black_box, criterion_group, criterion_main, Criterion, SamplingMode};

use phone_classifier::classifier::VersionInfo;
use phone_classifier::metadata::database::Database;
use phone_classifier::metadata::descriptor::{CallingCodeDoc, MatcherDoc, NationalNumberEntryDoc, TypeFunctionDoc};
use phone_classifier::metadata::metadata::{MetadataDocument, VersionDoc};

fn sample_document() -> MetadataDocument {
    MetadataDocument {
        ver: VersionDoc {
            maj: 1,
            min: 0,
            uri: "urn:bench:schema".to_owned(),
            ver: 1,
        },
        typ: vec![1],
        svm: 0b1,
        com: 0,
        tok: vec!["".to_owned(), "TYPE".to_owned(), "CH".to_owned(), "MOBILE".to_owned()],
        ccd: vec![CallingCodeDoc {
            calling_code: 41,
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
                regex: Some("7[0-9]{8}".to_owned()),
            }],
            national_prefix: vec![],
            primary_region: 2,
            regions: vec![2],
            national_prefix_optional: false,
            example_number: "781234567".to_owned(),
            formats: Vec::new(),
        }],
    }
}

fn requested() -> VersionInfo {
    VersionInfo::new("urn:bench:schema", 1, 1, 0)
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("init");
    group.sampling_mode(SamplingMode::Auto);
    group.sample_size(50);

    let doc = sample_document();
    let binary = bincode::options().with_varint_encoding().serialize(&doc).unwrap();
    let json = serde_json::to_string(&doc).unwrap();
    let requested = requested();

    group.bench_function("decode binary metadata", |b| {
        b.iter(|| Database::from_binary(black_box(&binary), black_box(&requested)).unwrap())
    });

    group.bench_function("decode json metadata", |b| {
        b.iter(|| Database::from_json(black_box(&json), black_box(&requested)).unwrap())
    });

    let classifier = Arc::new(Database::from_binary(&binary, &requested).unwrap());
    let cc = phone_classifier::DigitSequence::parse("41").unwrap();
    let nn = phone_classifier::DigitSequence::parse("781234567").unwrap();
    group.bench_function("match against decoded classifier", |b| {
        b.iter(|| classifier.match_number(black_box(cc), black_box(nn)))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
