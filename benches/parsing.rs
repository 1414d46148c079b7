use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use phone_classifier::classifier::{CallingCodeRecord, ParserData, RawClassifier, TypeClassifier, TypeFunction, VersionInfo};
use phone_classifier::digit_sequence::DigitSequence;
use phone_classifier::matcher::{LengthMask, Matcher};
use phone_classifier::parser::PhoneNumberParser;

fn record(cc: &str, pattern: &str, lengths: &[usize], region: &str, prefix: Option<&str>) -> CallingCodeRecord {
    let matcher = Matcher::from_regex(pattern, LengthMask::from_lengths(lengths.iter().copied())).unwrap();
    CallingCodeRecord::new(
        DigitSequence::parse(cc).unwrap(),
        matcher.clone(),
        vec![TypeClassifier::new(
            vec![TypeFunction::new(Arc::from("GENERAL"), matcher)],
            None,
            true,
            false,
        )],
        ParserData {
            main_region: Arc::from(region),
            regions: vec![Arc::from(region)],
            national_prefixes: prefix.map(|p| vec![DigitSequence::parse(p).unwrap()]).unwrap_or_default(),
            national_prefix_optional: prefix.is_none(),
            example_number: None,
        },
        Vec::new(),
    )
}

fn benchmark_classifier() -> RawClassifier {
    let records = vec![
        record("800", "[0-9]{8}", &[8], "001", None),
        record("61", "[0-9]{9}", &[9], "AU", Some("0")),
        record("32", "[0-9]{8,9}", &[8, 9], "BE", Some("0")),
        record("34", "[0-9]{9}", &[9], "ES", None),
        record("44", "[0-9]{10}", &[10], "GB", Some("0")),
        record("1", "[0-9]{10}", &[10], "US", None),
    ];
    RawClassifier::new(VersionInfo::new("urn:bench:schema", 1, 1, 0), vec![Arc::from("GENERAL")], records)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let classifier = benchmark_classifier();
    let parser = PhoneNumberParser::new(&classifier);

    let cases = [
        "+80012340000",
        "+61406823897",
        "+32474091150",
        "+34666777888",
        "+441212345678",
        "+13459492311",
        "+16137827274",
        "+1 520 878 2491",
        "+1-520-878-2491",
    ];

    for case in cases {
        c.bench_with_input(BenchmarkId::new("parse", case), &case, |b, case| {
            b.iter(|| parser.parse_strictly(black_box(case), None))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
