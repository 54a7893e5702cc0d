//! Benchmarks for recursive comparison and message building.

use criterion::{Criterion, criterion_group, criterion_main};
use fluent_errors::factory::recursive::should_be_equal_by_comparing_field_by_field_recursively;
use fluent_errors::prelude::*;
use fluent_errors::recursive::determine_differences;
use std::hint::black_box;

fn team(size: usize, changed: usize) -> Value {
    let members: Vec<Value> = (0..size)
        .map(|i| {
            let age = if i == changed { 99 } else { i32::try_from(i).unwrap_or(0) };
            Value::from(
                ObjectRef::new("Person")
                    .with_field("name", format!("member-{i}"))
                    .with_field("age", age)
                    .with_field("tags", Value::list(["a", "b", "c"])),
            )
        })
        .collect();
    let team = ObjectRef::new("Team")
        .with_field("name", "blue")
        .with_field("members", Value::list(members));
    team.set_field("self", team.clone());
    Value::from(team)
}

fn benchmark_determine_differences(c: &mut Criterion) {
    let actual = team(200, usize::MAX);
    let expected = team(200, 100);
    let default = RecursiveComparisonConfiguration::default();
    let unordered = RecursiveComparisonConfiguration::builder()
        .ignore_collection_order(true)
        .build()
        .unwrap();

    c.bench_function("differences_ordered_200", |b| {
        b.iter(|| black_box(determine_differences(&actual, &expected, &default)));
    });

    c.bench_function("differences_unordered_200", |b| {
        b.iter(|| black_box(determine_differences(&actual, &expected, &unordered)));
    });
}

fn benchmark_message_creation(c: &mut Criterion) {
    let actual = team(20, usize::MAX);
    let expected = team(20, 3);
    let configuration = RecursiveComparisonConfiguration::default();
    let differences = determine_differences(&actual, &expected, &configuration);
    let repr = StandardRepresentation::default();
    let factory = should_be_equal_by_comparing_field_by_field_recursively(
        actual,
        expected,
        &differences,
        &configuration,
        &repr,
    );
    let description = Description::text("team");

    c.bench_function("recursive_message", |b| {
        b.iter(|| black_box(factory.create(Some(&description), &repr)));
    });

    let simple = ErrorMessageFactory::new(
        "%nExpecting:%n  %s%nto be 100%% done",
        [MessageArg::value(Value::list([1, 2, 3]))],
    )
    .unwrap();
    c.bench_function("simple_message", |b| {
        b.iter(|| black_box(simple.create(None, &repr)));
    });
}

criterion_group!(
    benches,
    benchmark_determine_differences,
    benchmark_message_creation
);
criterion_main!(benches);
