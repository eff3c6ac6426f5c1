use std::fmt::Write as _;
use std::time::Duration;

use arena_json::{Document, ParseOptions, Value, WriteOptions, Writer};
use criterion::measurement::WallTime;
use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion,
};

fn make_records(count: usize) -> String {
    let mut out = String::from("[");
    for id in 0..count {
        if id > 0 {
            out.push(',');
        }
        let _ = write!(
            out,
            r#"{{"id":{id},"name":"record-{id}","active":{},"score":{}.5,"tags":["a","b","c"],"owner":{{"login":"user{}","admin":false}}}}"#,
            id % 2 == 0,
            id % 97,
            id % 13
        );
    }
    out.push(']');
    out
}

fn make_tree(depth: usize, width: usize) -> String {
    if depth == 0 {
        return r#"{"leaf":true,"value":42}"#.to_string();
    }
    let mut out = String::from("{");
    for index in 0..width {
        if index > 0 {
            out.push(',');
        }
        let _ = write!(out, r#""n{index}":{}"#, make_tree(depth - 1, width));
    }
    out.push('}');
    out
}

fn make_relaxed(count: usize) -> String {
    let mut out = String::from("{\n");
    for index in 0..count {
        let _ = writeln!(out, "  // entry {index}\n  \"key{index}\": [{index}, {index},],");
    }
    out.push('}');
    out
}

fn bench_parse(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, text: &str, options: &ParseOptions) {
    group.throughput(criterion::Throughput::Bytes(text.len() as u64));
    group.bench_function(BenchmarkId::new("document", name), |b| {
        b.iter(|| {
            let mut doc = Document::new();
            doc.parse_with(black_box(text), options);
            black_box(doc.has_parse_error());
        })
    });
}

fn bench_write(group: &mut BenchmarkGroup<'_, WallTime>, name: &str, doc: &Document) {
    group.bench_function(BenchmarkId::new("compact", name), |b| {
        b.iter(|| {
            let mut writer = Writer::new(WriteOptions::compact());
            doc.root().accept(&mut writer).unwrap();
            black_box(writer.finish());
        })
    });
    group.bench_function(BenchmarkId::new("pretty", name), |b| {
        b.iter(|| black_box(arena_json::to_string_with_options(doc.root(), &WriteOptions::pretty()).unwrap()))
    });
}

fn walk_records(root: &Value) -> i64 {
    let mut total = 0;
    for record in root.iter() {
        total += record["id"].get_int64();
        total += record["owner"]["login"].get_string_length() as i64;
    }
    total
}

fn criterion_config() -> Criterion {
    if std::env::var("ARENA_JSON_BENCH_MINIMAL").is_ok() {
        Criterion::default()
            .warm_up_time(Duration::from_secs(0))
            .measurement_time(Duration::from_millis(10))
            .sample_size(1)
            .nresamples(1)
    } else {
        Criterion::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let records = make_records(2000);
    let tree = make_tree(5, 4);
    let relaxed = make_relaxed(1000);
    let strict = ParseOptions::default();
    let lenient = ParseOptions::new()
        .with_comments(true)
        .with_trailing_commas(true);

    let mut parse = c.benchmark_group("parse");
    bench_parse(&mut parse, "records", &records, &strict);
    bench_parse(&mut parse, "deep_tree", &tree, &strict);
    bench_parse(&mut parse, "relaxed", &relaxed, &lenient);
    parse.finish();

    let records_doc = arena_json::from_str(&records).unwrap();
    let tree_doc = arena_json::from_str(&tree).unwrap();

    let mut write = c.benchmark_group("write");
    bench_write(&mut write, "records", &records_doc);
    bench_write(&mut write, "deep_tree", &tree_doc);
    write.finish();

    let mut lookup = c.benchmark_group("lookup");
    lookup.bench_function("cold_cache", |b| {
        b.iter(|| {
            let doc = arena_json::from_str(&records).unwrap();
            black_box(walk_records(doc.root()))
        })
    });
    lookup.bench_function("warm_cache", |b| {
        walk_records(records_doc.root());
        b.iter(|| black_box(walk_records(black_box(records_doc.root()))))
    });
    lookup.bench_function("pointer", |b| {
        let pointer: arena_json::Pointer = "/n3/n2/n1/n0/n3/value".parse().unwrap();
        b.iter(|| black_box(pointer.get(tree_doc.root()).map(Value::get_int)))
    });
    lookup.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = criterion_benchmark
}
criterion_main!(benches);
