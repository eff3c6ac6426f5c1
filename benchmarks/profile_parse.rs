use std::convert::TryFrom;
use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use arena_json::{Document, WriteOptions};
use pprof::ProfilerGuard;

fn parse_args() -> (u64, PathBuf, u32, Option<PathBuf>, bool) {
    let mut seconds = 30_u64;
    let mut out_prefix = PathBuf::from("benchmarks/profiles/parse");
    let mut frequency = 100_u32;
    let mut input: Option<PathBuf> = None;
    let mut write_back = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seconds" => {
                let value = args.next().expect("--seconds requires a value");
                seconds = value.parse().expect("invalid --seconds value");
            }
            "--out" => {
                let value = args.next().expect("--out requires a value");
                out_prefix = PathBuf::from(value);
                if out_prefix.extension().is_some() {
                    out_prefix = out_prefix.with_extension("");
                }
            }
            "--freq" => {
                let value = args.next().expect("--freq requires a value");
                frequency = value.parse().expect("invalid --freq value");
            }
            "--input" => {
                let value = args.next().expect("--input requires a value");
                input = Some(PathBuf::from(value));
            }
            "--write" => {
                write_back = true;
            }
            _ => {
                eprintln!("unknown arg: {arg}");
            }
        }
    }

    (seconds, out_prefix, frequency, input, write_back)
}

fn generated_input() -> String {
    let mut out = String::from("[");
    for id in 0..5000 {
        if id > 0 {
            out.push(',');
        }
        let _ = write!(
            out,
            r#"{{"id":{id},"name":"item-{id}","price":{}.25,"tags":["x","y"],"nested":{{"ok":true}}}}"#,
            id % 311
        );
    }
    out.push(']');
    out
}

fn main() {
    let (seconds, out_prefix, frequency, input, write_back) = parse_args();
    let text = match &input {
        Some(path) => fs::read_to_string(path).expect("failed to read --input file"),
        None => generated_input(),
    };

    let guard = ProfilerGuard::new(i32::try_from(frequency).expect("invalid --freq value"))
        .expect("failed to start profiler");
    let start = Instant::now();
    let deadline = Duration::from_secs(seconds);
    let mut iterations = 0_u64;

    while start.elapsed() < deadline {
        let mut doc = Document::new();
        doc.parse(&text);
        assert!(!doc.has_parse_error(), "parse failed: {:?}", doc.parse_error());
        if write_back {
            let encoded = arena_json::to_string_with_options(doc.root(), &WriteOptions::compact())
                .expect("write failed");
            std::hint::black_box(encoded);
        }
        std::hint::black_box(doc);
        iterations += 1;
    }

    eprintln!("iterations: {iterations}");

    if let Ok(report) = guard.report().build() {
        if let Some(parent) = out_prefix.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).expect("failed to create output dir");
            }
        }
        let svg_path = out_prefix.with_extension("svg");
        let mut svg = File::create(&svg_path).expect("failed to create svg output");
        report
            .flamegraph(&mut svg)
            .expect("failed to write flamegraph");
        eprintln!("wrote {}", svg_path.display());
    }
}
