use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use arena_json::{Document, Indent, ParseOptions, Pointer, WriteOptions};
use clap::{ArgAction, Parser};
use env_logger::Builder;
use log::{debug, info, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "ajson", version, about = "Query and edit JSON documents")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Print only the value at this JSON pointer (e.g. /servers/0/name).
    #[arg(short, long, value_name = "pointer")]
    pointer: Option<String>,

    /// Replace or add the value at a pointer: PATH=JSON. Repeatable.
    #[arg(long = "set", value_name = "PATH=JSON", action = ArgAction::Append)]
    set: Vec<String>,

    /// Pretty-print the output.
    #[arg(long)]
    pretty: bool,

    /// Indentation size for pretty output (default: 4).
    #[arg(long, value_name = "number", default_value_t = 4)]
    indent: usize,

    /// Accept // and /* */ comments in the input.
    #[arg(long)]
    allow_comments: bool,

    /// Accept a trailing comma before ] or }.
    #[arg(long)]
    allow_trailing_commas: bool,

    /// Log progress to stderr (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let options = ParseOptions::new()
        .with_comments(args.allow_comments)
        .with_trailing_commas(args.allow_trailing_commas);
    let (mut doc, input_source) = read_input(args.input.as_deref(), &options)?;
    info!("parsed {}", input_label(&input_source));

    for assignment in &args.set {
        apply_set(&mut doc, assignment)?;
    }

    let selected = match args.pointer.as_deref() {
        Some(path) => {
            let pointer = Pointer::parse(path)?;
            pointer
                .get(doc.root())
                .ok_or_else(|| format!("no value at {pointer}"))?
        }
        None => doc.root(),
    };

    let write_options = if args.pretty {
        WriteOptions::new().with_indent(Indent::spaces(args.indent))
    } else {
        WriteOptions::compact()
    };

    let output_target = OutputTarget::from_arg(args.output.as_deref());
    with_output_writer(output_target.path(), |writer| {
        arena_json::to_writer_with_options(writer, selected, &write_options)?;
        Ok(())
    })?;
    if let OutputTarget::File(path) = &output_target {
        report_status(&input_source, path);
    }
    Ok(())
}

fn read_input(
    input: Option<&str>,
    options: &ParseOptions,
) -> Result<(Document, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let doc = arena_json::from_reader_with_options(io::stdin().lock(), options)?;
            Ok((doc, InputSource::Stdin))
        }
        Some(path) => {
            let file = fs::File::open(path)?;
            let doc = arena_json::from_reader_with_options(file, options)?;
            Ok((doc, InputSource::File(path.to_string())))
        }
    }
}

/// Applies one `PATH=JSON` assignment. Existing targets are overwritten;
/// a missing object member is appended and `-` appends to an array.
fn apply_set(doc: &mut Document, assignment: &str) -> Result<(), Box<dyn Error>> {
    let (path, json) = assignment
        .split_once('=')
        .ok_or_else(|| format!("--set expects PATH=JSON, got {assignment:?}"))?;
    let pointer = Pointer::parse(path)?;
    let value = arena_json::from_str(json)?.root().deep_copy();
    let allocator = doc.allocator();

    if let Some(slot) = pointer.get_mut(doc.root_mut()) {
        debug!("replacing value at {pointer}");
        *slot = value;
        return Ok(());
    }

    let (parent_pointer, last) = pointer
        .split_last()
        .ok_or_else(|| format!("no value at {pointer}"))?;
    let parent = parent_pointer
        .get_mut(doc.root_mut())
        .ok_or_else(|| format!("no value at {parent_pointer}"))?;
    if parent.is_object() {
        debug!("adding member {last:?} under {parent_pointer}");
        parent.add_member(last, value, &allocator)?;
    } else if parent.is_array() && last == "-" {
        debug!("appending to {parent_pointer}");
        parent.push_back(value, &allocator)?;
    } else {
        return Err(format!("cannot set {pointer}: {} has no slot {last:?}", parent.get_type()).into());
    }
    Ok(())
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) if path != "-" => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn input_label(input_source: &InputSource) -> String {
    match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    }
}

fn report_status(input_source: &InputSource, output_path: &str) {
    println!(
        "✔ Wrote {} → {}",
        input_label(input_source),
        display_path(output_path)
    );
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    match path.strip_prefix(&cwd) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
