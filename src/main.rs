use anyhow::{Context, Result};
use std::env;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fruit_grader::presenter::{write_report, write_warning, ColorMode};
use fruit_grader::{
    parse_batch_count, run_batch, Batch, BatchRegistry, DelimitedParser, RawItem, RecordParser,
    FIRST_BATCH_NUMBER,
};

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    info!("fruit-grader v{}", fruit_grader::VERSION);

    match args.get(1).map(String::as_str) {
        Some("demo") => run_demo(),
        Some("json") => run_json(),
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        _ => run_interactive(),
    }
}

fn init_logging() {
    // Logs go to stderr so stdout only carries verdicts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    println!("fruit-grader [demo|json]");
    println!();
    println!("  (no args)  read batches from stdin and print colored verdicts");
    println!("  demo       grade a built-in sample batch");
    println!("  json       read batches from stdin and print reports as JSON");
    println!();
    println!("Batch line format: id;diameterMM;blemishPercent;dirty(s/n);weightGrams | ...");
}

fn run_interactive() -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mode = ColorMode::for_stream(&stdout);
    let mut out = stdout.lock();

    let parser = DelimitedParser::new();
    let registry = register_batches(&mut input, &mut out, mode, &parser)?;

    writeln!(out)?;
    for report in registry.run_all() {
        write_report(&mut out, &report, mode)?;
        writeln!(out)?;
    }

    Ok(())
}

fn run_json() -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stderr = io::stderr();
    let mode = ColorMode::for_stream(&stderr);
    let mut prompts = stderr.lock();

    // Prompts and warnings on stderr, JSON alone on stdout
    let parser = DelimitedParser::new();
    let registry = register_batches(&mut input, &mut prompts, mode, &parser)?;
    let reports = registry.run_all();

    let json = serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
    println!("{}", json);

    Ok(())
}

fn run_demo() -> Result<()> {
    let batch = Batch::new(
        FIRST_BATCH_NUMBER,
        vec![
            RawItem::new(1, 70.0, 2.0).with_weight(150),
            RawItem::new(2, 100.0, 1.0).with_weight(210),
            RawItem::new(3, 75.0, 20.0).dirty().with_weight(160),
            RawItem::new(4, 75.0, 60.0).dirty().with_weight(155),
        ],
    );

    let stdout = io::stdout();
    let mode = ColorMode::for_stream(&stdout);
    let mut out = stdout.lock();
    write_report(&mut out, &run_batch(&batch), mode)?;

    Ok(())
}

/// Ask for a batch count, then read one line of items per batch
///
/// Running out of input stops registration; the unread batches keep their
/// numbers but nothing is stored for them.
fn register_batches<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    mode: ColorMode,
    parser: &dyn RecordParser,
) -> Result<BatchRegistry> {
    let mut registry = BatchRegistry::new();

    write!(out, "How many batches? ")?;
    out.flush()?;

    let (count, warning) = match read_line(input)? {
        Some(line) => parse_batch_count(&line),
        None => parse_batch_count(""),
    };
    if let Some(w) = warning {
        write_warning(out, &w, mode)?;
    }

    for read in 0..count {
        let number = registry.next_number();
        write!(out, "Batch {} items: ", number)?;
        out.flush()?;

        let parsed = match read_line(input)? {
            Some(line) => parser.parse_line(&line),
            None => {
                let remaining = count - read;
                warn!(batch = number, remaining, "input ended early, unread batches skipped");
                registry.skip_numbers(remaining);
                break;
            }
        };

        for w in &parsed.warnings {
            write_warning(out, w, mode)?;
        }
        registry.register(parsed.items);
    }

    info!(batches = registry.len(), parser = parser.name(), "registration done");
    Ok(registry)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;

    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
