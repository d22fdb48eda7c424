// Command-line interface for mdstyle
//
// mdstyle rewrites the Markdown syntax left inside a rich-text document into native
// styling. The binary is a thin shell around mdstyle-engine: it loads a document,
// runs the standard pipeline with a highlighter picked from configuration, and saves
// the result.
//
// Usage:
//  mdstyle format <input> [--from <format>] [--to <format>] [-o <file>]  - Manual trigger on a file
//  mdstyle automate <doc-id> --store <dir>                              - Automation entry point
//  mdstyle --list-formats                                               - List document formats
//
// Configuration:
//
// Defaults are embedded (see mdstyle-config). An mdstyle.toml in the working directory
// is layered on top when present, then the file given with --config, then any
// --set key=value overrides.
//
// Automation:
//
// `automate` is what a scheduler or a document-store hook calls. The document is read
// from <store>/<doc-id>.json, formatted, written back in place, and a one-line JSON
// summary is printed to stdout.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdstyle_config::{HighlightBackend, Loader, MdstyleConfig};
use mdstyle_engine::{
    format_document, FormatRegistry, FormatReport, Highlighter, RichDocument, StyleOptions,
    SyntectHighlighter,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_FORMAT: &str = "json";

fn build_cli() -> Command {
    Command::new("mdstyle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite Markdown syntax in rich-text documents into native styling")
        .long_about(
            "mdstyle turns Markdown left in a document into the document's own styling:\n\
            headings, list items, bold, italic, links, inline code and highlighted\n\
            code blocks.\n\n\
            Examples:\n  \
            mdstyle format notes.md                     # Formatted document as JSON on stdout\n  \
            mdstyle format notes.md --to html -o n.html # Formatted document as an HTML page\n  \
            mdstyle automate 42 --store ./docs          # Format ./docs/42.json in place",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available document formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdstyle.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Override a configuration key (e.g. highlight.theme=InspiredGitHub)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every rewrite")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("format")
                .about("Format a document file")
                .long_about(
                    "Load a document, rewrite its Markdown syntax and write the result.\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .default_value(DEFAULT_OUTPUT_FORMAT)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("automate")
                .about("Format a stored document in place")
                .long_about(
                    "Entry point for remote automation. Reads <store>/<doc-id>.json,\n\
                    formats it, writes it back and prints a JSON summary:\n\n  \
                    {\"changed\": 3, \"report\": \"3 elements changed\\n...\"}",
                )
                .arg(
                    Arg::new("doc-id")
                        .help("Identifier of the stored document")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("store")
                        .long("store")
                        .value_name("DIR")
                        .help("Directory holding <doc-id>.json documents")
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                ),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    initialize_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(&matches);
    let highlighter = build_highlighter(&config);
    let options = StyleOptions::from(&config);

    match matches.subcommand() {
        Some(("format", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => detect_format(input),
            };
            let to = required(sub_matches, "to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_format_command(input, &from, to, output, highlighter.as_ref(), &options);
        }
        Some(("automate", sub_matches)) => {
            let doc_id = required(sub_matches, "doc-id");
            let store = Path::new(required(sub_matches, "store"));
            handle_automate_command(doc_id, store, highlighter.as_ref(), &options);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value,
        None => {
            eprintln!("Error: missing <{name}>");
            std::process::exit(2);
        }
    }
}

/// Initialize logging based on CLI verbosity settings. Logs go to stderr so stdout
/// only ever carries the document or the automation summary.
fn initialize_logging(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "mdstyle={level},mdstyle_engine={level},mdstyle_config={level}"
        ))
    });

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

fn load_cli_config(matches: &ArgMatches) -> MdstyleConfig {
    let mut loader = Loader::new().with_optional_file("mdstyle.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    for raw in matches.get_many::<String>("set").into_iter().flatten() {
        let Some((key, value)) = raw.split_once('=') else {
            eprintln!("Error: --set expects KEY=VALUE, got '{raw}'");
            std::process::exit(1);
        };
        loader = loader
            .set_override(key.trim(), value.trim())
            .unwrap_or_else(|err| {
                eprintln!("Invalid override '{raw}': {err}");
                std::process::exit(1);
            });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn build_highlighter(config: &MdstyleConfig) -> Box<dyn Highlighter> {
    match config.highlight.backend {
        HighlightBackend::Syntect => Box::new(SyntectHighlighter::new(&config.highlight.theme)),
        HighlightBackend::Remote => remote_highlighter(config),
    }
}

#[cfg(feature = "remote-highlight")]
fn remote_highlighter(config: &MdstyleConfig) -> Box<dyn Highlighter> {
    tracing::info!(url = %config.highlight.remote_url, "using remote highlighter");
    Box::new(mdstyle_engine::highlight::RemoteHighlighter::new(
        config.highlight.remote_url.clone(),
        config.highlight.remote_style.clone(),
    ))
}

#[cfg(not(feature = "remote-highlight"))]
fn remote_highlighter(_config: &MdstyleConfig) -> Box<dyn Highlighter> {
    eprintln!(
        "Error: highlight.backend = \"remote\" needs a build with the remote-highlight feature"
    );
    std::process::exit(1);
}

fn detect_format(input: &str) -> String {
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Handle the format command
fn handle_format_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    highlighter: &dyn Highlighter,
    options: &StyleOptions,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let mut doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let report = run_pipeline(&mut doc, highlighter, options);
    tracing::info!(changed = report.changed, input, "formatted document");

    let result = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

#[derive(Serialize)]
struct AutomationSummary {
    changed: usize,
    report: String,
}

/// Handle the automate command
fn handle_automate_command(
    doc_id: &str,
    store: &Path,
    highlighter: &dyn Highlighter,
    options: &StyleOptions,
) {
    let path = document_path(store, doc_id);
    let registry = FormatRegistry::default();

    let source = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading document '{doc_id}' ({}): {e}", path.display());
        std::process::exit(1);
    });
    let mut doc = registry.parse(&source, "json").unwrap_or_else(|e| {
        eprintln!("Parse error in document '{doc_id}': {e}");
        std::process::exit(1);
    });

    let report = run_pipeline(&mut doc, highlighter, options);

    let saved = registry.serialize(&doc, "json").unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    fs::write(&path, saved).unwrap_or_else(|e| {
        eprintln!("Error writing file '{}': {e}", path.display());
        std::process::exit(1);
    });

    let summary = AutomationSummary {
        changed: report.changed,
        report: report.to_string(),
    };
    match serde_json::to_string(&summary) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("Error encoding summary: {e}");
            std::process::exit(1);
        }
    }
}

/// `<store>/<doc-id>.json`, refusing ids that would escape the store.
fn document_path(store: &Path, doc_id: &str) -> PathBuf {
    let invalid = doc_id.is_empty()
        || doc_id.contains(['/', '\\'])
        || doc_id == "."
        || doc_id == "..";
    if invalid {
        eprintln!("Error: invalid document id '{doc_id}'");
        std::process::exit(1);
    }
    store.join(format!("{doc_id}.json"))
}

fn run_pipeline(
    doc: &mut RichDocument,
    highlighter: &dyn Highlighter,
    options: &StyleOptions,
) -> FormatReport {
    format_document(doc, highlighter, options).unwrap_or_else(|e| {
        eprintln!("Formatting failed: {e}");
        std::process::exit(1);
    })
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let Ok(format) = registry.get(&name) else {
            continue;
        };
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("load");
        }
        if format.supports_serialization() {
            modes.push("save");
        }
        println!(
            "  {name:<10} {:<10} {}",
            modes.join("/"),
            format.description()
        );
    }
}
