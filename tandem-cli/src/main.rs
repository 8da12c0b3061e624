// Command-line interface for tandem
//
// This binary converts documents between GFM Markdown and the rich-editor
// HTML dialect, and exposes the supporting inspection commands.
//
// Converting:
//
// The target format is given with --to; the source format is detected from
// the file extension and can be overridden with --from.
// Usage:
//  tandem convert <input> --to <format> [--from <format>] [--output <file>]
//  tandem comments <input>     - Show the leading comment sidecar and body
//  tandem roundtrip <input>    - Convert Markdown to HTML and back, and
//                                report whether the result is stable

use clap::{Arg, ArgAction, Command, ValueHint};
use std::fs;
use std::path::Path;
use std::process;

use tandem_convert::{extract_html_comments, html_to_markdown, markdown_to_html};
use tandem_sync::canonicalize_markdown_for_sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Markdown,
    Html,
}

impl Format {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "markdown" | "md" => Some(Format::Markdown),
            "html" => Some(Format::Html),
            _ => None,
        }
    }

    fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "md" | "markdown" => Some(Format::Markdown),
            "html" | "htm" => Some(Format::Html),
            _ => None,
        }
    }
}

fn build_cli() -> Command {
    Command::new("tandem")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between GFM Markdown and rich-editor HTML")
        .long_about(
            "tandem converts documents between GFM Markdown and the HTML dialect \
             used by the tandem rich-text editor.\n\n\
             Commands:\n  \
             - convert: transform a document (direction from --to, source detected \
             from the file extension)\n  \
             - comments: show the leading HTML comment sidecar and the body\n  \
             - roundtrip: convert Markdown to HTML and back, reporting stability\n\n\
             Examples:\n  \
             tandem convert notes.md --to html            # Markdown to editor HTML\n  \
             tandem convert snippet.html --to markdown -o out.md\n  \
             tandem roundtrip notes.md",
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Convert a document between Markdown and editor HTML")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_hint(ValueHint::FilePath)
                        .help("Input file"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .required(true)
                        .value_name("FORMAT")
                        .help("Target format: markdown or html"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("FORMAT")
                        .help("Source format (defaults to the file extension)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .value_hint(ValueHint::FilePath)
                        .help("Write output to a file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("comments")
                .about("Show the leading HTML comment sidecar and the body")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_hint(ValueHint::FilePath)
                        .help("Markdown file"),
                )
                .arg(
                    Arg::new("body-only")
                        .long("body-only")
                        .action(ArgAction::SetTrue)
                        .help("Print only the body with the sidecar removed"),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Convert Markdown to editor HTML and back")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .value_hint(ValueHint::FilePath)
                        .help("Markdown file"),
                )
                .arg(
                    Arg::new("quiet")
                        .long("quiet")
                        .short('q')
                        .action(ArgAction::SetTrue)
                        .help("Only report stability, do not print the result"),
                ),
        )
}

fn read_input(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("Error reading {path}: {error}");
            process::exit(1);
        }
    }
}

fn write_output(output: Option<&String>, content: &str) {
    match output {
        Some(path) => {
            if let Err(error) = fs::write(path, content) {
                eprintln!("Error writing {path}: {error}");
                process::exit(1);
            }
        }
        None => print!("{content}"),
    }
}

fn run_convert(matches: &clap::ArgMatches) {
    let input = matches.get_one::<String>("input").expect("required arg");
    let to = matches.get_one::<String>("to").expect("required arg");
    let Some(target) = Format::from_name(to) else {
        eprintln!("Unknown target format '{to}' (expected markdown or html)");
        process::exit(1);
    };
    let source = match matches.get_one::<String>("from") {
        Some(from) => match Format::from_name(from) {
            Some(format) => format,
            None => {
                eprintln!("Unknown source format '{from}' (expected markdown or html)");
                process::exit(1);
            }
        },
        None => match Format::from_extension(Path::new(input)) {
            Some(format) => format,
            None => {
                eprintln!("Cannot detect the format of {input}; pass --from");
                process::exit(1);
            }
        },
    };

    let content = read_input(input);
    let converted = match (source, target) {
        (Format::Markdown, Format::Html) => markdown_to_html(&content),
        (Format::Html, Format::Markdown) => html_to_markdown(&content),
        _ => {
            eprintln!("Nothing to do: source and target format are both {to}");
            process::exit(1);
        }
    };

    match converted {
        Ok(mut result) => {
            if !result.ends_with('\n') {
                result.push('\n');
            }
            write_output(matches.get_one::<String>("output"), &result);
        }
        Err(error) => {
            eprintln!("Conversion failed: {error}");
            process::exit(1);
        }
    }
}

fn run_comments(matches: &clap::ArgMatches) {
    let input = matches.get_one::<String>("input").expect("required arg");
    let content = read_input(input);
    let extracted = extract_html_comments(&content);

    if matches.get_flag("body-only") {
        print!("{}", extracted.body);
        return;
    }
    if extracted.comments.is_empty() {
        println!("No leading comment sidecar.");
    } else {
        println!("{}", extracted.comments);
    }
}

fn run_roundtrip(matches: &clap::ArgMatches) {
    let input = matches.get_one::<String>("input").expect("required arg");
    let content = read_input(input);

    let first = markdown_to_html(&content)
        .and_then(|html| html_to_markdown(&html))
        .unwrap_or_else(|error| {
            eprintln!("Round trip failed: {error}");
            process::exit(1);
        });
    let second = markdown_to_html(&first)
        .and_then(|html| html_to_markdown(&html))
        .unwrap_or_else(|error| {
            eprintln!("Round trip failed: {error}");
            process::exit(1);
        });

    let stable = canonicalize_markdown_for_sync(&first) == canonicalize_markdown_for_sync(&second);
    if !matches.get_flag("quiet") {
        print!("{first}");
    }
    if stable {
        eprintln!("Round trip is stable.");
    } else {
        eprintln!("Round trip is NOT stable.");
        process::exit(2);
    }
}

fn main() {
    let matches = build_cli().get_matches();
    match matches.subcommand() {
        Some(("convert", matches)) => run_convert(matches),
        Some(("comments", matches)) => run_comments(matches),
        Some(("roundtrip", matches)) => run_roundtrip(matches),
        _ => unreachable!("subcommand is required"),
    }
}
