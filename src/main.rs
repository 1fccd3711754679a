//! Inspect a template: title, binding scopes, containers and partials.
//!
//! Usage:
//!   presenter page.html
//!   presenter --outline < page.html
//!   presenter page.html --set-title "New" --render

use clap::Parser;
use mimalloc::MiMalloc;
use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use string_doc::debug::outline;
use string_doc::{Document, ParseError, ParserConfig, Scope};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "presenter")]
#[command(about = "Inspect the binding points of an HTML template")]
struct Cli {
    /// Template file; reads stdin when omitted or `-`
    path: Option<PathBuf>,

    /// Print an indented outline of the parsed structure
    #[arg(long)]
    outline: bool,

    /// Maximum number of outline lines
    #[arg(long, default_value_t = 200)]
    outline_cap: usize,

    /// Print the rendered document after any edits
    #[arg(long)]
    render: bool,

    /// Replace the contents of the first <title> before rendering
    #[arg(long)]
    set_title: Option<String>,

    /// Maximum element nesting accepted by the parser
    #[arg(long, default_value_t = ParserConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Debug)]
enum CliError {
    Read { source: String, err: io::Error },
    Parse { source: String, err: ParseError },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Read { source, err } => write!(f, "failed to read {source}: {err}"),
            CliError::Parse { source, err } => write!(f, "failed to parse {source}: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let (source, bytes) = read_input(cli.path.as_ref())?;
    let config = ParserConfig {
        max_depth: cli.max_depth,
        ..ParserConfig::default()
    };
    let doc = Document::parse_bytes(&bytes, &config).map_err(|err| CliError::Parse {
        source: source.clone(),
        err,
    })?;
    log::debug!("parsed {source} ({} bytes)", bytes.len());

    print!("{}", report(&doc));

    if cli.outline {
        println!("outline:");
        for line in outline(doc.structure(), cli.outline_cap) {
            println!("  {line}");
        }
    }

    if let Some(title) = &cli.set_title {
        doc.set_title(title);
    }
    if cli.render {
        println!("{doc}");
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<(String, Vec<u8>), CliError> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let source = path.display().to_string();
            match std::fs::read(path) {
                Ok(bytes) => Ok((source, bytes)),
                Err(err) => Err(CliError::Read { source, err }),
            }
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|err| CliError::Read {
                    source: "<stdin>".to_string(),
                    err,
                })?;
            Ok(("<stdin>".to_string(), bytes))
        }
    }
}

fn report(doc: &Document) -> String {
    fn push_scope(out: &mut String, scope: &Scope, depth: usize) {
        let indent = "  ".repeat(depth + 1);
        out.push_str(&indent);
        out.push_str(&scope.name);
        if !scope.props.is_empty() {
            let props: Vec<&str> = scope.props.iter().map(|p| p.name.as_str()).collect();
            out.push_str(" [");
            out.push_str(&props.join(", "));
            out.push(']');
        }
        out.push('\n');
        for nested in &scope.nested {
            push_scope(out, nested, depth + 1);
        }
    }

    let mut out = String::new();
    match doc.title() {
        Some(title) => out.push_str(&format!("title: {title}\n")),
        None => out.push_str("title: (none)\n"),
    }

    out.push_str("scopes:\n");
    let scopes = doc.scopes();
    let nested: Vec<_> = scopes
        .iter()
        .flat_map(|s| s.nested.iter().filter_map(|n| n.doc.node()))
        .collect();
    for scope in &scopes {
        let is_nested = scope
            .doc
            .node()
            .is_some_and(|node| nested.iter().any(|n| n.ptr_eq(&node)));
        if !is_nested {
            push_scope(&mut out, scope, 0);
        }
    }

    let containers: Vec<String> = doc.containers().into_keys().collect();
    out.push_str(&format!("containers: {}\n", containers.join(", ")));
    let partials: Vec<String> = doc.partials().into_keys().collect();
    out.push_str(&format!("partials: {}\n", partials.join(", ")));
    out
}
