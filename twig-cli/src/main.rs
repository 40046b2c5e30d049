//! Twig CLI
//!
//! Reads an XML document, prints its tree and optionally runs queries on it
//! or writes it back out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twig_dom::{DomTree, NodeId, tree_outline};
use twig_xml::{XmlParser, XmlTokenizer};

/// Twig: inspect small XML documents
#[derive(Parser, Debug)]
#[command(name = "twig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    twig catalog.xml

    # Dump the token stream instead
    twig --tokens catalog.xml

    # Query and rewrite without indentation text
    twig --skip-whitespace --find-tag book -o compact.xml catalog.xml

    # Parse inline markup
    twig --xml '<a k="v"><b/></a>' --find-id v
"#)]
struct Cli {
    /// Path to the XML file to read
    #[arg(value_name = "FILE", required_unless_present = "xml")]
    path: Option<PathBuf>,

    /// Parse an XML string directly instead of a file
    #[arg(long, value_name = "XML", conflicts_with = "path")]
    xml: Option<String>,

    /// Print the token stream and stop
    #[arg(long)]
    tokens: bool,

    /// Drop whitespace-only text between tags
    #[arg(long)]
    skip_whitespace: bool,

    /// List every element with this tag name
    #[arg(long, value_name = "NAME")]
    find_tag: Option<String>,

    /// Show the first element carrying an attribute with this value
    #[arg(long, value_name = "VALUE")]
    find_id: Option<String>,

    /// Serialize the parsed document to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log tokenizer and builder activity to stderr (filter with `RUST_LOG`)
    #[arg(short, long)]
    trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
        info!("logger initialized");
    }

    let source = load_source(&cli)?;

    if cli.tokens {
        return print_tokens(&source);
    }

    let mut parser = XmlParser::from(source.as_str());
    if cli.skip_whitespace {
        parser = parser.skip_whitespace_text();
    }
    let tree = parser.run().context("failed to parse document")?;

    println!("{}", "=== Tree ===".bold());
    print!("{}", tree_outline(&tree, NodeId::DOCUMENT));

    if let Some(ref name) = cli.find_tag {
        print_tag_matches(&tree, name);
    }
    if let Some(ref value) = cli.find_id {
        print_id_match(&tree, value);
    }

    if let Some(ref output) = cli.output {
        tree.write_file(output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("\nWritten to: {}", output.display());
    }

    Ok(())
}

/// Read the document text named on the command line.
fn load_source(cli: &Cli) -> Result<String> {
    if let Some(ref xml) = cli.xml {
        Ok(xml.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        bail!("an input file or --xml is required")
    }
}

fn print_tokens(source: &str) -> Result<()> {
    println!("{}", "=== Tokens ===".bold());
    for (index, token) in XmlTokenizer::from(source).enumerate() {
        let token = token.with_context(|| format!("failed to read token {index}"))?;
        println!("{index:>4}  {token}");
    }
    Ok(())
}

fn print_tag_matches(tree: &DomTree, name: &str) {
    let matches = tree.find_by_tag_name(name);
    println!("\n{}", format!("=== <{name}>: {} ===", matches.len()).bold());
    for id in matches {
        print!("{}", tree_outline(tree, id));
    }
}

fn print_id_match(tree: &DomTree, value: &str) {
    println!("\n{}", format!("=== attribute value {value:?} ===").bold());
    match tree.find_by_id(value) {
        Some(id) => print!("{}", tree_outline(tree, id)),
        None => println!("{}", "no match".dimmed()),
    }
}
