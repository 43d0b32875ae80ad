use clap::Parser;
use colored::Colorize;
use latextree::registry::Registry;
use latextree::tree::{TocEntry, Tree};
use latextree::ParseOptions;
use std::fs;
use std::path::PathBuf;

/// Parse LaTeX documents into trees and print the trees in various forms.
///
/// Every parse can be converted back to the exact source it came from;
///   the `check` subcommand verifies this for a document.
#[derive(Parser)]
#[clap(version)]
struct Cli {
    /// JSON definitions file to load before parsing. May be given more than once
    #[arg(long = "defs")]
    defs: Vec<PathBuf>,

    /// Directory that included files are relative to. Defaults to the directory of the document
    #[arg(long)]
    root: Option<PathBuf>,

    /// Fail if a file included with \input, \include or \bibliography cannot be loaded
    #[arg(long)]
    strict: bool,

    /// Print log messages. Repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    sub_command: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    /// Print the source reconstructed from the tree
    Chars(Input),
    /// Print the tree, one node per line
    Pretty(Input),
    /// Print the tree as XML
    Xml(Input),
    /// Print the tree as JSON
    Json(Input),
    /// Check that a document parses and converts back to its source
    Check(Input),
    /// List the labels of a document and what they refer to
    Labels(Input),
    /// Print the table of contents of a document
    Toc(Input),
    Doc(Doc),
}

#[derive(Parser)]
struct Input {
    /// Path to the LaTeX file
    file_path: PathBuf,
}

/// Print the definition of a command or environment
#[derive(Parser)]
struct Doc {
    /// Name of the command or environment; all names are listed if omitted
    name: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let mut parser = new_parser(&cli)?;
    let input = match cli.sub_command {
        SubCommand::Doc(doc) => return print_doc(parser.registry(), doc.name),
        SubCommand::Chars(ref input)
        | SubCommand::Pretty(ref input)
        | SubCommand::Xml(ref input)
        | SubCommand::Json(ref input)
        | SubCommand::Check(ref input)
        | SubCommand::Labels(ref input)
        | SubCommand::Toc(ref input) => with_tex_extension(&input.file_path),
    };
    let tree = parser
        .parse_file(&input)
        .map_err(|err| format!("{}: {err}", input.display()))?;
    match cli.sub_command {
        SubCommand::Chars(_) => print!("{}", tree.chars()),
        SubCommand::Pretty(_) => println!("{}", tree.pretty_print()),
        SubCommand::Xml(_) => println!("{}", tree.xml().map_err(|err| err.to_string())?),
        SubCommand::Json(_) => {
            let json = serde_json::to_string_pretty(&tree).map_err(|err| err.to_string())?;
            println!("{json}");
        }
        SubCommand::Check(_) => check(&parser, &tree, &input)?,
        SubCommand::Labels(_) => {
            for (key, id) in tree.labels(parser.registry()) {
                let marker = tree.marker(id).unwrap_or("");
                println!("{}\t{}\t{marker}", key.bold(), tree.species(id));
            }
        }
        SubCommand::Toc(_) => match tree.toc() {
            None => return Err(format!("{}: no document environment", input.display())),
            Some(toc) => {
                for line in toc_lines(&tree, &toc) {
                    println!("{line}");
                }
            }
        },
        SubCommand::Doc(_) => {}
    }
    Ok(())
}

fn new_parser(cli: &Cli) -> Result<latextree::Parser, String> {
    let mut options = ParseOptions::default().strict_resources(cli.strict);
    if let Some(root) = &cli.root {
        options = options.root(root.clone());
    }
    let mut parser = latextree::Parser::with_options(options);
    for path in &cli.defs {
        parser
            .load_definitions_file(path)
            .map_err(|err| err.to_string())?;
    }
    Ok(parser)
}

fn with_tex_extension(path: &std::path::Path) -> PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().is_none() {
        path.set_extension("tex");
    }
    path
}

fn check(parser: &latextree::Parser, tree: &Tree, input: &std::path::Path) -> Result<(), String> {
    let source = fs::read_to_string(input).map_err(|err| err.to_string())?;
    for error in tree.resource_errors() {
        println!["{} {error}", "warning:".yellow().bold()];
    }
    let registry = parser.registry();
    let mut unknown: Vec<&str> = registry
        .species()
        .filter(|s| s.auto)
        .map(|s| s.name.as_str())
        .collect();
    unknown.sort();
    for name in unknown {
        let suggestions: Vec<String> = registry
            .suggest(name)
            .into_iter()
            .filter(|s| registry.get(s).is_some_and(|s| !s.auto))
            .map(|s| format!("\\{s}"))
            .collect();
        match suggestions.is_empty() {
            true => println!["{} undefined `\\{name}`", "note:".blue().bold()],
            false => println![
                "{} undefined `\\{name}` (did you mean {}?)",
                "note:".blue().bold(),
                suggestions.join(", ")
            ],
        }
    }
    if tree.chars() != source {
        return Err(format!(
            "{}: the tree does not convert back to the source",
            input.display()
        ));
    }
    println!["{} {} ({} nodes)", "ok:".green().bold(), input.display(), tree.len()];
    Ok(())
}

/// One line per sectioning command, indented by depth, with the marker and title.
fn toc_lines(tree: &Tree, toc: &TocEntry) -> Vec<String> {
    fn visit(tree: &Tree, entry: &TocEntry, depth: usize, lines: &mut Vec<String>) {
        let title = tree
            .arg(entry.node, "title")
            .map(|id| tree.text(id))
            .unwrap_or_default();
        let line = match tree.marker(entry.node) {
            Some(marker) if !marker.is_empty() => format!("{marker} {title}"),
            _ => title,
        };
        lines.push(format!("{}{}", "  ".repeat(depth), line.trim()));
        for child in &entry.children {
            visit(tree, child, depth + 1, lines);
        }
    }
    let mut lines = vec![];
    for entry in &toc.children {
        visit(tree, entry, 0, &mut lines);
    }
    lines
}

fn print_doc(registry: &Registry, name: Option<String>) -> Result<(), String> {
    let Some(name) = name else {
        let mut species: Vec<_> = registry.species().filter(|s| !s.auto).collect();
        species.sort_by(|a, b| a.name.cmp(&b.name));
        for s in species {
            println!["\\{}  {}", s.name.bold(), s.genus];
        }
        return Ok(());
    };
    let name = name.strip_prefix('\\').unwrap_or(&name);
    let Some(species) = registry.get(name) else {
        let suggestions = registry.suggest(name);
        return Err(match suggestions.is_empty() {
            true => format!("undefined command `\\{name}`"),
            false => format!(
                "undefined command `\\{name}` (did you mean \\{}?)",
                suggestions.join(", \\")
            ),
        });
    };
    let params: String = species.params.iter().map(ToString::to_string).collect();
    println!["\\{}{params}", species.name.bold()];
    println!["{} {}, genus {}", "family:".bold(), species.family, species.genus];
    if registry.is_numbered(name) {
        let master = registry.master(name).unwrap_or("none");
        println!["{} reset by {master}", "counter:".bold()];
    }
    if let Some(counter) = registry.numbered_like(name) {
        println!["{} shares the {counter} counter", "counter:".bold()];
    }
    if let Some(format) = registry.marker_format(name) {
        println!["{} {format}", "marker:".bold()];
    }
    Ok(())
}
