//! Formulate CLI - inspect, normalize and compile LaTeX formulas

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use formulate::{ExprCompiler, Formula, FormulaResult, Row};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "formulate")]
#[command(version)]
#[command(about = "Normalize and compile structural math formulas", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Parse and re-serialize LaTeX in canonical form
    Latex {
        /// LaTeX text, or a path to a file holding it (reads stdin if omitted)
        input: Option<String>,
    },

    /// Compile to a numeric expression and its loop statements
    Expr {
        /// LaTeX text, or a path to a file holding it (reads stdin if omitted)
        input: Option<String>,

        /// Print `{"body", "expr"}` JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the element tree
    Tree {
        /// LaTeX text, or a path to a file holding it (reads stdin if omitted)
        input: Option<String>,
    },

    /// Classify the formula as a plot row
    Classify {
        /// LaTeX text, or a path to a file holding it (reads stdin if omitted)
        input: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn setup_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Formula text from the argument (inline or file path) or stdin.
fn read_input(input: Option<&str>) -> io::Result<String> {
    match input {
        Some(text) if Path::new(text).is_file() => fs::read_to_string(text),
        Some(text) => Ok(text.to_string()),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn parse(input: Option<&str>) -> FormulaResult<Formula> {
    let text = read_input(input)?;
    Ok(Formula::from_latex(text.trim())?)
}

#[cfg(feature = "cli")]
fn run(command: Commands) -> FormulaResult<()> {
    match command {
        Commands::Latex { input } => {
            println!("{}", parse(input.as_deref())?.to_latex());
        }
        Commands::Expr { input, json } => {
            let formula = parse(input.as_deref())?;
            let compiled = ExprCompiler::new().compile(&formula);
            if json {
                let text = serde_json::to_string_pretty(&compiled)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
                println!("{}", text);
            } else {
                if !compiled.body.trim().is_empty() {
                    println!("{}", compiled.body.trim());
                }
                println!("{}", compiled.expr);
            }
        }
        Commands::Tree { input } => {
            print!("{}", parse(input.as_deref())?.debug_tree());
        }
        Commands::Classify { input } => {
            let formula = parse(input.as_deref())?;
            let row = Row::classify(&ExprCompiler::new().compile(&formula));
            println!("{}", row.kind_name());
            if let Some((lower, upper)) = row.slider_range() {
                println!("range: {} .. {}", lower, upper);
            }
            let definition = row.definition(0);
            if !definition.is_empty() {
                println!("{}", definition.trim_end());
            }
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install formulate --features cli");
    eprintln!("  formulate <latex|expr|tree|classify> [INPUT]");
}
