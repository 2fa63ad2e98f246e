//! nbcli - Runs notebook cells against the built-in command modules.
//!
//! A cell is read from a file or stdin and executed the way a notebook cell
//! magic would execute it, optionally seeded with a namespace file.

use std::{
    error::Error,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use tracing::{debug, error};

use nbcli::{
    cli::{
        CommandLineInterface, ConsoleOutput, HandlerError, Outcome,
        formatting::{format_command, format_error, format_header},
    },
    config::Config,
    namespace::Namespace,
    sample,
    session::Session,
    tracing_config,
};

#[derive(Parser)]
#[command(name = "nbcli")]
#[command(about = "Run notebook cell commands from the terminal")]
struct Cli {
    /// Configuration file to use instead of the default location.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one cell: the first line is the command, the rest its content.
    Run {
        /// File holding the cell; stdin when omitted.
        file: Option<PathBuf>,

        /// JSON, TOML or YAML file seeding the namespace.
        #[arg(short, long)]
        namespace: Option<PathBuf>,

        /// Print the namespace as JSON after the cell ran.
        #[arg(long)]
        dump: bool,
    },
    /// Show help for a command path.
    Help {
        /// Group and command names, e.g. `foo create`.
        path: Vec<String>,
    },
    /// List every available command.
    List,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{}", format_error(&format!("Error: {e}")));
            process::exit(1);
        }
    }
}

/// Runs the selected subcommand, returning whether it succeeded.
fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    tracing_config::init(config.general.log_level)?;
    debug!(?config, "Loaded configuration");

    let interface = CommandLineInterface::from_modules(
        "nbcli",
        sample::MODULES,
        Some("Commands for working with foo resources"),
    )?
    .with_output(ConsoleOutput::new(config.output.color))
    .with_magic_prefix(&config.output.magic_prefix);

    match cli.command {
        Commands::Run {
            file,
            namespace,
            dump,
        } => {
            let namespace = match namespace {
                Some(path) => Namespace::load(&path)?,
                None => Namespace::new(),
            };
            let cell = read_cell(file.as_deref())?;

            let mut session = Session::new(interface, namespace);
            let succeeded = execute(|| session.run_cell(&cell));

            if dump {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&session.namespace().to_value())?
                );
            }
            Ok(succeeded)
        }
        Commands::Help { path } => {
            let line = format!("{} --help", shell_words::join(&path));
            let mut session = Session::new(interface, Namespace::new());
            Ok(execute(|| session.run_line(&line)))
        }
        Commands::List => {
            println!("{}", format_header("Available commands:"));
            for command in interface.root().list_commands() {
                println!("  {}", format_command(&command));
            }
            Ok(true)
        }
    }
}

fn read_cell(file: Option<&Path>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut cell = String::new();
            io::stdin().read_to_string(&mut cell)?;
            Ok(cell)
        }
    }
}

/// Runs one execution, reporting handler faults. Engine failures have
/// already been reported by the interface.
fn execute(run: impl FnOnce() -> Result<Outcome, HandlerError>) -> bool {
    match run() {
        Ok(outcome) => !outcome.is_failure(),
        Err(fault) => {
            error!(%fault, "Command failed");
            eprintln!("{}", format_error(&format!("Error: {fault}")));
            false
        }
    }
}
