use anyhow::Result;
use clap::{Parser, Subcommand};
use dircache::areas::inspector::Inspector;
use std::path::PathBuf;

const DEFAULT_INDEX_PATH: &str = ".git/index";

#[derive(Parser)]
#[command(
    name = "dircache",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Decode and verify Git index files",
    long_about = "This tool reads a Git index (the staging area, usually .git/index), \
    verifies its trailing SHA-1 checksum and prints what it contains. \
    Set RUST_LOG (e.g. RUST_LOG=dircache=debug) to trace the decoding.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "show",
        about = "Print every decoded field of an index file",
        long_about = "This command prints the header, entries, extensions and checksum of an index file. \
        Unknown extensions are printed as a hex dump."
    )]
    Show {
        #[arg(index = 1, default_value = DEFAULT_INDEX_PATH, help = "The path to the index file")]
        path: PathBuf,
        #[arg(short, long, help = "Write the output to this file instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(
        name = "ls-files",
        about = "List the paths staged in an index file",
        long_about = "This command lists staged paths in index order. \
        With --stage the output matches `git ls-files --stage`."
    )]
    LsFiles {
        #[arg(index = 1, default_value = DEFAULT_INDEX_PATH, help = "The path to the index file")]
        path: PathBuf,
        #[arg(short, long, help = "Show mode, object id and stage of every entry")]
        stage: bool,
    },
    #[command(
        name = "verify",
        about = "Check the integrity of an index file",
        long_about = "This command decodes an index file and checks its trailing SHA-1 checksum. \
        It exits with a non-zero status if the file is corrupt or malformed."
    )]
    Verify {
        #[arg(index = 1, default_value = DEFAULT_INDEX_PATH, help = "The path to the index file")]
        path: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dircache=warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Commands::Show { path, output } => {
            let inspector = Inspector::new(path, Box::new(std::io::stdout()));
            inspector.show(output.as_deref())?
        }
        Commands::LsFiles { path, stage } => {
            let inspector = Inspector::new(path, Box::new(std::io::stdout()));
            inspector.ls_files(*stage)?
        }
        Commands::Verify { path } => {
            let inspector = Inspector::new(path, Box::new(std::io::stdout()));
            inspector.verify()?
        }
    }

    Ok(())
}
