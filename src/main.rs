use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tshare::cli::{join_files, show_info, split_file, JoinOptions, SplitOptions};
use tshare::stream::DEFAULT_BUFFER_SIZE;

/// Version info from build.rs
const VERSION: &str = env!("TSHARE_VERSION");
const BUILD: &str = env!("TSHARE_BUILD");
const PROFILE: &str = env!("TSHARE_PROFILE");
const GIT_HASH: &str = env!("TSHARE_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "tshare")]
#[command(author, about = "(2,3) threshold secret sharing", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file into three shares (<input>.s0, .s1, .s2)
    #[command(alias = "s")]
    Split {
        /// Secret file to split
        input: PathBuf,

        /// Directory for the share files (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Chunk size in bytes
        #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
        buffer_size: usize,
    },

    /// Recover a secret from two (or three) share files
    #[command(alias = "j")]
    Join {
        /// Output file for the recovered secret
        #[arg(short, long, required = true)]
        output: PathBuf,

        /// Share files
        #[arg(required = true, num_args = 2..=3)]
        shares: Vec<PathBuf>,

        /// Chunk size in bytes
        #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
        buffer_size: usize,
    },

    /// Show information about a share file
    #[command(alias = "i")]
    Info {
        /// Share file to inspect
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.version {
        println!("tshare {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Split {
            input,
            output_dir,
            buffer_size,
        } => {
            let options = SplitOptions {
                output_dir,
                buffer_size,
            };
            split_file(&input, &options).map(|paths| {
                for path in &paths {
                    println!("Wrote {}", path.display());
                }
            })
        }

        Commands::Join {
            output,
            shares,
            buffer_size,
        } => {
            let options = JoinOptions { buffer_size };
            join_files(&shares, &output, &options).map(|bytes| {
                println!("Recovered {} bytes to {}", bytes, output.display());
            })
        }

        Commands::Info { file, json } => show_info(&file).and_then(|info| {
            if json {
                println!("{}", info.to_json()?);
            } else {
                print!("{}", info);
            }
            Ok(())
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
