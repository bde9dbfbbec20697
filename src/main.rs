use clap::{Parser, Subcommand};
use parchacha::cli::{apply_file, generate_config, run_selftest, show_block, ApplyOptions};
use parchacha::{ChaChaError, ChaCha20, CounterPolicy, Key, Nonce, WorkerPool};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("PARCHACHA_VERSION");
const BUILD: &str = env!("PARCHACHA_BUILD");
const PROFILE: &str = env!("PARCHACHA_PROFILE");
const TARGET: &str = env!("PARCHACHA_TARGET");
const GIT_HASH: &str = env!("PARCHACHA_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        format!("{} {} build {} ({}, {})", PROFILE, VERSION, BUILD, GIT_HASH, TARGET)
    })
}

#[derive(Parser)]
#[command(name = "parchacha")]
#[command(author, about = "ChaCha20 stream cipher with a parallel block driver", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt or decrypt a file (the operation is its own inverse)
    #[command(alias = "a")]
    Apply {
        /// Input file
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// JSON config with key, nonce and counter
        #[arg(long)]
        config: Option<PathBuf>,

        /// Key as 64 hex characters
        #[arg(long)]
        key: Option<String>,

        /// Nonce as 24 hex characters
        #[arg(long)]
        nonce: Option<String>,

        /// Initial block counter
        #[arg(long)]
        counter: Option<u32>,

        /// Counter overflow handling: strict or wrapping
        #[arg(long, value_parser = parse_policy)]
        counter_policy: Option<CounterPolicy>,

        /// Compute blocks on a worker pool
        #[arg(long)]
        parallel: bool,

        /// Worker threads (defaults to available parallelism)
        #[arg(long)]
        workers: Option<usize>,

        /// Consecutive blocks handled by each job
        #[arg(long)]
        blocks_per_job: Option<usize>,
    },

    /// Generate a random key and nonce
    #[command(alias = "k")]
    Keygen {
        /// Write the config here instead of only printing it
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Initial block counter stored in the config
        #[arg(long, default_value = "1")]
        counter: u32,
    },

    /// Show state, block and keystream for one counter value
    #[command(alias = "b")]
    Block {
        /// Key as 64 hex characters
        #[arg(long)]
        key: String,

        /// Nonce as 24 hex characters
        #[arg(long)]
        nonce: String,

        /// Block counter
        #[arg(long, default_value = "1")]
        counter: u32,
    },

    /// Run the RFC 8439 known-answer tests through both drivers
    #[command(alias = "t")]
    Selftest {
        /// Worker threads for the parallel driver
        #[arg(long)]
        workers: Option<usize>,
    },
}

fn parse_policy(s: &str) -> Result<CounterPolicy, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.version {
        println!("parchacha {}", get_version());
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
        Commands::Apply {
            input,
            output,
            config,
            key,
            nonce,
            counter,
            counter_policy,
            parallel,
            workers,
            blocks_per_job,
        } => {
            let options = ApplyOptions {
                config,
                key,
                nonce,
                counter,
                counter_policy,
                parallel,
                workers,
                blocks_per_job,
            };
            apply_file(&input, &output, &options).map(|bytes| {
                println!("Wrote {} bytes to {}", bytes, output.display());
            })
        }

        Commands::Keygen { output, counter } => {
            generate_config(output.as_deref(), counter).map(|json| match output {
                Some(path) => println!("Wrote config to {}", path.display()),
                None => println!("{}", json),
            })
        }

        Commands::Block { key, nonce, counter } => Key::from_hex(&key)
            .and_then(|k| Nonce::from_hex(&nonce).map(|n| (k, n)))
            .map(|(k, n)| {
                let cipher = ChaCha20::from_parts(k, n, counter);
                print!("{}", show_block(&cipher, counter));
            }),

        Commands::Selftest { workers } => {
            let pool = match workers {
                Some(n) => WorkerPool::new(n),
                None => WorkerPool::with_available_parallelism(),
            };
            pool.and_then(|pool| run_selftest(&pool)).and_then(|report| {
                print!("{}", report);
                if report.passed() {
                    Ok(())
                } else {
                    Err(ChaChaError::SelfTestFailed(report.failures()))
                }
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
