use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// Generate fake data for protobuf-style messages.
///
/// Loads a JSON message schema and emits populated instances of a chosen
/// message type as JSON lines, one instance per line.
#[derive(Parser)]
#[command(name = "proto-faker", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a schema document and cache it locally.
    #[cfg(feature = "download")]
    DownloadSchema {
        /// URL of the schema JSON document.
        #[arg(long, env = "PROTO_FAKER_SCHEMA_URL")]
        url: String,

        /// Output path for the cached schema.
        #[arg(long, default_value = "schema.json")]
        output: PathBuf,
    },

    /// Generate fake instances from a cached schema.
    Generate {
        /// Path to the schema JSON document.
        #[arg(long, default_value = "schema.json")]
        schema: PathBuf,

        /// Message type to generate instances of.
        #[arg(long)]
        message: String,

        /// Number of instances to generate.
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// RNG seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Minimum item count for repeated fields (inclusive).
        #[arg(long, default_value_t = 1)]
        min_repeated: usize,

        /// Maximum item count for repeated fields (exclusive).
        #[arg(long, default_value_t = 5)]
        max_repeated: usize,

        /// Suppress non-error output.
        #[arg(long, short)]
        quiet: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> proto_faker::error::Result<()> {
    match cli.command {
        #[cfg(feature = "download")]
        Commands::DownloadSchema { url, output } => {
            let rt = tokio::runtime::Runtime::new()
                .map_err(|e| proto_faker::error::Error::Schema(e.to_string()))?;
            rt.block_on(proto_faker::schema::download_schema(&url, &output))?;
        }

        Commands::Generate {
            schema,
            message,
            count,
            seed,
            min_repeated,
            max_repeated,
            quiet,
        } => {
            if !quiet {
                eprintln!("Loading schema from {}", schema.display());
            }
            let schema = proto_faker::schema::load_schema(&schema)?;
            if !quiet {
                eprintln!("Loaded {} message types", schema.len());
            }

            let mut faker = proto_faker::ProtoFaker::new(&schema, &message)?
                .with_repeated_count(min_repeated, max_repeated);
            if let Some(seed) = seed {
                faker = faker.with_seed(seed);
            }

            for instance in faker.fakes(count)? {
                println!("{}", instance.to_json());
            }

            if !quiet {
                eprintln!("Generated {count} instances of '{message}'");
            }
        }
    }

    Ok(())
}
