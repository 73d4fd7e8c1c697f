use std::path::PathBuf;
use std::process;

use clap::Parser;
use static_hash_index::*;

#[derive(Parser)]
#[command(
    name = "static_hash_index",
    about = "Static hash index over paged word lists, compared against a table scan"
)]
struct Cli {
    /// Interactive prompt instead of reading commands from stdin.
    #[arg(long)]
    repl: bool,

    /// Word list to load (one word per line).
    #[arg(long, value_name = "PATH")]
    words: Option<PathBuf>,

    /// Directory searched for words_alpha.txt when --words is not given.
    #[arg(long = "base-dir", value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Records per page used by BUILD without a size.
    #[arg(long = "page-size", default_value_t = 100, allow_negative_numbers = true)]
    page_size: i64,

    /// Bucket fill capacity (FR).
    #[arg(long = "bucket-fill", default_value_t = 8, allow_negative_numbers = true)]
    bucket_fill: i64,
}

fn config_from(cli: &Cli) -> Result<IndexConfig, ConfigError> {
    let mut config = IndexConfig::new()
        .set_page_size(cli.page_size)?
        .set_bucket_fill(cli.bucket_fill)?;
    if let Some(words) = &cli.words {
        config = config.set_words_path(words);
    }
    if let Some(dir) = &cli.base_dir {
        config = config.set_base_dir(dir);
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = match config_from(&cli).and_then(setup_session) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(2);
        }
    };

    if cli.repl {
        run_repl(session).await;
    } else if let Err(err) = process_from_stdin(session).await {
        tracing::error!(%err, "command processing stopped");
        process::exit(1);
    }
    // The blocking stdin read may still be parked; the runtime would wait on it.
    process::exit(0);
}
