use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use talos::{expand_inputs, init_tracing_once, load_document, TalosParser};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse Reddit listing and post JSON pages into normalized records")]
struct Args {
    /// Host substituted into generated URLs (overrides TALOS_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one listing or post document and print the result.
    Parse {
        #[arg(default_value = "page.json")]
        file: PathBuf,

        /// Posts already seen before this listing page (number or text).
        #[arg(long, default_value = "0")]
        count: String,

        /// One of new, rising, controversial, top; omit for the default listing.
        #[arg(long)]
        sort_by: Option<String>,

        /// Single-line JSON instead of pretty output.
        #[arg(long, default_value_t = false)]
        compact: bool,
    },
    /// Parse many documents (files or directories) into one NDJSON file.
    Batch {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[arg(long)]
        out: PathBuf,

        /// Worker threads; defaults to all cores.
        #[arg(long)]
        jobs: Option<usize>,

        #[arg(long, default_value_t = false)]
        no_progress: bool,
    },
}

fn main() -> Result<()> {
    init_tracing_once();
    let args = Args::parse();

    let mut parser = TalosParser::from_env();
    if let Some(url) = &args.base_url {
        parser = parser.base_url(url);
    }

    match args.command {
        Command::Parse { file, count, sort_by, compact } => {
            let doc = load_document(&file)?;
            let parsed = parser.count(count).sort_by(sort_by).parse(&doc);
            let out = if compact {
                serde_json::to_string(&parsed)?
            } else {
                serde_json::to_string_pretty(&parsed)?
            };
            println!("{out}");
        }
        Command::Batch { inputs, out, jobs, no_progress } => {
            let files = expand_inputs(&inputs);
            let mut parser = parser.progress(!no_progress).progress_label("Parsing documents");
            if let Some(n) = jobs {
                parser = parser.parallelism(n);
            }
            let summary = parser
                .parse_files(files, &out)
                .with_context(|| format!("batch into {}", out.display()))?;
            println!(
                "{} documents ({} listings, {} posts), {} failures",
                summary.documents, summary.listings, summary.posts, summary.failures
            );
        }
    }
    Ok(())
}
