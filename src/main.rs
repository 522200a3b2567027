//! kinlink CLI: strong and fuzzy connections between user records.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::Result;

use kinlink::config::LinkerConfig;
use kinlink::error::LinkResult;
use kinlink::export::{LinkReport, graphs_to_dot, to_json_pretty, write_export};
use kinlink::graph::{ConnectionGraph, EdgeLabelPolicy};
use kinlink::ingest::load_records;
use kinlink::linker::Linker;
use kinlink::profile::{DEFAULT_PROFILE_FIELDS, most_common_values};
use kinlink::record::Field;
use kinlink::similarity::{matching_blocks, similarity};

#[derive(Parser)]
#[command(name = "kinlink", version, about = "Detect related user records")]
struct Cli {
    /// Log filter (e.g. "debug", "kinlink=trace"). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Dot,
}

#[derive(Subcommand)]
enum Commands {
    /// Find strong and fuzzy connections between records.
    Link {
        /// Records file (.json array or .csv with header row).
        #[arg(long)]
        file: PathBuf,

        /// Linker config (TOML).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Dedicated worker thread count.
        #[arg(long)]
        threads: Option<usize>,

        /// Evaluate pairs on a single thread.
        #[arg(long)]
        sequential: bool,

        /// Keep every label when a pair is connected more than once.
        #[arg(long)]
        accumulate_labels: bool,

        /// Write output to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the most common value of selected fields.
    Profile {
        /// Records file (.json array or .csv with header row).
        #[arg(long)]
        file: PathBuf,

        /// Comma-separated field names.
        #[arg(long, value_delimiter = ',')]
        fields: Vec<Field>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the similarity ratio of two strings.
    Similarity {
        a: String,
        b: String,

        /// Lower-case both inputs first, as the fuzzy rules do.
        #[arg(long)]
        ignore_case: bool,
    },
}

fn print_graph(title: &str, graph: &ConnectionGraph) -> String {
    let mut out = format!(
        "{title} ({} nodes, {} edges)\n",
        graph.node_count(),
        graph.edge_count()
    );
    for edge in graph.edges() {
        out.push_str(&format!("  {} -- {}  {}\n", edge.a, edge.b, edge.label()));
    }
    out
}

fn emit(content: &str, output: Option<&PathBuf>) -> LinkResult<()> {
    match output {
        Some(path) => write_export(path, content)?,
        None => print!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli.command)?;
    Ok(())
}

fn run(command: Commands) -> LinkResult<()> {
    match command {
        Commands::Link {
            file,
            config,
            format,
            threads,
            sequential,
            accumulate_labels,
            output,
        } => {
            let mut config = match config {
                Some(path) => LinkerConfig::load(&path)?,
                None => LinkerConfig::default(),
            };
            if threads.is_some() {
                config.threads = threads;
            }
            if sequential {
                config.parallel = false;
            }
            if accumulate_labels {
                config.edge_labels = EdgeLabelPolicy::Accumulate;
            }

            let records = load_records(&file)?;
            let linker = Linker::new(config)?;
            tracing::debug!(config = ?linker.config(), "linker ready");
            let run = linker.run(&records);

            let content = match format {
                OutputFormat::Json => LinkReport::new(records.len(), &run).to_json()?,
                OutputFormat::Dot => graphs_to_dot(&run),
                OutputFormat::Text => {
                    let mut text = print_graph("Strong connections", &run.graphs.strong);
                    text.push_str(&print_graph("Fuzzy connections", &run.graphs.fuzzy));
                    text.push_str(&format!(
                        "Evaluated {} pairs over {} records.\n",
                        run.connections.pairs_evaluated,
                        records.len()
                    ));
                    text
                }
            };
            emit(&content, output.as_ref())?;
        }

        Commands::Profile { file, fields, json } => {
            let records = load_records(&file)?;
            let fields = if fields.is_empty() {
                DEFAULT_PROFILE_FIELDS.to_vec()
            } else {
                fields
            };
            let frequencies = most_common_values(&records, &fields);

            if json {
                println!("{}", to_json_pretty(&frequencies)?);
            } else {
                println!("Most common values ({} records):", records.len());
                for f in &frequencies {
                    println!("  {:<14} {:<30} {}", f.property, f.value, f.frequency);
                }
            }
        }

        Commands::Similarity { a, b, ignore_case } => {
            let (a, b) = if ignore_case {
                (a.to_lowercase(), b.to_lowercase())
            } else {
                (a, b)
            };
            println!("ratio: {:.6}", similarity(&a, &b));
            for block in matching_blocks(&a, &b) {
                let text: String = a.chars().skip(block.a_start).take(block.len).collect();
                println!(
                    "  a[{}..{}] = b[{}..{}]  {text:?}",
                    block.a_start,
                    block.a_start + block.len,
                    block.b_start,
                    block.b_start + block.len
                );
            }
        }
    }

    Ok(())
}
