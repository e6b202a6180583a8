use clap::{Parser, Subcommand};
use std::path::PathBuf;
use waitakere_trails::catalog::Catalog;
use waitakere_trails::generate::{self, GenerateError};
use waitakere_trails::search::DurationBucket;
use waitakere_trails::trail::Difficulty;
use waitakere_trails::view::{Action, Panel, ViewState};
use waitakere_trails::{config, output, pages};

/// Shared flags for commands that write the site.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the build manifest and rewrite every page
    #[arg(long)]
    no_cache: bool,
}

#[derive(clap::Args, Clone)]
struct SearchArgs {
    /// Text matched against trail names and descriptions (case-insensitive)
    #[arg(default_value = "")]
    term: String,

    /// Only trails of this difficulty (Easy, Moderate, Challenging, Expert)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Only trails in this duration bucket (short, medium, long)
    #[arg(long)]
    duration: Option<DurationBucket>,

    /// Print matching trails as JSON instead of a listing
    #[arg(long)]
    json: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "waitakere-trails")]
#[command(about = "Hiking trail directory and static site generator for the Waitākere Ranges")]
#[command(long_about = "\
Hiking trail directory and static site generator for the Waitākere Ranges

The built-in catalog holds twenty trails. A content directory can restyle
the site, replace the catalog, add trails, and override the Safety and
Planning pages.

Content structure (every entry optional):

  content/
  ├── config.toml                  # Site config (run 'gen-config' for all options)
  ├── safety.md                    # Replaces the built-in Safety page
  ├── planning.md                  # Replaces the built-in Planning page
  ├── assets/                      # Copied verbatim to the output root
  └── trails/                      # Extra trails, one per file
      ├── 010-test-ridge.toml      # id defaults to 'test-ridge'
      └── summit-loop.toml         # unnumbered files sort last

Search semantics:
  Term:        case-insensitive substring of name or description
  Difficulty:  exact match
  Duration:    short  = \"min\" | \"1 hour\" | \"30 minutes\"
               medium = \"2\" | \"3\" | \"1.5\"
               long   = \"4\" | \"5\" | \"6\" | \"7\" | \"day\"
               (substring tests on the published text, buckets can overlap)")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the static site
    Build(CacheArgs),
    /// Filter trails by term, difficulty and duration
    Search(SearchArgs),
    /// Show every detail of one trail
    Show {
        /// Trail id, e.g. hillary-trail
        id: String,
    },
    /// Validate config, catalog and pages without building
    Check,
    /// Print the catalog as JSON
    Export,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(cache_args) => {
            let config = config::load_config(&cli.source)?;
            init_thread_pool(&config.processing);
            println!(
                "==> Building {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_generate_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = generate::generate(
                &cli.source,
                &cli.output,
                &config,
                !cache_args.no_cache,
                Some(tx),
            );
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_generate_summary(&result?);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Search(args) => {
            let config = config::load_config(&cli.source)?;
            let catalog = Catalog::load(&cli.source, &config.catalog)?;
            let state = ViewState::at(Panel::Trails)
                .apply(Action::SetTerm(args.term))
                .apply(Action::SetDifficulty(args.difficulty))
                .apply(Action::SetDuration(args.duration));
            let results = state.visible_trails(&catalog);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                output::print_search_results(&results, catalog.len(), &state.query);
            }
        }
        Command::Show { id } => {
            let config = config::load_config(&cli.source)?;
            let catalog = Catalog::load(&cli.source, &config.catalog)?;
            let state = ViewState::at(Panel::Trails).apply(Action::SelectTrail(id.clone()));
            let trail = state
                .selected_trail(&catalog)
                .ok_or(GenerateError::UnknownTrail(id))?;
            output::print_trail_detail(trail);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let config = config::load_config(&cli.source)?;
            let catalog = Catalog::load(&cli.source, &config.catalog)?;
            let featured = generate::featured_trails(&catalog, &config)?;
            let panels = pages::load_panel_pages(&cli.source)?;
            output::print_check_output(&catalog, &featured, &panels, &config, &cli.source);
            println!("==> Content is valid");
        }
        Command::Export => {
            let config = config::load_config(&cli.source)?;
            let catalog = Catalog::load(&cli.source, &config.catalog)?;
            println!("{}", catalog.to_json()?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
