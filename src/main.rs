use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tweaks::config::BrowserConfig;
use tweaks::view::tweaks::{
    load_catalog, DetailRequest, DetailValue, FilteredCollection, SearchScope, SelectionOutcome,
    TweakBrowserState, TweakPresenter,
};

/// Search a tweak catalog and act on its tweaks
#[derive(Parser, Debug)]
#[command(name = "tweaks")]
#[command(about = "Search a tweak catalog from the command line", long_about = None)]
#[command(version)]
struct Args {
    /// Query to filter the catalog by
    #[arg(value_name = "QUERY", default_value = "")]
    query: String,

    /// Path to the catalog declaration (JSON)
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Match the query against collection or tweak names
    #[arg(long, value_enum)]
    scope: Option<ScopeArg>,

    /// Select a tweak by identifier before printing (may be repeated)
    #[arg(long, value_name = "IDENTIFIER")]
    select: Vec<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ScopeArg {
    Collection,
    Tweak,
}

impl From<ScopeArg> for SearchScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Collection => SearchScope::Collection,
            ScopeArg::Tweak => SearchScope::Tweak,
        }
    }
}

/// Presenter that reports host requests on stdout
struct ConsolePresenter;

impl TweakPresenter for ConsolePresenter {
    fn refresh_row(&mut self, identifier: &str) {
        println!("refresh {}", identifier);
    }

    fn present_detail(&mut self, request: DetailRequest) {
        let current = match &request.current {
            DetailValue::Number(n) => n.to_string(),
            DetailValue::Text(s) => format!("{:?}", s),
        };
        match &request.choices {
            Some(choices) => println!(
                "edit {} ({}) = {} of [{}]",
                request.identifier,
                request.kind,
                current,
                choices.join(", ")
            ),
            None => println!("edit {} ({}) = {}", request.identifier, request.kind, current),
        }
    }
}

fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_collection(filtered: &FilteredCollection<'_>) {
    println!("{}", filtered.name());
    for entry in &filtered.tweaks {
        let value = entry.tweak.value.display_value();
        let marker = if entry.tweak.is_modified() { "*" } else { "" };
        if value.is_empty() {
            println!("  {}{}", entry.tweak.name, marker);
        } else {
            println!("  {}{} = {}", entry.tweak.name, marker, value);
        }
    }
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BrowserConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BrowserConfig::default(),
    };

    if args.dump_config {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    init_tracing(&config.log_level);

    let catalog_path = args
        .catalog
        .as_ref()
        .context("A catalog is required (--catalog <PATH>)")?;
    let catalog = load_catalog(catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", catalog_path.display()))?;
    let mut state = TweakBrowserState::with_config(catalog, &config);
    if let Some(scope) = args.scope {
        state.set_scope(scope.into());
    }

    let mut presenter = ConsolePresenter;
    for identifier in &args.select {
        let outcome = state
            .select_identifier(identifier, &mut presenter)
            .with_context(|| format!("No tweak with identifier {}", identifier))?
            .with_context(|| format!("Failed to select {}", identifier))?;
        if let SelectionOutcome::Toggled(value) = outcome {
            tracing::info!("{} is now {}", identifier, value);
        }
    }

    state.set_search_query(args.query);
    for filtered in state.filtered() {
        print_collection(&filtered);
    }

    Ok(())
}
