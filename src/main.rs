use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use snail_navigator::SnailNavigatorApp;
use snail_navigator::prefs::PreferenceStore;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// RDF file path or file://, http:// or https:// URI to open at start-up
    uri: Option<String>,

    /// Preferences file holding the recent URI list
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Seed for the random initial placement of the graph layout
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "snail_navigator=info".into()))
        .with(fmt::layer())
        .init();

    let args = Args::parse();
    let prefs = open_preferences(args.prefs);
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Snail Navigator",
        options,
        Box::new(move |cc| {
            Ok(Box::new(SnailNavigatorApp::new(
                cc,
                prefs,
                args.seed,
                args.uri.clone(),
            )))
        }),
    )
}

fn open_preferences(path: Option<PathBuf>) -> PreferenceStore {
    let path = path
        .or_else(PreferenceStore::default_path)
        .unwrap_or_else(|| PathBuf::from("snail-navigator-prefs.json"));

    PreferenceStore::open(&path).unwrap_or_else(|error| {
        warn!(error = %format!("{error:#}"), "ignoring unreadable preferences");
        PreferenceStore::empty(path)
    })
}
