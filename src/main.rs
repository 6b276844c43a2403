mod action;
mod app;
mod cache;
mod cli;
mod components;
mod config;
mod diff;
mod event;
mod highlight;
mod input;
mod logging;
mod state;
mod theme;
mod tui;
mod viewer;
mod viewport;

use anyhow::Result;
use clap::Parser;

use crate::app::App;
use crate::cli::Cli;
use crate::highlight::HighlightEngine;
use crate::state::DiffViewMode;
use crate::theme::Theme;
use crate::viewer::DiffViewer;

/// Rows rendered beyond each edge of the visible area unless configured.
const DEFAULT_OVERSCAN: usize = 20;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restore so the user gets their shell back
        tui::restore();
        default_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install().ok();
    install_panic_hook();

    let cli = Cli::parse();
    logging::init()?;

    let inputs = input::load(&cli, &mut std::io::stdin().lock())?;

    // Load config, apply CLI overrides
    let mut config = config::load_config();
    if let Some(ref theme_name) = cli.theme {
        config.theme = Theme::from_name(theme_name);
    }
    let unified = cli.unified || config.unified.unwrap_or(false);
    let overscan = cli.overscan.or(config.overscan).unwrap_or(DEFAULT_OVERSCAN);
    let highlight = !cli.no_highlight && config.highlight.unwrap_or(true);
    let old_title = cli.old_title.or(config.old_title).unwrap_or(inputs.old_title);
    let new_title = cli.new_title.or(config.new_title).unwrap_or(inputs.new_title);

    log::info!(
        "comparing {old_title} with {new_title} (language {:?}, overscan {overscan})",
        inputs.language
    );

    let mut viewer = DiffViewer::new(DiffViewMode::from_unified_flag(unified), overscan);
    if highlight {
        viewer = viewer.with_highlighter(Box::new(HighlightEngine::new()));
    }
    viewer.set_texts(inputs.old_text, inputs.new_text);
    viewer.set_language(inputs.language);
    viewer.set_titles(Some(old_title), Some(new_title));

    let mut app = App::new(viewer, config.theme, true);

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal).await;
    tui::restore();

    if let Err(ref e) = result {
        eprintln!("pairdiff: {e:#}");
    }

    result
}
