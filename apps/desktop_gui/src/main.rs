mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use list_core::config::load_settings;

use crate::ui::{ItemListApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Directory holding the local store file.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Record name the list is saved under.
    #[arg(long)]
    storage_key: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let startup = StartupConfig {
        data_dir: args.data_dir,
        storage_key: args.storage_key,
    };
    let settings = startup.apply(load_settings());
    tracing::info!(
        store = %settings.store_path().display(),
        key = %settings.storage_key,
        "starting shopping list"
    );
    let app = ItemListApp::new(&settings)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Shopping List")
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Shopping List",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("desktop gui exited with error: {err}"))
}
