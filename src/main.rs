mod config;
mod engine;
mod model;
mod storage;
mod ui;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::engine::session::Session;
use crate::model::world::World;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, SaveManager};

fn main() -> eframe::Result<()> {
    let config_path = AppConfig::default_path();
    let loaded = AppConfig::load_from(&config_path);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_tracing(&config.log_filter);
    info!(config = %config_path.display(), "=== text_rpg startup ===");
    if let Err(err) = &loaded {
        warn!(error = ?err, "config_unreadable_using_defaults");
    }

    let world = config.load_world().unwrap_or_else(|err| {
        warn!(error = ?err, "world_unreadable_using_builtin");
        World::builtin()
    });

    let storage_dir = config.storage_dir();
    let store: Box<dyn KeyValueStore> = match FileStore::open(&storage_dir) {
        Ok(store) => {
            info!(path = %store.root().display(), "save_storage_ready");
            Box::new(store)
        }
        Err(err) => {
            warn!(error = %err, "save_storage_unavailable_saves_will_not_persist");
            Box::new(MemoryStore::default())
        }
    };

    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let session = Session::new(world, SaveManager::new(store), rng);
    let settings = ui::settings_io::load_settings();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Text RPG")
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Text RPG",
        options,
        Box::new(move |cc| Ok(Box::new(ui::app::TextRpgApp::new(cc, session, settings)))),
    )
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
