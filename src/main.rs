use anyhow::Result;
use swipetodo::{config::Config, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    if let Some(path) = logger::setup_logging(&config.logging)? {
        eprintln!("Logging to {}", path.display());
    }

    if !config.ui.mouse_enabled {
        log::warn!("Mouse support is disabled; rows cannot be swiped");
    }

    ui::run_app(config).await
}
