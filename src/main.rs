//! Interactive review sentiment classifier.

use sentirev::app;
use sentirev::config;
use sentirev::logging;
use sentirev::model::{MlContext, ModelManager};
use sentirev::session::Console;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = config::load_or_default()?;
    let paths = config.resolve_paths()?;
    let ctx = MlContext::from_config(&config);
    let manager = ModelManager::new(&ctx, paths.training_data.clone(), paths.model.clone());
    let mut console = Console::stdio();

    let outcome = app::run(&manager, &paths, &mut console)?;
    tracing::info!("Session finished: {outcome:?}");
    Ok(())
}
