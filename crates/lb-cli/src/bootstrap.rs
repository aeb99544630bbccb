use anyhow::Context;
use lb_config::LifeboatConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, the layered config, and apply `--model`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<LifeboatConfig> {
    let mut config = LifeboatConfig::load_with_dotenv(flags.config.as_deref())
        .context("failed to load lifeboat configuration")?;

    if let Some(model) = &flags.model {
        tracing::debug!(path = %model.display(), "model path overridden from command line");
        config.model.path.clone_from(model);
    }

    Ok(config)
}
