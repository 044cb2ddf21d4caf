//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::ClientConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the store cannot read or parse its file.
pub fn load_config(store: &impl ConfigStore) -> Result<ClientConfig> {
    let config = store.load()?;
    tracing::debug!(
        default_remote = %config.default_remote,
        remotes = config.remotes.len(),
        "loaded client configuration"
    );
    Ok(config)
}
