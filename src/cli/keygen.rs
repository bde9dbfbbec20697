use crate::config::CipherConfig;
use crate::error::Result;
use std::path::Path;
use tracing::info;

/// Generate a random key and nonce
/// Writes the config to `output` when given; always returns the JSON text
pub fn generate_config(output: Option<&Path>, counter: u32) -> Result<String> {
    let mut config = CipherConfig::generate();
    config.counter = counter;

    let json = String::from_utf8_lossy(&config.to_bytes()?).into_owned();
    if let Some(path) = output {
        config.save(path)?;
        info!(path = %path.display(), "wrote cipher config");
    }
    Ok(json)
}
