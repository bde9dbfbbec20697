use crate::config::CipherConfig;
use crate::error::{ChaChaError, Result};
use crate::params::CounterPolicy;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Options for the apply command
/// Flags given here override the matching fields of `config`
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub config: Option<PathBuf>,
    pub key: Option<String>,
    pub nonce: Option<String>,
    pub counter: Option<u32>,
    pub counter_policy: Option<CounterPolicy>,
    pub parallel: bool,
    pub workers: Option<usize>,
    pub blocks_per_job: Option<usize>,
}

impl ApplyOptions {
    /// Merge the config file (if any) with the command-line overrides
    pub fn resolve(&self) -> Result<CipherConfig> {
        let mut config = match &self.config {
            Some(path) => CipherConfig::load(path)?,
            None => {
                let (Some(key), Some(nonce)) = (&self.key, &self.nonce) else {
                    return Err(ChaChaError::InvalidConfig(
                        "either --config or both --key and --nonce are required".into(),
                    ));
                };
                CipherConfig {
                    key: key.clone(),
                    nonce: nonce.clone(),
                    counter: 1,
                    counter_policy: CounterPolicy::default(),
                    workers: None,
                    blocks_per_job: 1,
                }
            }
        };

        if let Some(key) = &self.key {
            config.key = key.clone();
        }
        if let Some(nonce) = &self.nonce {
            config.nonce = nonce.clone();
        }
        if let Some(counter) = self.counter {
            config.counter = counter;
        }
        if let Some(policy) = self.counter_policy {
            config.counter_policy = policy;
        }
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        if let Some(blocks) = self.blocks_per_job {
            config.blocks_per_job = blocks;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Apply the keystream to `input_path` and write the result to `output_path`
/// Encryption and decryption are the same operation
/// Returns the number of bytes processed
pub fn apply_file(input_path: &Path, output_path: &Path, options: &ApplyOptions) -> Result<usize> {
    let config = options.resolve()?;
    let cipher = config.to_cipher()?;
    let input = std::fs::read(input_path)?;

    let start = Instant::now();
    let output = if options.parallel {
        let pool = config.worker_pool()?;
        cipher.cipher_parallel(&pool, &input)?
    } else {
        cipher.cipher(&input)?
    };
    info!(
        bytes = input.len(),
        parallel = options.parallel,
        elapsed = ?start.elapsed(),
        "keystream applied"
    );

    std::fs::write(output_path, &output)?;
    Ok(output.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors::{SEQUENTIAL_KEY, SUNSCREEN};
    use tempfile::tempdir;

    fn rfc_options() -> ApplyOptions {
        ApplyOptions {
            key: Some(SEQUENTIAL_KEY.into()),
            nonce: Some(SUNSCREEN.nonce.into()),
            counter: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("plain.txt");
        let sealed = dir.path().join("plain.txt.cc20");
        let output = dir.path().join("recovered.txt");
        std::fs::write(&input, SUNSCREEN.plaintext).unwrap();

        let opts = rfc_options();
        assert_eq!(apply_file(&input, &sealed, &opts).unwrap(), SUNSCREEN.plaintext.len());
        assert_eq!(
            hex::encode(std::fs::read(&sealed).unwrap()),
            SUNSCREEN.ciphertext
        );

        apply_file(&sealed, &output, &opts).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), SUNSCREEN.plaintext);
    }

    #[test]
    fn test_parallel_apply_matches_sequential() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("data.bin");
        let seq_out = dir.path().join("seq.bin");
        let par_out = dir.path().join("par.bin");
        let data: Vec<u8> = (0..5000).map(|i| (i % 253) as u8).collect();
        std::fs::write(&input, &data).unwrap();

        apply_file(&input, &seq_out, &rfc_options()).unwrap();
        let parallel = ApplyOptions {
            parallel: true,
            workers: Some(3),
            blocks_per_job: Some(4),
            ..rfc_options()
        };
        apply_file(&input, &par_out, &parallel).unwrap();

        assert_eq!(std::fs::read(&seq_out).unwrap(), std::fs::read(&par_out).unwrap());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("params.json");
        let mut config = CipherConfig::generate();
        config.counter = 5;
        config.save(&config_path).unwrap();

        let opts = ApplyOptions {
            config: Some(config_path),
            counter: Some(9),
            ..Default::default()
        };
        let resolved = opts.resolve().unwrap();
        assert_eq!(resolved.counter, 9);
        assert_eq!(resolved.key, config.key);
    }

    #[test]
    fn test_missing_key_material() {
        let opts = ApplyOptions {
            key: Some(SEQUENTIAL_KEY.into()),
            ..Default::default()
        };
        assert!(matches!(opts.resolve(), Err(ChaChaError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_key_rejected_before_io() {
        let dir = tempdir().unwrap();
        let opts = ApplyOptions {
            key: Some("00ff".into()),
            nonce: Some(SUNSCREEN.nonce.into()),
            ..Default::default()
        };
        let result = apply_file(&dir.path().join("missing"), &dir.path().join("out"), &opts);
        assert!(matches!(result, Err(ChaChaError::InvalidKeyLength { .. })));
    }
}
