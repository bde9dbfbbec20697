use crate::cipher::ChaCha20;
use crate::driver::WorkerPool;
use crate::error::Result;
use crate::params::{Key, Nonce};
use crate::vectors::{CipherVector, ALL};
use std::fmt;
use tracing::warn;

/// Outcome of one vector through one driver
#[derive(Debug, Clone)]
pub struct VectorResult {
    pub name: &'static str,
    pub driver: &'static str,
    pub passed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SelfTestReport {
    pub results: Vec<VectorResult>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.results {
            let status = if r.passed { "ok" } else { "FAILED" };
            writeln!(f, "{:<32} {:<10} {}", r.name, r.driver, status)?;
        }
        writeln!(
            f,
            "\n{} checks, {} failed",
            self.results.len(),
            self.failures()
        )
    }
}

/// Run every known-answer vector through both drivers
pub fn run_selftest(pool: &WorkerPool) -> Result<SelfTestReport> {
    let mut report = SelfTestReport::default();
    for vector in ALL.iter() {
        let cipher = vector_cipher(vector)?;
        let expected = hex::decode(vector.ciphertext)?;

        let sequential = cipher.cipher(vector.plaintext)?;
        let parallel = cipher.cipher_parallel(pool, vector.plaintext)?;
        let inverse = cipher.cipher(&expected)?;

        for (driver, passed) in [
            ("sequential", sequential == expected),
            ("parallel", parallel == expected),
            ("inverse", inverse == vector.plaintext),
        ] {
            if !passed {
                warn!(vector = vector.name, driver, "known-answer test failed");
            }
            report.results.push(VectorResult {
                name: vector.name,
                driver,
                passed,
            });
        }
    }
    Ok(report)
}

fn vector_cipher(vector: &CipherVector) -> Result<ChaCha20> {
    Ok(ChaCha20::from_parts(
        Key::from_hex(vector.key)?,
        Nonce::from_hex(vector.nonce)?,
        vector.counter,
    ))
}
