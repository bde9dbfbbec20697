use crate::error::{ChaChaError, Result};

/// XOR `data` with the leading bytes of `keystream`
///
/// Empty data yields empty output. Data longer than the keystream is a driver
/// bug and is reported rather than truncated.
pub fn combine(data: &[u8], keystream: &[u8]) -> Result<Vec<u8>> {
    if data.len() > keystream.len() {
        return Err(ChaChaError::LengthMismatch {
            data: data.len(),
            keystream: keystream.len(),
        });
    }
    Ok(data.iter().zip(keystream).map(|(d, k)| d ^ k).collect())
}
