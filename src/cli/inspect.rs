use crate::cipher::ChaCha20;

/// Render the state, block and keystream for one counter value
pub fn show_block(cipher: &ChaCha20, counter: u32) -> String {
    let state = cipher.init_state(counter);
    let block = cipher.block(counter);
    let keystream = cipher.keystream_block(counter);

    let mut output = String::new();
    output.push_str(&format!("ChaCha20 block {}\n", counter));
    output.push_str("==============================\n\n");

    output.push_str("Initial state:\n");
    output.push_str(&format_words(&state));
    output.push('\n');

    output.push_str("After 20 rounds + feed-forward:\n");
    output.push_str(&format_words(&block));
    output.push('\n');

    output.push_str("Keystream:\n");
    output.push_str(&format_bytes(&keystream, 16));
    output
}

/// Words as 8-digit hex, four per row
pub fn format_words(words: &[u32]) -> String {
    let mut out = String::new();
    for row in words.chunks(4) {
        let line: Vec<String> = row.iter().map(|w| format!("{:08x}", w)).collect();
        out.push_str("  ");
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Bytes as `0x..` tokens, `per_row` per line
pub fn format_bytes(data: &[u8], per_row: usize) -> String {
    let mut out = String::new();
    for row in data.chunks(per_row.max(1)) {
        let line: Vec<String> = row.iter().map(|b| format!("0x{:02x}", b)).collect();
        out.push_str("  ");
        out.push_str(&line.join(", "));
        out.push('\n');
    }
    out
}
