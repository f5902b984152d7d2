/// Computes the descriptor checksum over `token + timestamp`.
///
/// BLAKE3, lowercase hex. Obfuscation noise only: nothing verifies it.
pub fn descriptor_checksum(token: &str, timestamp: i64) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(token.as_bytes());
    hasher.update(timestamp.to_string().as_bytes());
    hasher.finalize().to_hex().to_string()
}
