//! FD-014: BLAKE3 digests of stored documents and derived identifiers.

/// Hash a string. Returns `"blake3:{hex}"`.
pub fn hash_string(s: &str) -> String {
    format!("blake3:{}", blake3::hash(s.as_bytes()).to_hex())
}

/// Digest of a stored document; `None` hashes as the empty document.
pub fn document_digest(document: Option<&str>) -> String {
    hash_string(document.unwrap_or(""))
}

/// Hash several components with a separator so `["ab","c"]` != `["a","bc"]`.
/// Returns the bare hex digest.
pub fn composite_hex(components: &[&[u8]]) -> String {
    let mut hasher = blake3::Hasher::new();
    for c in components {
        hasher.update(c);
        hasher.update(b"\0");
    }
    hasher.finalize().to_hex().to_string()
}
