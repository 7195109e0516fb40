use sha2::{Digest, Sha256};

/// SHA-256 of `data` as lowercase hex. Used to log file content before and
/// after a rewrite.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_bytes() {
        let hash = hash_bytes(b"export class ChatSocket {}");
        assert_eq!(hash.len(), 64); // SHA-256 produces 64 hex chars
    }

    #[test]
    fn same_input_same_hash() {
        let hash1 = hash_bytes(b"connect(): void {}\n");
        let hash2 = hash_bytes(b"connect(): void {}\n");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn changed_content_changes_hash() {
        let hash1 = hash_bytes(b"getToken() {}");
        let hash2 = hash_bytes(b"getToken() { return null; }");
        assert_ne!(hash1, hash2);
    }
}
