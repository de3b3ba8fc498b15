//! ID generation for toeic entities
//!
//! IDs are short and typeable so they can be passed on the command line.
//! Format: <prefix>-xxxxxx (6 lowercase Crockford base32 chars)

use sha2::{Digest, Sha256};
use uuid::Uuid;

const HASH_CHARS: usize = 6;

/// Generate a unique entity ID
///
/// Uses UUID + timestamp hash, encoded as base32 lowercase.
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4();
    let timestamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);

    let mut hasher = Sha256::new();
    hasher.update(uuid.as_bytes());
    hasher.update(timestamp.to_le_bytes());

    let hash = hasher.finalize();

    // 4 bytes = 32 bits, enough for 6 base32 chars (30 bits)
    let encoded = base32::encode(base32::Alphabet::Crockford, &hash[..4])
        .to_lowercase()
        .chars()
        .take(HASH_CHARS)
        .collect::<String>();

    format!("{}-{}", prefix, encoded)
}

/// Generate an ID that is not already taken
pub fn generate_unique_id<F>(prefix: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_id(prefix);
        if !taken(&id) {
            return id;
        }
    }
}
