//! Gravatar avatar URLs.

use sha2::{Digest, Sha256};

/// Returns the Gravatar image URL for `email`, falling back to an identicon.
///
/// The email is trimmed and lowercased before hashing.
pub fn gravatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?d=identicon",
        hex::encode(digest)
    )
}
