use rand::{rngs::OsRng, RngCore};

pub const SHORT_KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const SHORT_KEY_LENGTH: usize = 6;

// largest multiple of the alphabet size that fits in a byte
const ACCEPT_BELOW: u8 = (256 / SHORT_KEY_ALPHABET.len() * SHORT_KEY_ALPHABET.len()) as u8;

#[derive(Debug, thiserror::Error)]
#[error("secure random source failed: {0}")]
pub struct KeyGenError(#[from] rand::Error);

/// Draws a short key from the operating system's secure random source.
pub fn generate_short_key() -> Result<String, KeyGenError> {
    generate_short_key_with(&mut OsRng)
}

/// Rejection-samples random bytes so every alphabet character is equally
/// likely. A failing source is reported, never papered over.
pub fn generate_short_key_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, KeyGenError> {
    let mut key = String::with_capacity(SHORT_KEY_LENGTH);
    let mut buf = [0u8; 16];

    while key.len() < SHORT_KEY_LENGTH {
        rng.try_fill_bytes(&mut buf)?;
        for &byte in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if key.len() == SHORT_KEY_LENGTH {
                break;
            }
            key.push(SHORT_KEY_ALPHABET[byte as usize % SHORT_KEY_ALPHABET.len()] as char);
        }
    }

    Ok(key)
}

// escaping user text before it lands in an HTML page
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
