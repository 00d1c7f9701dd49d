//! CSRF token extraction from play-page HTML.
//!
//! The play page embeds its anti-forgery token in one of three places:
//! a JSON blob in page scripts, a hidden form input, or a meta tag. The
//! first pattern that matches wins.

use once_cell::sync::Lazy;
use regex::Regex;

static JSON_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)csrf[_-]?token['"]\s*:\s*['"]([^'"]+)['"]"#).unwrap());

static HIDDEN_INPUT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)name\s*=\s*['"]_token['"][^>]*value\s*=\s*['"]([^'"]+)['"]"#).unwrap());

static META_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)content\s*=\s*['"]([^'"]+)['"][^>]*name\s*=\s*['"]csrf-token['"]"#).unwrap());

/// Extract the page's CSRF token, or an empty string when the page carries
/// none. An empty result is not an error; injection proceeds either way.
pub fn extract_csrf_token(html: &str) -> String {
    for pattern in [&*JSON_TOKEN, &*HIDDEN_INPUT_TOKEN, &*META_TOKEN] {
        if let Some(caps) = pattern.captures(html) {
            if let Some(token) = caps.get(1) {
                return token.as_str().to_string();
            }
        }
    }
    String::new()
}
