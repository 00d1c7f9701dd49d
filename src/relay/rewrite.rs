//! Playlist body rewriting.
//!
//! Playlist metadata replies embed absolute CDN URLs. Every one of them gets
//! pointed back at this relay's `/stream/` route so the player never talks
//! to the CDN directly.

use std::borrow::Cow;

use regex::Regex;

use crate::config::RelayConfig;

/// Rewrites CDN stream URLs into relay-relative ones.
///
/// The pattern matches `https://<single-label-subdomain>.<cdn-domain>/<path>`
/// where the path runs until a quote or whitespace, which covers URLs inside
/// JSON strings as well as bare playlist lines. Compiled once at startup.
#[derive(Debug)]
pub struct StreamRewriter {
    pattern: Regex,
    replacement: String,
}

impl StreamRewriter {
    pub fn new(config: &RelayConfig) -> Self {
        let pattern = Regex::new(&format!(
            r#"https://[^.]+\.{}/([^"'\s]+)"#,
            regex::escape(&config.upstream.cdn_domain)
        ))
        .expect("escaped domain always forms a valid pattern");
        let replacement = format!("{}/stream/$1", config.public_url);
        Self {
            pattern,
            replacement,
        }
    }

    /// Replace every CDN URL in `body`. Idempotent: rewritten URLs no longer
    /// mention the CDN domain as a host, so a second pass is a no-op.
    pub fn rewrite<'a>(&self, body: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(body, self.replacement.as_str())
    }
}
