//! Outbound target URL construction.
//!
//! Pure functions from an inbound path to the single upstream URL it maps
//! to. Keeping these free of I/O makes the mapping rules directly testable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::UpstreamConfig;

/// Edge subdomain every `i-cdn-*` stream resolves to. The numeric suffix in
/// the path never varies the host.
const FIXED_CDN_SUBDOMAIN: &str = "cdn30092";

/// Subdomain used when a stream path matches neither known shape.
const FALLBACK_ARCH_SUBDOMAIN: &str = "i-arch-400";

static CDN_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^stream2/(i-cdn-\d+)/(.*)").unwrap());
static ARCH_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^stream2/(i-arch-\d+)/(.*)").unwrap());

/// Target for playlist forwarding.
pub fn playlist_url(upstream: &UpstreamConfig, filename: &str) -> String {
    format!("{}/playlist/{}", upstream.video_origin, filename)
}

/// Target for play-page fetches.
pub fn play_page_url(upstream: &UpstreamConfig, id: &str) -> String {
    format!("{}/play/{}", upstream.video_origin, id)
}

/// Target for playlist initiation on the CDN side.
pub fn playlist_initiation_url(upstream: &UpstreamConfig, filename: &str) -> String {
    format!("{}/playlist/{}", upstream.cdn_playlist_origin, filename)
}

/// Resolved CDN target for a `/stream/` remainder.
///
/// `matched` records whether the path fit one of the known shapes. The
/// fallback target is a guess, so its upstream misses are forwarded as-is
/// instead of being treated as relay failures.
#[derive(Debug, PartialEq, Eq)]
pub struct StreamTarget {
    pub url: String,
    pub matched: bool,
}

/// Resolve a `/stream/` remainder to its CDN target.
///
/// Three shapes, checked in order:
/// - `stream2/i-cdn-N/rest` pins the host to the fixed edge subdomain while
///   keeping the `i-cdn-N` segment in the path
/// - `stream2/i-arch-N/rest` uses `i-arch-N` as both subdomain and segment
/// - anything else is retried under the fallback archive subdomain with the
///   whole remainder appended
pub fn stream_url(upstream: &UpstreamConfig, stream_path: &str) -> StreamTarget {
    if let Some(caps) = CDN_SHAPE.captures(stream_path) {
        return StreamTarget {
            url: format!(
                "{}/stream2/{}/{}",
                upstream.stream_base(FIXED_CDN_SUBDOMAIN),
                &caps[1],
                &caps[2]
            ),
            matched: true,
        };
    }
    if let Some(caps) = ARCH_SHAPE.captures(stream_path) {
        return StreamTarget {
            url: format!(
                "{}/stream2/{}/{}",
                upstream.stream_base(&caps[1]),
                &caps[1],
                &caps[2]
            ),
            matched: true,
        };
    }
    StreamTarget {
        url: format!(
            "{}/stream2/{}/{}",
            upstream.stream_base(FALLBACK_ARCH_SUBDOMAIN),
            FALLBACK_ARCH_SUBDOMAIN,
            stream_path
        ),
        matched: false,
    }
}

/// Target for the catch-all passthrough. Paths opening with `/~` are escaped
/// playlist filenames; only the slash is stripped, the `~` stays part of the
/// upstream filename. `query` is the raw query string without the `?`.
pub fn passthrough_url(upstream: &UpstreamConfig, path: &str, query: Option<&str>) -> String {
    let query = match query {
        Some(q) => format!("?{q}"),
        None => String::new(),
    };
    if path.starts_with("/~") {
        let filename = &path[1..];
        format!("{}/playlist/{}{}", upstream.video_origin, filename, query)
    } else {
        format!("{}{}{}", upstream.video_origin, path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream() -> UpstreamConfig {
        UpstreamConfig::default()
    }

    #[test]
    fn test_playlist_url_targets_video_host() {
        assert_eq!(
            playlist_url(&upstream(), "master.txt"),
            "https://himer365ery.com/playlist/master.txt"
        );
    }

    #[test]
    fn test_play_page_url_targets_video_host() {
        assert_eq!(
            play_page_url(&upstream(), "tt0111161"),
            "https://himer365ery.com/play/tt0111161"
        );
    }

    #[test]
    fn test_playlist_initiation_url_targets_cdn_apex() {
        assert_eq!(
            playlist_initiation_url(&upstream(), "file.txt"),
            "https://jeyna376dip.com/playlist/file.txt"
        );
    }

    #[test]
    fn test_cdn_shape_pins_fixed_subdomain() {
        let target = stream_url(&upstream(), "stream2/i-cdn-42/seg1.ts");
        assert_eq!(
            target.url,
            "https://cdn30092.jeyna376dip.com/stream2/i-cdn-42/seg1.ts"
        );
        assert!(target.matched);
    }

    #[test]
    fn test_arch_shape_reuses_segment_as_subdomain() {
        let target = stream_url(&upstream(), "stream2/i-arch-7/seg1.ts");
        assert_eq!(
            target.url,
            "https://i-arch-7.jeyna376dip.com/stream2/i-arch-7/seg1.ts"
        );
        assert!(target.matched);
    }

    #[test]
    fn test_unrecognized_shape_falls_back_to_archive_subdomain() {
        let target = stream_url(&upstream(), "foo/bar.ts");
        assert_eq!(
            target.url,
            "https://i-arch-400.jeyna376dip.com/stream2/i-arch-400/foo/bar.ts"
        );
        assert!(!target.matched);
    }

    #[test]
    fn test_empty_stream_path_still_builds_fallback_target() {
        let target = stream_url(&upstream(), "");
        assert_eq!(
            target.url,
            "https://i-arch-400.jeyna376dip.com/stream2/i-arch-400/"
        );
        assert!(!target.matched);
    }

    #[test]
    fn test_cdn_shape_requires_numeric_suffix() {
        let target = stream_url(&upstream(), "stream2/i-cdn-/x.ts");
        assert!(target.url.starts_with("https://i-arch-400."));
        assert!(!target.matched);
    }

    #[test]
    fn test_stream_base_override_collapses_subdomains() {
        let local = UpstreamConfig {
            cdn_stream_base: Some("http://127.0.0.1:4100".to_string()),
            ..UpstreamConfig::default()
        };
        let target = stream_url(&local, "stream2/i-arch-7/seg1.ts");
        assert_eq!(target.url, "http://127.0.0.1:4100/stream2/i-arch-7/seg1.ts");
        assert!(target.matched);
    }

    #[test]
    fn test_passthrough_maps_tilde_paths_to_playlist() {
        assert_eq!(
            passthrough_url(&upstream(), "/~abc123", None),
            "https://himer365ery.com/playlist/~abc123"
        );
    }

    #[test]
    fn test_passthrough_forwards_path_and_query() {
        assert_eq!(
            passthrough_url(&upstream(), "/favicon.ico", Some("v=2")),
            "https://himer365ery.com/favicon.ico?v=2"
        );
    }
}
