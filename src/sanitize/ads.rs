//! Ad payload removal.
//!
//! The play page ships a fixed set of ad integrations: a pause-banner click
//! handler, tracking pixel bootstrap calls, banner containers, and inline
//! scripts referencing the ad networks. Each pass below strips one of them.

use once_cell::sync::Lazy;
use regex::Regex;

static PAUSE_BANNER_BOOTSTRAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"function\s+initPauseBannerClick\s*\(\s*\)\s*\{[\s\S]*?\}[\s\S]*?if\s*\(\s*document\.readyState[\s\S]*?\}",
    )
    .unwrap()
});

static AD_BANNER_DIV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<div[^>]*id=['"]adangle-[^'"]*['"][^>]*>[\s\S]*?</div>"#).unwrap()
});

static AD_CLASS_DIV: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<div[^>]*class=['"][^'"]*ad[^'"]*['"][^>]*>[\s\S]*?</div>"#).unwrap()
});

static AD_ELEMENT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"adangle-[a-f0-9-]+").unwrap());

static AD_PIXEL_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https://spx-s1\.adangle\.online[^'")\s]*"#).unwrap());

static AD_PRIZES_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https://1x-winprizes\.com[^'")\s]*"#).unwrap());

static AD_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<script[^>]*>[\s\S]*?adangle[\s\S]*?</script>").unwrap());

static TRACKING_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<script[^>]*>[\s\S]*?trackUrl[\s\S]*?</script>").unwrap());

/// Strip known ad payloads from play-page HTML.
///
/// Pass order is load-bearing: the banner-div deletions match on original
/// element ids, so they run before the id rewrite, and the whole-script
/// deletions run last so earlier passes see the script bodies intact.
pub fn strip_ads(html: &str) -> String {
    let html = PAUSE_BANNER_BOOTSTRAP.replace_all(html, "");
    let html = html.replace(
        "adAngleStartPixelsTrackers",
        "// removed adAngleStartPixelsTrackers",
    );
    let html = html.replace("__agl_track", "// removed __agl_track");
    let html = AD_BANNER_DIV.replace_all(&html, "<!-- Ad banner removed -->");
    let html = AD_CLASS_DIV.replace_all(&html, "<!-- Ad container removed -->");
    let html = AD_ELEMENT_ID.replace_all(&html, "removed-ad-element");
    let html = AD_PIXEL_URL.replace_all(&html, "");
    let html = AD_PRIZES_URL.replace_all(&html, "");
    let html = html.replace("adangle.online", "removed-ad-domain");
    let html = html.replace("winprizes.com", "removed-ad-domain");
    let html = AD_SCRIPT.replace_all(&html, "<!-- Ad script removed -->");
    let html = TRACKING_SCRIPT.replace_all(&html, "<!-- Tracking script removed -->");
    html.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ad_banner_div_is_deleted_not_renamed() {
        let html = r#"<body><div id="adangle-123"><img src="banner.png"></div></body>"#;
        let scrubbed = strip_ads(html);
        assert!(scrubbed.contains("<!-- Ad banner removed -->"));
        assert!(!scrubbed.contains("banner.png"));
        assert!(!scrubbed.contains("removed-ad-element"));
    }

    #[test]
    fn test_ad_class_container_is_deleted() {
        let html = r#"<div class="video-ad-overlay">promo</div>"#;
        let scrubbed = strip_ads(html);
        assert!(scrubbed.contains("<!-- Ad container removed -->"));
        assert!(!scrubbed.contains("promo"));
    }

    #[test]
    fn test_leftover_ad_element_ids_are_rewritten() {
        let html = "var el = document.getElementById('adangle-4f9a');";
        let scrubbed = strip_ads(html);
        assert!(scrubbed.contains("getElementById('removed-ad-element')"));
    }

    #[test]
    fn test_pause_banner_bootstrap_is_removed() {
        let html = "<p>keep</p>function initPauseBannerClick() { showAd(); }\n\
                    if (document.readyState === 'complete') { initPauseBannerClick(); }<p>also keep</p>";
        let scrubbed = strip_ads(html);
        assert!(!scrubbed.contains("initPauseBannerClick"));
        assert!(scrubbed.contains("<p>keep</p>"));
        assert!(scrubbed.contains("<p>also keep</p>"));
    }

    #[test]
    fn test_tracker_bootstrap_calls_are_commented_out() {
        let html = "adAngleStartPixelsTrackers();\n__agl_track('start');";
        let scrubbed = strip_ads(html);
        assert!(scrubbed.contains("// removed adAngleStartPixelsTrackers"));
        assert!(scrubbed.contains("// removed __agl_track"));
    }

    #[test]
    fn test_tracking_pixel_urls_are_blanked() {
        let html = r#"<img src="https://spx-s1.adangle.online/px.gif?id=1">"#;
        let scrubbed = strip_ads(html);
        assert!(scrubbed.contains(r#"<img src="">"#));
    }

    #[test]
    fn test_prize_popup_urls_are_blanked() {
        let html = r#"window.open("https://1x-winprizes.com/spin?ref=9")"#;
        let scrubbed = strip_ads(html);
        assert!(!scrubbed.contains("1x-winprizes.com"));
    }

    #[test]
    fn test_bare_ad_domains_are_neutralized() {
        let html = "connect to adangle.online or winprizes.com later";
        let scrubbed = strip_ads(html);
        assert!(!scrubbed.contains("adangle.online"));
        assert!(!scrubbed.contains("winprizes.com"));
        assert!(scrubbed.contains("removed-ad-domain"));
    }

    #[test]
    fn test_ad_scripts_are_dropped_whole() {
        let html = "<script>var q = window.adangleQueue || [];</script>";
        let scrubbed = strip_ads(html);
        assert_eq!(scrubbed, "<!-- Ad script removed -->");
    }

    #[test]
    fn test_tracking_scripts_are_dropped_whole() {
        let html = r#"<script type="text/javascript">send(trackUrl);</script>"#;
        let scrubbed = strip_ads(html);
        assert_eq!(scrubbed, "<!-- Tracking script removed -->");
    }

    #[test]
    fn test_clean_html_passes_through() {
        let html = "<html><head></head><body><video></video></body></html>";
        assert_eq!(strip_ads(html), html);
    }
}
