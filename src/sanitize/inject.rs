//! Fetch-interceptor injection.
//!
//! The play page calls the video host and CDN directly from browser-side
//! fetch. The injected script re-points CDN stream fetches at the relay and
//! re-attaches the page's own CSRF token to playlist calls, since the relay
//! response otherwise loses the session context those calls rely on.

use crate::config::RelayConfig;
use crate::relay::headers::PLAY_REFERER_PATH;

const TEMPLATE: &str = r#"
    <script>
    // Store CSRF token for playlist requests
    window.csrfToken = '__CSRF_TOKEN__';

    // Intercept fetch requests to add CSRF token and redirect stream content
    const originalFetch = window.fetch;
    window.fetch = function(url, options) {
      if (typeof url === 'string') {
        // Add CSRF token to playlist requests
        if (url.includes('__VIDEO_HOST__/playlist/')) {
          options = options || {};
          options.headers = options.headers || {};
          if (window.csrfToken) {
            options.headers['x-csrf-token'] = window.csrfToken;
          }
          options.headers['Origin'] = '__VIDEO_ORIGIN__';
          options.headers['Referer'] = '__PLAY_REFERER__';
          console.log('Adding CSRF token to playlist request:', window.csrfToken);
        }

        // Redirect stream content through our proxy
        if (url.includes('.__CDN_DOMAIN__/stream') || url.includes('i-arch-400.__CDN_DOMAIN__')) {
          url = url.replace(/https:\/\/[^\.]+\.__CDN_PATTERN__\/stream[^\/]*\/([^"'\s]+)/g, '__APP_URL__/stream/$1');
        }
      }
      return originalFetch.call(this, url, options);
    };
    console.log('Fetch interceptor installed');
    </script>
    "#;

/// Startup-rendered interceptor script with the CSRF token slot left open.
///
/// All config-dependent placeholders are substituted once; per-request
/// rendering only fills in the token extracted from the page at hand.
#[derive(Debug)]
pub struct InterceptorScript {
    template: String,
}

impl InterceptorScript {
    pub fn new(config: &RelayConfig) -> Self {
        let upstream = &config.upstream;
        let play_referer = format!("{}{}", upstream.video_origin, PLAY_REFERER_PATH);
        let cdn_pattern = upstream.cdn_domain.replace('.', r"\.");
        let template = TEMPLATE
            .replace("__VIDEO_HOST__", upstream.video_host())
            .replace("__VIDEO_ORIGIN__", &upstream.video_origin)
            .replace("__PLAY_REFERER__", &play_referer)
            .replace("__CDN_DOMAIN__", &upstream.cdn_domain)
            .replace("__CDN_PATTERN__", &cdn_pattern)
            .replace("__APP_URL__", &config.public_url);
        Self { template }
    }

    /// Render the script with `csrf_token` and insert it before the first
    /// closing head tag. Pages without one pass through untouched.
    pub fn inject(&self, html: &str, csrf_token: &str) -> String {
        let script = self.template.replace("__CSRF_TOKEN__", csrf_token);
        html.replacen("</head>", &format!("{script}</head>"), 1)
    }
}
