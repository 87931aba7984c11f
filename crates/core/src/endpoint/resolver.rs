//! Base URL resolution
//!
//! The backend address depends on where the client runs. Web and iOS
//! simulators reach the host machine through `localhost`; the Android
//! emulator has its own virtual network where the host's loopback is
//! `10.0.2.2`. An explicit override wins over the platform default, with
//! the same loopback substitution applied on Android.
//!
//! Resolution happens once at startup; the result is stored in an
//! immutable [`shopfront_domain::EndpointConfig`].

use shopfront_domain::constants::{ANDROID_EMULATOR_HOST, DEFAULT_API_PORT, LOOPBACK_HOST};
use shopfront_domain::Platform;
use tracing::{debug, warn};
use url::Url;

/// Resolve the base URL using the default API port.
pub fn resolve_base_url(platform: Platform, override_url: Option<&str>) -> String {
    resolve_base_url_with_port(platform, override_url, DEFAULT_API_PORT)
}

/// Resolve the base URL for `platform`.
///
/// A blank override counts as absent. A malformed override is reported as a
/// warning and the platform default is used instead.
pub fn resolve_base_url_with_port(
    platform: Platform,
    override_url: Option<&str>,
    port: u16,
) -> String {
    let Some(raw) = override_url.map(str::trim).filter(|raw| !raw.is_empty()) else {
        let url = default_base_url(platform, port);
        debug!(%platform, %url, "using platform default base URL");
        return url;
    };

    match apply_override(platform, raw) {
        Ok(url) => url,
        Err(reason) => {
            let url = default_base_url(platform, port);
            warn!(
                %platform,
                override_url = raw,
                %reason,
                fallback = %url,
                "ignoring malformed API URL override"
            );
            url
        }
    }
}

/// Platform default: emulator loopback on Android, `localhost` elsewhere.
pub fn default_base_url(platform: Platform, port: u16) -> String {
    let host = if platform.is_android() { ANDROID_EMULATOR_HOST } else { LOOPBACK_HOST };
    format!("http://{host}:{port}")
}

fn apply_override(platform: Platform, raw: &str) -> Result<String, String> {
    let parsed = Url::parse(raw).map_err(|err| err.to_string())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", parsed.scheme()));
    }
    if parsed.host_str().is_none() {
        return Err("missing host".to_string());
    }

    if !(platform.is_android() && parsed.host_str() == Some(LOOPBACK_HOST)) {
        debug!(%platform, url = raw, "using API URL override");
        return Ok(raw.to_string());
    }

    let rewritten = replace_host(raw, ANDROID_EMULATOR_HOST)?;
    debug!(%platform, override_url = raw, url = %rewritten, "rewrote localhost for Android emulator");
    Ok(rewritten)
}

/// Swap the host inside `raw`, leaving every other character as written.
///
/// `raw` must already have parsed as a URL with a `scheme://` authority.
fn replace_host(raw: &str, host: &str) -> Result<String, String> {
    let authority_start =
        raw.find("://").map(|idx| idx + 3).ok_or_else(|| "missing '//' authority".to_string())?;
    let rest = &raw[authority_start..];
    let authority = &rest[..rest.find(['/', '?', '#']).unwrap_or(rest.len())];

    let host_offset = authority.rfind('@').map_or(0, |at| at + 1);
    let host_len = authority[host_offset..].find(':').unwrap_or(authority.len() - host_offset);
    let start = authority_start + host_offset;
    let end = start + host_len;

    if !raw[start..end].eq_ignore_ascii_case(LOOPBACK_HOST) {
        return Err(format!("unexpected host '{}'", &raw[start..end]));
    }
    Ok(format!("{}{}{}", &raw[..start], host, &raw[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn android_override_rewrites_localhost() {
        assert_eq!(
            resolve_base_url(Platform::Android, Some("http://localhost:9000/x")),
            "http://10.0.2.2:9000/x"
        );
        assert_eq!(
            resolve_base_url(Platform::Android, Some("http://localhost:8020")),
            "http://10.0.2.2:8020"
        );
        assert_eq!(
            resolve_base_url(Platform::Android, Some("https://localhost/api/?v=2")),
            "https://10.0.2.2/api/?v=2"
        );
    }

    #[test]
    fn android_rewrite_keeps_the_rest_of_the_override_verbatim() {
        assert_eq!(
            resolve_base_url(Platform::Android, Some("http://localhost:80/x")),
            "http://10.0.2.2:80/x"
        );
        assert_eq!(
            resolve_base_url(Platform::Android, Some("http://localhost:9000?x=1")),
            "http://10.0.2.2:9000?x=1"
        );
        assert_eq!(
            resolve_base_url(Platform::Android, Some("http://dev@LOCALHOST:9000/api#top")),
            "http://dev@10.0.2.2:9000/api#top"
        );
    }

    #[test]
    fn android_override_keeps_other_hosts() {
        assert_eq!(
            resolve_base_url(Platform::Android, Some("https://api.shop.example:8443")),
            "https://api.shop.example:8443"
        );
        assert_eq!(
            resolve_base_url(Platform::Android, Some("http://localhost.example.com:80")),
            "http://localhost.example.com:80"
        );
    }

    #[test]
    fn non_android_override_is_returned_unchanged() {
        for platform in [Platform::Web, Platform::Ios, Platform::Macos] {
            assert_eq!(
                resolve_base_url(platform, Some("http://localhost:9000/x")),
                "http://localhost:9000/x"
            );
        }
    }

    #[test]
    fn defaults_depend_on_platform() {
        assert_eq!(resolve_base_url(Platform::Android, None), "http://10.0.2.2:8020");
        assert_eq!(resolve_base_url(Platform::Web, None), "http://localhost:8020");
        assert_eq!(resolve_base_url(Platform::Ios, None), "http://localhost:8020");
        assert_eq!(resolve_base_url(Platform::Windows, None), "http://localhost:8020");
        assert_eq!(resolve_base_url_with_port(Platform::Android, None, 3000), "http://10.0.2.2:3000");
    }

    #[test]
    fn blank_override_counts_as_absent() {
        assert_eq!(resolve_base_url(Platform::Android, Some("   ")), "http://10.0.2.2:8020");
    }

    #[test]
    fn malformed_override_falls_back_to_default() {
        assert_eq!(resolve_base_url(Platform::Web, Some("not a url")), "http://localhost:8020");
        assert_eq!(resolve_base_url(Platform::Android, Some("localhost:9000")), "http://10.0.2.2:8020");
        assert_eq!(resolve_base_url(Platform::Ios, Some("ftp://files.example")), "http://localhost:8020");
    }
}
