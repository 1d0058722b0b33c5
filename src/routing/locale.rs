//! Locale prefix parsing.
//!
//! # Responsibilities
//! - Detect a leading `/xx` or `/xx-yy` segment (case-insensitive)
//! - Accept it only if the tenant configures that locale
//! - Strip accepted prefixes; leave unknown ones as ordinary path segments
//!
//! # Design Decisions
//! - Hand-written matcher, no regex in the hot path
//! - The tenant's locale set is the only authority: a locale-shaped segment
//!   that the site does not configure is content, not a locale

use crate::tenant::TenantConfig;

/// Effective locale and the path left after prefix stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRoute {
    pub locale: String,
    pub path: String,
}

/// Match `^/([a-z]{2}(-[a-z]{2})?)(/|$)` case-insensitively.
///
/// Returns the lowercased code and the byte length of `/code`.
pub fn parse_prefix(path: &str) -> Option<(String, usize)> {
    let bytes = path.as_bytes();
    let alpha_pair = |at: usize| {
        bytes.get(at).is_some_and(u8::is_ascii_alphabetic)
            && bytes.get(at + 1).is_some_and(u8::is_ascii_alphabetic)
    };

    if bytes.first() != Some(&b'/') || !alpha_pair(1) {
        return None;
    }

    let mut end = 3;
    if bytes.get(end) == Some(&b'-') && alpha_pair(end + 1) {
        end += 3;
    }

    match bytes.get(end) {
        None | Some(b'/') => Some((path[1..end].to_ascii_lowercase(), end)),
        _ => None,
    }
}

/// Split `path` into effective locale and remaining content path.
pub fn route(config: &TenantConfig, path: &str) -> RequestRoute {
    if let Some((code, len)) = parse_prefix(path) {
        if config.supports_locale(&code) {
            let rest = &path[len..];
            return RequestRoute {
                locale: code,
                path: if rest.is_empty() { "/".to_string() } else { rest.to_string() },
            };
        }
    }

    RequestRoute {
        locale: config.default_language.clone(),
        path: path.to_string(),
    }
}

/// Target of the root redirect, if `raw_path` is exactly `/`.
pub fn root_redirect(config: &TenantConfig, raw_path: &str) -> Option<String> {
    (raw_path == "/").then(|| format!("/{}/", config.default_language))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TenantConfig {
        TenantConfig::parse(
            r#"{
                "defaultLanguage": "en",
                "campaigns": {
                    "de": { "campaignId": "1", "gatewayId": "1" },
                    "be-fr": { "campaignId": "2", "gatewayId": "1" }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("/en"), Some(("en".into(), 3)));
        assert_eq!(parse_prefix("/en/"), Some(("en".into(), 3)));
        assert_eq!(parse_prefix("/DE/pricing"), Some(("de".into(), 3)));
        assert_eq!(parse_prefix("/be-FR/x"), Some(("be-fr".into(), 6)));
        assert_eq!(parse_prefix("/ch-de"), Some(("ch-de".into(), 6)));

        assert_eq!(parse_prefix("/"), None);
        assert_eq!(parse_prefix("/e"), None);
        assert_eq!(parse_prefix("/eng"), None);
        assert_eq!(parse_prefix("/en-"), None);
        assert_eq!(parse_prefix("/en-u/x"), None);
        assert_eq!(parse_prefix("/e1/x"), None);
        assert_eq!(parse_prefix("/en.html"), None);
        assert_eq!(parse_prefix("en/"), None);
    }

    #[test]
    fn test_accepted_prefix_is_stripped() {
        let cfg = config();
        assert_eq!(
            route(&cfg, "/de/pricing"),
            RequestRoute { locale: "de".into(), path: "/pricing".into() }
        );
        assert_eq!(
            route(&cfg, "/BE-FR/"),
            RequestRoute { locale: "be-fr".into(), path: "/".into() }
        );
        assert_eq!(
            route(&cfg, "/en"),
            RequestRoute { locale: "en".into(), path: "/".into() }
        );
    }

    #[test]
    fn test_unknown_prefix_is_content() {
        let cfg = config();
        assert_eq!(
            route(&cfg, "/xx/pricing"),
            RequestRoute { locale: "en".into(), path: "/xx/pricing".into() }
        );
        // Configured as part of a pair only
        assert_eq!(
            route(&cfg, "/fr/page"),
            RequestRoute { locale: "en".into(), path: "/fr/page".into() }
        );
    }

    #[test]
    fn test_no_prefix() {
        let cfg = config();
        assert_eq!(
            route(&cfg, "/images/logo.png"),
            RequestRoute { locale: "en".into(), path: "/images/logo.png".into() }
        );
    }

    #[test]
    fn test_root_redirect_only_for_bare_root() {
        let cfg = config();
        assert_eq!(root_redirect(&cfg, "/").as_deref(), Some("/en/"));
        assert_eq!(root_redirect(&cfg, "/en/"), None);
        assert_eq!(root_redirect(&cfg, "/de"), None);
    }

    #[test]
    fn test_uppercase_default_redirects_to_accepted_prefix() {
        let cfg = TenantConfig::parse(r#"{"defaultLanguage":"EN"}"#).unwrap();
        let location = root_redirect(&cfg, "/").unwrap();
        assert_eq!(location, "/en/");
        assert_eq!(
            route(&cfg, &location),
            RequestRoute { locale: "en".into(), path: "/".into() }
        );
    }
}
