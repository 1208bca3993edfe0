//! Classification of stored target URLs into internal and external redirects.
//!
//! A target is **external** when it is an absolute URL outside the service's own
//! origin; the redirect then carries operator-supplied data and must be marked
//! as trusted by the HTTP layer. Everything else is **internal** and resolves to
//! a path on this service.
//!
//! Recognized internal forms:
//!
//! | Stored value            | Redirect path   |
//! |-------------------------|-----------------|
//! | `internal:/about?x=1`   | `/about?x=1`    |
//! | `base:docs/intro`       | `/docs/intro`   |
//! | `entity:node/42`        | `/node/42`      |
//! | `route:<front>`         | `/`             |
//! | `/pricing`, `pricing`   | `/pricing`      |
//! | `https://<own origin>/x`| `/x`            |

use url::{ParseError, Position, Url};

/// Where a stored target should send the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Path on this service, always starting with a single `/`.
    Internal(String),
    /// Absolute URL outside this service, as stored.
    External(String),
}

const FRONT_ROUTE: &str = "<front>";
const INTERNAL_SCHEMES: [&str; 3] = ["internal:", "base:", "entity:"];

/// Returns `true` when `target` can be stored and later redirected to.
///
/// Accepts URI references only, so the redirect `Location` header can carry
/// the value as stored. Rejected: blank values, non-ASCII or control
/// characters, unknown `route:` tokens, malformed absolute URLs. The answer
/// does not depend on the service origin.
pub fn is_valid_target(target: &str) -> bool {
    let target = target.trim();
    if is_blank_or_unsafe(target) || !target.is_ascii() {
        return false;
    }
    if let Some(route) = target.strip_prefix("route:") {
        return route == FRONT_ROUTE;
    }
    if INTERNAL_SCHEMES.iter().any(|scheme| target.starts_with(scheme)) {
        return true;
    }

    matches!(
        Url::parse(target),
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase)
    )
}

fn is_blank_or_unsafe(target: &str) -> bool {
    target.is_empty() || target.chars().any(char::is_control)
}

/// Classifies `target` relative to the service `origin`.
///
/// Returns `None` when the target cannot be resolved: a blank value, one with
/// control characters, an unknown `route:` token or a malformed absolute URL.
pub fn classify_target(target: &str, origin: &Url) -> Option<RedirectTarget> {
    let target = target.trim();

    if is_blank_or_unsafe(target) {
        tracing::debug!(stored_target = target, "Blank or unsafe redirect target");
        return None;
    }

    if let Some(rest) = INTERNAL_SCHEMES
        .iter()
        .find_map(|scheme| target.strip_prefix(scheme))
    {
        return Some(RedirectTarget::Internal(rooted(rest)));
    }
    if let Some(route) = target.strip_prefix("route:") {
        return (route == FRONT_ROUTE).then(|| RedirectTarget::Internal("/".to_string()));
    }

    match Url::parse(target) {
        Ok(url) if is_same_origin(&url, origin) => Some(RedirectTarget::Internal(rooted(
            &url[Position::BeforePath..],
        ))),
        Ok(_) => Some(RedirectTarget::External(target.to_string())),
        Err(ParseError::RelativeUrlWithoutBase) => Some(RedirectTarget::Internal(rooted(target))),
        Err(e) => {
            tracing::debug!(stored_target = target, error = %e, "Unresolvable redirect target");
            None
        }
    }
}

fn is_same_origin(url: &Url, origin: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.origin() == origin.origin()
}

/// Roots a relative reference at `/`, collapsing leading slashes so the result
/// can never be read as a protocol-relative (`//host`) URL.
fn rooted(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://s.example.com").unwrap()
    }

    fn internal(path: &str) -> Option<RedirectTarget> {
        Some(RedirectTarget::Internal(path.to_string()))
    }

    #[test]
    fn test_external_absolute_url() {
        assert_eq!(
            classify_target("https://example.org", &origin()),
            Some(RedirectTarget::External("https://example.org".to_string()))
        );
    }

    #[test]
    fn test_external_keeps_stored_value() {
        let target = "http://EXAMPLE.org:8080/a?b=c#d";
        assert_eq!(
            classify_target(target, &origin()),
            Some(RedirectTarget::External(target.to_string()))
        );
    }

    #[test]
    fn test_non_http_scheme_is_external() {
        assert_eq!(
            classify_target("mailto:team@example.org", &origin()),
            Some(RedirectTarget::External("mailto:team@example.org".to_string()))
        );
    }

    #[test]
    fn test_same_origin_absolute_url_is_internal() {
        assert_eq!(
            classify_target("https://s.example.com/docs?page=2#top", &origin()),
            internal("/docs?page=2#top")
        );
    }

    #[test]
    fn test_different_port_is_external() {
        assert!(matches!(
            classify_target("https://s.example.com:8443/docs", &origin()),
            Some(RedirectTarget::External(_))
        ));
    }

    #[test]
    fn test_internal_scheme() {
        assert_eq!(classify_target("internal:/about", &origin()), internal("/about"));
        assert_eq!(classify_target("base:docs/intro", &origin()), internal("/docs/intro"));
        assert_eq!(classify_target("entity:node/42", &origin()), internal("/node/42"));
    }

    #[test]
    fn test_front_route() {
        assert_eq!(classify_target("route:<front>", &origin()), internal("/"));
    }

    #[test]
    fn test_unknown_route_is_unresolvable() {
        assert_eq!(classify_target("route:system.admin", &origin()), None);
    }

    #[test]
    fn test_relative_paths_are_rooted() {
        assert_eq!(classify_target("/pricing", &origin()), internal("/pricing"));
        assert_eq!(classify_target("pricing", &origin()), internal("/pricing"));
    }

    #[test]
    fn test_protocol_relative_is_collapsed() {
        assert_eq!(classify_target("//evil.example", &origin()), internal("/evil.example"));
        assert_eq!(
            classify_target("internal://evil.example", &origin()),
            internal("/evil.example")
        );
    }

    #[test]
    fn test_malformed_absolute_url_is_unresolvable() {
        assert_eq!(classify_target("http://", &origin()), None);
    }

    #[test]
    fn test_blank_target_is_unresolvable() {
        assert_eq!(classify_target("   ", &origin()), None);
        assert_eq!(classify_target("", &origin()), None);
    }

    #[test]
    fn test_control_characters_are_unresolvable() {
        assert_eq!(
            classify_target("https://example.org/a\r\nSet-Cookie: x=1", &origin()),
            None
        );
        assert_eq!(classify_target("/a\tb", &origin()), None);
    }

    #[test]
    fn test_is_valid_target_accepts_known_forms() {
        for target in [
            "https://example.org",
            "mailto:team@example.org",
            "internal:/about",
            "base:docs/intro",
            "entity:node/42",
            "route:<front>",
            "/pricing",
            " pricing ",
        ] {
            assert!(is_valid_target(target), "{target}");
        }
    }

    #[test]
    fn test_is_valid_target_rejects_unservable_values() {
        for target in [
            "",
            "   ",
            "https://example.org/a\r\nSet-Cookie: x=1",
            "route:system.admin",
            "http://",
            "https://example.org/caf\u{e9}",
        ] {
            assert!(!is_valid_target(target), "{target:?}");
        }
    }
}
