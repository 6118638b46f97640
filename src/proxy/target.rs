//! Outbound URL composition.

/// Compute the upstream URL for an inbound path.
///
/// The root path maps to `base` itself. Any other path is appended verbatim,
/// without decoding or re-encoding, so the upstream sees exactly what the
/// client sent.
pub fn target_url(base: &str, path: &str) -> String {
    if path.is_empty() || path == "/" {
        base.to_string()
    } else {
        format!("{}{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_to_base() {
        assert_eq!(target_url("http://host/base", "/"), "http://host/base");
        assert_eq!(target_url("http://host/base", ""), "http://host/base");
    }

    #[test]
    fn test_path_is_appended() {
        assert_eq!(
            target_url("http://host/base", "/foo/bar"),
            "http://host/base/foo/bar"
        );
        assert_eq!(
            target_url("http://webserver:5050", "/failsometimes"),
            "http://webserver:5050/failsometimes"
        );
    }

    #[test]
    fn test_path_is_not_reencoded() {
        assert_eq!(
            target_url("http://host", "/a%20b/%2Fc"),
            "http://host/a%20b/%2Fc"
        );
    }
}
