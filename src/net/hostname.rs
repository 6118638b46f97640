//! Local host name lookup.

/// Host name reported by the operating system, or `"localhost"` if it
/// cannot be read or is not valid UTF-8.
pub fn local_hostname() -> String {
    ::hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string())
}
