//! Hostname-to-machine-name normalization

/// Maximum length of a machine name, in bytes
pub const MAX_MACHINE_NAME_LEN: usize = 64;

/// Derive the canonical machine name for a hostname.
///
/// Lowercases, strips a `:port` suffix if present, replaces every character
/// outside `[a-z0-9_]` with `_`, and truncates to [`MAX_MACHINE_NAME_LEN`]
/// bytes. Total for any printable ASCII input: invalid characters are
/// substituted, never rejected, so a lookup key always exists.
pub fn machine_name(hostname: &str) -> String {
    // Remove port if present
    let host = hostname.split(':').next().unwrap_or(hostname);

    host.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_MACHINE_NAME_LEN)
        .collect()
}
