//! Canonicalization of the string encodings the two sources use for IPs and
//! router labels. Both sides must pass through here before any comparison.

/// Strip a CIDR-style suffix: everything before the first `/`, trimmed.
/// Plain addresses come back trimmed and otherwise untouched.
pub fn normalize_ip(raw: &str) -> &str {
    match raw.split_once('/') {
        Some((addr, _)) => addr.trim(),
        None => raw.trim(),
    }
}

/// Drop the prefix of a compound "prefix-shortname" router label: everything
/// after the **first** hyphen, trimmed. Labels without a hyphen pass through
/// unchanged. Ambiguous multi-hyphen labels keep their tail intact
/// ("a-b-c" → "b-c"); the first boundary is the only split point.
pub fn normalize_router_label(raw: &str) -> &str {
    match raw.split_once('-') {
        Some((_, shortname)) => shortname.trim(),
        None => raw,
    }
}
