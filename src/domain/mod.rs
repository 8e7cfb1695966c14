//! Hostname normalization and candidate expansion.
//!
//! Key functions:
//! - `normalize_hostname()` - Trims a raw hostname and converts it to IDNA ASCII
//! - `parse_tlds()` - Resolves the TLD variants to probe
//! - `base_label()` / `expand()` - Split a domain into its label and rebuild candidates

pub mod candidates;

use crate::config::FALLBACK_TLD;
use crate::error_handling::VerifyError;

/// Normalizes a raw hostname to its ASCII (punycode) form.
///
/// Surrounding whitespace and one trailing dot are removed. The remainder is
/// converted with UTS #46 processing in strict (STD3) mode, which lowercases
/// and maps Unicode labels to `xn--` labels.
///
/// # Errors
///
/// - `VerifyError::InvalidDomain` if nothing is left after trimming
/// - `VerifyError::EncodingError` if the IDNA conversion rejects the input
///
/// # Examples
///
/// ```
/// use squat_verify::domain::normalize_hostname;
///
/// assert_eq!(normalize_hostname(" Example.COM. ").unwrap(), "example.com");
/// assert_eq!(normalize_hostname("bücher.de").unwrap(), "xn--bcher-kva.de");
/// assert!(normalize_hostname("  .  ").is_err());
/// ```
pub fn normalize_hostname(raw: &str) -> Result<String, VerifyError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return Err(VerifyError::InvalidDomain);
    }

    idna::domain_to_ascii_strict(trimmed).map_err(|e| VerifyError::EncodingError {
        domain: trimmed.to_string(),
        reason: e.to_string(),
    })
}

/// Resolves the list of TLD variants to probe.
///
/// A non-empty comma-separated `override_list` wins. Otherwise the TLD of
/// `domain` is used, and `com` when `domain` has none.
pub fn parse_tlds(domain: &str, override_list: &str) -> Vec<String> {
    let tlds: Vec<String> = override_list
        .split(',')
        .map(str::trim)
        .filter(|tld| !tld.is_empty())
        .map(|tld| tld.trim_start_matches('.').to_string())
        .collect();
    if !tlds.is_empty() {
        return tlds;
    }

    let domain = domain.trim().trim_end_matches('.');
    match domain.rsplit_once('.') {
        Some((_, tld)) if !tld.is_empty() => vec![tld.to_string()],
        _ => vec![FALLBACK_TLD.to_string()],
    }
}

/// Returns `domain` without its last label ("example.com" → "example").
///
/// A domain without a dot is returned unchanged.
pub fn base_label(domain: &str) -> &str {
    let domain = domain.trim().trim_end_matches('.');
    match domain.rsplit_once('.') {
        Some((label, _)) if !label.is_empty() => label,
        _ => domain,
    }
}

/// Joins a candidate label and a TLD into a hostname.
pub fn expand(label: &str, tld: &str) -> String {
    format!(
        "{}.{}",
        label.trim_end_matches('.'),
        tld.trim_start_matches('.')
    )
}
