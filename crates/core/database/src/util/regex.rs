use once_cell::sync::Lazy;
use regex::Regex;

/// Deliberately loose `local@domain.tld` shape, no attempt at RFC 5322
pub static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Runs of characters which are not allowed in a slug
pub static RE_SLUG_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
