//! String predicate plugin
//!
//! A trivial color-match predicate plus the name registry its host uses to
//! discover it.

use std::collections::HashMap;

/// A pure string predicate
pub type Predicate = fn(Option<&str>) -> bool;

/// Returns true if the value is exactly `"blue"` or `"test"`
///
/// Absent input is treated as non-matching rather than an error.
pub fn is_blue(value: Option<&str>) -> bool {
    matches!(value, Some("blue") | Some("test"))
}

/// Returns the predicates exposed to the host, keyed by plugin name
pub fn registry() -> HashMap<&'static str, Predicate> {
    let mut predicates: HashMap<&'static str, Predicate> = HashMap::new();
    predicates.insert("blue", is_blue);
    predicates
}
