//! Configuration access port trait.

/// Read-only view of a sectioned key/value configuration.
///
/// Typed getters return `default` when the key is absent or unparseable;
/// callers that must reject bad values validate through `get_string` first.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
}
