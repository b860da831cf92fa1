use std::sync::Arc;

/// A text normalization stage applied to record text.
///
/// Implementations are immutable after construction, so one instance can be
/// shared across parsers and threads.
pub trait TextStandardizer: Send + Sync {
    /// Short stage name used in logs.
    fn name(&self) -> &str;
    /// Return the normalized form of `text`.
    fn standardize(&self, text: &str) -> String;
}

/// Shared handle to a normalization stage.
pub type SharedStandardizer = Arc<dyn TextStandardizer>;

/// Run `stages` over `text` in order.
pub fn apply_stages(stages: &[SharedStandardizer], text: String) -> String {
    stages
        .iter()
        .fold(text, |current, stage| stage.standardize(&current))
}
