use std::path::PathBuf;

use crate::constants::records::{DEFAULT_CODE_COLUMN, DEFAULT_EXPECTED_COLUMNS, DEFAULT_TEXT_COLUMN};
use crate::constants::splits::{
    DEFAULT_NEWS_CATEGORIES, DEFAULT_TEST_FILENAME, DEFAULT_TRAIN_FILENAME,
};
use crate::errors::PrepError;
use crate::splits::SplitPolicy;
use crate::types::Label;

/// Column layout of a tab-separated service-request export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordLayout {
    /// Exact number of tab-separated fields a data line must have.
    pub expected_columns: usize,
    /// Zero-based index of the numeric service code column.
    pub code_column: usize,
    /// Zero-based index of the free-text request column.
    pub text_column: usize,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            expected_columns: DEFAULT_EXPECTED_COLUMNS,
            code_column: DEFAULT_CODE_COLUMN,
            text_column: DEFAULT_TEXT_COLUMN,
        }
    }
}

impl RecordLayout {
    /// Create a layout with explicit column count and indices.
    pub fn new(expected_columns: usize, code_column: usize, text_column: usize) -> Self {
        Self {
            expected_columns,
            code_column,
            text_column,
        }
    }

    /// Validate that both indices address a column of the expected width.
    pub fn validated(self) -> Result<Self, PrepError> {
        if self.expected_columns == 0 {
            return Err(PrepError::Configuration(
                "expected column count must be positive".to_string(),
            ));
        }
        if self.code_column >= self.expected_columns || self.text_column >= self.expected_columns
        {
            return Err(PrepError::Configuration(format!(
                "column indices (code {}, text {}) must be below the expected column count {}",
                self.code_column, self.text_column, self.expected_columns
            )));
        }
        Ok(self)
    }
}

/// Inputs and outputs of a news corpus train/test preparation run.
#[derive(Clone, Debug)]
pub struct NewsSplitConfig {
    /// Directory holding one sub-directory per category.
    pub corpus_root: PathBuf,
    /// Categories to load, in output order.
    pub categories: Vec<Label>,
    /// Training set output path.
    pub train_path: PathBuf,
    /// Held-out set output path.
    pub test_path: PathBuf,
    /// Optional shuffle seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Train-count policy applied per category.
    pub policy: SplitPolicy,
}

impl NewsSplitConfig {
    /// Create a config for `corpus_root` with default categories and output files.
    pub fn new(corpus_root: impl Into<PathBuf>) -> Self {
        Self {
            corpus_root: corpus_root.into(),
            categories: DEFAULT_NEWS_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect(),
            train_path: PathBuf::from(DEFAULT_TRAIN_FILENAME),
            test_path: PathBuf::from(DEFAULT_TEST_FILENAME),
            seed: None,
            policy: SplitPolicy::default(),
        }
    }

    /// Override the category list.
    pub fn with_categories<I, L>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Override both output paths.
    pub fn with_outputs(
        mut self,
        train_path: impl Into<PathBuf>,
        test_path: impl Into<PathBuf>,
    ) -> Self {
        self.train_path = train_path.into();
        self.test_path = test_path.into();
        self
    }

    /// Fix the shuffle seed for reproducible splits.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the train-count policy.
    pub fn with_policy(mut self, policy: SplitPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_service_request_exports() {
        let layout = RecordLayout::default().validated().unwrap();
        assert_eq!(layout, RecordLayout::new(3, 0, 2));
    }

    #[test]
    fn layout_rejects_out_of_range_columns() {
        assert!(matches!(
            RecordLayout::new(3, 3, 1).validated(),
            Err(PrepError::Configuration(msg)) if msg.contains("below the expected column count")
        ));
        assert!(RecordLayout::new(2, 0, 2).validated().is_err());
        assert!(RecordLayout::new(0, 0, 0).validated().is_err());
    }

    #[test]
    fn news_config_defaults_and_overrides() {
        let config = NewsSplitConfig::new("bbc");
        assert_eq!(config.categories.len(), DEFAULT_NEWS_CATEGORIES.len());
        assert_eq!(config.train_path, PathBuf::from(DEFAULT_TRAIN_FILENAME));
        assert!(config.seed.is_none());

        let config = config
            .with_categories(["sport", "tech"])
            .with_outputs("train.tsv", "test.tsv")
            .with_seed(7);
        assert_eq!(config.categories, vec!["sport", "tech"]);
        assert_eq!(config.test_path, PathBuf::from("test.tsv"));
        assert_eq!(config.seed, Some(7));
    }
}
