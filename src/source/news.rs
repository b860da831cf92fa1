//! News corpus loading: one directory per category, one document per file.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::NewsSplitConfig;
use crate::constants::splits::{DOCUMENT_LEADING_LINES, SKIP_DOCUMENT_MSG};
use crate::errors::PrepError;
use crate::splits::{DatasetSplitter, SplitOutput};
use crate::transport::fs::{DocumentDir, read_document};
use crate::types::Label;
use crate::utils::flatten_line_breaks;

/// Text of a news document: its first two non-empty lines joined by a space.
///
/// Lines are split on `\n` only and a line is empty only if it has no
/// characters at all, so a lone `\r` counts as content. Line breaks left in
/// the joined text become spaces and triple spaces are shrunk once. Returns
/// `None` when the document has fewer than two non-empty lines.
pub fn extract_document_text(raw: &str) -> Option<String> {
    let leading: Vec<&str> = raw
        .split('\n')
        .filter(|line| !line.is_empty())
        .take(DOCUMENT_LEADING_LINES)
        .collect();
    if leading.len() < DOCUMENT_LEADING_LINES {
        return None;
    }
    Some(flatten_line_breaks(&leading.join(" ")))
}

/// Read `path` and extract its document text.
pub fn extract_document(path: &Path) -> Result<String, PrepError> {
    let raw = read_document(path)?;
    extract_document_text(&raw).ok_or_else(|| PrepError::Document {
        path: path.to_path_buf(),
        reason: format!("fewer than {DOCUMENT_LEADING_LINES} non-empty lines"),
    })
}

/// Category-bucketed news documents on disk.
pub struct NewsCorpus {
    root: PathBuf,
    categories: Vec<Label>,
    follow_links: bool,
}

impl NewsCorpus {
    /// Corpus at `root` with sub-directories named after `categories`.
    pub fn new<I, L>(root: impl Into<PathBuf>, categories: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        Self {
            root: root.into(),
            categories: categories.into_iter().map(Into::into).collect(),
            follow_links: false,
        }
    }

    /// Configure symlink traversal inside category directories.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Extract every document, grouped by category in configured order.
    ///
    /// Documents without two non-empty lines are skipped with a warning. A
    /// missing category directory or unreadable file aborts the load.
    pub fn load(&self) -> Result<IndexMap<Label, Vec<String>>, PrepError> {
        let mut buckets = IndexMap::new();
        for category in &self.categories {
            let dir = self.root.join(category);
            let files = DocumentDir::new(&dir)
                .with_follow_symlinks(self.follow_links)
                .files()?;
            let mut texts = Vec::with_capacity(files.len());
            for path in files {
                match extract_document(&path) {
                    Ok(text) => texts.push(text),
                    Err(PrepError::Document { path, reason }) => {
                        warn!(
                            category = %category,
                            path = %path.display(),
                            reason = %reason,
                            "{}",
                            SKIP_DOCUMENT_MSG
                        );
                    }
                    Err(err) => return Err(err),
                }
            }
            info!(category = %category, documents = texts.len(), "loaded news category");
            buckets.insert(category.clone(), texts);
        }
        Ok(buckets)
    }
}

/// Load the corpus, split every category, and write both output files.
pub fn prepare_news_split(config: &NewsSplitConfig) -> Result<SplitOutput, PrepError> {
    let buckets = NewsCorpus::new(&config.corpus_root, config.categories.iter().cloned()).load()?;
    let mut splitter = DatasetSplitter::new(config.policy, config.seed)?;
    let output = splitter.split(buckets);
    output.write_tsv(&config.train_path, &config.test_path)?;
    Ok(output)
}
