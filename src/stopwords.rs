//! Stopword removal backed by a newline-delimited stopword list.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::constants::stopwords::COMMENT_PREFIX;
use crate::errors::PrepError;
use crate::standardizer::TextStandardizer;
use crate::utils::replace_matched_tokens;

/// Removes stopwords from text.
///
/// Matching is case-sensitive and exact per token, but removal is by
/// substring: once a token is found to be a stopword, every occurrence of it
/// in the text is deleted, including occurrences inside longer words.
#[derive(Clone, Debug, Default)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl StopwordFilter {
    /// Load stopwords from a file; `;`-prefixed lines are comments.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PrepError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| PrepError::resource(path, err))?;
        let filter = Self::from_reader(BufReader::new(file))
            .map_err(|err| PrepError::resource(path, err))?;
        debug!(
            path = %path.display(),
            stopwords = filter.len(),
            "loaded stopword list"
        );
        Ok(filter)
    }

    /// Load stopwords from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut stopwords = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            stopwords.insert(line);
        }
        Ok(Self { stopwords })
    }

    /// Build a filter from an in-memory list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words
                .iter()
                .filter(|word| !word.is_empty())
                .map(|word| word.to_string())
                .collect(),
        }
    }

    /// True if `token` is a stopword.
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// True if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Remove every stopword found among the tokens of `text`.
    ///
    /// Surrounding delimiters stay in place, so `"Auto und Fahrrad"` with
    /// stopword `und` becomes `"Auto  Fahrrad"`.
    pub fn standardize(&self, text: &str) -> String {
        replace_matched_tokens(text, |token| self.is_stopword(token).then_some(""))
    }
}

impl TextStandardizer for StopwordFilter {
    fn name(&self) -> &str {
        "stopwords"
    }

    fn standardize(&self, text: &str) -> String {
        StopwordFilter::standardize(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn from_reader_skips_comments_and_blank_lines() {
        let filter =
            StopwordFilter::from_reader(Cursor::new(";comment\nund\n\noder\r\n;und2\n")).unwrap();
        assert_eq!(filter.len(), 2);
        assert!(filter.is_stopword("und"));
        assert!(filter.is_stopword("oder"));
        assert!(!filter.is_stopword(";comment"));
        assert!(!filter.is_stopword(""));
    }

    #[test]
    fn standardize_removes_stopwords_and_keeps_spacing() {
        let filter = StopwordFilter::from_list(&["und", "oder"]);
        assert_eq!(filter.standardize("Auto und Fahrrad"), "Auto  Fahrrad");
        assert_eq!(filter.standardize("Auto oder Rad, und Bus."), "Auto  Rad,  Bus.");
    }

    #[test]
    fn standardize_is_case_sensitive() {
        let filter = StopwordFilter::from_list(&["und"]);
        assert_eq!(filter.standardize("Und dann"), "Und dann");
    }

    #[test]
    fn standardize_strips_embedded_occurrences_of_matched_tokens() {
        let filter = StopwordFilter::from_list(&["der"]);
        // "der" is a standalone token, so it is also removed from "oder".
        assert_eq!(filter.standardize("der Baum oder Strauch"), " Baum o Strauch");
        // Without a standalone match nothing is removed.
        assert_eq!(filter.standardize("oder Strauch"), "oder Strauch");
    }

    #[test]
    fn standardize_is_idempotent_on_request_text() {
        let filter = StopwordFilter::from_list(&["der", "die", "das", "und", "am", "in"]);
        let inputs = [
            "Glassplitter am Straßenrand",
            "Bei uns ist schon wieder die Straßenlaterne defekt!",
            "Der Deckel (in der Straßenmitte) klappert und klappert.",
            "",
        ];
        for input in inputs {
            let once = filter.standardize(input);
            assert_eq!(filter.standardize(&once), once, "input: {input}");
        }
    }

    #[test]
    fn from_path_reports_missing_resource() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing_stopwords.txt");
        let err = StopwordFilter::from_path(&missing).unwrap_err();
        assert!(matches!(err, PrepError::Resource { ref path, .. } if path == &missing));
    }

    #[test]
    fn from_path_loads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("german_stopwords.txt");
        std::fs::write(&path, ";comment\nund\noder\n").unwrap();
        let filter = StopwordFilter::from_path(&path).unwrap();
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.standardize("Auto und Fahrrad"), "Auto  Fahrrad");
    }
}
