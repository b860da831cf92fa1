/// Constants shared by the stopword filter and synonym canonicalizer tokenizer.
pub mod tokenizer {
    /// Characters that separate tokens during standardization scans.
    pub const TOKEN_DELIMITERS: [char; 11] =
        [' ', ',', ';', '-', '/', '(', ')', '%', '.', '?', '!'];
    /// Separator placed between canonical tags in tag strings.
    pub const TAG_SEPARATOR: &str = "|";
}

/// Constants used when loading stopword resources.
pub mod stopwords {
    /// Lines starting with this prefix are comments in stopword files.
    pub const COMMENT_PREFIX: &str = ";";
}

/// Constants used by the vocabulary.
pub mod vocabulary {
    /// Display name reported for codes that are not vocabulary members.
    pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";
}

/// Constants used by tab-separated record parsing and writing.
pub mod records {
    /// Field delimiter for service-request and split output files.
    pub const FIELD_DELIMITER: char = '\t';
    /// Default number of columns in a service-request export.
    pub const DEFAULT_EXPECTED_COLUMNS: usize = 3;
    /// Default column holding the numeric service code.
    pub const DEFAULT_CODE_COLUMN: usize = 0;
    /// Default column holding the free-text request.
    pub const DEFAULT_TEXT_COLUMN: usize = 2;
    /// Log message used when a drained parser saw unknown service codes.
    pub const UNKNOWN_CODES_MSG: &str = "unknown service types in input";
}

/// Constants used by news corpus extraction and train/test splitting.
pub mod splits {
    /// Number of documents per bucket in the train-count formula.
    pub const BUCKET_SIZE: usize = 100;
    /// Training documents taken per full bucket.
    pub const TRAIN_PER_BUCKET: usize = 80;
    /// Default training output filename.
    pub const DEFAULT_TRAIN_FILENAME: &str = "news-train.txt";
    /// Default held-out output filename.
    pub const DEFAULT_TEST_FILENAME: &str = "news-test.txt";
    /// Unix mode given to split output files.
    pub const OUTPUT_FILE_MODE: u32 = 0o644;
    /// Default category directories of the news corpus, in split order.
    pub const DEFAULT_NEWS_CATEGORIES: [&str; 5] =
        ["business", "entertainment", "politics", "sport", "tech"];
    /// Number of leading non-empty lines that form a news document's text.
    pub const DOCUMENT_LEADING_LINES: usize = 2;
    /// Log message used when a news document is skipped.
    pub const SKIP_DOCUMENT_MSG: &str = "skipping news document without title and lead";
}
