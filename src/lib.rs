#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runners shared by the demo binaries.
pub mod apps;
/// Record layout and news split configuration.
pub mod config;
/// Centralized constants used across tokenizing, parsing, and splitting.
pub mod constants;
/// Service record and labeled sample types.
pub mod data;
/// Input sources: service-request exports and the news corpus.
pub mod source;
/// Train/test splitting and split persistence.
pub mod splits;
/// Shared interface for text normalization stages.
pub mod standardizer;
/// Stopword removal.
pub mod stopwords;
/// Synonym canonicalization and tagging.
pub mod synonyms;
/// Boundary to external classifier trainers.
pub mod trainer;
/// Input transports used by sources.
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Tokenizing and text cleanup helpers.
pub mod utils;
/// Service-type vocabulary.
pub mod vocabulary;

mod errors;

pub use config::{NewsSplitConfig, RecordLayout};
pub use data::{LabeledText, ServiceRecord};
pub use errors::PrepError;
pub use source::{NewsCorpus, ParsedRecords, RecordParser, ServiceRecords, prepare_news_split};
pub use splits::{CategorySplit, DatasetSplitter, SplitLabel, SplitOutput, SplitPolicy};
pub use standardizer::{SharedStandardizer, TextStandardizer};
pub use stopwords::StopwordFilter;
pub use synonyms::{SynonymCanonicalizer, SynonymTagStage};
pub use trainer::{Trainer, TrainingError, train_labeled_texts, train_service_records};
pub use types::{CanonicalToken, Label, RawCode, ServiceCode, ServiceName, Token};
pub use vocabulary::Vocabulary;
