//! Input sources feeding the preparation pipeline.
//!
//! - `service_requests` turns a tab-separated export into vocabulary-gated
//!   [`ServiceRecord`](crate::data::ServiceRecord) values.
//! - `news` loads a category-bucketed document corpus for splitting.

/// Category-bucketed news documents.
pub mod news;
/// Tab-separated service-request exports.
pub mod service_requests;

pub use news::{NewsCorpus, extract_document, extract_document_text, prepare_news_split};
pub use service_requests::{
    LineOutcome, ParseStats, ParsedRecords, RecordParser, ServiceRecords,
};
