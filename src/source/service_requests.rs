//! Tab-separated service-request parsing with vocabulary gating.
//!
//! Lines with the wrong number of fields or a non-numeric code are dropped
//! without a trace in the output. Lines whose numeric code is not in the
//! vocabulary are dropped too, but their raw code string is remembered in a
//! deduplicated set that the caller reads once the iterator is drained.

use indexmap::IndexSet;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::config::RecordLayout;
use crate::constants::records::{FIELD_DELIMITER, UNKNOWN_CODES_MSG};
use crate::data::ServiceRecord;
use crate::errors::PrepError;
use crate::standardizer::{SharedStandardizer, apply_stages};
use crate::types::RawCode;
use crate::vocabulary::{Vocabulary, code_from_numeric};

/// Aggregate counters for one pass over an input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Data lines read (header excluded).
    pub lines: usize,
    /// Records emitted.
    pub accepted: usize,
    /// Lines dropped for a wrong field count or a non-numeric code.
    pub malformed: usize,
    /// Lines dropped for a code outside the vocabulary.
    pub unknown: usize,
}

/// Classification of a single data line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line produced a record (text not yet normalized).
    Accepted(ServiceRecord),
    /// Wrong field count or non-numeric code.
    Malformed,
    /// Numeric code outside the vocabulary; carries the raw field.
    UnknownCode(RawCode),
}

/// Everything a fully drained parse produced.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ParsedRecords {
    /// Accepted records in input order.
    pub records: Vec<ServiceRecord>,
    /// Distinct raw codes outside the vocabulary, in discovery order.
    pub unknown_codes: IndexSet<RawCode>,
    /// Counters for the pass.
    pub stats: ParseStats,
}

/// Parser configuration: layout, vocabulary, and normalization stages.
///
/// The parser itself holds no file handle; every call to [`RecordParser::open`]
/// starts a fresh pass over the input.
#[derive(Clone)]
pub struct RecordParser {
    layout: RecordLayout,
    vocabulary: Arc<Vocabulary>,
    stages: Vec<SharedStandardizer>,
}

impl RecordParser {
    /// Create a parser; fails when the layout indices do not fit the column count.
    pub fn new(layout: RecordLayout, vocabulary: Arc<Vocabulary>) -> Result<Self, PrepError> {
        Ok(Self {
            layout: layout.validated()?,
            vocabulary,
            stages: Vec::new(),
        })
    }

    /// Append a normalization stage; stages run in the order they were added.
    pub fn with_stage(mut self, stage: SharedStandardizer) -> Self {
        self.stages.push(stage);
        self
    }

    /// Active column layout.
    pub fn layout(&self) -> RecordLayout {
        self.layout
    }

    /// Names of the configured stages, in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Open `path` and return a lazy record iterator over it.
    pub fn open(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ServiceRecords<BufReader<File>>, PrepError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| PrepError::resource(path, err))?;
        debug!(
            path = %path.display(),
            stages = ?self.stage_names(),
            "opened service request input"
        );
        let mut records = self.read(BufReader::new(file));
        records.origin = Some(path.to_path_buf());
        Ok(records)
    }

    /// Wrap an already-open reader in a lazy record iterator.
    pub fn read<R: BufRead>(&self, reader: R) -> ServiceRecords<R> {
        ServiceRecords {
            reader,
            parser: self.clone(),
            origin: None,
            buffer: Vec::new(),
            header_skipped: false,
            finished: false,
            unknown_codes: IndexSet::new(),
            stats: ParseStats::default(),
        }
    }

    /// Parse all of `path` into memory.
    pub fn collect_path(&self, path: impl AsRef<Path>) -> Result<ParsedRecords, PrepError> {
        let mut records = self.open(path)?;
        let collected = records.by_ref().collect::<Result<Vec<_>, _>>()?;
        Ok(records.into_parsed(collected))
    }

    /// Classify one data line without normalizing its text.
    pub fn classify_line(&self, line: &str) -> LineOutcome {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() != self.layout.expected_columns {
            return LineOutcome::Malformed;
        }
        let raw_code = fields[self.layout.code_column];
        let Ok(numeric) = raw_code.trim().parse::<f64>() else {
            return LineOutcome::Malformed;
        };
        match code_from_numeric(numeric).filter(|code| self.vocabulary.is_known(*code)) {
            Some(code) => LineOutcome::Accepted(ServiceRecord {
                code,
                text: fields[self.layout.text_column].to_string(),
            }),
            None => LineOutcome::UnknownCode(raw_code.to_string()),
        }
    }
}

/// Forward-only, single-pass iterator over the accepted records of one input.
///
/// Each call to `next` reads at most one line. Dropping the iterator releases
/// the underlying reader, so stopping early stops all further IO. Data
/// problems never surface as `Err`; only read failures do, after which the
/// iterator is finished.
pub struct ServiceRecords<R> {
    reader: R,
    parser: RecordParser,
    origin: Option<PathBuf>,
    buffer: Vec<u8>,
    header_skipped: bool,
    finished: bool,
    unknown_codes: IndexSet<RawCode>,
    stats: ParseStats,
}

impl<R: BufRead> ServiceRecords<R> {
    /// Distinct unknown raw codes seen so far, in discovery order.
    pub fn unknown_codes(&self) -> &IndexSet<RawCode> {
        &self.unknown_codes
    }

    /// Number of distinct unknown codes seen so far.
    pub fn unknown_count(&self) -> usize {
        self.unknown_codes.len()
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// True once the input has been read to the end (or failed).
    pub fn is_drained(&self) -> bool {
        self.finished
    }

    /// Combine collected records with this pass's unknown codes and counters.
    pub fn into_parsed(self, records: Vec<ServiceRecord>) -> ParsedRecords {
        ParsedRecords {
            records,
            unknown_codes: self.unknown_codes,
            stats: self.stats,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, PrepError> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .map_err(|err| match &self.origin {
                Some(path) => PrepError::resource(path, err),
                None => PrepError::Io(err),
            })?;
        if read == 0 {
            return Ok(None);
        }
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }
        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }

    fn finish(&mut self) {
        self.finished = true;
        if !self.unknown_codes.is_empty() {
            warn!(
                unknown_codes = self.unknown_codes.len(),
                unknown_lines = self.stats.unknown,
                "{}",
                UNKNOWN_CODES_MSG
            );
        }
        debug!(
            lines = self.stats.lines,
            accepted = self.stats.accepted,
            malformed = self.stats.malformed,
            unknown = self.stats.unknown,
            "service request input drained"
        );
    }
}

impl<R: BufRead> Iterator for ServiceRecords<R> {
    type Item = Result<ServiceRecord, PrepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let line = match self.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.finish();
                    return None;
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            };
            if !self.header_skipped {
                self.header_skipped = true;
                continue;
            }
            self.stats.lines += 1;
            match self.parser.classify_line(&line) {
                LineOutcome::Accepted(mut record) => {
                    record.text = apply_stages(&self.parser.stages, record.text);
                    self.stats.accepted += 1;
                    return Some(Ok(record));
                }
                LineOutcome::Malformed => {
                    trace!(line = self.stats.lines, "dropping malformed service request line");
                    self.stats.malformed += 1;
                }
                LineOutcome::UnknownCode(raw) => {
                    trace!(line = self.stats.lines, code = %raw, "dropping unknown service code");
                    self.stats.unknown += 1;
                    self.unknown_codes.insert(raw);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::StopwordFilter;
    use crate::synonyms::{SynonymCanonicalizer, SynonymTagStage};
    use std::io::Cursor;
    use tempfile::tempdir;

    const HEADER: &str = "Type\tRequest\tExtra\n";

    fn parser() -> RecordParser {
        RecordParser::new(
            RecordLayout::new(3, 0, 1),
            Arc::new(Vocabulary::bonn_service_types()),
        )
        .unwrap()
    }

    fn drain(parser: &RecordParser, input: &str) -> ParsedRecords {
        let mut records = parser.read(Cursor::new(input.to_string()));
        let collected = records.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
        assert!(records.is_drained());
        records.into_parsed(collected)
    }

    #[test]
    fn unknown_code_is_tracked_and_dropped() {
        let parsed = drain(&parser(), &format!("{HEADER}99\thello\tx\n"));
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.unknown_codes.len(), 1);
        assert!(parsed.unknown_codes.contains("99"));
    }

    #[test]
    fn known_code_yields_one_record() {
        let parsed = drain(&parser(), &format!("{HEADER}2\thello\tx\n"));
        assert_eq!(
            parsed.records,
            vec![ServiceRecord {
                code: 2,
                text: "hello".to_string()
            }]
        );
        assert!(parsed.unknown_codes.is_empty());
    }

    #[test]
    fn wrong_field_count_is_dropped_without_touching_unknown_codes() {
        let parsed = drain(&parser(), &format!("{HEADER}99\thello\n2\ta\tb\tc\n"));
        assert!(parsed.records.is_empty());
        assert!(parsed.unknown_codes.is_empty());
        assert_eq!(parsed.stats.malformed, 2);
    }

    #[test]
    fn non_numeric_code_is_dropped_silently() {
        let parsed = drain(&parser(), &format!("{HEADER}abc\thello\tx\n\thello\tx\n"));
        assert!(parsed.records.is_empty());
        assert!(parsed.unknown_codes.is_empty());
        assert_eq!(parsed.stats.malformed, 2);
    }

    #[test]
    fn repeated_unknown_codes_are_deduplicated_by_raw_text() {
        let input = format!("{HEADER}99\ta\tx\n99\tb\tx\n21\tc\tx\n99.0\td\tx\n8\te\tx\n");
        let parsed = drain(&parser(), &input);
        assert_eq!(parsed.records.len(), 1);
        let unknown: Vec<&str> = parsed.unknown_codes.iter().map(String::as_str).collect();
        assert_eq!(unknown, vec!["99", "21", "99.0"]);
        assert_eq!(parsed.stats.unknown, 4);
        assert_eq!(parsed.stats.lines, 5);
    }

    #[test]
    fn decimal_and_padded_codes_parse_as_numbers() {
        let parsed = drain(&parser(), &format!("{HEADER}2.0\ta\tx\n 8 \tb\tx\n2.5\tc\tx\n"));
        let codes: Vec<u32> = parsed.records.iter().map(|record| record.code).collect();
        assert_eq!(codes, vec![2, 8]);
        assert!(parsed.unknown_codes.contains("2.5"));
    }

    #[test]
    fn near_integral_codes_are_not_rounded_onto_members() {
        let parsed = drain(&parser(), &format!("{HEADER}2.0000001\ta\tx\n2\tb\tx\n"));
        let codes: Vec<u32> = parsed.records.iter().map(|record| record.code).collect();
        assert_eq!(codes, vec![2]);
        let unknown: Vec<&str> = parsed.unknown_codes.iter().map(String::as_str).collect();
        assert_eq!(unknown, vec!["2.0000001"]);
    }

    #[test]
    fn header_is_always_skipped() {
        let parsed = drain(&parser(), "2\theader-looking\tx\n2\tbody\tx\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].text, "body");
        assert!(drain(&parser(), "").records.is_empty());
    }

    #[test]
    fn crlf_input_and_missing_trailing_newline_are_handled() {
        let parsed = drain(&parser(), "Type\tRequest\tExtra\r\n2\tGlas\tx\r\n8\tLampe\tx");
        let texts: Vec<&str> = parsed.records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Glas", "Lampe"]);
    }

    #[test]
    fn stages_run_in_configured_order() {
        let stopwords = Arc::new(StopwordFilter::from_list(&["und"]));
        let synonyms = Arc::new(SynonymCanonicalizer::german_service_terms());
        let input = format!("{HEADER}9\tDrahtesel und KFZ\tx\n");

        let stopwords_then_synonyms = parser()
            .with_stage(stopwords.clone())
            .with_stage(synonyms.clone());
        assert_eq!(
            drain(&stopwords_then_synonyms, &input).records[0].text,
            "Fahrrad  Auto"
        );

        let tagging = parser()
            .with_stage(stopwords)
            .with_stage(Arc::new(SynonymTagStage::new(synonyms)));
        assert_eq!(drain(&tagging, &input).records[0].text, "Fahrrad|Auto");
        assert_eq!(tagging.stage_names(), vec!["stopwords", "synonym_tags"]);
    }

    #[test]
    fn iterator_is_lazy_and_reports_unknowns_so_far() {
        let input = format!("{HEADER}99\ta\tx\n2\tb\tx\n98\tc\tx\n8\td\tx\n");
        let parser = parser();
        let mut records = parser.read(Cursor::new(input));
        let first = records.next().unwrap().unwrap();
        assert_eq!(first.code, 2);
        assert_eq!(records.unknown_count(), 1);
        assert!(!records.is_drained());
        assert_eq!(records.stats().lines, 2);
    }

    #[test]
    fn open_reports_missing_input_and_collect_path_reads_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.tsv");
        assert!(matches!(
            parser().open(&missing),
            Err(PrepError::Resource { ref path, .. }) if path == &missing
        ));

        let path = dir.path().join("requests.tsv");
        std::fs::write(&path, format!("{HEADER}2\tGlas\tx\n77\tfoo\tx\n")).unwrap();
        let parsed = parser().collect_path(&path).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.unknown_codes.len(), 1);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"2\tGlas\xFF\tx\n");
        let parser = parser();
        let records: Vec<ServiceRecord> = parser
            .read(Cursor::new(bytes))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].text.starts_with("Glas"));
    }
}
