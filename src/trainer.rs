//! Boundary to the external classifier trainer.
//!
//! The trainer receives finished samples and returns a model this crate never
//! inspects.

use std::fmt;
use std::io::BufRead;

use thiserror::Error;

use crate::data::{LabeledText, ServiceRecord};
use crate::errors::PrepError;
use crate::source::service_requests::ServiceRecords;
use crate::splits::{SplitLabel, SplitOutput};

/// An external training library.
pub trait Trainer<T> {
    /// Opaque trained model handle.
    type Model;
    /// Failure reported by the training library.
    type Error: fmt::Debug + fmt::Display;

    /// Train on a finite sequence of samples.
    fn train<I>(&mut self, samples: I) -> Result<Self::Model, Self::Error>
    where
        I: Iterator<Item = T>;
}

/// Failure while streaming records into a trainer.
#[derive(Debug, Error)]
pub enum TrainingError<E: fmt::Debug + fmt::Display> {
    /// Reading the records failed before the stream was exhausted.
    #[error(transparent)]
    Input(PrepError),
    /// The training library rejected the samples.
    #[error("trainer failed: {0}")]
    Trainer(E),
}

/// Stream parsed service records straight into `trainer`.
///
/// Records are pulled one at a time. If reading the input fails the stream
/// ends early and the read error is returned in place of whatever the trainer
/// produced from the truncated stream. The iterator keeps its unknown-code
/// set for the caller to inspect afterwards.
pub fn train_service_records<T, R>(
    trainer: &mut T,
    records: &mut ServiceRecords<R>,
) -> Result<T::Model, TrainingError<T::Error>>
where
    T: Trainer<ServiceRecord>,
    R: BufRead,
{
    let mut failure = None;
    let stream = records.by_ref().map_while(|item| match item {
        Ok(record) => Some(record),
        Err(err) => {
            failure = Some(err);
            None
        }
    });
    let trained = trainer.train(stream);
    if let Some(err) = failure {
        return Err(TrainingError::Input(err));
    }
    trained.map_err(TrainingError::Trainer)
}

/// Train on one side of a finished split.
pub fn train_labeled_texts<T>(
    trainer: &mut T,
    split: &SplitOutput,
    label: SplitLabel,
) -> Result<T::Model, T::Error>
where
    T: Trainer<LabeledText>,
{
    trainer.train(split.samples(label).iter().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecordLayout;
    use crate::source::service_requests::RecordParser;
    use crate::vocabulary::Vocabulary;
    use std::collections::BTreeMap;
    use std::io::{self, Cursor, Read};
    use std::sync::Arc;

    /// Counts samples per code; stands in for a real classifier.
    struct CountingTrainer;

    impl Trainer<ServiceRecord> for CountingTrainer {
        type Model = BTreeMap<u32, usize>;
        type Error = String;

        fn train<I>(&mut self, samples: I) -> Result<Self::Model, Self::Error>
        where
            I: Iterator<Item = ServiceRecord>,
        {
            let mut counts = BTreeMap::new();
            for sample in samples {
                *counts.entry(sample.code).or_insert(0) += 1;
            }
            if counts.is_empty() {
                return Err("no samples".to_string());
            }
            Ok(counts)
        }
    }

    fn parser() -> RecordParser {
        RecordParser::new(RecordLayout::default(), Arc::new(Vocabulary::bonn_service_types()))
            .unwrap()
    }

    #[test]
    fn trainer_receives_only_vocabulary_members() {
        let input = "Type\tExtra\tRequest\n2\tx\tGlas\n99\tx\tfoo\n2\tx\tScherben\n8\tx\tLampe\n";
        let parser = parser();
        let mut records = parser.read(Cursor::new(input));
        let model = train_service_records(&mut CountingTrainer, &mut records).unwrap();
        assert_eq!(model, BTreeMap::from([(2, 2), (8, 1)]));
        assert_eq!(records.unknown_count(), 1);
    }

    #[test]
    fn trainer_failure_is_reported() {
        let parser = parser();
        let mut records = parser.read(Cursor::new("Type\tExtra\tRequest\n"));
        let err = train_service_records(&mut CountingTrainer, &mut records).unwrap_err();
        assert!(matches!(err, TrainingError::Trainer(msg) if msg == "no samples"));
    }

    struct LabelCounter;

    impl Trainer<LabeledText> for LabelCounter {
        type Model = BTreeMap<String, usize>;
        type Error = String;

        fn train<I>(&mut self, samples: I) -> Result<Self::Model, Self::Error>
        where
            I: Iterator<Item = LabeledText>,
        {
            let mut counts = BTreeMap::new();
            for sample in samples {
                *counts.entry(sample.label).or_insert(0) += 1;
            }
            Ok(counts)
        }
    }

    #[test]
    fn labeled_texts_come_from_the_requested_side() {
        let split = SplitOutput {
            train: vec![
                LabeledText::new("a", "sport"),
                LabeledText::new("b", "sport"),
                LabeledText::new("c", "tech"),
            ],
            test: vec![LabeledText::new("d", "tech")],
            categories: Vec::new(),
        };
        let train = train_labeled_texts(&mut LabelCounter, &split, SplitLabel::Train).unwrap();
        assert_eq!(
            train,
            BTreeMap::from([("sport".to_string(), 2), ("tech".to_string(), 1)])
        );
        let test = train_labeled_texts(&mut LabelCounter, &split, SplitLabel::Test).unwrap();
        assert_eq!(test, BTreeMap::from([("tech".to_string(), 1)]));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk gone"))
        }
    }

    #[test]
    fn read_failure_is_reported_as_input_error() {
        let parser = parser();
        let mut records = parser.read(io::BufReader::new(FailingReader));
        let err = train_service_records(&mut CountingTrainer, &mut records).unwrap_err();
        assert!(matches!(err, TrainingError::Input(PrepError::Io(_))));
        assert!(records.is_drained());

        let mut records = parser.read(io::BufReader::new(
            Cursor::new("Type\tExtra\tRequest\n2\tx\tGlas\n").chain(FailingReader),
        ));
        let err = train_service_records(&mut CountingTrainer, &mut records).unwrap_err();
        assert!(matches!(err, TrainingError::Input(PrepError::Io(_))));
    }
}
