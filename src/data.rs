use serde::{Deserialize, Serialize};

pub use crate::types::{Label, ServiceCode};

/// A validated service request handed to the trainer.
///
/// Only the record parser constructs these from input lines, so `code` is
/// always a member of the vocabulary the parser was given.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Vocabulary code of the requested service.
    pub code: ServiceCode,
    /// User-submitted request text after normalization.
    pub text: String,
}

/// A document text labeled with its category (news path).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    /// Extracted document text.
    pub text: String,
    /// Category the document was loaded from.
    pub label: Label,
}

impl LabeledText {
    /// Build a labeled text.
    pub fn new(text: impl Into<String>, label: impl Into<Label>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }

    /// Render as one `text<TAB>label` output line (without line terminator).
    pub fn to_tsv_line(&self) -> String {
        format!(
            "{}{}{}",
            self.text,
            crate::constants::records::FIELD_DELIMITER,
            self.label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_text_renders_tab_separated_line() {
        let sample = LabeledText::new("Markets rally. Shares rose", "business");
        assert_eq!(sample.to_tsv_line(), "Markets rally. Shares rose\tbusiness");
    }
}
