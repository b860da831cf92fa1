//! Synonym canonicalization and tagging.

use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::tokenizer::TAG_SEPARATOR;
use crate::standardizer::TextStandardizer;
use crate::types::{CanonicalToken, Token};
use crate::utils::{replace_matched_tokens, split_tokens};

/// German service-request vocabulary variants and their canonical tokens.
const GERMAN_SERVICE_TERMS: &[(&str, &str)] = &[
    ("Verkehrsampel", "Ampel"),
    ("Glassplitter", "Glas"),
    ("Glasscherbe", "Glas"),
    ("Grünpate", "Pate"),
    ("Grünüberwuchs", "Überwuchs"),
    ("Verkehrsraum", "Verkehr"),
    ("Straßenverkehr", "Verkehr"),
    ("unüberwacht", "herrenlos"),
    ("unbewacht", "herrenlos"),
    ("ungesichert", "herrenlos"),
    ("unbehütet", "herrenlos"),
    ("Drahtesel", "Fahrrad"),
    ("Vehikel", "Fahrrad"),
    ("Zweirad", "Fahrrad"),
    ("Rad", "Fahrrad"),
    ("Fahrzeug", "Auto"),
    ("Wagen", "Auto"),
    ("Karre", "Auto"),
    ("Kraftfahrzeug", "Auto"),
    ("KFZ", "Auto"),
    ("Personenkraftwagen", "Auto"),
    ("PKW", "Auto"),
    ("Verkehrsmittel", "Auto"),
    ("Gefährt", "Auto"),
    ("Schlitten", "Auto"),
    ("Gerümpel", "Schrott"),
    ("Schund", "Schrott"),
    ("Ramsch", "Schrott"),
    ("Kram", "Schrott"),
    ("Straßenlaterne", "Laterne"),
    ("Beleuchtung", "Laterne"),
    ("Beleuchtungskörper", "Laterne"),
    ("Straßenbeleuchtung", "Laterne"),
    ("Lampe", "Laterne"),
    ("Straßenlampe", "Laterne"),
    ("Leuchte", "Laterne"),
    ("Pfosten", "Poller"),
    ("Pfeiler", "Poller"),
    ("Pfahl", "Poller"),
    ("Altpapier", "Papier"),
    ("Papiercontainer", "Papier"),
    ("Papiertonne", "Papier"),
    ("Straßenkanaldeckel", "Kanaldeckel"),
    ("Verkehrsschild", "Straßenschild"),
    ("Verkehrszeichen", "Straßenschild"),
    ("Müllkippe", "Müll"),
    ("Müllabladeplatz", "Müll"),
    ("Abladeplatz", "Müll"),
    ("Deponie", "Müll"),
    ("Müllhalde", "Müll"),
    ("Abfall", "Müll"),
    ("Abfallberg", "Müll"),
    ("Abfallhaufen", "Müll"),
    ("Sperrmüll", "Müll"),
];

/// Rewrites variant tokens to canonical tokens, or lists the canonical tags found.
///
/// Lookups are single-hop: a canonical token that is itself a key is not
/// resolved further unless the text is standardized again.
#[derive(Clone, Debug, Default)]
pub struct SynonymCanonicalizer {
    synonyms: HashMap<Token, CanonicalToken>,
}

impl SynonymCanonicalizer {
    /// Build from `(token, canonical)` pairs; later pairs override earlier ones.
    pub fn from_pairs<I, T, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<Token>,
        C: Into<CanonicalToken>,
    {
        Self {
            synonyms: pairs
                .into_iter()
                .map(|(token, canonical)| (token.into(), canonical.into()))
                .collect(),
        }
    }

    /// Built-in German synonym table for municipal service requests.
    pub fn german_service_terms() -> Self {
        Self::from_pairs(GERMAN_SERVICE_TERMS.iter().copied())
    }

    /// Canonical token for `token`, if it is a key.
    pub fn canonical_for(&self, token: &str) -> Option<&str> {
        self.synonyms.get(token).map(String::as_str)
    }

    /// Number of source tokens in the table.
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    /// True if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }

    /// Replace every matched token in `text` by its canonical token.
    pub fn standardize(&self, text: &str) -> String {
        replace_matched_tokens(text, |token| self.canonical_for(token))
    }

    /// Canonical tags of matched tokens, in scan order and with repeats.
    pub fn tags<'s>(&'s self, text: &str) -> Vec<&'s str> {
        split_tokens(text)
            .filter_map(|token| self.canonical_for(token))
            .collect()
    }

    /// `|`-joined canonical tags of matched tokens; empty when nothing matches.
    pub fn tag(&self, text: &str) -> String {
        self.tags(text).join(TAG_SEPARATOR)
    }
}

impl TextStandardizer for SynonymCanonicalizer {
    fn name(&self) -> &str {
        "synonyms"
    }

    fn standardize(&self, text: &str) -> String {
        SynonymCanonicalizer::standardize(self, text)
    }
}

/// Pipeline stage that replaces text with its synonym tag string.
#[derive(Clone, Debug)]
pub struct SynonymTagStage {
    canonicalizer: Arc<SynonymCanonicalizer>,
}

impl SynonymTagStage {
    /// Tag stage backed by `canonicalizer`.
    pub fn new(canonicalizer: Arc<SynonymCanonicalizer>) -> Self {
        Self { canonicalizer }
    }
}

impl TextStandardizer for SynonymTagStage {
    fn name(&self) -> &str {
        "synonym_tags"
    }

    fn standardize(&self, text: &str) -> String {
        self.canonicalizer.tag(text)
    }
}
