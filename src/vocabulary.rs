//! Closed vocabulary of service categories.

use indexmap::IndexMap;

use crate::constants::vocabulary::UNKNOWN_DISPLAY_NAME;
use crate::errors::PrepError;
use crate::types::{ServiceCode, ServiceName};

/// Service types published by the city of Bonn's Open311 endpoint.
///
/// Code 21 is assigned to both "Graffiti" and "Gully/ Bachablauf verstopft" in
/// the published list; both entries are disabled there and are left out here.
const BONN_SERVICE_TYPES: [(ServiceCode, &str); 12] = [
    (1, "Ampel defekt (Taste/Licht)"),
    (2, "Glassplitter"),
    (5, "Grünpate werden"),
    (6, "Grünüberwuchs Verkehrsraum"),
    (9, "Herrenlose Fahrräder, Fahrzeuge (Schrott)"),
    (8, "Laterne defekt"),
    (24, "Poller umgefahren"),
    (25, "Sammelcontainer Altpapier voll"),
    (26, "Sammelcontainer Grünschnitt voll"),
    (22, "Straßenkanaldeckel defekt"),
    (23, "Straßenschild defekt"),
    (10, "Wilde Müllkippe, Sperrmüllreste"),
];

/// Immutable mapping of service codes to display names.
///
/// Registration order is preserved for iteration. Registering the same code
/// twice keeps the later name in the position of the first registration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: IndexMap<ServiceCode, ServiceName>,
}

impl Vocabulary {
    /// Build a vocabulary from `(code, name)` pairs; the last name wins for repeated codes.
    pub fn from_entries<I, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ServiceCode, N)>,
        N: Into<ServiceName>,
    {
        let mut map = IndexMap::new();
        for (code, name) in entries {
            map.insert(code, name.into());
        }
        Self { entries: map }
    }

    /// Built-in Bonn Open311 service types.
    pub fn bonn_service_types() -> Self {
        Self::from_entries(BONN_SERVICE_TYPES)
    }

    /// True if `code` is a registered service code.
    pub fn is_known(&self, code: ServiceCode) -> bool {
        self.entries.contains_key(&code)
    }

    /// Display name for `code`.
    ///
    /// Asking for a code that is not registered is a caller bug; check
    /// [`Vocabulary::is_known`] first when the code comes from input data.
    pub fn name_of(&self, code: ServiceCode) -> Result<&str, PrepError> {
        self.entries
            .get(&code)
            .map(String::as_str)
            .ok_or(PrepError::UnknownCode { code })
    }

    /// Display name for `code`, or `"Unknown"` for non-members.
    pub fn display_name(&self, code: ServiceCode) -> &str {
        self.entries
            .get(&code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DISPLAY_NAME)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no codes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(code, name)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ServiceCode, &str)> {
        self.entries.iter().map(|(code, name)| (*code, name.as_str()))
    }
}

/// Map a parsed numeric code field onto a service code.
///
/// Returns `None` for non-finite, fractional, negative, or out-of-range
/// values; those cannot be vocabulary members.
pub fn code_from_numeric(value: f64) -> Option<ServiceCode> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < 0.0 || value > ServiceCode::MAX as f64 {
        return None;
    }
    Some(value as ServiceCode)
}
