//! Filter selection and the ward catalogue.
//!
//! A facet is one named filter dimension whose `"All"` sentinel means
//! unrestricted. Updates are pure value replacements; nothing here
//! triggers a fetch — reacting to changes is the orchestrator's job.

/// Sentinel facet value meaning "no restriction".
pub const ALL: &str = "All";

/// One categorical filter dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facet {
    Emotion,
    City,
    Ward,
}

/// The canonical filter selection: categorical facets plus free-text
/// search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSelection {
    pub emotion: String,
    pub city: String,
    pub ward: String,
    pub search_term: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            emotion: ALL.to_string(),
            city: ALL.to_string(),
            ward: ALL.to_string(),
            search_term: String::new(),
        }
    }
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a single facet, leaving the others untouched.
    pub fn set_facet(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        match facet {
            Facet::Emotion => self.emotion = value,
            Facet::City => self.city = value,
            Facet::Ward => self.ward = value,
        }
    }

    pub fn facet(&self, facet: Facet) -> &str {
        match facet {
            Facet::Emotion => &self.emotion,
            Facet::City => &self.city,
            Facet::Ward => &self.ward,
        }
    }

    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.search_term = text.into();
    }

    /// Query parameters for the analytics request, in a stable order.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("emotion", self.emotion.clone()),
            ("city", self.city.clone()),
            ("ward", self.ward.clone()),
            ("searchTerm", self.search_term.clone()),
        ]
    }
}

/// Ordered ward names, always led by the `"All"` sentinel.
///
/// Populated once per authenticated session and cleared only on logout;
/// the empty-state default is `["All"]`, never an empty list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WardCatalogue {
    names: Vec<String>,
}

impl Default for WardCatalogue {
    fn default() -> Self {
        Self {
            names: vec![ALL.to_string()],
        }
    }
}

impl WardCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// True once any real ward has been merged in.
    pub fn is_populated(&self) -> bool {
        self.names.len() > 1
    }

    /// Replace the catalogue with the sentinel followed by `incoming`,
    /// deduplicated in first-seen order.
    pub fn merge(&mut self, incoming: Vec<String>) {
        let mut names = vec![ALL.to_string()];
        for ward in incoming {
            if ward != ALL && !names.contains(&ward) {
                names.push(ward);
            }
        }
        self.names = names;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
