//! Domain types for the codex viewer: supported languages, the bias
//! content catalog, and the history-entry payload.

use serde::{Deserialize, Serialize};

/// Languages the diagram asset ships in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
    Ca,
    Eu,
    Fr,
    Uk,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Pt,
        Language::Ca,
        Language::Eu,
        Language::Fr,
        Language::Uk,
    ];

    /// Two-letter code used in asset names and the `lang` URL parameter.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
            Language::Ca => "ca",
            Language::Eu => "eu",
            Language::Fr => "fr",
            Language::Uk => "uk",
        }
    }

    /// Native-name label for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pt => "Português",
            Language::Ca => "Català",
            Language::Eu => "Euskara",
            Language::Fr => "Français",
            Language::Uk => "Українська",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Resolves an optional URL parameter, defaulting to English.
    pub fn from_param(param: Option<&str>) -> Language {
        param.and_then(Language::from_code).unwrap_or_default()
    }
}

/// Payload stored on pushed history entries so back/forward can restore
/// the language without reparsing the URL.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    pub language: Language,
}

/// One bias from the auxiliary content document.
#[derive(Clone, Debug, PartialEq)]
pub struct BiasEntry {
    pub slug: String,
    pub name: String,
    pub content_html: String,
}

/// Name-keyed lookup over the content document, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BiasCatalog {
    entries: Vec<BiasEntry>,
}

/// Lowercases and joins whitespace runs with dashes, the key form shared
/// by the catalog and the diagram's node names.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

impl BiasCatalog {
    /// Adds an entry. Blank names and blank content bodies are dropped;
    /// lookups for such biases miss and take the stock fallback text.
    pub fn push(&mut self, name: &str, content_html: String) {
        let name = name.trim();
        if name.is_empty() || content_html.trim().is_empty() {
            return;
        }
        self.entries.push(BiasEntry {
            slug: slugify(name),
            name: name.to_string(),
            content_html,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks a bias up by display name: exact slug match first, then the
    /// first entry whose slug contains or is contained by the query.
    pub fn find(&self, name: &str) -> Option<&BiasEntry> {
        let key = slugify(name);
        if key.is_empty() {
            return None;
        }
        if let Some(hit) = self.entries.iter().find(|e| e.slug == key) {
            return Some(hit);
        }
        self.entries
            .iter()
            .find(|e| e.slug.contains(&key) || key.contains(&e.slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> BiasCatalog {
        let mut catalog = BiasCatalog::default();
        catalog.push("Fundamental Attribution Error", "<p>FAE</p>".into());
        catalog.push("Anchoring", "<p>anchoring</p>".into());
        catalog.push("Self-serving bias", "<p>ssb</p>".into());
        catalog
    }

    #[test]
    fn slugify_collapses_whitespace_and_lowercases() {
        assert_eq!(slugify("Fundamental Attribution Error"), "fundamental-attribution-error");
        assert_eq!(slugify("Anchoring"), "anchoring");
        assert_eq!(slugify("  Self-serving   bias "), "self-serving-bias");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn find_prefers_the_exact_slug() {
        let catalog = sample_catalog();
        let hit = catalog.find("Anchoring").unwrap();
        assert_eq!(hit.name, "Anchoring");
    }

    #[test]
    fn find_falls_back_to_substring_matches_both_ways() {
        let catalog = sample_catalog();
        // Query longer than the stored slug.
        let hit = catalog.find("Anchoring effect").unwrap();
        assert_eq!(hit.name, "Anchoring");
        // Query shorter than the stored slug.
        let hit = catalog.find("Attribution error").unwrap();
        assert_eq!(hit.name, "Fundamental Attribution Error");
    }

    #[test]
    fn blank_content_is_not_catalogued() {
        let mut catalog = BiasCatalog::default();
        catalog.push("Framing effect", String::new());
        catalog.push("Declinism", "  \n ".into());
        catalog.push("   ", "<p>orphaned body</p>".into());
        assert!(catalog.is_empty());

        catalog.push("Framing effect", "<p>framing</p>".into());
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("Framing effect").is_some());
        assert!(catalog.find("Declinism").is_none());
    }

    #[test]
    fn find_misses_return_none() {
        let catalog = sample_catalog();
        assert!(catalog.find("Dunning Kruger").is_none());
        assert!(catalog.find("   ").is_none());
        assert!(BiasCatalog::default().find("Anchoring").is_none());
    }

    #[test]
    fn language_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn unsupported_params_fall_back_to_english() {
        assert_eq!(Language::from_param(Some("fr")), Language::Fr);
        assert_eq!(Language::from_param(Some("xx")), Language::En);
        assert_eq!(Language::from_param(None), Language::En);
    }

    #[test]
    fn history_state_serializes_to_the_wire_shape() {
        let state = HistoryState { language: Language::Fr };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"language":"fr"}"#);
        let back: HistoryState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
