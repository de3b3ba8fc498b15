//! Seed vocabulary used to build the default decks
//!
//! The dataset is a list of lessons, each holding raw word records. One
//! lesson becomes one deck and every word becomes a `new` card.

use crate::{Card, CardStatus, Deck, Result};
use serde::Deserialize;
use std::path::Path;

/// Vocabulary bundled with the library
pub const BUILTIN_VOCAB: &str = include_str!("../data/vocab-data.json");

/// Display labels a lexical type may normalize to
pub const LEXICAL_TYPES: [&str; 6] = ["n", "v", "adj", "adv", "prep", "conj"];

/// A lesson record as it appears in the dataset
#[derive(Debug, Clone, Deserialize)]
pub struct RawLesson {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub words: Vec<RawWord>,
}

/// A word record as it appears in the dataset
#[derive(Debug, Clone, Deserialize)]
pub struct RawWord {
    pub id: String,
    pub term: String,
    /// Numeric code, short code or parenthesized label
    #[serde(rename = "type", default)]
    pub lexical_type: Option<serde_json::Value>,
    pub meaning: String,
    #[serde(default)]
    pub pronunciation: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Parse a vocabulary dataset
pub fn parse_lessons(json: &str) -> Result<Vec<RawLesson>> {
    Ok(serde_json::from_str(json)?)
}

/// Map a raw lexical type tag onto one of [`LEXICAL_TYPES`]
///
/// Numeric codes 1-6 and short codes (with or without parentheses) are
/// recognized. Anything else becomes the empty label.
pub fn normalize_type(raw: &str) -> String {
    let tag = raw
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .to_lowercase();

    let label = match tag.as_str() {
        "1" | "n" => "n",
        "2" | "v" => "v",
        "3" | "adj" => "adj",
        "4" | "adv" => "adv",
        "5" | "prep" => "prep",
        "6" | "conj" => "conj",
        _ => "",
    };
    label.to_string()
}

/// Rewrite dataset asset paths ("assets/x.png") to served paths ("/x.png")
pub fn normalize_image(path: Option<String>) -> Option<String> {
    let path = path.filter(|p| !p.trim().is_empty())?;
    match path.strip_prefix("assets/") {
        Some(rest) => Some(format!("/{}", rest)),
        None => Some(path),
    }
}

fn raw_type_tag(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Build decks from parsed lessons, preserving lesson and word order
pub fn build_decks(lessons: Vec<RawLesson>) -> Vec<Deck> {
    lessons
        .into_iter()
        .map(|lesson| Deck {
            id: lesson.id,
            name: lesson.name,
            image: normalize_image(lesson.image),
            cards: lesson
                .words
                .into_iter()
                .map(|w| Card {
                    lexical_type: normalize_type(&raw_type_tag(w.lexical_type.as_ref())),
                    id: w.id,
                    term: w.term,
                    definition: w.meaning,
                    example: w.example.unwrap_or_default(),
                    status: CardStatus::New,
                    pronunciation: w.pronunciation.filter(|p| !p.is_empty()),
                    audio: w.audio.filter(|a| !a.is_empty()),
                    image: w.image.filter(|i| !i.is_empty()),
                    last_reviewed: None,
                })
                .collect(),
        })
        .collect()
}

/// Decks from the bundled dataset
pub fn builtin_decks() -> Vec<Deck> {
    match parse_lessons(BUILTIN_VOCAB) {
        Ok(lessons) => build_decks(lessons),
        Err(e) => {
            tracing::warn!("Bundled vocabulary is invalid: {}", e);
            Vec::new()
        }
    }
}

/// Decks from an external dataset, falling back to the bundled one
pub fn load_decks(path: Option<&Path>) -> Vec<Deck> {
    let Some(path) = path else {
        return builtin_decks();
    };

    let lessons = std::fs::read_to_string(path)
        .map_err(crate::Error::from)
        .and_then(|content| parse_lessons(&content));

    match lessons {
        Ok(lessons) => {
            tracing::debug!("Loaded {} lessons from {}", lessons.len(), path.display());
            build_decks(lessons)
        }
        Err(e) => {
            tracing::warn!(
                "Could not load vocabulary from {}: {}; using bundled set",
                path.display(),
                e
            );
            builtin_decks()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type("1"), "n");
        assert_eq!(normalize_type("6"), "conj");
        assert_eq!(normalize_type("(adj)"), "adj");
        assert_eq!(normalize_type(" ADV "), "adv");
        assert_eq!(normalize_type("prep"), "prep");
        assert_eq!(normalize_type("7"), "");
        assert_eq!(normalize_type("phrase"), "");
        assert_eq!(normalize_type(""), "");
    }

    #[test]
    fn test_normalize_image() {
        assert_eq!(
            normalize_image(Some("assets/images/a.jpg".to_string())),
            Some("/images/a.jpg".to_string())
        );
        assert_eq!(
            normalize_image(Some("/already/served.png".to_string())),
            Some("/already/served.png".to_string())
        );
        assert_eq!(normalize_image(Some(String::new())), None);
        assert_eq!(normalize_image(None), None);
    }

    #[test]
    fn test_build_decks_from_numeric_codes() {
        let json = r#"[
            {"id": "9", "name": "Office", "words": [
                {"id": "90", "term": "memo", "type": 1, "meaning": "bản ghi nhớ"},
                {"id": "91", "term": "file", "type": "2", "meaning": "sắp xếp", "example": "File it."},
                {"id": "92", "term": "asap", "type": "abbr", "meaning": "càng sớm càng tốt"}
            ]}
        ]"#;
        let decks = build_decks(parse_lessons(json).unwrap());

        assert_eq!(decks.len(), 1);
        let deck = &decks[0];
        assert_eq!(deck.id, "9");
        assert_eq!(deck.image, None);
        let types: Vec<_> = deck.cards.iter().map(|c| c.lexical_type.as_str()).collect();
        assert_eq!(types, vec!["n", "v", ""]);
        assert_eq!(deck.cards[0].example, "");
        assert_eq!(deck.cards[1].example, "File it.");
        assert!(deck.cards.iter().all(|c| c.status == CardStatus::New));
    }

    #[test]
    fn test_builtin_decks_are_valid() {
        let decks = builtin_decks();
        assert!(!decks.is_empty());
        assert!(decks.iter().all(|d| !d.cards.is_empty()));
        for card in decks.iter().flat_map(|d| &d.cards) {
            assert!(LEXICAL_TYPES.contains(&card.lexical_type.as_str()));
        }
        assert_eq!(decks[0].image.as_deref(), Some("/images/lessons/contracts.jpg"));
    }

    #[test]
    fn test_load_decks_falls_back_on_missing_file() {
        let decks = load_decks(Some(Path::new("/nonexistent/vocab.json")));
        assert_eq!(decks, builtin_decks());
    }
}
