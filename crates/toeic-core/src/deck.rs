//! Vocabulary deck data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card learning status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    #[default]
    New,
    Learning,
    Mastered,
}

impl CardStatus {
    pub fn is_mastered(&self) -> bool {
        matches!(self, CardStatus::Mastered)
    }
}

impl std::str::FromStr for CardStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(CardStatus::New),
            "learning" => Ok(CardStatus::Learning),
            "mastered" => Ok(CardStatus::Mastered),
            _ => Err(crate::Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for CardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardStatus::New => write!(f, "new"),
            CardStatus::Learning => write!(f, "learning"),
            CardStatus::Mastered => write!(f, "mastered"),
        }
    }
}

/// Card fields supplied by the user or an import, before the store
/// assigns an ID and status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub term: String,
    pub definition: String,
    #[serde(rename = "type")]
    pub lexical_type: String,
    pub example: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A vocabulary flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,

    /// Word or phrase being learned
    pub term: String,

    /// Meaning shown on the back of the card
    pub definition: String,

    /// Lexical type label (n, v, adj, ...)
    #[serde(rename = "type")]
    pub lexical_type: String,

    /// Example sentence, may be empty
    #[serde(default)]
    pub example: String,

    #[serde(default)]
    pub status: CardStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,

    /// Audio asset path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,

    /// Image asset path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// When the status was last changed by a study action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Card {
    /// Create a fresh card from user supplied fields
    pub fn new(id: String, fields: NewCard) -> Self {
        Self {
            id,
            term: fields.term,
            definition: fields.definition,
            lexical_type: fields.lexical_type,
            example: fields.example,
            status: CardStatus::New,
            pronunciation: fields.pronunciation,
            audio: fields.audio,
            image: fields.image,
            last_reviewed: None,
        }
    }

    /// Set the status and stamp the review time
    ///
    /// Any status may follow any other.
    pub fn set_status(&mut self, status: CardStatus) {
        self.status = status;
        self.last_reviewed = Some(Utc::now());
    }
}

/// A named, ordered collection of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,

    /// Cover image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Cards in insertion order
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            image: None,
            cards: Vec::new(),
        }
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn mastered_count(&self) -> usize {
        self.cards.iter().filter(|c| c.status.is_mastered()).count()
    }

    /// Cards still to study (not mastered)
    pub fn remaining_count(&self) -> usize {
        self.cards.len() - self.mastered_count()
    }
}
