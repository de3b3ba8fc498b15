//! Study queue projection and session cursor
//!
//! A study queue is the ordered subset of a deck's cards that matches the
//! session mode. The session cursor indexes into that subset and has to be
//! reconciled each time a status change shrinks or keeps the queue.

use crate::repository::Repository;
use crate::{AppState, Card, CardStatus, Deck, Error, Result, Store};
use serde::{Deserialize, Serialize};

/// Which cards a session walks through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StudyMode {
    /// Cards not yet mastered
    #[default]
    Study,
    /// Mastered cards only
    Review,
}

impl StudyMode {
    /// Whether a card with `status` belongs to this mode's queue
    pub fn includes(&self, status: CardStatus) -> bool {
        match self {
            StudyMode::Study => !status.is_mastered(),
            StudyMode::Review => status.is_mastered(),
        }
    }

    pub fn other(&self) -> StudyMode {
        match self {
            StudyMode::Study => StudyMode::Review,
            StudyMode::Review => StudyMode::Study,
        }
    }
}

impl std::str::FromStr for StudyMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "study" => Ok(StudyMode::Study),
            "review" => Ok(StudyMode::Review),
            _ => Err(crate::Error::InvalidMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for StudyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudyMode::Study => write!(f, "study"),
            StudyMode::Review => write!(f, "review"),
        }
    }
}

/// Cards matching `mode`, in deck order
pub fn project(cards: &[Card], mode: StudyMode) -> Vec<&Card> {
    cards.iter().filter(|c| mode.includes(c.status)).collect()
}

/// Queue of card IDs for a deck, used to compare queues across a mutation
fn queue_ids(deck: &Deck, mode: StudyMode) -> Vec<String> {
    project(&deck.cards, mode)
        .into_iter()
        .map(|c| c.id.clone())
        .collect()
}

/// Where the cursor lands after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    At(usize),
    Complete,
}

/// Reconcile the cursor after the card at `cursor` changed status
///
/// If that card left the queue, the new length is predicted as the old
/// length minus one and the cursor is clamped to it; the next card has
/// slid into the cursor's slot. If the card stayed, the cursor advances.
/// Running off the end of the queue completes the session.
///
/// Only the acted-on card is assumed to move. When other elements of the
/// queue change at the same time the clamped index may name a different
/// card than the one that followed.
pub fn reconcile_cursor<T: PartialEq>(old_queue: &[T], new_queue: &[T], cursor: usize) -> Cursor {
    let Some(acted) = old_queue.get(cursor) else {
        // Cursor was already stale: snap like a fresh projection would
        return if new_queue.is_empty() {
            Cursor::Complete
        } else {
            Cursor::At(0)
        };
    };

    if new_queue.contains(acted) {
        if cursor + 1 < old_queue.len() {
            Cursor::At(cursor + 1)
        } else {
            Cursor::Complete
        }
    } else {
        let predicted = old_queue.len() - 1;
        if predicted == 0 {
            Cursor::Complete
        } else {
            Cursor::At(cursor.min(predicted - 1))
        }
    }
}

/// What a session shows right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView<'a> {
    Card {
        card: &'a Card,
        /// Zero-based index into the queue
        position: usize,
        total: usize,
    },
    Complete,
}

/// A flashcard session over one deck
///
/// The cursor is transient and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    deck_id: String,
    mode: StudyMode,
    cursor: usize,
    complete: bool,
}

impl StudySession {
    pub fn new(deck_id: impl Into<String>, mode: StudyMode) -> Self {
        Self {
            deck_id: deck_id.into(),
            mode,
            cursor: 0,
            complete: false,
        }
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    fn deck<'a>(&self, state: &'a AppState) -> Result<&'a Deck> {
        state
            .deck(&self.deck_id)
            .ok_or_else(|| Error::DeckNotFound(self.deck_id.clone()))
    }

    /// Current queue for this session's deck and mode
    pub fn queue<'a>(&self, state: &'a AppState) -> Result<Vec<&'a Card>> {
        Ok(project(&self.deck(state)?.cards, self.mode))
    }

    /// Start over in another mode
    pub fn switch_mode(&mut self, mode: StudyMode) {
        self.mode = mode;
        self.cursor = 0;
        self.complete = false;
    }

    /// Step back one card, `false` when already at the start
    ///
    /// Stepping back out of a completed session reopens it. An empty queue
    /// is completed again by the next `view`.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.complete = false;
        true
    }

    /// Resolve the card under the cursor
    ///
    /// An empty queue completes the session. A cursor past the end of a
    /// non-empty queue snaps back to 0.
    pub fn view<'a>(&mut self, state: &'a AppState) -> Result<SessionView<'a>> {
        let queue = self.queue(state)?;
        if queue.is_empty() {
            self.complete = true;
        }
        if self.complete {
            return Ok(SessionView::Complete);
        }
        if self.cursor >= queue.len() {
            self.cursor = 0;
        }
        Ok(SessionView::Card {
            card: queue[self.cursor],
            position: self.cursor,
            total: queue.len(),
        })
    }

    /// Record a status for the card under the cursor and move on
    ///
    /// Returns the new cursor. Does nothing when the session is complete
    /// or the cursor does not point at a card.
    pub fn answer<R: Repository>(
        &mut self,
        store: &mut Store<R>,
        status: CardStatus,
    ) -> Result<Cursor> {
        let old_queue = queue_ids(self.deck(store.state())?, self.mode);
        if self.complete {
            return Ok(Cursor::Complete);
        }
        let Some(card_id) = old_queue.get(self.cursor).cloned() else {
            return Ok(Cursor::At(self.cursor));
        };

        let deck_id = self.deck_id.clone();
        store.mutate(|s| s.update_card_status(&deck_id, &card_id, status).map(|_| ()))?;

        let new_queue = queue_ids(self.deck(store.state())?, self.mode);
        let next = reconcile_cursor(&old_queue, &new_queue, self.cursor);
        match next {
            Cursor::At(i) => self.cursor = i,
            Cursor::Complete => self.complete = true,
        }
        Ok(next)
    }
}
