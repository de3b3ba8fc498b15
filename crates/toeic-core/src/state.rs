//! Application state and its mutations
//!
//! `AppState` is plain data. Every mutation here is pure: no I/O, no
//! persistence. The [`Store`](crate::Store) wraps these with persistence.

use crate::id::generate_unique_id;
use crate::{
    BugLog, Card, CardStatus, Deck, Error, NewBugLog, NewCard, NewTestResult, Result, Task,
    TaskPhase, TestResult,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default target score
pub const DEFAULT_GOAL: u16 = 800;

/// Everything the tracker persists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Target TOEIC score
    pub goal: u16,
    pub exam_date: Option<NaiveDate>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub results: Vec<TestResult>,
    #[serde(default)]
    pub bugs: Vec<BugLog>,
    #[serde(default)]
    pub decks: Vec<Deck>,
}

impl AppState {
    /// The built-in starting dataset
    ///
    /// `created` dates the sample diagnostic result.
    pub fn default_dataset(goal: u16, decks: Vec<Deck>, created: DateTime<Utc>) -> Self {
        let starter =
            |id: &str, title: &str, phase| Task::new(id.to_string(), title.to_string(), phase);
        Self {
            goal,
            exam_date: None,
            tasks: vec![
                starter("1", "Memorize 20 TOEIC words", TaskPhase::Database),
                starter("2", "Read 1 Grammar article", TaskPhase::Database),
                starter("3", "Complete Part 5 practice", TaskPhase::Skills),
            ],
            results: vec![TestResult::new(
                "1".to_string(),
                NewTestResult {
                    date: created,
                    test_name: "Diagnostic Test".to_string(),
                    listening_score: 300,
                    reading_score: 250,
                },
            )],
            bugs: Vec::new(),
            decks,
        }
    }

    pub fn set_goal(&mut self, goal: u16) {
        self.goal = goal;
    }

    pub fn set_exam_date(&mut self, date: Option<NaiveDate>) {
        self.exam_date = date;
    }

    // Tasks

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add_task(&mut self, title: String, phase: TaskPhase) -> &Task {
        let id = generate_unique_id("task", |id| self.task(id).is_some());
        self.tasks.push(Task::new(id, title, phase));
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<&Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        task.toggle();
        Ok(&*task)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(pos))
    }

    // Test results

    pub fn add_result(&mut self, result: NewTestResult) -> &TestResult {
        let id = generate_unique_id("result", |id| self.results.iter().any(|r| r.id == id));
        self.results.push(TestResult::new(id, result));
        &self.results[self.results.len() - 1]
    }

    pub fn delete_result(&mut self, id: &str) -> Result<TestResult> {
        let pos = self
            .results
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::ResultNotFound(id.to_string()))?;
        Ok(self.results.remove(pos))
    }

    /// Most recently recorded result
    pub fn latest_result(&self) -> Option<&TestResult> {
        self.results.last()
    }

    // Bug logs

    pub fn add_bug(&mut self, bug: NewBugLog) -> Result<&BugLog> {
        let id = generate_unique_id("bug", |id| self.bugs.iter().any(|b| b.id == id));
        self.bugs.push(BugLog::new(id, bug)?);
        Ok(&self.bugs[self.bugs.len() - 1])
    }

    pub fn toggle_bug_review(&mut self, id: &str) -> Result<&BugLog> {
        let bug = self
            .bugs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::BugNotFound(id.to_string()))?;
        bug.toggle_reviewed();
        Ok(&*bug)
    }

    pub fn delete_bug(&mut self, id: &str) -> Result<BugLog> {
        let pos = self
            .bugs
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| Error::BugNotFound(id.to_string()))?;
        Ok(self.bugs.remove(pos))
    }

    // Decks and cards

    pub fn deck(&self, id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    fn deck_mut(&mut self, id: &str) -> Result<&mut Deck> {
        self.decks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::DeckNotFound(id.to_string()))
    }

    fn card_id_taken(&self, id: &str) -> bool {
        self.decks.iter().any(|d| d.card(id).is_some())
    }

    pub fn add_deck(&mut self, name: String) -> &Deck {
        let id = generate_unique_id("deck", |id| self.deck(id).is_some());
        self.decks.push(Deck::new(id, name));
        &self.decks[self.decks.len() - 1]
    }

    pub fn delete_deck(&mut self, id: &str) -> Result<Deck> {
        let pos = self
            .decks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| Error::DeckNotFound(id.to_string()))?;
        Ok(self.decks.remove(pos))
    }

    /// Append a `new` card to a deck
    pub fn add_card_to_deck(&mut self, deck_id: &str, card: NewCard) -> Result<&Card> {
        let id = generate_unique_id("card", |id| self.card_id_taken(id));
        let deck = self.deck_mut(deck_id)?;
        deck.cards.push(Card::new(id, card));
        Ok(&deck.cards[deck.cards.len() - 1])
    }

    /// Set a card's status and stamp its review time
    pub fn update_card_status(
        &mut self,
        deck_id: &str,
        card_id: &str,
        status: CardStatus,
    ) -> Result<&Card> {
        let card = self
            .deck_mut(deck_id)?
            .card_mut(card_id)
            .ok_or_else(|| Error::CardNotFound(card_id.to_string()))?;
        card.set_status(status);
        Ok(&*card)
    }

    /// Create a deck from parsed rows, every card starting as `new`
    pub fn import_deck(&mut self, name: String, cards: Vec<NewCard>) -> &Deck {
        let deck_id = generate_unique_id("deck", |id| self.deck(id).is_some());
        let mut deck = Deck::new(deck_id, name);
        for fields in cards {
            let id = generate_unique_id("card", |id| {
                self.card_id_taken(id) || deck.card(id).is_some()
            });
            deck.cards.push(Card::new(id, fields));
        }
        self.decks.push(deck);
        &self.decks[self.decks.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorType;

    fn state() -> AppState {
        AppState::default_dataset(DEFAULT_GOAL, crate::seed::builtin_decks(), Utc::now())
    }

    #[test]
    fn test_default_dataset() {
        let s = state();
        assert_eq!(s.goal, 800);
        assert_eq!(s.exam_date, None);
        assert_eq!(s.tasks.len(), 3);
        assert_eq!(s.results.len(), 1);
        assert_eq!(s.results[0].total_score, 550);
        assert!(s.bugs.is_empty());
        assert!(!s.decks.is_empty());
    }

    #[test]
    fn test_task_lifecycle() {
        let mut s = state();
        let id = s.add_task("Shadow Part 2 audio".to_string(), TaskPhase::Skills).id.clone();
        assert!(!s.task(&id).unwrap().completed);

        assert!(s.toggle_task(&id).unwrap().completed);
        let removed = s.delete_task(&id).unwrap();
        assert_eq!(removed.title, "Shadow Part 2 audio");
        assert!(s.task(&id).is_none());
    }

    #[test]
    fn test_unknown_ids_leave_state_unchanged() {
        let mut s = state();
        let before = s.clone();

        assert!(matches!(s.toggle_task("nope"), Err(Error::TaskNotFound(_))));
        assert!(matches!(s.delete_result("nope"), Err(Error::ResultNotFound(_))));
        assert!(matches!(s.toggle_bug_review("nope"), Err(Error::BugNotFound(_))));
        assert!(matches!(s.delete_deck("nope"), Err(Error::DeckNotFound(_))));
        assert!(matches!(
            s.update_card_status("1", "nope", CardStatus::Mastered),
            Err(Error::CardNotFound(_))
        ));
        assert!(matches!(
            s.add_card_to_deck("nope", NewCard::default()),
            Err(Error::DeckNotFound(_))
        ));
        assert_eq!(s, before);
    }

    #[test]
    fn test_add_result_computes_total() {
        let mut s = state();
        let result = s.add_result(NewTestResult {
            date: Utc::now(),
            test_name: "ETS Test 3".to_string(),
            listening_score: 300,
            reading_score: 250,
        });
        assert_eq!(result.total_score, 550);
        assert_eq!(s.latest_result().unwrap().test_name, "ETS Test 3");
    }

    #[test]
    fn test_bug_toggle_twice() {
        let mut s = state();
        let id = s
            .add_bug(NewBugLog {
                test_id: "ETS-3".to_string(),
                part: 7,
                question_num: 180,
                error_type: ErrorType::Speed,
                root_cause: "Ran out of time".to_string(),
                fix: "Skim questions first".to_string(),
            })
            .unwrap()
            .id
            .clone();

        assert!(s.toggle_bug_review(&id).unwrap().reviewed);
        assert!(!s.toggle_bug_review(&id).unwrap().reviewed);
    }

    #[test]
    fn test_import_deck_appends_new_cards_in_order() {
        let mut s = state();
        let rows = crate::import::parse_cards("alpha, a\nbeta, b\ngamma, c");
        let deck = s.import_deck("Greek".to_string(), rows);

        let terms: Vec<_> = deck.cards.iter().map(|c| c.term.as_str()).collect();
        assert_eq!(terms, vec!["alpha", "beta", "gamma"]);
        assert!(deck.cards.iter().all(|c| c.status == CardStatus::New));
        assert_eq!(s.decks.last().unwrap().name, "Greek");
    }

    #[test]
    fn test_update_card_status_stamps_review() {
        let mut s = state();
        let deck_id = s.decks[0].id.clone();
        let card_id = s.decks[0].cards[0].id.clone();

        let card = s
            .update_card_status(&deck_id, &card_id, CardStatus::Mastered)
            .unwrap();
        assert_eq!(card.status, CardStatus::Mastered);
        assert!(card.last_reviewed.is_some());
    }

    #[test]
    fn test_state_json_layout() {
        let value = serde_json::to_value(state()).unwrap();
        for key in ["goal", "examDate", "tasks", "results", "bugs", "decks"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["results"][0]["totalScore"], 550);
    }
}
