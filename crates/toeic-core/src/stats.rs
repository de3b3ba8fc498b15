//! Dashboard figures derived from the state

use crate::{AppState, TaskPhase};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseProgress {
    pub phase: TaskPhase,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckProgress {
    pub id: String,
    pub name: String,
    pub mastered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub goal: u16,
    /// Total of the most recent result, 0 when nothing is recorded
    pub latest_score: u16,
    /// Points still missing, negative once the goal is passed
    pub score_gap: i32,
    pub exam_date: Option<NaiveDate>,
    /// Days from `today` to the exam, negative once it has passed
    pub days_left: Option<i64>,
    /// Bugs not yet reviewed
    pub pending_bugs: usize,
    pub phases: Vec<PhaseProgress>,
    pub decks: Vec<DeckProgress>,
}

impl Dashboard {
    pub fn from_state(state: &AppState, today: NaiveDate) -> Self {
        let latest_score = state.latest_result().map(|r| r.total_score).unwrap_or(0);

        let phases = TaskPhase::ALL
            .iter()
            .map(|&phase| {
                let tasks: Vec<_> = state.tasks.iter().filter(|t| t.phase == phase).collect();
                PhaseProgress {
                    phase,
                    completed: tasks.iter().filter(|t| t.completed).count(),
                    total: tasks.len(),
                }
            })
            .collect();

        let decks = state
            .decks
            .iter()
            .map(|d| DeckProgress {
                id: d.id.clone(),
                name: d.name.clone(),
                mastered: d.mastered_count(),
                total: d.cards.len(),
            })
            .collect();

        Self {
            goal: state.goal,
            latest_score,
            score_gap: i32::from(state.goal) - i32::from(latest_score),
            exam_date: state.exam_date,
            days_left: state.exam_date.map(|d| (d - today).num_days()),
            pending_bugs: state.bugs.iter().filter(|b| !b.reviewed).count(),
            phases,
            decks,
        }
    }

    pub fn goal_reached(&self) -> bool {
        self.score_gap <= 0
    }
}
