//! Daily task data model

use serde::{Deserialize, Serialize};

/// Study phase a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
pub enum TaskPhase {
    #[default]
    Database,
    Skills,
    Deploy,
}

impl TaskPhase {
    pub const ALL: [TaskPhase; 3] = [TaskPhase::Database, TaskPhase::Skills, TaskPhase::Deploy];
}

impl std::str::FromStr for TaskPhase {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "database" => Ok(TaskPhase::Database),
            "skills" => Ok(TaskPhase::Skills),
            "deploy" => Ok(TaskPhase::Deploy),
            _ => Err(crate::Error::InvalidPhase(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPhase::Database => write!(f, "Database"),
            TaskPhase::Skills => write!(f, "Skills"),
            TaskPhase::Deploy => write!(f, "Deploy"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub phase: TaskPhase,
}

impl Task {
    pub fn new(id: String, title: String, phase: TaskPhase) -> Self {
        Self {
            id,
            title,
            completed: false,
            phase,
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(f, "[{}] {} ({}) {}", mark, self.id, self.phase, self.title)
    }
}
