//! Mistake ("bug") log data model

use serde::{Deserialize, Serialize};

/// Category of a mistake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
pub enum ErrorType {
    Vocab,
    #[default]
    Grammar,
    #[serde(rename = "Trap/Trick")]
    TrapTrick,
    Speed,
    Pronunciation,
    Other,
}

impl std::str::FromStr for ErrorType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vocab" => Ok(ErrorType::Vocab),
            "grammar" => Ok(ErrorType::Grammar),
            "trap/trick" | "trap" | "trick" | "trap-trick" => Ok(ErrorType::TrapTrick),
            "speed" => Ok(ErrorType::Speed),
            "pronunciation" => Ok(ErrorType::Pronunciation),
            "other" => Ok(ErrorType::Other),
            _ => Err(crate::Error::InvalidErrorType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorType::Vocab => write!(f, "Vocab"),
            ErrorType::Grammar => write!(f, "Grammar"),
            ErrorType::TrapTrick => write!(f, "Trap/Trick"),
            ErrorType::Speed => write!(f, "Speed"),
            ErrorType::Pronunciation => write!(f, "Pronunciation"),
            ErrorType::Other => write!(f, "Other"),
        }
    }
}

/// Fields supplied when logging a mistake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBugLog {
    pub test_id: String,
    pub part: u8,
    pub question_num: u16,
    pub error_type: ErrorType,
    pub root_cause: String,
    pub fix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugLog {
    pub id: String,

    /// Test the mistake was made in
    pub test_id: String,

    /// TOEIC part (1-7)
    pub part: u8,

    pub question_num: u16,
    pub error_type: ErrorType,
    pub root_cause: String,
    pub fix: String,
    pub reviewed: bool,
}

impl BugLog {
    pub const PARTS: std::ops::RangeInclusive<u8> = 1..=7;

    pub fn new(id: String, bug: NewBugLog) -> crate::Result<Self> {
        if !Self::PARTS.contains(&bug.part) {
            return Err(crate::Error::InvalidPart(bug.part));
        }
        Ok(Self {
            id,
            test_id: bug.test_id,
            part: bug.part,
            question_num: bug.question_num,
            error_type: bug.error_type,
            root_cause: bug.root_cause,
            fix: bug.fix,
            reviewed: false,
        })
    }

    pub fn toggle_reviewed(&mut self) {
        self.reviewed = !self.reviewed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bug(part: u8) -> NewBugLog {
        NewBugLog {
            test_id: "ETS-1".to_string(),
            part,
            question_num: 131,
            error_type: ErrorType::Grammar,
            root_cause: "Confused gerund and infinitive".to_string(),
            fix: "Review verbs followed by -ing".to_string(),
        }
    }

    #[test]
    fn test_part_range_enforced() {
        assert!(BugLog::new("bug-1".to_string(), new_bug(5)).is_ok());
        assert!(matches!(
            BugLog::new("bug-1".to_string(), new_bug(0)),
            Err(crate::Error::InvalidPart(0))
        ));
        assert!(matches!(
            BugLog::new("bug-1".to_string(), new_bug(8)),
            Err(crate::Error::InvalidPart(8))
        ));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut bug = BugLog::new("bug-1".to_string(), new_bug(5)).unwrap();
        assert!(!bug.reviewed);
        bug.toggle_reviewed();
        assert!(bug.reviewed);
        bug.toggle_reviewed();
        assert!(!bug.reviewed);
    }

    #[test]
    fn test_error_type_wire_name() {
        assert_eq!(serde_json::to_string(&ErrorType::TrapTrick).unwrap(), "\"Trap/Trick\"");
        assert_eq!("trap/trick".parse::<ErrorType>().unwrap(), ErrorType::TrapTrick);
        assert!("typo".parse::<ErrorType>().is_err());
    }
}
