//! Mock test countdown
//!
//! Tick-driven: the caller decides how often `tick` runs (once per second
//! for a real exam).

use serde::{Deserialize, Serialize};

/// Default warning threshold, in seconds
pub const WARNING_SECONDS: u32 = 300;

/// Which part of the exam is being timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Full,
    Listening,
    Reading,
}

impl Section {
    /// Time allowed, in seconds
    pub fn duration(&self) -> u32 {
        match self {
            Section::Full => 7200,
            Section::Listening => 2700,
            Section::Reading => 4500,
        }
    }
}

impl std::str::FromStr for Section {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Section::Full),
            "listening" | "lc" => Ok(Section::Listening),
            "reading" | "rc" => Ok(Section::Reading),
            _ => Err(crate::Error::InvalidSection(s.to_string())),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Full => write!(f, "Full"),
            Section::Listening => write!(f, "Listening"),
            Section::Reading => write!(f, "Reading"),
        }
    }
}

/// Format seconds as `[h:]mm:ss`
pub fn format_time(seconds: u32) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    section: Section,
    remaining: u32,
    running: bool,
    warning_seconds: u32,
}

impl Countdown {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            remaining: section.duration(),
            running: false,
            warning_seconds: WARNING_SECONDS,
        }
    }

    pub fn with_warning(mut self, seconds: u32) -> Self {
        self.warning_seconds = seconds;
        self
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Less than the warning threshold left
    pub fn is_warning(&self) -> bool {
        self.remaining < self.warning_seconds
    }

    /// Start counting; a finished countdown stays stopped
    pub fn start(&mut self) {
        self.running = !self.is_finished();
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and reload the full duration of the current section
    pub fn reset(&mut self) {
        self.select(self.section);
    }

    /// Stop and switch to another section
    pub fn select(&mut self, section: Section) {
        self.section = section;
        self.remaining = section.duration();
        self.running = false;
    }

    /// Advance one second, returns `true` when this tick reached zero
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn display(&self) -> String {
        format_time(self.remaining)
    }
}
