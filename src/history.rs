//! Mood history: entries, time-window filtering and the per-user record file.

use crate::color::Rgb;
use crate::error::{JournalError, Result};
use crate::store::write_json;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One journal entry. `color` is the jittered color shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub color: Rgb,
    pub text: String,
}

/// Relative date range used to narrow the history before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::All => "All",
            TimeWindow::Week => "Week",
            TimeWindow::Month => "Month",
            TimeWindow::Year => "Year",
        }
    }

    pub fn all() -> &'static [TimeWindow] {
        &[
            TimeWindow::All,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::Year,
        ]
    }

    /// Earliest date still inside the window, or `None` when unbounded.
    ///
    /// Month and Year are calendar offsets, so the cutoff for 2024-03-31
    /// minus one month is 2024-02-29.
    pub fn cutoff(&self, now: NaiveDate) -> Option<NaiveDate> {
        let cutoff = match self {
            TimeWindow::All => return None,
            TimeWindow::Week => now.checked_sub_days(Days::new(7)),
            TimeWindow::Month => now.checked_sub_months(Months::new(1)),
            TimeWindow::Year => now.checked_sub_months(Months::new(12)),
        };
        Some(cutoff.unwrap_or(NaiveDate::MIN))
    }

    pub fn contains(&self, date: NaiveDate, now: NaiveDate) -> bool {
        self.cutoff(now).map_or(true, |cutoff| date >= cutoff)
    }
}

/// Entries whose date falls inside `window`, in their original order.
pub fn filter_by_window(
    history: &[MoodEntry],
    window: TimeWindow,
    now: NaiveDate,
) -> Vec<MoodEntry> {
    history
        .iter()
        .filter(|entry| window.contains(entry.date, now))
        .cloned()
        .collect()
}

/// Append one entry and hand back the extended history.
pub fn append_entry(
    mut history: Vec<MoodEntry>,
    date: NaiveDate,
    color: Rgb,
    text: impl Into<String>,
) -> Vec<MoodEntry> {
    history.push(MoodEntry {
        date,
        color,
        text: text.into(),
    });
    history
}

pub fn reset_history() -> Vec<MoodEntry> {
    Vec::new()
}

/// Per-user record file holding a JSON array of entries, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `username` under the data root. The username must already
    /// be validated.
    pub fn for_user(root: &Path, username: &str) -> Self {
        Self::new(root.join("history").join(format!("{username}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every entry. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<MoodEntry>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No history at {:?} yet", self.path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(JournalError::io(&self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<MoodEntry> =
            serde_json::from_str(&contents).map_err(|e| JournalError::format(&self.path, e))?;
        tracing::debug!("Loaded {} mood entries from {:?}", entries.len(), self.path);
        Ok(entries)
    }

    /// Rewrite the whole file with `history`.
    ///
    /// The new contents replace the file atomically; a failed save leaves
    /// the previous file in place.
    pub fn save(&self, history: &[MoodEntry]) -> Result<()> {
        write_json(&self.path, history)?;
        tracing::debug!("Saved {} mood entries to {:?}", history.len(), self.path);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.save(&reset_history())
    }
}
