//! Journal facade over the per-user stores.
//!
//! Commands (`signup`, `login`, `submit_mood`, `reset`) change persisted
//! state and return what changed. Queries (`classify`, `history`) only
//! read. Every per-user operation takes an explicit [`Session`].

use crate::color::{jitter, Rgb};
use crate::error::{JournalError, Result};
use crate::history::{append_entry, HistoryStore, MoodEntry};
use crate::mood::{classify_mood, Classification, MoodPalette};
use crate::sentiment::SentimentOracle;
use crate::users::{normalize_username, CredentialStore, SignupResult};
use chrono::NaiveDate;
use rand::Rng;
use std::path::{Path, PathBuf};

/// The logged-in user. Only produced by [`Journal::login`] and
/// [`Journal::signup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Outcome of [`Journal::signup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signup {
    Created(Session),
    DuplicateUser,
}

/// Everything produced by one mood submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub classification: Classification,
    /// The stored entry, carrying the jittered color.
    pub entry: MoodEntry,
    /// Full history after the append.
    pub history: Vec<MoodEntry>,
}

impl Submission {
    pub fn color(&self) -> Rgb {
        self.entry.color
    }
}

pub struct Journal {
    root: PathBuf,
    palette: MoodPalette,
    oracle: Box<dyn SentimentOracle>,
    users: CredentialStore,
}

impl Journal {
    pub fn new(
        root: impl Into<PathBuf>,
        palette: MoodPalette,
        oracle: Box<dyn SentimentOracle>,
    ) -> Self {
        let root = root.into();
        let users = CredentialStore::in_root(&root);
        Self {
            root,
            palette,
            oracle,
            users,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn palette(&self) -> &MoodPalette {
        &self.palette
    }

    fn store_for(&self, session: &Session) -> HistoryStore {
        HistoryStore::for_user(&self.root, &session.username)
    }

    pub fn signup(&self, username: &str, password: &str) -> Result<Signup> {
        match self.users.signup(username, password)? {
            SignupResult::Created => Ok(Signup::Created(Session {
                username: normalize_username(username)?,
            })),
            SignupResult::DuplicateUser => Ok(Signup::DuplicateUser),
        }
    }

    /// `None` when the username/password pair does not match.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<Session>> {
        if !self.users.verify(username, password)? {
            tracing::info!("Login failed for {}", username.trim());
            return Ok(None);
        }
        let username = normalize_username(username)?;
        tracing::info!("Logged in as {}", username);
        Ok(Some(Session { username }))
    }

    pub fn classify(&self, text: &str) -> Classification {
        classify_mood(self.oracle.as_ref(), &self.palette, text)
    }

    /// Classify `text`, jitter its color and append it to the user's history.
    ///
    /// Exactly one entry is appended. If the write fails the error is
    /// returned and the stored history is left as it was.
    pub fn submit_mood<R: Rng>(
        &self,
        session: &Session,
        text: &str,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Submission> {
        if text.trim().is_empty() {
            return Err(JournalError::InputRejected);
        }

        let classification = self.classify(text);
        let color = jitter(classification.base_color, rng);

        let store = self.store_for(session);
        let history = append_entry(store.load()?, today, color, text);
        store.save(&history)?;

        tracing::info!(
            "{} logged {:?} mood (score {:.3}) as {}",
            session.username,
            classification.bucket,
            classification.score,
            color
        );

        let entry = MoodEntry {
            date: today,
            color,
            text: text.to_string(),
        };
        Ok(Submission {
            classification,
            entry,
            history,
        })
    }

    pub fn history(&self, session: &Session) -> Result<Vec<MoodEntry>> {
        self.store_for(session).load()
    }

    /// Drop every entry for the user.
    pub fn reset(&self, session: &Session) -> Result<()> {
        let store = self.store_for(session);
        store.clear()?;
        tracing::info!(
            "Reset mood history for {} at {:?}",
            session.username,
            store.path()
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
