//! Personal work log: per-day task records kept in local storage.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::{Clock, IdGenerator};
use crate::storage::LocalStorage;

/// Storage key holding the whole collection as a JSON array.
pub const STORAGE_KEY: &str = "work-logs";

/// One task worked on during a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLog {
    /// Unique id.
    pub id: String,
    /// Day the work was done.
    pub date: NaiveDate,
    /// What was done.
    pub task: String,
    /// Time spent, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkLog {
    /// Day the work was done.
    pub date: NaiveDate,
    /// What was done.
    pub task: String,
    /// Time spent, in minutes.
    pub minutes: Option<u32>,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Changes to an entry; `None` leaves a field alone.
///
/// An empty `notes` string clears the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLogUpdate {
    /// New date.
    pub date: Option<NaiveDate>,
    /// New task text.
    pub task: Option<String>,
    /// New duration.
    pub minutes: Option<u32>,
    /// New notes.
    pub notes: Option<String>,
}

impl WorkLogUpdate {
    /// Returns `true` if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.task.is_none() && self.minutes.is_none() && self.notes.is_none()
    }
}

/// Totals for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    /// The day.
    pub date: NaiveDate,
    /// Number of entries.
    pub entries: usize,
    /// Sum of recorded minutes.
    pub minutes: u32,
}

/// Work-log operations.
pub trait WorkLogService {
    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank task or a storage failure.
    fn create(&self, new: NewWorkLog) -> Result<WorkLog>;

    /// Every entry, ordered by date then creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn get_all(&self) -> Result<Vec<WorkLog>>;

    /// The entry whose id is `id` or uniquely starts with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if no entry or more than one entry matches.
    fn get(&self, id: &str) -> Result<WorkLog>;

    /// Entries for one day, ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn get_by_date(&self, date: NaiveDate) -> Result<Vec<WorkLog>> {
        Ok(self.get_all()?.into_iter().filter(|log| log.date == date).collect())
    }

    /// Applies `update` to an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist, the new task is blank,
    /// or storage fails.
    fn update(&self, id: &str, update: WorkLogUpdate) -> Result<WorkLog>;

    /// Removes an entry and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist or storage fails.
    fn delete(&self, id: &str) -> Result<WorkLog>;
}

/// Per-day totals over `logs`, oldest day first.
#[must_use]
pub fn summarize_by_day(logs: &[WorkLog]) -> Vec<DaySummary> {
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();
    for log in logs {
        let day = days.entry(log.date).or_insert(DaySummary {
            date: log.date,
            entries: 0,
            minutes: 0,
        });
        day.entries += 1;
        day.minutes = day.minutes.saturating_add(log.minutes.unwrap_or(0));
    }
    days.into_values().collect()
}

/// [`WorkLogService`] keeping the collection under [`STORAGE_KEY`].
pub struct LocalStorageWorkLogService<'a> {
    storage: LocalStorage<'a>,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> LocalStorageWorkLogService<'a> {
    /// Creates a service over explicit ports.
    #[must_use]
    pub fn new(storage: LocalStorage<'a>, clock: &'a dyn Clock, ids: &'a dyn IdGenerator) -> Self {
        Self { storage, clock, ids }
    }

    /// Creates a service using the context's filesystem, clock and id ports.
    #[must_use]
    pub fn from_context(ctx: &'a ServiceContext, store_root: &Path) -> Self {
        Self::new(
            LocalStorage::new(ctx.fs.as_ref(), store_root),
            ctx.clock.as_ref(),
            ctx.id_gen.as_ref(),
        )
    }

    fn load(&self) -> Result<Vec<WorkLog>> {
        match self.storage.get_item(STORAGE_KEY)? {
            Some(text) if !text.trim().is_empty() => {
                serde_json::from_str(&text).map_err(|e| Error::json("stored work logs", e))
            }
            _ => Ok(Vec::new()),
        }
    }

    fn save(&self, logs: &mut [WorkLog]) -> Result<()> {
        sort_logs(logs);
        let text = serde_json::to_string_pretty(logs).map_err(|e| Error::json("work logs", e))?;
        self.storage.set_item(STORAGE_KEY, &text)
    }

    fn position(logs: &[WorkLog], id: &str) -> Result<usize> {
        if let Some(index) = logs.iter().position(|log| log.id == id) {
            return Ok(index);
        }
        let mut matches = logs
            .iter()
            .enumerate()
            .filter(|(_, log)| !id.is_empty() && log.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some((index, _)), None) => Ok(index),
            (Some(_), Some(_)) => Err(Error::AmbiguousWorkLogId(id.to_string())),
            (None, _) => Err(Error::WorkLogNotFound(id.to_string())),
        }
    }
}

fn sort_logs(logs: &mut [WorkLog]) {
    logs.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
}

fn non_blank(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        Err(Error::Empty("task"))
    } else {
        Ok(text.to_string())
    }
}

impl WorkLogService for LocalStorageWorkLogService<'_> {
    fn create(&self, new: NewWorkLog) -> Result<WorkLog> {
        let task = non_blank(&new.task)?;
        let mut logs = self.load()?;
        let now = self.clock.now();
        let log = WorkLog {
            id: self.ids.generate_id(),
            date: new.date,
            task,
            minutes: new.minutes,
            notes: new.notes.filter(|n| !n.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(id = %log.id, date = %log.date, "creating work log");
        logs.push(log.clone());
        self.save(&mut logs)?;
        Ok(log)
    }

    fn get_all(&self) -> Result<Vec<WorkLog>> {
        let mut logs = self.load()?;
        sort_logs(&mut logs);
        Ok(logs)
    }

    fn get(&self, id: &str) -> Result<WorkLog> {
        let logs = self.load()?;
        let index = Self::position(&logs, id)?;
        Ok(logs[index].clone())
    }

    fn update(&self, id: &str, update: WorkLogUpdate) -> Result<WorkLog> {
        let task = update.task.as_deref().map(non_blank).transpose()?;
        let mut logs = self.load()?;
        let index = Self::position(&logs, id)?;

        let log = &mut logs[index];
        if let Some(date) = update.date {
            log.date = date;
        }
        if let Some(task) = task {
            log.task = task;
        }
        if let Some(minutes) = update.minutes {
            log.minutes = Some(minutes);
        }
        if let Some(notes) = update.notes {
            log.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
        log.updated_at = self.clock.now();
        let updated = log.clone();

        self.save(&mut logs)?;
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<WorkLog> {
        let mut logs = self.load()?;
        let index = Self::position(&logs, id)?;
        let removed = logs.remove(index);
        self.save(&mut logs)?;
        tracing::debug!(id = %removed.id, "deleted work log");
        Ok(removed)
    }
}
