//! JSON event source.
//!
//! An events file is a JSON array of [`Event`] objects. The scoring engine
//! trusts its input, so this is where malformed entries are caught.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, ValidationError};
use crate::event::Event;

/// Validated, read-only snapshot of an events file.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    path: Option<PathBuf>,
    events: Vec<Event>,
}

impl EventStore {
    /// Load and validate every event; the first invalid entry fails the load.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not a JSON event
    /// array, or contains an invalid event.
    pub fn open(path: &Path) -> Result<Self> {
        let events = read_events(path)?;
        validate_events(&events)?;
        tracing::debug!(path = %path.display(), count = events.len(), "loaded events");
        Ok(Self {
            path: Some(path.to_path_buf()),
            events,
        })
    }

    /// Load, dropping entries that fail to deserialize or validate instead
    /// of failing.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a JSON array.
    pub fn open_lenient(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: Vec<serde_json::Value> = serde_json::from_str(&content)?;
        let total = raw.len();
        let mut seen = HashSet::new();
        let mut events = Vec::with_capacity(total);

        for (index, value) in raw.into_iter().enumerate() {
            let event = match serde_json::from_value::<Event>(value) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable event");
                    continue;
                }
            };
            match validate_event(index, &event, &mut seen) {
                Ok(()) => events.push(event),
                Err(e) => tracing::warn!(error = %e, "skipping invalid event"),
            }
        }

        tracing::debug!(
            path = %path.display(),
            count = events.len(),
            skipped = total - events.len(),
            "loaded events"
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            events,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn read_events(path: &Path) -> Result<Vec<Event>> {
    let content = std::fs::read_to_string(path)?;
    let events: Vec<Event> = serde_json::from_str(&content)?;
    Ok(events)
}

/// Check every event, failing on the first invalid one.
///
/// # Errors
/// Returns [`ValidationError::InvalidEvent`] naming the offending index.
pub fn validate_events(events: &[Event]) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (index, event) in events.iter().enumerate() {
        validate_event(index, event, &mut seen)?;
    }
    Ok(())
}

fn validate_event(
    index: usize,
    event: &Event,
    seen: &mut HashSet<String>,
) -> std::result::Result<(), ValidationError> {
    let invalid = |message: &str| ValidationError::InvalidEvent {
        index,
        id: event.id.clone(),
        message: message.to_string(),
    };

    if event.id.trim().is_empty() {
        return Err(invalid("id must not be empty"));
    }
    if event.name.trim().is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if !(1..=10).contains(&event.impact) {
        return Err(invalid("impact must be between 1 and 10"));
    }
    if !seen.insert(event.id.clone()) {
        return Err(invalid("duplicate id"));
    }
    Ok(())
}
