//! Ordered, duplicate-free set of selected company ids.
//!
//! Insertion order drives legend colours and chip order, so every mutation
//! preserves the relative order of the ids it leaves in place.

use crate::domain::error::SelectionError;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection, dropping later duplicates.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let ids = ids
            .into_iter()
            .map(Into::into)
            .filter(|id: &String| seen.insert(id.clone()))
            .collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

/// Parses a comma-separated id list. Blank input is an empty selection.
pub fn parse_selection(input: &str) -> Result<Selection, SelectionError> {
    if input.trim().is_empty() {
        return Ok(Selection::new());
    }

    let mut ids = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let id = token.trim();
        if id.is_empty() {
            return Err(SelectionError::EmptyToken);
        }
        if !seen.insert(id.to_string()) {
            return Err(SelectionError::DuplicateId(id.to_string()));
        }
        ids.push(id.to_string());
    }

    Ok(Selection { ids })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    Add(String),
    Toggle(String),
    Remove(String),
    Replace(Selection),
}

/// Owner of the session's selection. All writes go through [`apply`].
///
/// A toggle that removes an id remembers where it sat; toggling the same id
/// straight back puts it in that slot, so a toggle pair is a no-op even for
/// ids in the middle of the selection. Any other action forgets the slot and
/// a fresh toggle appends.
///
/// [`apply`]: SelectionStore::apply
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    current: Selection,
    revision: u64,
    toggled_out: Option<(String, usize)>,
}

impl SelectionStore {
    pub fn new(initial: Selection) -> Self {
        Self {
            current: initial,
            revision: 0,
            toggled_out: None,
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Bumped on every action that changed the selection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies one action. Returns whether the selection changed.
    pub fn apply(&mut self, action: SelectionAction) -> bool {
        let slot = self.toggled_out.take();
        let ids = &mut self.current.ids;
        let changed = match action {
            SelectionAction::Add(id) => {
                if ids.contains(&id) {
                    false
                } else {
                    ids.push(id);
                    true
                }
            }
            SelectionAction::Toggle(id) => {
                if let Some(pos) = ids.iter().position(|s| *s == id) {
                    ids.remove(pos);
                    self.toggled_out = Some((id, pos));
                } else {
                    match slot {
                        Some((prev, pos)) if prev == id && pos <= ids.len() => {
                            ids.insert(pos, id)
                        }
                        _ => ids.push(id),
                    }
                }
                true
            }
            SelectionAction::Remove(id) => match ids.iter().position(|s| *s == id) {
                Some(pos) => {
                    ids.remove(pos);
                    true
                }
                None => false,
            },
            SelectionAction::Replace(next) => {
                let changed = *ids != next.ids;
                self.current = next;
                changed
            }
        };
        if changed {
            self.revision += 1;
            tracing::debug!(
                revision = self.revision,
                size = self.current.len(),
                "selection changed"
            );
        }
        changed
    }

    pub fn add(&mut self, id: &str) -> bool {
        self.apply(SelectionAction::Add(id.to_string()))
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.apply(SelectionAction::Toggle(id.to_string()))
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.apply(SelectionAction::Remove(id.to_string()))
    }

    pub fn replace(&mut self, next: Selection) -> bool {
        self.apply(SelectionAction::Replace(next))
    }
}
