//! SequenceEdit — one validated change to a template sequence
//!
//! Positions are 1-based. Every edit names the template bases it expects, so a
//! stale template is caught before anything is written.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditKind {
    /// Replace one base
    Substitution { reference: char, variant: char },
    /// Insert `bases` after the anchor base at `position`
    Insertion { anchor: char, bases: String },
    /// Remove the run `reference` starting at `position`
    Deletion { reference: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEdit {
    pub position: usize,
    #[serde(flatten)]
    pub kind: EditKind,
}

impl SequenceEdit {
    pub fn substitution(position: usize, reference: char, variant: char) -> Self {
        Self {
            position,
            kind: EditKind::Substitution { reference, variant },
        }
    }

    pub fn insertion(position: usize, anchor: char, bases: &str) -> Self {
        Self {
            position,
            kind: EditKind::Insertion {
                anchor,
                bases: bases.to_string(),
            },
        }
    }

    pub fn deletion(position: usize, reference: &str) -> Self {
        Self {
            position,
            kind: EditKind::Deletion {
                reference: reference.to_string(),
            },
        }
    }

    /// Template bases this edit must find at `position`
    pub fn expected(&self) -> String {
        match &self.kind {
            EditKind::Substitution { reference, .. } => reference.to_string(),
            EditKind::Insertion { anchor, .. } => anchor.to_string(),
            EditKind::Deletion { reference } => reference.clone(),
        }
    }

    /// Half-open 1-based span of template bases the edit reads. The end
    /// saturates at `usize::MAX`.
    pub fn span(&self) -> (usize, usize) {
        let width = match &self.kind {
            EditKind::Deletion { reference } => reference.len(),
            _ => 1,
        };
        (self.position, self.position.saturating_add(width))
    }

    /// Insertions and deletions change the sequence length
    pub fn is_indel(&self) -> bool {
        !matches!(self.kind, EditKind::Substitution { .. })
    }

    /// Net change in sequence length
    pub fn length_delta(&self) -> isize {
        match &self.kind {
            EditKind::Substitution { .. } => 0,
            EditKind::Insertion { bases, .. } => bases.len() as isize,
            EditKind::Deletion { reference } => -(reference.len() as isize),
        }
    }

    pub(crate) fn is_ascii(&self) -> bool {
        match &self.kind {
            EditKind::Substitution { reference, variant } => reference.is_ascii() && variant.is_ascii(),
            EditKind::Insertion { anchor, bases } => anchor.is_ascii() && bases.is_ascii(),
            EditKind::Deletion { reference } => reference.is_ascii(),
        }
    }
}
