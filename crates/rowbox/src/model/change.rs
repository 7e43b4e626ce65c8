//! Descriptions of structural changes, and the signals that carry them.
//!
//! Every mutator on [`ListModel`](super::ListModel) reports what it did as a
//! single [`ChangeSet`]. A render adapter replays the changes in order to keep
//! its visual state in step with the model.

use std::ops::Range;

use rowbox_core::Signal;
use serde::{Deserialize, Serialize};

use super::position::Position;

/// Requested visual transition for a structural change.
///
/// The model never interprets the hint; it only forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowAnimation {
    /// Cross-fade.
    Fade,
    /// Slide in from, or out toward, the top.
    SlideFromTop,
    /// Slide in from, or out toward, the bottom.
    SlideFromBottom,
    /// Slide in from, or out toward, the left.
    SlideFromLeft,
    /// Slide in from, or out toward, the right.
    SlideFromRight,
    /// Expand from, or collapse into, the middle.
    Middle,
    /// Use the model's configured default for the operation. If that default
    /// is also `Automatic`, the adapter picks.
    #[default]
    Automatic,
    /// No animation.
    None,
}

impl RowAnimation {
    /// Returns `fallback` if `self` is [`RowAnimation::Automatic`].
    pub fn or(self, fallback: RowAnimation) -> RowAnimation {
        match self {
            Self::Automatic => fallback,
            other => other,
        }
    }
}

/// One structural change.
///
/// Indices are those of the model at the moment the change applies, taking
/// earlier changes in the same [`ChangeSet`] into account. The exception is
/// [`Change::RowsRemoved`] and [`Change::SectionsRemoved`] produced by a batch
/// removal, which list indices in the layout before the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// A contiguous run of rows was inserted into `section`.
    RowsInserted {
        /// Section the rows went into.
        section: usize,
        /// The new rows' indices.
        rows: Range<usize>,
        /// Animation hint.
        animation: RowAnimation,
    },
    /// Rows were removed. Positions are sorted ascending.
    RowsRemoved {
        /// Removed positions.
        positions: Vec<Position>,
        /// Animation hint.
        animation: RowAnimation,
    },
    /// One row was moved.
    RowMoved {
        /// Where the row was.
        from: Position,
        /// Where the row is now.
        to: Position,
    },
    /// Sections were inserted. Indices are sorted ascending.
    SectionsInserted {
        /// The new sections' indices.
        indices: Vec<usize>,
        /// Animation hint.
        animation: RowAnimation,
    },
    /// Sections were removed. Indices are sorted ascending.
    SectionsRemoved {
        /// Removed section indices.
        indices: Vec<usize>,
        /// Animation hint.
        animation: RowAnimation,
    },
    /// One section was moved.
    SectionMoved {
        /// Where the section was.
        from: usize,
        /// Where the section is now.
        to: usize,
    },
    /// Section metadata changed without any row or section count changing.
    SectionsUpdated {
        /// Updated section indices.
        indices: Vec<usize>,
    },
}

impl Change {
    /// Net change in the total number of rows this change causes, when known
    /// from the change alone.
    ///
    /// Section-level changes return `None` because the row count of a removed
    /// or inserted section is not recorded.
    pub fn row_delta(&self) -> Option<isize> {
        match self {
            Self::RowsInserted { rows, .. } => isize::try_from(rows.len()).ok(),
            Self::RowsRemoved { positions, .. } => {
                isize::try_from(positions.len()).ok().map(|n| -n)
            }
            Self::RowMoved { .. } | Self::SectionMoved { .. } | Self::SectionsUpdated { .. } => {
                Some(0)
            }
            Self::SectionsInserted { .. } | Self::SectionsRemoved { .. } => None,
        }
    }
}

/// The ordered changes made by one mutator call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// An empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A change set holding one change.
    pub fn single(change: Change) -> Self {
        Self {
            changes: vec![change],
        }
    }

    /// Appends a change.
    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Appends a change, builder style.
    pub fn with(mut self, change: Change) -> Self {
        self.push(change);
        self
    }

    /// The changes, in the order the adapter should apply them.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Signals emitted by a [`ListModel`](super::ListModel).
///
/// A slot connected to `changed` or `sections_updated` runs with no model lock
/// held and may read or mutate the model. A slot connected to
/// `about_to_change` runs while the mutating call holds the model's
/// upgradable lock: it may read the model, but a mutation from the same
/// thread deadlocks.
pub struct ListSignals {
    /// Emitted just before a structural change is applied.
    pub about_to_change: Signal<ChangeSet>,

    /// Emitted after a structural change was applied.
    pub changed: Signal<ChangeSet>,

    /// Emitted before every section is replaced.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after every section was replaced.
    pub model_reset: Signal<()>,

    /// Emitted after any change, structural or wholesale.
    pub sections_updated: Signal<()>,
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSignals {
    /// Creates a new set of list signals.
    pub fn new() -> Self {
        Self {
            about_to_change: Signal::new(),
            changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
            sections_updated: Signal::new(),
        }
    }

    /// Emits the change signals around `apply_fn`.
    ///
    /// Calls the provided function between `about_to_change` and `changed`,
    /// then emits `sections_updated`. Nothing is emitted for an empty set.
    pub fn emit_change<F, R>(&self, changes: ChangeSet, apply_fn: F) -> R
    where
        F: FnOnce() -> R,
    {
        if changes.is_empty() {
            return apply_fn();
        }
        self.about_to_change.emit(changes.clone());
        let result = apply_fn();
        self.changed.emit(changes);
        self.sections_updated.emit(());
        result
    }

    /// Emits the reset signals around `reset_fn`.
    ///
    /// Calls the provided function between `model_about_to_reset` and
    /// `model_reset`, then emits `sections_updated`.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
        self.sections_updated.emit(());
    }
}
