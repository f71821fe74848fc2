use crate::{CompoundOperation, Result, UndoableOperation};
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};

/// A top-level record in the history of an [`UndoStack`](crate::UndoStack).
pub(crate) struct Entry {
    pub kind: Kind,
    #[cfg(feature = "chrono")]
    pub timestamp: DateTime<Utc>,
}

pub(crate) enum Kind {
    Atomic(Box<dyn UndoableOperation>),
    Compound(CompoundOperation),
}

impl Entry {
    /// Returns the sub-operation names if the entry is a compound.
    pub fn children(&self) -> Option<impl Iterator<Item = String> + '_> {
        match &self.kind {
            Kind::Atomic(_) => None,
            Kind::Compound(compound) => Some(compound.names()),
        }
    }
}

impl From<Kind> for Entry {
    fn from(kind: Kind) -> Self {
        Entry {
            kind,
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
        }
    }
}

impl UndoableOperation for Entry {
    fn undo(&mut self) -> Result {
        match &mut self.kind {
            Kind::Atomic(op) => op.undo(),
            Kind::Compound(compound) => compound.undo(),
        }
    }

    fn redo(&mut self) -> Result {
        match &mut self.kind {
            Kind::Atomic(op) => op.redo(),
            Kind::Compound(compound) => compound.redo(),
        }
    }

    fn display_name(&self) -> String {
        match &self.kind {
            Kind::Atomic(op) => op.display_name(),
            Kind::Compound(compound) => compound.display_name(),
        }
    }
}

impl Kind {
    pub fn into_boxed(self) -> Box<dyn UndoableOperation> {
        match self {
            Kind::Atomic(op) => op,
            Kind::Compound(compound) => Box::new(compound),
        }
    }
}
