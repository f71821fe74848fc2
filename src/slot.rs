//! Module used to communicate changes in the undo stack.

use crate::stack::State;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};
use std::sync::mpsc::{Sender, SyncSender};

/// The `Signal` describes the state change done to the undo stack.
///
/// Signals are only emitted for values that actually changed, in the order the
/// variants are declared here. See [`Slot`] for more information.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Signal {
    /// Emitted when the index of the current operation has changed.
    Index(Option<usize>),
    /// Emitted when the stack enters or leaves the clean state.
    Clean(bool),
    /// Emitted when the ability to undo has changed.
    Undo(bool),
    /// Emitted when the text of the operation that would be undone next has changed.
    UndoText(Option<String>),
    /// Emitted when the ability to redo has changed.
    Redo(bool),
    /// Emitted when the text of the operation that would be redone next has changed.
    RedoText(Option<String>),
}

/// Use this to handle signals emitted.
///
/// This allows the surrounding application to update its edit menu,
/// window title, or toolbar when the stack changes.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use undo_stack::{from_fns, Signal, UndoStack};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut stack = UndoStack::builder().connect(sender).build();
/// stack.push(from_fns(|| Ok(()), || Ok(())).with_name("Rename"));
/// assert_eq!(iter.next(), Some(Signal::Index(Some(0))));
/// assert_eq!(iter.next(), Some(Signal::Clean(false)));
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::UndoText(Some("Rename".into()))));
/// assert_eq!(iter.next(), None);
///
/// stack.undo();
/// assert_eq!(iter.next(), Some(Signal::Index(None)));
/// assert_eq!(iter.next(), Some(Signal::Clean(true)));
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::UndoText(None)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), Some(Signal::RedoText(Some("Rename".into()))));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Receives a signal that describes the state change done to the undo stack.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        self.send(signal).ok();
    }
}

/// Identifies a slot connected to an undo stack.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct SlotId(usize);

/// The slots connected to a stack.
#[derive(Default)]
pub(crate) struct Socket {
    slots: Vec<(SlotId, Box<dyn Slot>)>,
    next: usize,
}

impl Socket {
    pub fn connect(&mut self, slot: impl Slot + 'static) -> SlotId {
        let id = SlotId(self.next);
        self.next += 1;
        self.slots.push((id, Box::new(slot)));
        id
    }

    pub fn disconnect(&mut self, id: SlotId) -> bool {
        let len = self.slots.len();
        self.slots.retain(|(slot, _)| *slot != id);
        self.slots.len() != len
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn emit(&mut self, signal: Signal) {
        if let Some(((_, last), rest)) = self.slots.split_last_mut() {
            for (_, slot) in rest {
                slot.on_emit(signal.clone());
            }
            last.on_emit(signal);
        }
    }

    pub fn emit_if(&mut self, cond: bool, signal: impl FnOnce() -> Signal) {
        if cond && !self.is_empty() {
            self.emit(signal());
        }
    }

    /// Emits a signal for every value that differs between the two states.
    pub fn emit_changes(&mut self, old: &State, new: &State) {
        self.emit_if(old.index != new.index, || Signal::Index(new.index));
        self.emit_if(old.clean != new.clean, || Signal::Clean(new.clean));
        self.emit_if(old.can_undo != new.can_undo, || Signal::Undo(new.can_undo));
        self.emit_if(old.undo_text != new.undo_text, || {
            Signal::UndoText(new.undo_text.clone())
        });
        self.emit_if(old.can_redo != new.can_redo, || Signal::Redo(new.can_redo));
        self.emit_if(old.redo_text != new.redo_text, || {
            Signal::RedoText(new.redo_text.clone())
        });
    }
}

impl Debug for Socket {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Socket")
            .field("slots", &self.slots.len())
            .finish_non_exhaustive()
    }
}
