//! Provides a nestable, suspendable undo-redo stack with transactions.
//!
//! It is an implementation of the command pattern, where every modification of a
//! document is recorded as an operation that knows how to revert itself. Operations
//! hold their own handles to the state they change, so the stack never needs to know
//! what the document looks like; it only calls [`undo`] and [`redo`] in the right order.
//!
//! # Features
//!
//! * [`UndoableOperation`] provides the base functionality for all operations.
//! * [`UndoStack`] records operations in a bounded history with a clean/dirty marker.
//! * [`CompoundOperation`] groups many operations so they are undone and redone in one step.
//!   Compound operations can be nested, committed, or discarded.
//! * [`UndoableTransaction`] opens a compound operation and rolls it back automatically
//!   unless it is committed, including when the scope is left early through `?`.
//! * [`UndoSuspender`] temporarily stops recording, for example while an operation
//!   restores a value through a setter that would otherwise record a new operation.
//! * Observers are notified about state changes through [`Slot`]s.
//! * Configurable display formatting of the history, colored when the `colored`
//!   feature is enabled and with time stamps when the `chrono` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use undo_stack::{UndoStack, UndoableOperation, UndoableTransaction};
//!
//! struct Push {
//!     list: Rc<RefCell<Vec<char>>>,
//!     ch: char,
//! }
//!
//! impl UndoableOperation for Push {
//!     fn undo(&mut self) -> undo_stack::Result {
//!         self.list.borrow_mut().pop().ok_or("list is empty")?;
//!         Ok(())
//!     }
//!
//!     fn redo(&mut self) -> undo_stack::Result {
//!         self.list.borrow_mut().push(self.ch);
//!         Ok(())
//!     }
//!
//!     fn display_name(&self) -> String {
//!         format!("Push {}", self.ch)
//!     }
//! }
//!
//! let list = Rc::new(RefCell::new(Vec::new()));
//! let mut stack = UndoStack::new();
//!
//! let mut tx = UndoableTransaction::new(&mut stack, "Type ab");
//! for ch in ['a', 'b'] {
//!     list.borrow_mut().push(ch);
//!     tx.push(Push { list: list.clone(), ch });
//! }
//! tx.commit();
//!
//! assert_eq!(stack.len(), 1);
//! assert_eq!(stack.undo_text().as_deref(), Some("Type ab"));
//! stack.undo().unwrap().unwrap();
//! assert!(list.borrow().is_empty());
//! stack.redo().unwrap().unwrap();
//! assert_eq!(*list.borrow(), ['a', 'b']);
//! ```
//!
//! [`undo`]: UndoableOperation::undo
//! [`redo`]: UndoableOperation::redo

#![deny(missing_docs)]

mod compound;
mod entry;
mod error;
mod format;
pub mod operation;
mod slot;
mod stack;
mod suspender;
mod transaction;

pub use self::{
    compound::CompoundOperation,
    error::Error,
    operation::{from_fns, FnOperation, Named, OnRedo, OnUndo, ValueChange},
    slot::{Signal, Slot, SlotId},
    stack::{Builder, Display, State, UndoStack},
    suspender::{UndoContext, UndoSuspender},
    transaction::UndoableTransaction,
};

/// The error type returned by operations.
pub type BoxError = Box<dyn std::error::Error>;

/// A specialized Result type for undoable operations.
pub type Result = std::result::Result<(), BoxError>;

/// Base functionality for all operations.
///
/// An operation is created at the moment the change is made, after capturing
/// whatever it needs to revert the change. From then on it is owned by the
/// [`UndoStack`] or by the [`CompoundOperation`] it was added to.
///
/// Operations run while the owning stack is suspended and must not record
/// new operations themselves.
pub trait UndoableOperation: 'static {
    /// Restores the state as it was before the operation was applied.
    fn undo(&mut self) -> Result;

    /// Reapplies the operation, assuming that it had been undone before.
    ///
    /// The default implementation calls [`undo`](UndoableOperation::undo), which is only
    /// correct for operations that are their own inverse, like the value swap done by
    /// [`ValueChange`]. Operations with different apply and revert logic must override it.
    fn redo(&mut self) -> Result {
        self.undo()
    }

    /// Returns a human readable description of the operation.
    ///
    /// This is the text shown next to the undo and redo commands of an edit menu.
    fn display_name(&self) -> String {
        String::from("Undoable operation")
    }
}

impl<O: UndoableOperation + ?Sized> UndoableOperation for Box<O> {
    fn undo(&mut self) -> Result {
        (**self).undo()
    }

    fn redo(&mut self) -> Result {
        (**self).redo()
    }

    fn display_name(&self) -> String {
        (**self).display_name()
    }
}
