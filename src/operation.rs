//! Ready-made operations built from closures.
//!
//! Most edits can be expressed without writing a new type: a property change is
//! a [`ValueChange`], anything with separate revert and reapply logic is an
//! [`FnOperation`], and [`OnUndo`] and [`OnRedo`] run a notification in only one
//! direction.

use crate::{Result, UndoableOperation};
use std::fmt::{self, Debug, Formatter};
use std::mem;

/// Records a change to a value that is read through a getter and written through a setter.
///
/// The old value is captured when the operation is created, so it must be created
/// *before* the new value is stored. Undoing swaps the stored value with the current
/// one, which makes the operation its own inverse: redo uses the same swap.
///
/// # Examples
/// ```
/// # use std::cell::Cell;
/// # use std::rc::Rc;
/// # use undo_stack::{UndoStack, ValueChange};
/// let radius = Rc::new(Cell::new(1.0));
/// let mut stack = UndoStack::new();
///
/// let (get, set) = (radius.clone(), radius.clone());
/// stack.push(ValueChange::new(move || get.get(), move |v| set.set(v)));
/// radius.set(2.5);
///
/// stack.undo().unwrap().unwrap();
/// assert_eq!(radius.get(), 1.0);
/// stack.redo().unwrap().unwrap();
/// assert_eq!(radius.get(), 2.5);
/// ```
pub struct ValueChange<T, G, S> {
    value: T,
    getter: G,
    setter: S,
}

impl<T, G, S> ValueChange<T, G, S>
where
    G: FnMut() -> T,
    S: FnMut(T),
{
    /// Creates the operation, capturing the current value through `getter`.
    pub fn new(mut getter: G, setter: S) -> ValueChange<T, G, S> {
        ValueChange {
            value: getter(),
            getter,
            setter,
        }
    }

    /// Returns a new operation with the provided display name.
    pub fn with_name(self, name: impl Into<String>) -> Named<Self> {
        Named::new(self, name)
    }
}

impl<T, G, S> ValueChange<T, G, S> {
    /// Returns the value that the next undo or redo will store.
    pub fn stored(&self) -> &T {
        &self.value
    }
}

impl<T, G, S> UndoableOperation for ValueChange<T, G, S>
where
    T: 'static,
    G: FnMut() -> T + 'static,
    S: FnMut(T) + 'static,
{
    fn undo(&mut self) -> Result {
        let current = (self.getter)();
        let old = mem::replace(&mut self.value, current);
        (self.setter)(old);
        Ok(())
    }

    fn display_name(&self) -> String {
        String::from("Change value")
    }
}

impl<T: Debug, G, S> Debug for ValueChange<T, G, S> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("ValueChange")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Creates an operation from an undo and a redo closure.
///
/// # Examples
/// ```
/// # use std::cell::RefCell;
/// # use std::rc::Rc;
/// # use undo_stack::{from_fns, UndoStack};
/// let atoms = Rc::new(RefCell::new(vec!["H", "O"]));
/// let mut stack = UndoStack::new();
///
/// atoms.borrow_mut().push("H");
/// let (a, b) = (atoms.clone(), atoms.clone());
/// stack.push(
///     from_fns(
///         move || a.borrow_mut().pop().map(drop).ok_or_else(|| "no atoms".into()),
///         move || Ok(b.borrow_mut().push("H")),
///     )
///     .with_name("Add hydrogen"),
/// );
///
/// stack.undo().unwrap().unwrap();
/// assert_eq!(*atoms.borrow(), ["H", "O"]);
/// stack.redo().unwrap().unwrap();
/// assert_eq!(*atoms.borrow(), ["H", "O", "H"]);
/// ```
pub fn from_fns<U, R>(undo: U, redo: R) -> FnOperation<U, R>
where
    U: FnMut() -> Result,
    R: FnMut() -> Result,
{
    FnOperation { undo, redo }
}

/// An operation with separate undo and redo closures.
///
/// Created by the [`from_fns`] function.
#[derive(Clone)]
pub struct FnOperation<U, R> {
    undo: U,
    redo: R,
}

impl<U, R> FnOperation<U, R> {
    /// Returns a new operation with the provided display name.
    pub fn with_name(self, name: impl Into<String>) -> Named<Self> {
        Named::new(self, name)
    }
}

impl<U, R> UndoableOperation for FnOperation<U, R>
where
    U: FnMut() -> Result + 'static,
    R: FnMut() -> Result + 'static,
{
    fn undo(&mut self) -> Result {
        (self.undo)()
    }

    fn redo(&mut self) -> Result {
        (self.redo)()
    }
}

impl<U, R> Debug for FnOperation<U, R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FnOperation").finish_non_exhaustive()
    }
}

/// Runs a callback when undone and does nothing when redone.
///
/// Put it first in a compound operation to get notified after the whole
/// compound has been undone, since sub-operations are undone in reverse order.
#[derive(Clone)]
pub struct OnUndo<F>(pub F);

impl<F> OnUndo<F> {
    /// Returns a new operation with the provided display name.
    pub fn with_name(self, name: impl Into<String>) -> Named<Self> {
        Named::new(self, name)
    }
}

impl<F: FnMut() + 'static> UndoableOperation for OnUndo<F> {
    fn undo(&mut self) -> Result {
        (self.0)();
        Ok(())
    }

    fn redo(&mut self) -> Result {
        Ok(())
    }
}

impl<F> Debug for OnUndo<F> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("OnUndo(..)")
    }
}

/// Runs a callback when redone and does nothing when undone.
///
/// Put it last in a compound operation to get notified after the whole
/// compound has been redone.
#[derive(Clone)]
pub struct OnRedo<F>(pub F);

impl<F> OnRedo<F> {
    /// Returns a new operation with the provided display name.
    pub fn with_name(self, name: impl Into<String>) -> Named<Self> {
        Named::new(self, name)
    }
}

impl<F: FnMut() + 'static> UndoableOperation for OnRedo<F> {
    fn undo(&mut self) -> Result {
        Ok(())
    }

    fn redo(&mut self) -> Result {
        (self.0)();
        Ok(())
    }
}

impl<F> Debug for OnRedo<F> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("OnRedo(..)")
    }
}

/// Wraps an operation and overrides its display name.
#[derive(Clone, Debug)]
pub struct Named<O> {
    inner: O,
    name: String,
}

impl<O> Named<O> {
    /// Wraps `inner` with the provided display name.
    pub fn new(inner: O, name: impl Into<String>) -> Named<O> {
        Named {
            inner,
            name: name.into(),
        }
    }

    /// Returns a reference to the wrapped operation.
    pub fn get(&self) -> &O {
        &self.inner
    }

    /// Consumes the wrapper, returning the wrapped operation.
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: UndoableOperation> UndoableOperation for Named<O> {
    fn undo(&mut self) -> Result {
        self.inner.undo()
    }

    fn redo(&mut self) -> Result {
        self.inner.redo()
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
