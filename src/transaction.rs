use crate::{BoxError, Error, UndoStack};
use std::ops::{Deref, DerefMut};
use tracing::error;

/// Opens a compound operation and rolls it back unless it is committed.
///
/// The transaction borrows the stack and dereferences to it, so operations are
/// pushed through the transaction. Dropping it without calling
/// [`commit`](UndoableTransaction::commit), for example when leaving the scope early
/// through `?`, undoes every operation recorded inside it.
///
/// If recording is suspended when the transaction is created, it does nothing at all.
///
/// # Examples
/// ```
/// # use std::cell::Cell;
/// # use std::rc::Rc;
/// # use undo_stack::{UndoStack, UndoableTransaction};
/// let temperature = Rc::new(Cell::new(300));
/// let mut stack = UndoStack::new();
/// {
///     let mut tx = UndoableTransaction::new(&mut stack, "Heat");
///     let (get, set) = (temperature.clone(), temperature.clone());
///     tx.record_value_change(move || get.get(), move |v| set.set(v));
///     temperature.set(400);
///     // Not committed.
/// }
/// assert_eq!(temperature.get(), 300);
/// assert!(stack.is_empty());
/// ```
#[derive(Debug)]
pub struct UndoableTransaction<'a> {
    stack: &'a mut UndoStack,
    active: bool,
    committed: bool,
}

impl<'a> UndoableTransaction<'a> {
    /// Begins a compound operation with the given display name on `stack`.
    pub fn new(stack: &'a mut UndoStack, name: impl Into<String>) -> UndoableTransaction<'a> {
        let active = !stack.is_suspended();
        if active {
            stack.begin_compound_operation(name);
        }
        UndoableTransaction {
            stack,
            active,
            committed: false,
        }
    }

    /// Commits the recorded operations as one entry of the history.
    pub fn commit(mut self) {
        self.committed = true;
        if self.active {
            // Committing never unwinds, so it can not fail.
            self.stack.end_compound_operation(true).ok();
        }
    }

    /// Runs `f` inside a transaction.
    ///
    /// If `f` returns `Ok`, the transaction is committed. Otherwise everything `f` has
    /// recorded is rolled back, the error is logged, and it is returned as
    /// [`Error::Transaction`]. Either way the document ends up fully changed or unchanged.
    ///
    /// # Examples
    /// ```
    /// # use std::cell::Cell;
    /// # use std::rc::Rc;
    /// # use undo_stack::{UndoStack, UndoableTransaction};
    /// let count = Rc::new(Cell::new(0));
    /// let mut stack = UndoStack::new();
    ///
    /// let result: Result<(), _> = UndoableTransaction::run(&mut stack, "Add bond", |stack| {
    ///     let (get, set) = (count.clone(), count.clone());
    ///     stack.record_value_change(move || get.get(), move |v| set.set(v));
    ///     count.set(1);
    ///     Err("atoms are too far apart".into())
    /// });
    ///
    /// let err = result.unwrap_err();
    /// assert_eq!(err.label(), "Add bond");
    /// assert_eq!(count.get(), 0);
    /// assert!(stack.is_empty());
    /// ```
    pub fn run<T, F>(stack: &mut UndoStack, name: impl Into<String>, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut UndoStack) -> Result<T, BoxError>,
    {
        let name = name.into();
        let mut tx = UndoableTransaction::new(stack, name.clone());
        match f(&mut tx) {
            Ok(output) => {
                tx.commit();
                Ok(output)
            }
            Err(source) => {
                drop(tx);
                let err = Error::Transaction { label: name, source };
                error!(%err, "transaction failed");
                Err(err)
            }
        }
    }
}

impl Deref for UndoableTransaction<'_> {
    type Target = UndoStack;

    fn deref(&self) -> &UndoStack {
        self.stack
    }
}

impl DerefMut for UndoableTransaction<'_> {
    fn deref_mut(&mut self) -> &mut UndoStack {
        self.stack
    }
}

impl Drop for UndoableTransaction<'_> {
    fn drop(&mut self) {
        if self.active && !self.committed {
            // Failures are already logged by the stack.
            self.stack.end_compound_operation(false).ok();
        }
    }
}
