//! The undo stack.

use crate::entry::{Entry, Kind};
use crate::format::Format;
use crate::slot::{Slot, SlotId, Socket};
use crate::{CompoundOperation, Error, UndoSuspender, UndoableOperation, ValueChange};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::{self, Write};
use tracing::{debug, error, trace};

const DEFAULT_LIMIT: usize = 20;

/// Stores and manages the history of undoable operations of one document.
///
/// The stack holds a bounded history of top-level operations and a cursor into it.
/// Operations at or before the cursor are active and can be undone, operations after
/// it have been undone and can be redone. Pushing a new operation discards everything
/// after the cursor.
///
/// While a compound operation is open, pushed operations are collected into it instead
/// of the history, and the whole compound is recorded as one entry when it is committed.
///
/// # Examples
/// ```
/// # use std::cell::Cell;
/// # use std::rc::Rc;
/// # use undo_stack::UndoStack;
/// let count = Rc::new(Cell::new(0));
/// let mut stack = UndoStack::new();
///
/// stack.begin_compound_operation("Add atoms");
/// for _ in 0..3 {
///     let (get, set) = (count.clone(), count.clone());
///     stack.record_value_change(move || get.get(), move |v| set.set(v));
///     count.set(count.get() + 1);
/// }
/// stack.end_compound_operation(true).unwrap();
///
/// assert_eq!(stack.len(), 1);
/// assert_eq!(count.get(), 3);
/// stack.undo().unwrap().unwrap();
/// assert_eq!(count.get(), 0);
/// stack.redo().unwrap().unwrap();
/// assert_eq!(count.get(), 3);
/// ```
pub struct UndoStack {
    entries: VecDeque<Entry>,
    head: usize,
    clean: Option<usize>,
    limit: Option<usize>,
    compounds: Vec<CompoundOperation>,
    suspend_count: usize,
    undoing: bool,
    redoing: bool,
    socket: Socket,
}

impl UndoStack {
    /// Returns a new stack with the default undo limit of 20 steps.
    pub fn new() -> UndoStack {
        Builder::new().build()
    }

    /// Returns a builder for a stack.
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Returns the number of operations in the history.
    ///
    /// Compound operations count as one operation.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the index of the operation that will be undone by the next call to
    /// [`undo`](UndoStack::undo), or `None` if there is nothing to undo.
    pub fn index(&self) -> Option<usize> {
        self.head.checked_sub(1)
    }

    /// Returns the number of operations that are currently applied.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the head position that is marked as clean, if any.
    pub fn clean_head(&self) -> Option<usize> {
        self.clean
    }

    /// Returns the maximum number of operations kept in the history, or `None` if unbounded.
    pub fn undo_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns `true` if there is an operation available for undo.
    pub fn can_undo(&self) -> bool {
        self.head > 0
    }

    /// Returns `true` if there is an operation available for redo.
    pub fn can_redo(&self) -> bool {
        self.head < self.entries.len()
    }

    /// Returns the display name of the operation which will be undone
    /// in the next call to [`undo`](UndoStack::undo).
    pub fn undo_text(&self) -> Option<String> {
        self.index().and_then(|i| self.text(i))
    }

    /// Returns the display name of the operation which will be redone
    /// in the next call to [`redo`](UndoStack::redo).
    pub fn redo_text(&self) -> Option<String> {
        self.text(self.head)
    }

    fn text(&self, i: usize) -> Option<String> {
        self.entries.get(i).map(|e| e.display_name())
    }

    /// Returns an iterator over the display names of the operations in the history, oldest first.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|e| e.display_name())
    }

    /// Returns `true` if the document is in the state that was marked clean.
    pub fn is_clean(&self) -> bool {
        self.clean == Some(self.head)
    }

    /// Returns `true` if recording is suspended.
    pub fn is_suspended(&self) -> bool {
        self.suspend_count != 0
    }

    /// Returns `true` if changes to the document are currently being recorded.
    ///
    /// This is the case when a compound operation is open and recording is not suspended.
    /// Setters use this to decide whether they should create an operation at all.
    pub fn is_recording(&self) -> bool {
        !self.is_suspended() && !self.compounds.is_empty()
    }

    /// Returns `true` while an operation is being undone.
    pub fn is_undoing(&self) -> bool {
        self.undoing
    }

    /// Returns `true` while an operation is being redone.
    pub fn is_redoing(&self) -> bool {
        self.redoing
    }

    /// Returns `true` while an operation is being undone or redone.
    pub fn is_undoing_or_redoing(&self) -> bool {
        self.undoing || self.redoing
    }

    /// Returns the number of compound operations that are currently open.
    pub fn compound_depth(&self) -> usize {
        self.compounds.len()
    }

    /// Returns a snapshot of the observable state of the stack.
    pub fn state(&self) -> State {
        State {
            index: self.index(),
            clean: self.is_clean(),
            can_undo: self.can_undo(),
            undo_text: self.undo_text(),
            can_redo: self.can_redo(),
            redo_text: self.redo_text(),
        }
    }

    /// Connects a slot that is notified about state changes.
    pub fn connect(&mut self, slot: impl Slot + 'static) -> SlotId {
        self.socket.connect(slot)
    }

    /// Disconnects the slot. Returns `false` if it was not connected.
    pub fn disconnect(&mut self, id: SlotId) -> bool {
        self.socket.disconnect(id)
    }

    /// Suspends the recording of operations until a matching call to [`resume`](UndoStack::resume).
    ///
    /// Prefer [`suspender`](UndoStack::suspender), which resumes automatically.
    pub fn suspend(&mut self) {
        self.suspend_count += 1;
    }

    /// Resumes recording after a call to [`suspend`](UndoStack::suspend).
    ///
    /// # Panics
    /// Panics if called more often than `suspend`.
    pub fn resume(&mut self) {
        assert!(
            self.suspend_count > 0,
            "`resume` has been called more often than `suspend`"
        );
        self.suspend_count -= 1;
    }

    /// Returns a guard that suspends recording until it is dropped.
    pub fn suspender(&mut self) -> UndoSuspender<'_> {
        UndoSuspender::new(self)
    }

    /// Opens a new compound operation with the given display name.
    ///
    /// Every call must be matched by a call to
    /// [`end_compound_operation`](UndoStack::end_compound_operation).
    /// Compound operations can be nested.
    ///
    /// # Panics
    /// Panics if called while undoing or redoing.
    pub fn begin_compound_operation(&mut self, name: impl Into<String>) {
        assert!(
            !self.is_undoing_or_redoing(),
            "cannot begin a compound operation while undoing or redoing another operation"
        );
        let compound = CompoundOperation::new(name);
        debug!(name = %compound.display_name(), depth = self.compounds.len(), "begin compound operation");
        self.compounds.push(compound);
    }

    /// Closes the innermost compound operation.
    ///
    /// If `commit` is `true`, the compound is recorded as one operation, unless it is empty
    /// or recording is suspended, in which case it is dropped. If `commit` is `false`, all
    /// operations in the compound are undone and nothing is recorded.
    ///
    /// # Errors
    /// If a sub-operation fails while being undone, the error is logged and returned.
    /// The compound is closed regardless.
    ///
    /// # Panics
    /// Panics if no compound operation is open, or if called while undoing or redoing.
    pub fn end_compound_operation(&mut self, commit: bool) -> Result<(), Error> {
        assert!(
            !self.is_undoing_or_redoing(),
            "cannot end a compound operation while undoing or redoing another operation"
        );
        assert!(
            !self.compounds.is_empty(),
            "missing call to `begin_compound_operation`"
        );
        if !commit {
            let result = self.reset_current_compound_operation();
            if let Some(compound) = self.compounds.pop() {
                debug!(name = %compound.display_name(), "discarded compound operation");
            }
            return result;
        }
        let Some(compound) = self.compounds.pop() else {
            return Ok(());
        };
        if self.is_suspended() || !compound.is_significant() {
            debug!(
                name = %compound.display_name(),
                suspended = self.is_suspended(),
                "dropped compound operation"
            );
            return Ok(());
        }
        debug!(name = %compound.display_name(), len = compound.len(), "commit compound operation");
        self.push_kind(Kind::Compound(compound));
        Ok(())
    }

    /// Undoes and removes all operations of the innermost compound operation,
    /// leaving it open.
    ///
    /// # Errors
    /// If a sub-operation fails while being undone, the error is logged and returned.
    /// The compound is emptied regardless.
    ///
    /// # Panics
    /// Panics if no compound operation is open, or if called while undoing or redoing.
    pub fn reset_current_compound_operation(&mut self) -> Result<(), Error> {
        assert!(
            !self.is_undoing_or_redoing(),
            "cannot reset a compound operation while undoing or redoing another operation"
        );
        assert!(
            !self.compounds.is_empty(),
            "missing call to `begin_compound_operation`"
        );
        self.suspend();
        self.undoing = true;
        let result = match self.compounds.last_mut() {
            Some(compound) => {
                let result = compound.undo().map_err(|source| Error::Rollback {
                    label: compound.display_name(),
                    source,
                });
                compound.clear();
                result
            }
            None => Ok(()),
        };
        self.undoing = false;
        self.resume();
        if let Err(err) = &result {
            error!(%err, "rollback failed");
        }
        result
    }

    /// Renames the innermost open compound operation.
    ///
    /// # Panics
    /// Panics if no compound operation is open.
    pub fn set_current_compound_name(&mut self, name: impl Into<String>) {
        match self.compounds.last_mut() {
            Some(compound) => compound.set_display_name(name),
            None => panic!("missing call to `begin_compound_operation`"),
        }
    }

    /// Records an operation.
    ///
    /// The operation must already have been applied. If a compound operation is open the
    /// operation is added to it, otherwise it is put on top of the history, discarding any
    /// operations that were undone.
    ///
    /// # Panics
    /// Panics if recording is suspended, or if called while undoing or redoing.
    pub fn push(&mut self, operation: impl UndoableOperation) {
        assert!(
            !self.is_undoing_or_redoing(),
            "cannot record an operation while undoing or redoing another operation"
        );
        assert!(
            !self.is_suspended(),
            "cannot record an operation while recording is suspended"
        );
        self.push_kind(Kind::Atomic(Box::new(operation)));
    }

    /// Records the operation if the stack [is recording](UndoStack::is_recording).
    ///
    /// Returns `true` if the operation was recorded, otherwise it is dropped.
    pub fn record(&mut self, operation: impl UndoableOperation) -> bool {
        let recording = self.is_recording();
        if recording {
            self.push(operation);
        }
        recording
    }

    /// Records a [`ValueChange`] if the stack [is recording](UndoStack::is_recording).
    ///
    /// Must be called before the new value is stored, since the old value is read
    /// through `getter` right away.
    pub fn record_value_change<T, G, S>(&mut self, getter: G, setter: S) -> bool
    where
        T: 'static,
        G: FnMut() -> T + 'static,
        S: FnMut(T) + 'static,
    {
        let recording = self.is_recording();
        if recording {
            self.push(ValueChange::new(getter, setter));
        }
        recording
    }

    fn push_kind(&mut self, kind: Kind) {
        if let Some(compound) = self.compounds.last_mut() {
            compound.push_boxed(kind.into_boxed());
            return;
        }
        let old = self.snapshot();
        // Discard previously undone operations.
        self.entries.truncate(self.head);
        let head = self.head;
        self.clean = self.clean.filter(|&clean| clean <= head);
        let entry = Entry::from(kind);
        trace!(name = %entry.display_name(), index = head, "push operation");
        self.entries.push_back(entry);
        self.head += 1;
        self.trim();
        self.notify(old);
    }

    /// Undoes the current operation and moves the cursor back by one.
    ///
    /// Returns `None` if there is nothing to undo. Recording is suspended while the
    /// operation runs.
    ///
    /// # Errors
    /// If the operation fails, the error is logged and returned. The cursor is moved
    /// anyway so further calls to undo and redo keep working, but the document may be
    /// left in an intermediate state.
    ///
    /// # Panics
    /// Panics if a compound operation is open, or if called while undoing or redoing.
    pub fn undo(&mut self) -> Option<Result<(), Error>> {
        self.assert_idle("undo");
        if !self.can_undo() {
            return None;
        }
        let old = self.snapshot();
        let result = self.undo_step();
        self.notify(old);
        Some(result)
    }

    /// Redoes the next operation and moves the cursor forward by one.
    ///
    /// Returns `None` if there is nothing to redo. Recording is suspended while the
    /// operation runs.
    ///
    /// # Errors
    /// If the operation fails, the error is logged and returned. The cursor is moved
    /// anyway so further calls to undo and redo keep working, but the document may be
    /// left in an intermediate state.
    ///
    /// # Panics
    /// Panics if a compound operation is open, or if called while undoing or redoing.
    pub fn redo(&mut self) -> Option<Result<(), Error>> {
        self.assert_idle("redo");
        if !self.can_redo() {
            return None;
        }
        let old = self.snapshot();
        let result = self.redo_step();
        self.notify(old);
        Some(result)
    }

    /// Repeatedly calls [`undo`](UndoStack::undo) or [`redo`](UndoStack::redo)
    /// until `head` operations are applied.
    ///
    /// Returns `None` if `head` is larger than the length of the history.
    /// Signals are only emitted once, after the cursor has reached its destination.
    ///
    /// # Errors
    /// Stops at the first operation that fails and returns its error.
    pub fn go_to(&mut self, head: usize) -> Option<Result<(), Error>> {
        self.assert_idle("go to");
        if head > self.entries.len() {
            return None;
        }
        let old = self.snapshot();
        let mut result = Ok(());
        while self.head != head {
            let step = if head > self.head {
                self.redo_step()
            } else {
                self.undo_step()
            };
            if step.is_err() {
                result = step;
                break;
            }
        }
        self.notify(old);
        Some(result)
    }

    /// Undoes or redoes operations until the clean state is reached.
    ///
    /// Returns `None` if no state is marked as clean.
    pub fn revert(&mut self) -> Option<Result<(), Error>> {
        self.clean.and_then(|clean| self.go_to(clean))
    }

    fn assert_idle(&self, action: &str) {
        assert!(
            !self.is_undoing_or_redoing(),
            "cannot {action} while undoing or redoing another operation"
        );
        assert!(
            self.compounds.is_empty(),
            "cannot {action} while a compound operation is open"
        );
    }

    fn undo_step(&mut self) -> Result<(), Error> {
        self.undoing = true;
        self.suspend();
        let entry = &mut self.entries[self.head - 1];
        let result = entry.undo().map_err(|source| Error::Undo {
            label: entry.display_name(),
            source,
        });
        self.resume();
        self.undoing = false;
        self.head -= 1;
        if let Err(err) = &result {
            error!(%err, "undo failed");
        }
        result
    }

    fn redo_step(&mut self) -> Result<(), Error> {
        self.redoing = true;
        self.suspend();
        let entry = &mut self.entries[self.head];
        let result = entry.redo().map_err(|source| Error::Redo {
            label: entry.display_name(),
            source,
        });
        self.resume();
        self.redoing = false;
        self.head += 1;
        if let Err(err) = &result {
            error!(%err, "redo failed");
        }
        result
    }

    /// Removes all operations and open compound operations without undoing them.
    ///
    /// Afterwards no state is marked as clean.
    ///
    /// # Panics
    /// Panics if called while undoing or redoing.
    pub fn clear(&mut self) {
        assert!(
            !self.is_undoing_or_redoing(),
            "cannot clear while undoing or redoing another operation"
        );
        let old = self.snapshot();
        debug!(len = self.entries.len(), open = self.compounds.len(), "clear undo stack");
        self.entries.clear();
        self.compounds.clear();
        self.head = 0;
        self.clean = None;
        self.notify(old);
    }

    /// Marks the current state as clean, for example after the document has been saved.
    pub fn set_clean(&mut self) {
        if !self.is_clean() {
            let old = self.snapshot();
            self.clean = Some(self.head);
            self.notify(old);
        }
    }

    /// Marks the document as dirty. No state is clean afterwards.
    pub fn set_dirty(&mut self) {
        let old = self.snapshot();
        self.clean = None;
        self.notify(old);
    }

    /// Sets the maximum number of operations kept in the history and trims it right away.
    ///
    /// `None` means the history is unbounded. The oldest operations are removed first,
    /// but never the operation at the cursor, so a limit of `0` never removes anything.
    pub fn set_undo_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
        let old = self.snapshot();
        self.trim();
        self.notify(old);
    }

    fn trim(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        let excess = self.entries.len().saturating_sub(limit);
        // The operation at the cursor is never evicted.
        if excess == 0 || self.head <= excess {
            return;
        }
        self.entries.drain(..excess);
        self.head -= excess;
        self.clean = self.clean.and_then(|clean| clean.checked_sub(excess));
        debug!(excess, limit, "trimmed undo history");
    }

    fn snapshot(&self) -> Option<State> {
        (!self.socket.is_empty()).then(|| self.state())
    }

    fn notify(&mut self, old: Option<State>) {
        if let Some(old) = old {
            let new = self.state();
            self.socket.emit_changes(&old, &new);
        }
    }

    /// Returns a structure for configurable formatting of the history.
    pub fn display(&self) -> Display<'_> {
        Display::from(self)
    }
}

impl Default for UndoStack {
    fn default() -> UndoStack {
        UndoStack::new()
    }
}

impl fmt::Debug for UndoStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UndoStack")
            .field("entries", &self.names().collect::<Vec<_>>())
            .field("head", &self.head)
            .field("clean", &self.clean)
            .field("limit", &self.limit)
            .field("compounds", &self.compounds)
            .field("suspend_count", &self.suspend_count)
            .field("undoing", &self.undoing)
            .field("redoing", &self.redoing)
            .field("socket", &self.socket)
            .finish()
    }
}

/// A snapshot of the observable state of an [`UndoStack`].
///
/// This is what an edit menu needs to render itself.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    /// The index of the operation that would be undone next.
    pub index: Option<usize>,
    /// Whether the document is in its clean state.
    pub clean: bool,
    /// Whether there is an operation to undo.
    pub can_undo: bool,
    /// Display name of the operation that would be undone next.
    pub undo_text: Option<String>,
    /// Whether there is an operation to redo.
    pub can_redo: bool,
    /// Display name of the operation that would be redone next.
    pub redo_text: Option<String>,
}

/// Builder for an [`UndoStack`].
///
/// # Examples
/// ```
/// # use undo_stack::{Signal, UndoStack};
/// let stack = UndoStack::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// assert_eq!(stack.undo_limit(), Some(100));
/// ```
#[derive(Debug)]
pub struct Builder {
    capacity: usize,
    limit: Option<usize>,
    clean: bool,
    socket: Socket,
}

impl Builder {
    /// Returns a builder for a stack.
    pub fn new() -> Builder {
        Builder {
            capacity: 0,
            limit: Some(DEFAULT_LIMIT),
            clean: true,
            socket: Socket::default(),
        }
    }

    /// Sets the capacity for the history.
    pub fn capacity(mut self, capacity: usize) -> Builder {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum number of operations kept in the history.
    pub fn limit(mut self, limit: usize) -> Builder {
        self.limit = Some(limit);
        self
    }

    /// Keeps every operation in the history.
    pub fn unbounded(mut self) -> Builder {
        self.limit = None;
        self
    }

    /// Sets if the document is initially in a clean state.
    /// By default it is.
    pub fn clean(mut self, clean: bool) -> Builder {
        self.clean = clean;
        self
    }

    /// Connects a slot. Can be called more than once.
    pub fn connect(mut self, slot: impl Slot + 'static) -> Builder {
        self.socket.connect(slot);
        self
    }

    /// Builds the stack.
    pub fn build(self) -> UndoStack {
        UndoStack {
            entries: VecDeque::with_capacity(self.capacity),
            head: 0,
            clean: self.clean.then_some(0),
            limit: self.limit,
            compounds: Vec::new(),
            suspend_count: 0,
            undoing: false,
            redoing: false,
            socket: self.socket,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

/// Configurable display formatting for the [`UndoStack`].
///
/// Lists the history newest first, marking the current position and the clean state.
/// In detailed mode, compound operations also list their sub-operations.
pub struct Display<'a> {
    stack: &'a UndoStack,
    format: Format,
}

impl Display<'_> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Show detailed output (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the position of the operation (on by default).
    pub fn position(&mut self, on: bool) -> &mut Self {
        self.format.position = on;
        self
    }

    /// Show the clean state (on by default).
    pub fn clean(&mut self, on: bool) -> &mut Self {
        self.format.clean = on;
        self
    }

    fn fmt_list(&self, f: &mut fmt::Formatter, at: usize, entry: Option<&Entry>) -> fmt::Result {
        self.format.mark(f, 0)?;
        self.format.position(f, at)?;

        #[cfg(feature = "chrono")]
        if let Some(entry) = entry {
            if self.format.detailed {
                self.format.timestamp(f, &entry.timestamp)?;
            }
        }

        self.format
            .labels(f, at, self.stack.head, self.stack.clean)?;
        if let Some(entry) = entry {
            if self.format.detailed {
                writeln!(f)?;
                self.format.message(f, &entry.display_name(), Some(0))?;
                if let Some(children) = entry.children() {
                    for child in children {
                        self.format.message(f, &child, Some(1))?;
                    }
                }
            } else {
                f.write_char(' ')?;
                self.format.message(f, &entry.display_name(), None)?;
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl<'a> From<&'a UndoStack> for Display<'a> {
    fn from(stack: &'a UndoStack) -> Self {
        Display {
            stack,
            format: Format::default(),
        }
    }
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.stack.entries.iter().enumerate().rev() {
            self.fmt_list(f, i + 1, Some(entry))?;
        }
        self.fmt_list(f, 0, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_fns, OnUndo};
    use tracing_test::traced_test;

    fn noop(name: &str) -> impl UndoableOperation {
        from_fns(|| Ok(()), || Ok(())).with_name(name)
    }

    #[test]
    fn trim_shifts_clean() {
        let mut stack = UndoStack::builder().limit(3).build();
        stack.push(noop("a"));
        stack.push(noop("b"));
        stack.set_clean();
        stack.push(noop("c"));
        stack.push(noop("d"));
        assert_eq!(stack.names().collect::<Vec<_>>(), ["b", "c", "d"]);
        assert_eq!(stack.head(), 3);
        assert_eq!(stack.clean_head(), Some(1));
        stack.push(noop("e"));
        stack.push(noop("f"));
        assert_eq!(stack.clean_head(), None);
    }

    #[test]
    fn unbounded() {
        let mut stack = UndoStack::builder().unbounded().build();
        for _ in 0..50 {
            stack.push(OnUndo(|| ()));
        }
        assert_eq!(stack.len(), 50);
        assert_eq!(stack.undo_limit(), None);
        assert_eq!(stack.undo_text().as_deref(), Some("Undoable operation"));
    }

    #[test]
    fn zero_limit_keeps_history() {
        let mut stack = UndoStack::new();
        stack.push(noop("a"));
        stack.push(noop("b"));
        stack.set_undo_limit(Some(0));
        assert_eq!(stack.undo_limit(), Some(0));
        assert_eq!(stack.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(stack.index(), Some(1));

        let mut stack = UndoStack::builder().limit(0).build();
        stack.push(noop("c"));
        stack.push(noop("d"));
        assert_eq!(stack.len(), 2);
        stack.undo().unwrap().unwrap();
        assert_eq!(stack.redo_text().as_deref(), Some("d"));
    }

    #[test]
    fn state() {
        let mut stack = UndoStack::builder().clean(false).build();
        assert_eq!(stack.clean_head(), None);
        stack.push(noop("a"));
        stack.push(noop("b"));
        stack.undo();
        assert_eq!(
            stack.state(),
            State {
                index: Some(0),
                clean: false,
                can_undo: true,
                undo_text: Some("a".into()),
                can_redo: true,
                redo_text: Some("b".into()),
            }
        );
    }

    #[cfg(not(feature = "chrono"))]
    #[test]
    fn display_labels() {
        let mut stack = UndoStack::new();
        stack.push(noop("a"));
        stack.set_clean();
        let mut display = stack.display();
        #[cfg(feature = "colored")]
        display.colored(false);
        display.detailed(false);
        assert_eq!(display.to_string(), "* 1 [HEAD, CLEAN] a\n* 0");
        display.head(false);
        assert_eq!(display.to_string(), "* 1 [CLEAN] a\n* 0");
    }

    #[traced_test]
    #[test]
    fn failed_undo_is_logged() {
        let mut stack = UndoStack::new();
        stack.push(from_fns(|| Err("file vanished".into()), || Ok(())).with_name("Load"));
        assert!(matches!(stack.undo(), Some(Err(Error::Undo { .. }))));
        assert!(logs_contain("undo failed"));
        assert!(logs_contain("file vanished"));
        assert!(!stack.is_suspended());
    }
}
