use crate::{Result, UndoableOperation};
use std::fmt::{self, Debug, Formatter};

/// Combines multiple operations into one.
///
/// Sub-operations are undone in reverse order and redone in insertion order,
/// so a compound behaves like a single operation no matter how deeply compounds
/// are nested inside each other.
///
/// If a sub-operation fails, the error is returned right away and the remaining
/// sub-operations are not visited. The compound is then left partially undone
/// or redone.
///
/// # Examples
/// ```
/// # use std::cell::RefCell;
/// # use std::rc::Rc;
/// # use undo_stack::{CompoundOperation, OnUndo, UndoableOperation};
/// let log = Rc::new(RefCell::new(String::new()));
/// let mut compound = CompoundOperation::new("Move atoms");
/// for ch in ['a', 'b', 'c'] {
///     let log = log.clone();
///     compound.add_operation(OnUndo(move || log.borrow_mut().push(ch)));
/// }
/// assert!(compound.is_significant());
/// compound.undo().unwrap();
/// assert_eq!(*log.borrow(), "cba");
/// ```
pub struct CompoundOperation {
    operations: Vec<Box<dyn UndoableOperation>>,
    name: String,
}

impl CompoundOperation {
    /// Creates an empty compound operation with the given display name.
    pub fn new(name: impl Into<String>) -> CompoundOperation {
        CompoundOperation {
            operations: Vec::new(),
            name: name.into(),
        }
    }

    /// Appends a sub-operation. The compound becomes its owner.
    pub fn add_operation(&mut self, operation: impl UndoableOperation) {
        self.push_boxed(Box::new(operation));
    }

    pub(crate) fn push_boxed(&mut self, operation: Box<dyn UndoableOperation>) {
        self.operations.push(operation);
    }

    /// Returns `true` if the compound contains at least one sub-operation.
    ///
    /// Compounds that are not significant are dropped instead of being recorded.
    pub fn is_significant(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Returns the number of sub-operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the compound has no sub-operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Removes all sub-operations without undoing them.
    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Sets the display name of the compound.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns an iterator over the display names of the sub-operations, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.operations.iter().map(|op| op.display_name())
    }
}

impl UndoableOperation for CompoundOperation {
    fn undo(&mut self) -> Result {
        for op in self.operations.iter_mut().rev() {
            op.undo()?;
        }
        Ok(())
    }

    fn redo(&mut self) -> Result {
        for op in &mut self.operations {
            op.redo()?;
        }
        Ok(())
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl Debug for CompoundOperation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("CompoundOperation")
            .field("name", &self.name)
            .field("operations", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_fns, OnRedo, OnUndo};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn logged(log: &Rc<RefCell<Vec<String>>>, name: &'static str) -> impl UndoableOperation {
        let (u, r) = (log.clone(), log.clone());
        from_fns(
            move || {
                u.borrow_mut().push(format!("undo {name}"));
                Ok(())
            },
            move || {
                r.borrow_mut().push(format!("redo {name}"));
                Ok(())
            },
        )
        .with_name(name)
    }

    #[test]
    fn order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut compound = CompoundOperation::new("abc");
        compound.add_operation(logged(&log, "a"));
        compound.add_operation(logged(&log, "b"));
        compound.add_operation(logged(&log, "c"));
        compound.undo().unwrap();
        compound.redo().unwrap();
        assert_eq!(
            *log.borrow(),
            ["undo c", "undo b", "undo a", "redo a", "redo b", "redo c"]
        );
    }

    #[test]
    fn nested_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut inner = CompoundOperation::new("inner");
        inner.add_operation(logged(&log, "b"));
        inner.add_operation(logged(&log, "c"));
        let mut outer = CompoundOperation::new("outer");
        outer.add_operation(logged(&log, "a"));
        outer.add_operation(inner);
        outer.add_operation(logged(&log, "d"));
        outer.undo().unwrap();
        assert_eq!(*log.borrow(), ["undo d", "undo c", "undo b", "undo a"]);
        log.borrow_mut().clear();
        outer.redo().unwrap();
        assert_eq!(*log.borrow(), ["redo a", "redo b", "redo c", "redo d"]);
    }

    #[test]
    fn failure_stops_replay() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut compound = CompoundOperation::new("partial");
        compound.add_operation(logged(&log, "a"));
        compound.add_operation(from_fns(|| Err("broken".into()), || Ok(())));
        compound.add_operation(logged(&log, "c"));
        let err = compound.undo().unwrap_err();
        assert_eq!(err.to_string(), "broken");
        assert_eq!(*log.borrow(), ["undo c"]);
    }

    #[test]
    fn significance_and_names() {
        let mut compound = CompoundOperation::new("Edit");
        assert!(!compound.is_significant());
        compound.add_operation(OnUndo(|| ()).with_name("first"));
        compound.add_operation(OnRedo(|| ()).with_name("second"));
        assert!(compound.is_significant());
        assert_eq!(compound.len(), 2);
        assert_eq!(compound.names().collect::<Vec<_>>(), ["first", "second"]);
        compound.set_display_name("Renamed");
        assert_eq!(compound.display_name(), "Renamed");
        compound.clear();
        assert!(compound.is_empty());
    }
}
