use crate::UndoStack;

/// Gives access to the undo stack of a document, if it has one.
///
/// Objects that may or may not live inside a document implement this, so that
/// an [`UndoSuspender`] can be created for them without checking first.
pub trait UndoContext {
    /// Returns the undo stack, or `None` if there is none.
    fn undo_stack(&mut self) -> Option<&mut UndoStack>;
}

impl UndoContext for UndoStack {
    fn undo_stack(&mut self) -> Option<&mut UndoStack> {
        Some(self)
    }
}

impl UndoContext for Option<UndoStack> {
    fn undo_stack(&mut self) -> Option<&mut UndoStack> {
        self.as_mut()
    }
}

/// Suspends the recording of operations while it exists.
///
/// Recording resumes when the suspender is dropped, no matter how the scope is left.
/// Suspenders nest: recording only resumes once every suspender on a stack has been
/// dropped. The suspender borrows the stack, which is reachable through
/// [`stack_mut`](UndoSuspender::stack_mut) in the meantime.
///
/// # Examples
/// ```
/// # use undo_stack::{UndoStack, UndoSuspender};
/// let mut stack = UndoStack::new();
/// stack.begin_compound_operation("Load file");
/// {
///     let mut outer = UndoSuspender::new(&mut stack);
///     let inner = UndoSuspender::new(outer.stack_mut().unwrap());
///     assert!(!inner.stack().unwrap().is_recording());
/// }
/// assert!(stack.is_recording());
/// # stack.end_compound_operation(true).unwrap();
/// ```
#[derive(Debug)]
pub struct UndoSuspender<'a> {
    stack: Option<&'a mut UndoStack>,
}

impl<'a> UndoSuspender<'a> {
    /// Suspends recording on `stack`.
    pub fn new(stack: &'a mut UndoStack) -> UndoSuspender<'a> {
        stack.suspend();
        UndoSuspender { stack: Some(stack) }
    }

    /// Suspends recording on the stack of `context`.
    ///
    /// Returns a suspender that does nothing if the context has no stack.
    pub fn from_context<C: UndoContext + ?Sized>(context: &'a mut C) -> UndoSuspender<'a> {
        match context.undo_stack() {
            Some(stack) => UndoSuspender::new(stack),
            None => UndoSuspender::noop(),
        }
    }

    /// Returns a suspender that is not attached to any stack.
    pub fn noop() -> UndoSuspender<'a> {
        UndoSuspender { stack: None }
    }

    /// Returns `true` if the suspender is not attached to any stack.
    pub fn is_noop(&self) -> bool {
        self.stack.is_none()
    }

    /// Returns the suspended stack.
    pub fn stack(&self) -> Option<&UndoStack> {
        self.stack.as_deref()
    }

    /// Returns the suspended stack.
    pub fn stack_mut(&mut self) -> Option<&mut UndoStack> {
        self.stack.as_deref_mut()
    }
}

impl Drop for UndoSuspender<'_> {
    fn drop(&mut self) {
        if let Some(stack) = self.stack.as_deref_mut() {
            stack.resume();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OnUndo;

    struct Atom {
        stack: Option<UndoStack>,
    }

    impl UndoContext for Atom {
        fn undo_stack(&mut self) -> Option<&mut UndoStack> {
            self.stack.as_mut()
        }
    }

    #[test]
    fn resumes_on_drop() {
        let mut stack = UndoStack::new();
        {
            let suspender = stack.suspender();
            assert!(suspender.stack().unwrap().is_suspended());
        }
        assert!(!stack.is_suspended());
    }

    #[test]
    fn nested() {
        let mut stack = UndoStack::new();
        let mut outer = UndoSuspender::new(&mut stack);
        {
            let mut inner = UndoSuspender::from_context(outer.stack_mut().unwrap());
            inner.stack_mut().unwrap().suspend();
            inner.stack_mut().unwrap().resume();
        }
        assert!(outer.stack().unwrap().is_suspended());
        drop(outer);
        assert!(!stack.is_suspended());
    }

    #[test]
    fn no_stack_is_noop() {
        let mut atom = Atom { stack: None };
        let suspender = UndoSuspender::from_context(&mut atom);
        assert!(suspender.is_noop());
        drop(suspender);

        let mut atom = Atom {
            stack: Some(UndoStack::new()),
        };
        {
            let suspender = UndoSuspender::from_context(&mut atom);
            assert!(!suspender.is_noop());
        }
        assert!(!atom.stack.unwrap().is_suspended());
    }

    #[test]
    fn suspended_commit_is_dropped() {
        let mut stack = UndoStack::new();
        stack.begin_compound_operation("Import");
        stack.push(OnUndo(|| ()));
        {
            let mut suspender = stack.suspender();
            suspender
                .stack_mut()
                .unwrap()
                .end_compound_operation(true)
                .unwrap();
        }
        assert!(stack.is_empty());
        assert_eq!(stack.compound_depth(), 0);
    }

    #[test]
    #[should_panic(expected = "recording is suspended")]
    fn push_while_suspended() {
        let mut stack = UndoStack::new();
        let mut suspender = stack.suspender();
        suspender.stack_mut().unwrap().push(OnUndo(|| ()));
    }

    #[test]
    #[should_panic(expected = "more often than `suspend`")]
    fn unbalanced_resume() {
        UndoStack::new().resume();
    }
}
