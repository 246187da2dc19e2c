use crate::error::Error;

/// Stack implements a last-in, first-out policy over an array `S[1..n]`,
/// where `S.top` indexes the most recently inserted element.
///
/// A stack created with [`Stack::with_capacity`] holds at most `n`
/// elements and fails on overflow. [`Stack::new`] creates a stack that
/// grows on demand, used by the iterative tree walks.
#[derive(Clone, Debug)]
pub struct Stack<T> {
    items: Vec<T>,
    capacity: Option<usize>,
}

impl<T> Stack<T> {
    /// Create an empty stack without an upper bound.
    pub fn new() -> Stack<T> {
        Stack {
            items: vec![],
            capacity: None,
        }
    }

    /// Create an empty stack of at most `n` elements.
    pub fn with_capacity(n: usize) -> Stack<T> {
        Stack {
            items: Vec::with_capacity(n),
            capacity: Some(n),
        }
    }

    /// STACK-EMPTY.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return number of elements in the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return the upper bound, if this stack is bounded.
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// PUSH, fails with [`Error::StackOverflow`] when the stack is full.
    pub fn push(&mut self, item: T) -> Result<(), Error> {
        match self.capacity {
            Some(n) if self.items.len() >= n => Err(Error::StackOverflow(n)),
            _ => {
                self.items.push(item);
                Ok(())
            }
        }
    }

    /// POP, fails with [`Error::StackUnderflow`] when the stack is empty.
    pub fn pop(&mut self) -> Result<T, Error> {
        self.items.pop().ok_or(Error::StackUnderflow)
    }

    // PUSH on a stack created by `new`, which has no bound to overflow.
    pub(crate) fn push_unbounded(&mut self, item: T) {
        debug_assert!(self.capacity.is_none());
        self.items.push(item)
    }

    /// Return the most recently inserted element without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }
}
