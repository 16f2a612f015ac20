//! Focus state for gallery and lightbox views.
//!
//! [`GalleryNavigator`] tracks which photo of a fixed-size list is focused.
//! The inline gallery and the full-screen lightbox drive the same transitions,
//! so both render identical neighbours for a given state.

use serde::Serialize;

/// Current focus of a navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum Focus {
    Closed,
    Focused(usize),
}

/// Cyclic index state machine over `len` items.
///
/// `len` and `looping` are fixed for the navigator's lifetime; a different
/// item list needs a new navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryNavigator {
    len: usize,
    looping: bool,
    focus: Focus,
}

impl GalleryNavigator {
    /// A closed navigator with looping enabled.
    pub fn new(len: usize) -> Self {
        Self::with_looping(len, true)
    }

    pub fn with_looping(len: usize, looping: bool) -> Self {
        Self {
            len,
            looping,
            focus: Focus::Closed,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn current(&self) -> Option<usize> {
        match self.focus {
            Focus::Closed => None,
            Focus::Focused(i) => Some(i),
        }
    }

    pub fn is_open(&self) -> bool {
        self.current().is_some()
    }

    /// Focus `index`. Out-of-range indices leave the state untouched and
    /// return `false`.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.focus = Focus::Focused(index);
        true
    }

    pub fn next(&mut self) -> Focus {
        if let Some(i) = self.peek_next() {
            self.focus = Focus::Focused(i);
        }
        self.focus
    }

    pub fn prev(&mut self) -> Focus {
        if let Some(i) = self.peek_prev() {
            self.focus = Focus::Focused(i);
        }
        self.focus
    }

    pub fn close(&mut self) {
        self.focus = Focus::Closed;
    }

    /// Index `next()` would focus, or `None` if it would not move.
    pub fn peek_next(&self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        match self.focus {
            Focus::Closed => Some(0),
            Focus::Focused(i) if i + 1 < self.len => Some(i + 1),
            Focus::Focused(_) if self.looping => Some(0),
            Focus::Focused(_) => None,
        }
    }

    /// Index `prev()` would focus, or `None` if it would not move.
    pub fn peek_prev(&self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        match self.focus {
            Focus::Closed => Some(self.len - 1),
            Focus::Focused(i) if i > 0 => Some(i - 1),
            Focus::Focused(_) if self.looping => Some(self.len - 1),
            Focus::Focused(_) => None,
        }
    }
}
