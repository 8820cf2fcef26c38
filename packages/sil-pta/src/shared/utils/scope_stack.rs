//! Scope stack for name binding
//!
//! Tracks the nested binding frames seen while resolving identifiers.
//! Frame 0 is the unnamed global frame and is never popped.

use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
struct Frame {
    name: String,
    bindings: FxHashSet<String>,
}

/// Scope stack for binding lookups
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Create a stack holding only the global frame
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Push a new named frame
    pub fn push(&mut self, name: impl Into<String>) {
        self.frames.push(Frame {
            name: name.into(),
            bindings: FxHashSet::default(),
        });
    }

    /// Pop the innermost frame; the global frame stays
    pub fn pop(&mut self) -> Option<String> {
        if self.frames.len() > 1 {
            self.frames.pop().map(|frame| frame.name)
        } else {
            None
        }
    }

    /// Bind `name` in the innermost frame
    pub fn bind(&mut self, name: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(name.to_string());
        }
    }

    /// Bind `name` in the global frame regardless of nesting
    pub fn bind_global(&mut self, name: &str) {
        self.frames[0].bindings.insert(name.to_string());
    }

    /// Index of the innermost frame binding `name`, if any
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.frames
            .iter()
            .rposition(|frame| frame.bindings.contains(name))
    }

    /// Is `name` bound directly in the innermost frame?
    pub fn is_bound_here(&self, name: &str) -> bool {
        self.frames
            .last()
            .map_or(false, |frame| frame.bindings.contains(name))
    }

    /// Name of the frame at `index` (empty for the global frame)
    pub fn frame_name(&self, index: usize) -> Option<&str> {
        self.frames.get(index).map(|frame| frame.name.as_str())
    }

    /// Number of named frames above the global one
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }
}
