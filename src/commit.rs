//! Commit detection for parameter edits.
//!
//! Widgets report a value change on every intermediate tick of a drag or
//! keystroke. Rebuilding the field on each of those would reallocate the
//! buffers dozens of times per gesture, so [`CommitGate`] only reports a
//! commit once a change has been seen and the gesture that produced it has
//! ended.

use crate::config::Parameter;

/// What a widget reported this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSignal {
    /// The bound value changed this frame.
    pub changed: bool,
    /// A drag, text entry, or picker popup is still in progress.
    pub in_progress: bool,
}

impl EditSignal {
    pub fn new(changed: bool, in_progress: bool) -> Self {
        Self {
            changed,
            in_progress,
        }
    }
}

/// Tracks pending edits per binding.
#[derive(Debug, Clone, Default)]
pub struct CommitGate {
    pending: [bool; Parameter::ALL.len()],
}

impl CommitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's signal for `parameter`.
    ///
    /// Returns `true` exactly once per finished edit gesture.
    pub fn observe(&mut self, parameter: Parameter, signal: EditSignal) -> bool {
        let pending = &mut self.pending[parameter.index()];
        if signal.changed {
            *pending = true;
        }
        if *pending && !signal.in_progress {
            *pending = false;
            return true;
        }
        false
    }

    /// Whether any binding has an unfinished edit.
    pub fn has_pending(&self) -> bool {
        self.pending.iter().any(|p| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_commits_on_release() {
        let mut gate = CommitGate::new();
        let p = Parameter::Radius;

        assert!(!gate.observe(p, EditSignal::new(false, true)));
        assert!(!gate.observe(p, EditSignal::new(true, true)));
        assert!(!gate.observe(p, EditSignal::new(true, true)));
        assert!(gate.has_pending());
        assert!(gate.observe(p, EditSignal::new(false, false)));
        assert!(!gate.has_pending());
        assert!(!gate.observe(p, EditSignal::new(false, false)));
    }

    #[test]
    fn test_click_commits_immediately() {
        let mut gate = CommitGate::new();
        assert!(gate.observe(Parameter::Count, EditSignal::new(true, false)));
    }

    #[test]
    fn test_gesture_without_change_does_not_commit() {
        let mut gate = CommitGate::new();
        let p = Parameter::Size;
        assert!(!gate.observe(p, EditSignal::new(false, true)));
        assert!(!gate.observe(p, EditSignal::new(false, false)));
    }

    #[test]
    fn test_bindings_are_independent() {
        let mut gate = CommitGate::new();
        assert!(!gate.observe(Parameter::InsideColor, EditSignal::new(true, true)));
        assert!(!gate.observe(Parameter::OutsideColor, EditSignal::new(false, false)));
        assert!(gate.observe(Parameter::InsideColor, EditSignal::new(false, false)));
    }
}
