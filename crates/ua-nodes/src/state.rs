//! Action lifecycle states.

/// The current lifecycle state of an action.
///
/// State transitions are driven exclusively by the action block that owns the
/// action — an action never changes its own recorded state spontaneously.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionState {
    /// Waiting to be run.  Every action returns here when its block is reset.
    #[default]
    Pending,
    /// Currently running; `on_action_update` will be called again next tick.
    Running,
    /// Finished successfully.
    Success,
    /// Finished with a failure.
    Fail,
}

impl ActionState {
    /// `true` for the two terminal states.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, ActionState::Success | ActionState::Fail)
    }
}
