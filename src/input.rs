use std::collections::HashSet;

/// Logical actions the core reacts to. Device bindings live in the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    /// Enter: open the leaderboard from the menu, dismiss result screens.
    Confirm,
    /// Escape: abandon a round or leave a result screen.
    Back,
}

/// Set of actions active during one frame, sampled once per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    active: HashSet<Action>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.active.insert(action);
        self
    }

    pub fn insert(&mut self, action: Action) {
        self.active.insert(action);
    }

    pub fn is_active(&self, action: Action) -> bool {
        self.active.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl FromIterator<Action> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self { active: iter.into_iter().collect() }
    }
}
