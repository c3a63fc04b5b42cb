use aup_core::Action;

/// Gridworld actions, in the order simulators in this family expose them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GridAction {
    Up,
    Down,
    Left,
    Right,
    Nothing,
}

impl GridAction {
    /// Fixed order for determinism: up, down, left, right, nothing.
    pub const ALL: [GridAction; 5] = [
        GridAction::Up,
        GridAction::Down,
        GridAction::Left,
        GridAction::Right,
        GridAction::Nothing,
    ];

    pub fn index(self) -> Action {
        self as Action
    }

    pub fn from_index(action: Action) -> Option<Self> {
        Self::ALL.get(action).copied()
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            GridAction::Up => (0, -1),
            GridAction::Down => (0, 1),
            GridAction::Left => (-1, 0),
            GridAction::Right => (1, 0),
            GridAction::Nothing => (0, 0),
        }
    }
}
