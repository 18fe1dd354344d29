use std::fmt;

use rust_fsm::state_machine;

/*
 * Menu
 * Active
 *    Timer counts down, player submits entries
 *    Ends on time up or when the player stops, cancel goes back to the menu
 * Ended
 *    Opponent answers, scoring
 *    Back to the menu or straight into a new round
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub GameFsm(Menu)

    Menu => {
        StartRound => Active
    },
    Active => {
        TimeUp => Ended,
        Stop => Ended,
        Cancel => Menu,
    },
    Ended => {
        StartRound => Active,
        BackToMenu => Menu,
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
