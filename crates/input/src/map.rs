//! Key mapping from terminal events to answer submissions.

use crate::types::{PlayerId, Submission};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a character to the player and option it answers for.
///
/// Player one answers with `Q W E R`, player two with `U I O P`, left to
/// right in option order. Case does not matter.
pub fn route_char(c: char) -> Option<Submission> {
    let c = c.to_ascii_lowercase();
    PlayerId::ALL.into_iter().find_map(|player| {
        player
            .keys()
            .iter()
            .position(|&k| k == c)
            .map(|option| Submission::new(player, option))
    })
}

/// Map keyboard input to an answer submission.
pub fn route_key(key: KeyEvent) -> Option<Submission> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => route_char(c),
        _ => None,
    }
}

/// Check if key should quit the game.
///
/// `q` is an answer key, so quitting is Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Victory screen: play again with the same setup.
pub fn is_rematch_key(key: KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

/// Victory screen: leave for setup.
pub fn is_back_key(key: KeyEvent) -> bool {
    key.code == KeyCode::Backspace
}
