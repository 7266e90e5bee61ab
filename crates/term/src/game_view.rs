//! GameView: maps a [`RoundSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{AnswerResult, OptionState, PlayerSnapshot, RoundSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Outcome, PlayerId, CHOICE_COUNT};

const BG: Rgb = Rgb::new(12, 12, 16);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const MUTED: Rgb = Rgb::new(110, 110, 120);
const CORRECT: Rgb = Rgb::new(40, 167, 69);
const WRONG: Rgb = Rgb::new(220, 53, 69);
const ALERT: Rgb = Rgb::new(255, 193, 7);
const FALLBACK_PLAYER: Rgb = Rgb::new(160, 160, 160);

pub const FAILED_MESSAGE: &str = "Failed to answer. No points awarded.";
pub const SUDDEN_DEATH_LABEL: &str = "SUDDEN DEATH!";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

fn player_rgb(p: &PlayerSnapshot) -> Rgb {
    Rgb::from_tag(&p.color).unwrap_or(FALLBACK_PLAYER)
}

/// Human-facing label for an option, e.g. `[Q|U]`.
pub fn key_label(option: usize) -> String {
    let one = PlayerId::One.keys()[option].to_ascii_uppercase();
    let two = PlayerId::Two.keys()[option].to_ascii_uppercase();
    format!("[{}|{}]", one, two)
}

/// Renders the round and the victory screen.
pub struct GameView {
    /// Maximum width of the content column.
    max_width: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { max_width: 72 }
    }
}

impl GameView {
    pub fn new(max_width: u16) -> Self {
        Self {
            max_width: max_width.max(20),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        title: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        if fb.width() != viewport.width || fb.height() != viewport.height {
            fb.resize(viewport.width, viewport.height);
        }
        fb.fill(CellStyle::new(TEXT, BG));

        let w = viewport.width.min(self.max_width);
        let x0 = (viewport.width - w) / 2;
        let mut y = 1u16;

        if let Some(title) = title {
            fb.put_centered(x0, w, y, title, CellStyle::new(MUTED, BG));
            y += 2;
        }

        self.draw_header(snap, x0, w, y, fb);
        y += 2;

        if snap.status.is_finished() {
            self.draw_victory(snap, x0, w, y, fb);
        } else {
            self.draw_question(snap, x0, w, y, fb);
        }
    }

    pub fn render(
        &self,
        snap: &RoundSnapshot,
        title: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, title, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, snap: &RoundSnapshot, x0: u16, w: u16, y: u16, fb: &mut FrameBuffer) {
        let [one, two] = &snap.players;

        let left = format!("{}: {}", one.name, one.score);
        fb.put_str(x0, y, &left, CellStyle::new(player_rgb(one), BG).bold());

        let right = format!("{}: {}", two.name, two.score);
        let rlen = right.chars().count() as u16;
        fb.put_str(
            (x0 + w).saturating_sub(rlen),
            y,
            &right,
            CellStyle::new(player_rgb(two), BG).bold(),
        );

        match snap.status {
            GameStatus::SuddenDeath => {
                fb.put_centered(x0, w, y, SUDDEN_DEATH_LABEL, CellStyle::new(ALERT, BG).bold());
            }
            GameStatus::Playing => {
                let progress = format!("Question {} of {}", snap.index + 1, snap.total);
                fb.put_centered(x0, w, y, &progress, CellStyle::new(MUTED, BG));
            }
            GameStatus::Finished => {}
        }
    }

    fn draw_question(
        &self,
        snap: &RoundSnapshot,
        x0: u16,
        w: u16,
        mut y: u16,
        fb: &mut FrameBuffer,
    ) {
        let Some(q) = &snap.question else {
            return;
        };

        let pts = if q.points == 1 {
            "1 point".to_string()
        } else {
            format!("{} points", q.points)
        };
        fb.put_centered(x0, w, y, &pts, CellStyle::new(MUTED, BG));
        y += 1;
        fb.put_centered(x0, w, y, &q.text, CellStyle::new(TEXT, BG).bold());
        y += 2;

        for option in 0..CHOICE_COUNT {
            self.draw_option(snap, option, x0, w, y, fb);
            y += 2;
        }

        if snap.failed() {
            fb.put_centered(x0, w, y, FAILED_MESSAGE, CellStyle::new(WRONG, BG).bold());
        } else {
            for player in PlayerId::ALL {
                let p = snap.player(player);
                let line = match p.last_result {
                    Some(AnswerResult::Correct) => format!("{} is correct!", p.name),
                    Some(AnswerResult::Incorrect) => format!("{} is wrong", p.name),
                    None => continue,
                };
                let color = match p.last_result {
                    Some(AnswerResult::Correct) => CORRECT,
                    _ => WRONG,
                };
                fb.put_centered(x0, w, y, &line, CellStyle::new(color, BG));
                y += 1;
            }
        }
    }

    fn draw_option(
        &self,
        snap: &RoundSnapshot,
        option: usize,
        x0: u16,
        w: u16,
        y: u16,
        fb: &mut FrameBuffer,
    ) {
        let Some(q) = &snap.question else {
            return;
        };

        let revealed = snap.revealed == Some(option);
        let state = snap.options[option];
        let style = if revealed {
            CellStyle::new(BG, CORRECT).bold()
        } else {
            match state {
                OptionState::Open => CellStyle::new(TEXT, BG),
                OptionState::Disabled => CellStyle::new(WRONG, BG).dim(),
                OptionState::Locked => CellStyle::new(TEXT.shade(110), BG).dim(),
            }
        };

        let line = format!("{} {}", key_label(option), q.choices[option]);
        let x = x0 + 4;
        fb.fill_rect(x, y, w.saturating_sub(8), 1, CellStyle::new(style.fg, style.bg));
        fb.put_str(x + 1, y, &line, style);

        // Selection markers on either side of the option.
        let [by_one, by_two] = snap.selected_by(option);
        if by_one {
            fb.put_char(x0 + 1, y, '>', CellStyle::new(player_rgb(&snap.players[0]), BG).bold());
        }
        if by_two {
            fb.put_char(
                (x0 + w).saturating_sub(2),
                y,
                '<',
                CellStyle::new(player_rgb(&snap.players[1]), BG).bold(),
            );
        }
    }

    fn draw_victory(
        &self,
        snap: &RoundSnapshot,
        x0: u16,
        w: u16,
        mut y: u16,
        fb: &mut FrameBuffer,
    ) {
        match snap.outcome {
            Some(Outcome::Winner(p)) => {
                let winner = snap.player(p);
                let loser = snap.player(p.other());
                let headline = format!("{} wins!", winner.name);
                fb.put_centered(x0, w, y, &headline, CellStyle::new(player_rgb(winner), BG).bold());
                y += 2;
                let score = format!("{} to {}", winner.score, loser.score);
                fb.put_centered(x0, w, y, &score, CellStyle::new(TEXT, BG));
            }
            Some(Outcome::Tie) | None => {
                fb.put_centered(x0, w, y, "It's a tie!", CellStyle::new(ALERT, BG).bold());
                y += 2;
                let score = format!("{} to {}", snap.players[0].score, snap.players[1].score);
                fb.put_centered(x0, w, y, &score, CellStyle::new(TEXT, BG));
            }
        }
        y += 3;
        fb.put_centered(
            x0,
            w,
            y,
            "Enter: play again   Backspace: new game   Esc: quit",
            CellStyle::new(MUTED, BG),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{QuestionSnapshot, Resolution};

    fn playing() -> RoundSnapshot {
        let mut snap = RoundSnapshot {
            total: 10,
            index: 2,
            question: Some(QuestionSnapshot {
                text: "7 x 8".to_string(),
                choices: ["54", "56", "58", "64"].map(String::from),
                points: 10,
                wave: Some(2),
            }),
            ..Default::default()
        };
        snap.players[0].name = "Ada".to_string();
        snap.players[0].color = "blue".to_string();
        snap.players[1].name = "Bo".to_string();
        snap.players[1].color = "pink".to_string();
        snap
    }

    fn find(fb: &FrameBuffer, needle: &str) -> Option<u16> {
        (0..fb.height()).find(|&y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(key_label(0), "[Q|U]");
        assert_eq!(key_label(3), "[R|P]");
    }

    #[test]
    fn test_round_layout() {
        let view = GameView::default();
        let fb = view.render(&playing(), Some("Times Tables"), Viewport::new(80, 24));
        assert!(find(&fb, "Times Tables").is_some());
        assert!(find(&fb, "Question 3 of 10").is_some());
        assert!(find(&fb, "Ada: 0").is_some());
        assert!(find(&fb, "Bo: 0").is_some());
        assert!(find(&fb, "7 x 8").is_some());
        assert!(find(&fb, "[W|I] 56").is_some());
        assert!(find(&fb, "10 points").is_some());
        assert!(find(&fb, FAILED_MESSAGE).is_none());
    }

    #[test]
    fn test_failed_and_sudden_death() {
        let mut snap = playing();
        snap.status = GameStatus::SuddenDeath;
        snap.resolution = Some(Resolution::Failed);
        snap.options = [OptionState::Locked; CHOICE_COUNT];
        let fb = GameView::default().render(&snap, None, Viewport::new(80, 24));
        assert!(find(&fb, SUDDEN_DEATH_LABEL).is_some());
        assert!(find(&fb, "Question").is_none());
        assert!(find(&fb, FAILED_MESSAGE).is_some());
    }

    #[test]
    fn test_selection_markers() {
        let mut snap = playing();
        snap.players[1].selection = Some(1);
        snap.players[1].last_result = Some(AnswerResult::Correct);
        snap.revealed = Some(1);
        let fb = GameView::default().render(&snap, None, Viewport::new(80, 24));
        let y = find(&fb, "[W|I] 56").unwrap_or(0);
        assert!(fb.row_text(y).trim_end().ends_with('<'));
        assert!(find(&fb, "Bo is correct!").is_some());
        let revealed = fb.row(y).iter().find(|c| c.ch == '5').map(|c| c.style.bg);
        assert_eq!(revealed, Some(CORRECT));
    }

    #[test]
    fn test_victory_screen() {
        let mut snap = playing();
        snap.question = None;
        snap.status = GameStatus::Finished;
        snap.players[0].score = 100;
        snap.players[1].score = -100;
        snap.outcome = Some(Outcome::Winner(PlayerId::One));
        let fb = GameView::default().render(&snap, None, Viewport::new(80, 24));
        assert!(find(&fb, "Ada wins!").is_some());
        assert!(find(&fb, "100 to -100").is_some());

        snap.outcome = Some(Outcome::Tie);
        let fb = GameView::default().render(&snap, None, Viewport::new(80, 24));
        assert!(find(&fb, "It's a tie!").is_some());
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&playing(), Some("Title"), Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
