#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure control-panel system that translates player gestures into commands.
//!
//! The system owns the observable control-panel state machine: the combined
//! start/pause/resume button label, the quit latch, and the delay slider
//! clamping. It performs no I/O and reads no clock; adapters forward
//! [`PlayerIntent`] values and submit the resulting command batches to the
//! world.

use std::time::Duration;

use game_of_life_core::{CellCoord, Command, MAX_DELAY, MIN_DELAY};

/// Gestures the presentation layer forwards to the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerIntent {
    /// Press of the combined start/pause/resume button.
    PressStart,
    /// Press of the restart button.
    PressRestart,
    /// Press of the quit button.
    PressQuit,
    /// Movement of the delay slider to a requested interval.
    MoveDelaySlider {
        /// Interval selected on the slider, clamped before submission.
        delay: Duration,
    },
    /// Click on a board cell.
    ClickCell {
        /// Coordinate of the clicked cell.
        cell: CellCoord,
    },
}

/// Label painted on the combined start/pause/resume button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartButtonLabel {
    /// The simulation has not run since boot or the last restart.
    Start,
    /// The simulation is running; pressing the button suspends it.
    Pause,
    /// The simulation is suspended; pressing the button resumes it.
    Resume,
}

impl StartButtonLabel {
    /// Text the presentation layer paints on the button.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Pause => "Pause",
            Self::Resume => "Resume",
        }
    }
}

/// Pure system that reacts to player gestures and emits world commands.
#[derive(Debug)]
pub struct ControlPanel {
    start_label: StartButtonLabel,
    quit_latched: bool,
}

impl ControlPanel {
    /// Current label of the combined start/pause/resume button.
    #[must_use]
    pub const fn start_label(&self) -> StartButtonLabel {
        self.start_label
    }

    /// Returns whether the player requested to quit and clears the latch so
    /// the action fires only once. Quit is a process-termination signal for
    /// the adapter, never a world command.
    pub fn take_quit_request(&mut self) -> bool {
        let latched = self.quit_latched;
        self.quit_latched = false;
        latched
    }

    /// Translates one player gesture into a batch of world commands.
    pub fn handle(&mut self, intent: PlayerIntent, out: &mut Vec<Command>) {
        match intent {
            PlayerIntent::PressStart => match self.start_label {
                StartButtonLabel::Start | StartButtonLabel::Resume => {
                    self.start_label = StartButtonLabel::Pause;
                    out.push(Command::SetPaused { paused: false });
                }
                StartButtonLabel::Pause => {
                    self.start_label = StartButtonLabel::Resume;
                    out.push(Command::SetPaused { paused: true });
                }
            },
            PlayerIntent::PressRestart => {
                self.start_label = StartButtonLabel::Start;
                out.push(Command::SetPaused { paused: true });
                out.push(Command::Restart);
            }
            PlayerIntent::PressQuit => {
                self.quit_latched = true;
            }
            PlayerIntent::MoveDelaySlider { delay } => {
                out.push(Command::SetDelay {
                    delay: delay.clamp(MIN_DELAY, MAX_DELAY),
                });
            }
            PlayerIntent::ClickCell { cell } => {
                out.push(Command::ToggleCell { cell });
            }
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            start_label: StartButtonLabel::Start,
            quit_latched: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ControlPanel, PlayerIntent, StartButtonLabel};

    #[test]
    fn button_labels_match_the_painted_text() {
        assert_eq!(StartButtonLabel::Start.text(), "Start");
        assert_eq!(StartButtonLabel::Pause.text(), "Pause");
        assert_eq!(StartButtonLabel::Resume.text(), "Resume");
    }

    #[test]
    fn quit_latch_drains_once() {
        let mut control = ControlPanel::default();
        let mut commands = Vec::new();

        assert!(!control.take_quit_request());
        control.handle(PlayerIntent::PressQuit, &mut commands);
        assert!(commands.is_empty(), "quit never reaches the world");
        assert!(control.take_quit_request());
        assert!(!control.take_quit_request());
    }
}
