/// The component that owns a running game.
///
/// Key handlers only touch key flags and the command queue; `frame` is the
/// single place where game state changes.  Dropping the session releases
/// its frame loop.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::compute::{self, MoveInput};
use crate::entities::GameState;
use crate::frame_loop::LoopHandle;
use crate::input::{Key, KeyAction, KeyTracker};
use crate::popup::{ContactCard, DeveloperPopup};
use crate::scoreboard::Scoreboard;
use crate::tuning::SHOOT_COOLDOWN;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Shoot,
    Restart,
    TogglePopup,
    /// Close the popup if it is open, otherwise quit.
    Back,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The simulation advanced this frame.
    Running,
    /// The game is over; state is kept until a restart.
    Halted,
    /// The loop handle was released.
    Stopped,
}

pub struct Session {
    pub state: GameState,
    pub scoreboard: Scoreboard,
    pub popup: DeveloperPopup,
    keys: KeyTracker,
    commands: VecDeque<Command>,
    frame: u64,
    /// Session frame of the last queued shot.
    last_shot: Option<u64>,
    handle: LoopHandle,
}

impl Session {
    /// Start a session on the default 800×600 canvas.  The returned handle
    /// stops the loop from outside.
    pub fn start(card: ContactCard, hold_frames: u64) -> (Session, LoopHandle) {
        Self::with_state(GameState::default(), card, hold_frames)
    }

    pub fn with_state(
        state: GameState,
        card: ContactCard,
        hold_frames: u64,
    ) -> (Session, LoopHandle) {
        let handle = LoopHandle::new();
        info!(width = state.width, height = state.height, "session started");
        let session = Session {
            state,
            scoreboard: Scoreboard::new(),
            popup: DeveloperPopup::new(card),
            keys: KeyTracker::new(hold_frames),
            commands: VecDeque::new(),
            frame: 0,
            last_shot: None,
            handle: handle.clone(),
        };
        (session, handle)
    }

    pub fn handle(&self) -> &LoopHandle {
        &self.handle
    }

    pub fn pending(&self) -> usize {
        self.commands.len()
    }

    /// Key event handler.  Movement keys only update held flags.  Fire
    /// auto-repeats while held, at most once every `SHOOT_COOLDOWN` frames,
    /// whether the terminal repeats with presses or repeat events.  The
    /// other keys enqueue a command on a fresh press.
    pub fn handle_key(&mut self, key: Key, action: KeyAction) {
        let fresh = self.keys.record(key, action, self.frame);
        let command = match key {
            Key::Left | Key::Right => return,
            Key::Shoot => {
                if action == KeyAction::Up || !self.shot_ready() {
                    return;
                }
                self.last_shot = Some(self.frame);
                Command::Shoot
            }
            _ if !fresh => return,
            Key::Restart => Command::Restart,
            Key::Contact => Command::TogglePopup,
            Key::Back => Command::Back,
            Key::Quit => Command::Quit,
        };
        self.commands.push_back(command);
    }

    fn shot_ready(&self) -> bool {
        self.last_shot
            .map_or(true, |last| self.frame - last >= SHOOT_COOLDOWN)
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::Shoot => {
                compute::shoot(&mut self.state);
            }
            Command::Restart => {
                if compute::restart(&mut self.state) {
                    self.scoreboard.reset();
                }
            }
            Command::TogglePopup => self.popup.toggle(),
            Command::Back => {
                if !self.popup.close() {
                    self.handle.release();
                }
            }
            Command::Quit => {
                self.handle.release();
            }
        }
    }

    /// One frame: consume queued commands, then advance and draw the
    /// simulation unless the game is over.
    pub fn frame(&mut self, rng: &mut impl Rng, canvas: &mut impl Canvas) -> FrameStatus {
        while let Some(command) = self.commands.pop_front() {
            debug!(?command, frame = self.frame, "command");
            self.run_command(command);
        }

        let status = if self.handle.is_released() {
            FrameStatus::Stopped
        } else if self.state.game_over {
            FrameStatus::Halted
        } else {
            let input = MoveInput {
                left: self.keys.is_held(Key::Left, self.frame),
                right: self.keys.is_held(Key::Right, self.frame),
            };
            for event in compute::tick(&mut self.state, &input, rng, canvas) {
                self.scoreboard.apply(&event);
            }
            if self.state.game_over {
                FrameStatus::Halted
            } else {
                FrameStatus::Running
            }
        };

        self.frame += 1;
        status
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.handle.release();
    }
}
