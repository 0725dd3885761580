//! Demo pilot: unattended play for attract mode and headless runs
//!
//! Produces one gamepad byte per frame from the current state. All randomness
//! comes from a seeded PCG, so a seed always replays the same game.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::{GameState, Gamepad, Screen};

/// Largest horizontal aim error, in pixels
const MAX_AIM_OFFSET: i32 = 12;
/// Paddle dead zone around the aim point
const DEAD_ZONE: i32 = 1;

pub struct DemoPilot {
    rng: Pcg32,
    /// Where on the paddle the pilot tries to catch the ball
    aim_offset: i32,
    /// Frames left to idle before pressing the next button
    wait_frames: u32,
    last_velocity_y: i32,
    previous: Gamepad,
}

impl DemoPilot {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let aim_offset = rng.random_range(-MAX_AIM_OFFSET..=MAX_AIM_OFFSET);
        Self {
            rng,
            aim_offset,
            wait_frames: 0,
            last_velocity_y: 0,
            previous: Gamepad::default(),
        }
    }

    /// Decide this frame's input
    pub fn next_input(&mut self, state: &GameState) -> Gamepad {
        let mut input = Gamepad::default();

        match state.screen {
            Screen::Help | Screen::GameOver => {
                if self.ready_to_press() {
                    input = self.press(input, Gamepad::DOWN);
                }
            }
            Screen::Play => {
                let ball = &state.ball;
                if ball.is_resting() {
                    if self.ready_to_press() {
                        input = self.press(input, Gamepad::BUTTON_2);
                    }
                } else if ball.velocity_y != self.last_velocity_y {
                    // New trajectory, pick a new spot on the paddle
                    self.aim_offset = self.rng.random_range(-MAX_AIM_OFFSET..=MAX_AIM_OFFSET);
                }
                self.last_velocity_y = ball.velocity_y;

                let target = ball.pos.x + BALL_DIAMETER / 2 + self.aim_offset;
                let paddle_center = state.paddle.x + BAR_WIDTH / 2;
                if paddle_center < target - DEAD_ZONE {
                    input = input.with(Gamepad::RIGHT);
                } else if paddle_center > target + DEAD_ZONE {
                    input = input.with(Gamepad::LEFT);
                }
            }
        }

        self.previous = input;
        input
    }

    /// Count down the idle timer; true once it has run out
    fn ready_to_press(&mut self) -> bool {
        if self.wait_frames == 0 {
            return true;
        }
        self.wait_frames -= 1;
        false
    }

    /// Add an edge-triggered press, releasing first if it was already held
    fn press(&mut self, input: Gamepad, button: u8) -> Gamepad {
        if self.previous.held(button) {
            return input;
        }
        self.wait_frames = self.rng.random_range(10..=45);
        input.with(button)
    }
}
