//! Scripted input for headless runs

use dough_game::{EventSource, InputEvent};
use tracing::warn;
use winit::keyboard::KeyCode;

use crate::settings::{ScriptAction, ScriptStep};

/// Key names accepted in scripts.
fn parse_key(name: &str) -> Option<KeyCode> {
    let key = match name.to_ascii_lowercase().as_str() {
        "w" => KeyCode::KeyW,
        "a" => KeyCode::KeyA,
        "s" => KeyCode::KeyS,
        "d" => KeyCode::KeyD,
        "up" => KeyCode::ArrowUp,
        "down" => KeyCode::ArrowDown,
        "left" => KeyCode::ArrowLeft,
        "right" => KeyCode::ArrowRight,
        "space" => KeyCode::Space,
        "escape" | "esc" => KeyCode::Escape,
        _ => return None,
    };
    Some(key)
}

/// Replays scripted events, each in the frame it was scheduled for.
///
/// The game drains the source until it reports `None` once per frame, so
/// every `None` marks the end of a frame.
pub struct ScriptedEvents {
    /// `(frame, event)`, sorted by frame
    steps: Vec<(u64, InputEvent)>,
    next: usize,
    frame: u64,
}

impl ScriptedEvents {
    pub fn new(script: &[ScriptStep]) -> Self {
        let mut steps: Vec<(u64, InputEvent)> = script
            .iter()
            .filter_map(|step| {
                let event = match step.action {
                    ScriptAction::Quit => InputEvent::Quit,
                    ScriptAction::Press | ScriptAction::Release => {
                        let Some(key) = parse_key(&step.key) else {
                            warn!("Skipping scripted event with unknown key '{}'", step.key);
                            return None;
                        };
                        if step.action == ScriptAction::Press {
                            InputEvent::KeyDown(key)
                        } else {
                            InputEvent::KeyUp(key)
                        }
                    }
                };
                Some((step.frame, event))
            })
            .collect();
        // Stable, so same-frame events keep their script order.
        steps.sort_by_key(|(frame, _)| *frame);
        Self {
            steps,
            next: 0,
            frame: 1,
        }
    }

    /// Events not delivered yet
    pub fn remaining(&self) -> usize {
        self.steps.len() - self.next
    }
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> Option<InputEvent> {
        match self.steps.get(self.next) {
            Some(&(frame, event)) if frame <= self.frame => {
                self.next += 1;
                Some(event)
            }
            _ => {
                self.frame += 1;
                None
            }
        }
    }
}
