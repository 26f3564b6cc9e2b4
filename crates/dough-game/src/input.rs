//! Input events delivered to the scene
//!
//! The runtime only cares about key presses, key releases and a quit
//! request. Window events from `winit` translate into these.

use std::collections::VecDeque;

use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// The user asked to close the game
    Quit,
}

impl InputEvent {
    /// Translate a window event. Returns `None` for events the runtime does
    /// not use, including key repeats and keys without a physical code.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(Self::Quit),
            WindowEvent::KeyboardInput { event, .. } => Self::from_key_event(event),
            _ => None,
        }
    }

    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        Some(match event.state {
            ElementState::Pressed => Self::KeyDown(code),
            ElementState::Released => Self::KeyUp(code),
        })
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

/// Source of pending input events, drained once per frame.
pub trait EventSource {
    /// Next pending event, or `None` when the queue is empty for this frame.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

impl EventSource for VecDeque<InputEvent> {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_becomes_quit() {
        let event = InputEvent::from_window_event(&WindowEvent::CloseRequested);
        assert_eq!(event, Some(InputEvent::Quit));
        assert!(InputEvent::Quit.is_quit());
    }

    #[test]
    fn unrelated_window_events_are_ignored() {
        assert_eq!(InputEvent::from_window_event(&WindowEvent::Focused(true)), None);
        assert_eq!(InputEvent::from_window_event(&WindowEvent::Destroyed), None);
    }

    #[test]
    fn queue_drains_in_order() {
        let mut queue: VecDeque<InputEvent> = [
            InputEvent::KeyDown(KeyCode::KeyW),
            InputEvent::KeyUp(KeyCode::KeyW),
        ]
        .into_iter()
        .collect();
        assert_eq!(queue.poll_event(), Some(InputEvent::KeyDown(KeyCode::KeyW)));
        assert_eq!(queue.poll_event(), Some(InputEvent::KeyUp(KeyCode::KeyW)));
        assert_eq!(queue.poll_event(), None);
    }
}
