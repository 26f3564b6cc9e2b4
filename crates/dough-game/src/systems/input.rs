use winit::keyboard::KeyCode;

use crate::components::Movement;
use crate::error::SceneError;
use crate::input::InputEvent;
use crate::scene::SceneContext;
use crate::system::InputSystem;

/// Axis and direction a key drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => Some(Self::Up),
            KeyCode::KeyS | KeyCode::ArrowDown => Some(Self::Down),
            KeyCode::KeyA | KeyCode::ArrowLeft => Some(Self::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }
}

/// Turns movement keys into the player's velocity.
///
/// Pressing a key sets its axis to full speed in that direction; releasing
/// it stops that axis, even if the opposite key is still held.
#[derive(Debug, Clone, Copy)]
pub struct PlayerInputSystem {
    speed: i32,
}

impl PlayerInputSystem {
    pub fn new(speed: i32) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }
}

impl Default for PlayerInputSystem {
    fn default() -> Self {
        Self::new(400)
    }
}

impl InputSystem for PlayerInputSystem {
    fn input(&mut self, ctx: &mut SceneContext, event: &InputEvent) -> Result<(), SceneError> {
        let (key, pressed) = match *event {
            InputEvent::KeyDown(key) => (key, true),
            InputEvent::KeyUp(key) => (key, false),
            InputEvent::Quit => return Ok(()),
        };
        let Some(direction) = Direction::from_key(key) else {
            return Ok(());
        };

        let player = ctx.player()?;
        let movement = ctx.world.component_mut::<Movement>(player)?;
        let speed = if pressed { self.speed } else { 0 };
        match direction {
            Direction::Up => movement.vy = -speed,
            Direction::Down => movement.vy = speed,
            Direction::Left => movement.vx = -speed,
            Direction::Right => movement.vx = speed,
        }
        Ok(())
    }
}
