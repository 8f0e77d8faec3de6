use crate::consts::KEY_COUNT;

/// Snapshot of the 16-key hex keypad supplied by the host once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pressed: [bool; KEY_COUNT],
    last_pressed: u8,
}

impl KeyState {
    pub fn new(pressed: [bool; KEY_COUNT], last_pressed: u8) -> Self {
        KeyState {
            pressed,
            last_pressed,
        }
    }

    /// A state with only `key` held, which is also the most recent press.
    pub fn single(key: u8) -> Self {
        let mut pressed = [false; KEY_COUNT];
        if let Some(slot) = pressed.get_mut(key as usize) {
            *slot = true;
        }
        Self::new(pressed, key)
    }

    /// Keys outside 0x0..=0xF are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&down| down)
    }

    pub fn last_pressed(&self) -> u8 {
        self.last_pressed
    }
}
