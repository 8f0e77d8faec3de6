use crate::consts::{SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};

use std::fmt;

/// 64x32 monochrome pixel grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [bool; SCREEN_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            cells: [false; SCREEN_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [false; SCREEN_SIZE];
    }

    /// XORs `sprite` onto the grid with its top-left corner at (`reg_x`, `reg_y`).
    ///
    /// Both axes wrap around the screen edges. Returns `true` if any lit pixel
    /// was switched off.
    pub fn draw(&mut self, reg_x: u8, reg_y: u8, sprite: &[u8]) -> bool {
        let mut did_switch = false;

        for (yo, data) in sprite.iter().enumerate() {
            let row = (reg_y as usize + yo) % SCREEN_HEIGHT as usize;

            for (xo, bit) in byte_to_bits(*data).iter().enumerate() {
                if *bit == 0 {
                    continue;
                }

                let col = (reg_x as usize + xo) % SCREEN_WIDTH as usize;
                let cell = &mut self.cells[row * SCREEN_WIDTH as usize + col];
                if *cell {
                    did_switch = true;
                }
                *cell = !*cell;
            }
        }
        did_switch
    }

    /// Pixel at column `x`, row `y`. Out-of-range coordinates read as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= SCREEN_WIDTH as usize || y >= SCREEN_HEIGHT as usize {
            return false;
        }
        self.cells[y * SCREEN_WIDTH as usize + x]
    }

    pub fn cells(&self) -> &[bool; SCREEN_SIZE] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(SCREEN_WIDTH as usize)
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &pixel in row {
                f.write_str(if pixel { "█" } else { "░" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Bits as 0 or 1 u8 from the most to least significant
fn byte_to_bits(b: u8) -> [u8; 8] {
    std::array::from_fn(|i| (b >> (7 - i)) & 1)
}
