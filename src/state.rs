use crate::consts::{
    FLAG_REGISTER, FONT_BASE, FONT_DATA, INITIAL_PC, REGISTER_COUNT, STACK_DEPTH, TOTAL_RAM_SIZE,
};
use crate::display::Framebuffer;
use crate::keyboard::KeyState;

const FONT_END: usize = FONT_BASE as usize + FONT_DATA.len();

/// Everything a running program can observe or mutate.
#[derive(Debug, Clone)]
pub struct State {
    pub ram: [u8; TOTAL_RAM_SIZE as usize],
    pub stack: [u16; STACK_DEPTH],
    pub stack_pointer: usize,
    pub pc: u16,
    pub registers: [u8; REGISTER_COUNT],
    pub index_register: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub keys: KeyState,
    pub framebuffer: Framebuffer,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    pub fn new() -> Self {
        let mut ram = [0; TOTAL_RAM_SIZE as usize];
        ram[FONT_BASE as usize..FONT_END].copy_from_slice(&FONT_DATA);
        State {
            ram,
            stack: [0; STACK_DEPTH],
            stack_pointer: 0,
            pc: INITIAL_PC,
            registers: [0; REGISTER_COUNT],
            index_register: 0,
            delay_timer: 0,
            sound_timer: 0,
            keys: KeyState::default(),
            framebuffer: Framebuffer::new(),
        }
    }

    pub fn register(&self, register: usize) -> u8 {
        self.registers[register & 0xF]
    }

    pub fn register_mut(&mut self, register: usize) -> &mut u8 {
        &mut self.registers[register & 0xF]
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.registers[FLAG_REGISTER] = flag as u8;
    }

    /// Reads memory, wrapping the address into the 4 KiB space.
    pub fn read_memory(&self, address: u16) -> u8 {
        self.ram[wrap(address)]
    }

    /// Writes memory, wrapping the address into the 4 KiB space.
    ///
    /// The font glyph area is read-only to programs; writes there are dropped.
    pub fn write_memory(&mut self, address: u16, value: u8) {
        let address = wrap(address);
        if (FONT_BASE as usize..FONT_END).contains(&address) {
            log::debug!("dropped write of {value:#04X} to font area at {address:#05X}");
            return;
        }
        self.ram[address] = value;
    }

    /// Big-endian instruction word at the program counter.
    pub fn fetch(&self) -> u16 {
        let high = self.read_memory(self.pc) as u16;
        let low = self.read_memory(self.pc.wrapping_add(1)) as u16;
        high << 8 | low
    }

    /// Returns `false` without touching the stack when it is full.
    pub fn push(&mut self, address: u16) -> bool {
        match self.stack.get_mut(self.stack_pointer) {
            Some(slot) => {
                *slot = address;
                self.stack_pointer += 1;
                true
            }
            None => false,
        }
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.stack_pointer = self.stack_pointer.checked_sub(1)?;
        Some(self.stack[self.stack_pointer])
    }

    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn is_beeping(&self) -> bool {
        self.sound_timer > 0
    }
}

fn wrap(address: u16) -> usize {
    address as usize % TOTAL_RAM_SIZE as usize
}
