use crate::config::InterpreterConfig;
use crate::consts::{FONT_BASE, FONT_GLYPH_SIZE, INITIAL_PC, MAX_PROGRAM_SIZE};
use crate::display::Framebuffer;
use crate::keyboard::KeyState;
use crate::parser::Instruction;
use crate::state::State;
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Outcome of a single [`Interpreter::advance_cycle`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Executed(Instruction),
    /// `FX0A` found no key held; the same instruction runs again next cycle.
    WaitingForKey,
    /// The instruction was skipped and execution continues after it.
    Fault(Error),
}

pub struct Interpreter {
    state: State,
    rng: StdRng,
    config: InterpreterConfig,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> Self {
        let mut interpreter = Interpreter {
            state: State::new(),
            rng: seed_rng(&config),
            config,
        };
        interpreter.reset();
        interpreter
    }

    /// Discards all state: memory, registers, stack, timers, screen and keys.
    ///
    /// The program has to be loaded again afterwards.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.rng = seed_rng(&self.config);
        log::debug!("interpreter reset");
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }

        let start = INITIAL_PC as usize;
        let end = start + program.len();
        self.state.ram[start..end].copy_from_slice(program);
        log::debug!("loaded {} byte program at {start:#05X}", program.len());
        Ok(())
    }

    /// Executes one instruction. Faults are logged and reported, never fatal.
    pub fn advance_cycle(&mut self) -> StepResult {
        let instruction_address = self.state.pc;
        let opcode = self.state.fetch();

        // Increment program counter by 2
        self.state.pc = instruction_address.wrapping_add(2);

        let step = Instruction::from_opcode(opcode)
            .and_then(|instruction| {
                log::trace!("{instruction_address:#05X}: {opcode:04X} {instruction:?}");
                self.execute(instruction_address, instruction)
            })
            .unwrap_or_else(StepResult::Fault);

        if let StepResult::Fault(err) = &step {
            log::warn!("{err} (pc {instruction_address:#05X})");
        }
        step
    }

    /// Decrements the delay and sound timers, meant to run at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// Runs one host frame: `cycles_per_frame` instructions, then one timer tick.
    ///
    /// Returns the number of faulted instructions.
    pub fn run_frame(&mut self) -> usize {
        let mut faults = 0;
        for _ in 0..self.config.cycles_per_frame {
            if let StepResult::Fault(_) = self.advance_cycle() {
                faults += 1;
            }
        }
        self.tick_timers();
        faults
    }

    pub fn set_key_state(&mut self, keys: KeyState) {
        self.state.keys = keys;
    }

    pub fn framebuffer_view(&self) -> &Framebuffer {
        &self.state.framebuffer
    }

    pub fn is_beeping(&self) -> bool {
        self.state.is_beeping()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    fn execute(
        &mut self,
        instruction_address: u16,
        instruction: Instruction,
    ) -> Result<StepResult> {
        match instruction {
            Instruction::MachineRoutine(_) => {}
            Instruction::ClearScreen => {
                self.state.framebuffer.clear();
            }
            Instruction::ReturnFromSubroutine => {
                let return_address = self.state.pop().ok_or(Error::StackUnderflow {
                    address: instruction_address,
                })?;
                self.state.pc = return_address.wrapping_add(2);
            }
            Instruction::Jump(address) => {
                self.state.pc = address;
            }
            Instruction::Call(address) => {
                if !self.state.push(instruction_address) {
                    return Err(Error::StackOverflow {
                        address: instruction_address,
                    });
                }
                self.state.pc = address;
            }
            Instruction::SkipIfEqualByte(register, value) => {
                if self.state.register(register) == value {
                    self.skip();
                }
            }
            Instruction::SkipIfNotEqualByte(register, value) => {
                if self.state.register(register) != value {
                    self.skip();
                }
            }
            Instruction::SkipIfRegistersEqual(register_x, register_y) => {
                if self.state.register(register_x) == self.state.register(register_y) {
                    self.skip();
                }
            }
            Instruction::SetRegisterToValue(register, value) => {
                *self.state.register_mut(register) = value;
            }
            Instruction::AddToRegister(register, value) => {
                let sum = self.state.register(register).wrapping_add(value);
                *self.state.register_mut(register) = sum;
            }
            Instruction::SetRegisterToRegisterValue(register_x, register_y) => {
                *self.state.register_mut(register_x) = self.state.register(register_y);
            }
            Instruction::RegistersBitwiseOr(register_x, register_y) => {
                let vy = self.state.register(register_y);
                *self.state.register_mut(register_x) |= vy;
            }
            Instruction::RegistersBitwiseAnd(register_x, register_y) => {
                let vy = self.state.register(register_y);
                *self.state.register_mut(register_x) &= vy;
            }
            Instruction::RegistersBitwiseXor(register_x, register_y) => {
                let vy = self.state.register(register_y);
                *self.state.register_mut(register_x) ^= vy;
            }
            Instruction::RegistersSumWithOverflow(register_x, register_y) => {
                let vx = self.state.register(register_x);
                let vy = self.state.register(register_y);

                let (sum, overflow) = vx.overflowing_add(vy);
                *self.state.register_mut(register_x) = sum;
                self.state.set_flag(overflow);
            }
            Instruction::SubtractRegisterFromRegisterValue(register_x, register_y) => {
                let vx = self.state.register(register_x);
                let vy = self.state.register(register_y);

                *self.state.register_mut(register_x) = vx.wrapping_sub(vy);
                self.state.set_flag(vy <= vx);
            }
            Instruction::ShiftRegisterBitsRight(register) => {
                let vx = self.state.register(register);
                self.state.set_flag(vx & 1 == 1);
                *self.state.register_mut(register) >>= 1;
            }
            Instruction::SubtractRegisterValueFromRegister(register_x, register_y) => {
                let vx = self.state.register(register_x);
                let vy = self.state.register(register_y);

                *self.state.register_mut(register_x) = vy.wrapping_sub(vx);
                self.state.set_flag(vx <= vy);
            }
            Instruction::ShiftRegisterBitsLeft(register) => {
                let vx = self.state.register(register);
                self.state.set_flag(vx >> 7 == 1);
                *self.state.register_mut(register) <<= 1;
            }
            Instruction::SkipIfRegistersNotEqual(register_x, register_y) => {
                if self.state.register(register_x) != self.state.register(register_y) {
                    self.skip();
                }
            }
            Instruction::SetIndexRegisterToValue(value) => {
                self.state.index_register = value;
            }
            Instruction::JumpByValue(value) => {
                self.state.pc = value.wrapping_add(self.state.register(0) as u16);
            }
            Instruction::SetRegisterToRandAndValue(register, value) => {
                let n: u8 = self.rng.random();
                *self.state.register_mut(register) = n & value;
            }
            Instruction::DrawSprite(register_x, register_y, rows) => {
                let x = self.state.register(register_x);
                let y = self.state.register(register_y);
                self.state.set_flag(false);

                let mut sprite = [0u8; 15];
                let rows = rows as usize;
                for (offset, row) in sprite.iter_mut().take(rows).enumerate() {
                    *row = self
                        .state
                        .read_memory(self.state.index_register.wrapping_add(offset as u16));
                }

                let collided = self.state.framebuffer.draw(x, y, &sprite[..rows]);
                self.state.set_flag(collided);
            }
            Instruction::SkipIfKeyPressed(register) => {
                if self.state.keys.is_pressed(self.state.register(register)) {
                    self.skip();
                }
            }
            Instruction::SkipIfKeyNotPressed(register) => {
                if !self.state.keys.is_pressed(self.state.register(register)) {
                    self.skip();
                }
            }
            Instruction::SetRegisterToDelayTimerValue(register) => {
                *self.state.register_mut(register) = self.state.delay_timer;
            }
            Instruction::WaitForKeyPress(register) => {
                if !self.state.keys.any_pressed() {
                    self.state.pc = instruction_address;
                    return Ok(StepResult::WaitingForKey);
                }
                *self.state.register_mut(register) = self.state.keys.last_pressed();
            }
            Instruction::SetDelayTimerToRegisterValue(register) => {
                self.state.delay_timer = self.state.register(register);
            }
            Instruction::SetSoundTimerToRegisterValue(register) => {
                self.state.sound_timer = self.state.register(register);
            }
            Instruction::AddRegisterToIndexRegister(register) => {
                self.state.index_register = self
                    .state
                    .index_register
                    .wrapping_add(self.state.register(register) as u16);
            }
            Instruction::SetIndexRegisterToSpriteForRegister(register) => {
                let character = self.state.register(register) as u16;
                self.state.index_register = FONT_BASE + character * FONT_GLYPH_SIZE;
            }
            Instruction::StoreBinaryCodedDecimalAtIndexRegisterValue(register) => {
                let num = self.state.register(register);
                let i = self.state.index_register;
                self.state.write_memory(i, num / 100);
                self.state.write_memory(i.wrapping_add(1), (num / 10) % 10);
                self.state.write_memory(i.wrapping_add(2), num % 10);
            }
            Instruction::DumpRegistersToMemoryAtIndexRegister(register) => {
                for ri in 0..=register {
                    let address = self.state.index_register.wrapping_add(ri as u16);
                    self.state.write_memory(address, self.state.register(ri));
                }
            }
            Instruction::LoadMemoryToRegistersAtIndexRegister(register) => {
                for ri in 0..=register {
                    let address = self.state.index_register.wrapping_add(ri as u16);
                    *self.state.register_mut(ri) = self.state.read_memory(address);
                }
            }
        }

        Ok(StepResult::Executed(instruction))
    }

    fn skip(&mut self) {
        self.state.pc = self.state.pc.wrapping_add(2);
    }
}

fn seed_rng(config: &InterpreterConfig) -> StdRng {
    match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
