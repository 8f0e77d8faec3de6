pub mod config;
pub mod consts;
pub mod display;
pub mod interpreter;
pub mod keyboard;
pub mod parser;
pub mod state;

pub use config::InterpreterConfig;
pub use display::Framebuffer;
pub use interpreter::{Interpreter, StepResult};
pub use keyboard::KeyState;
pub use parser::Instruction;
pub use state::State;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("program is too large ({size} bytes), max size is {max_size} bytes")]
    ProgramTooLarge { size: usize, max_size: usize },

    #[error("unsupported opcode {0:#06X}")]
    UnsupportedOpcode(u16),

    #[error("stack overflow on call at {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("stack underflow on return at {address:#05X}")]
    StackUnderflow { address: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
