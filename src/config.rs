use crate::consts::INSTRUCTIONS_PER_FRAME;

/// Construction-time settings for an [`Interpreter`](crate::Interpreter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Fixed PRNG seed applied on every reset. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
    /// Instructions executed by `run_frame` before each timer tick.
    pub cycles_per_frame: u32,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterConfig {
    pub fn new() -> Self {
        InterpreterConfig {
            rng_seed: None,
            cycles_per_frame: INSTRUCTIONS_PER_FRAME,
        }
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_cycles_per_frame(mut self, cycles: u32) -> Self {
        self.cycles_per_frame = cycles;
        self
    }
}
