use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0NNN - legacy machine-code routine, ignored
    MachineRoutine(u16),
    /// 00E0 - clear screen
    ClearScreen,
    /// 00EE - return from subroutine
    ReturnFromSubroutine,
    /// 1NNN - jump to NNN
    Jump(u16),
    /// 2NNN - call subroutine at NNN
    Call(u16),
    /// 3XNN - skip next if VX equals NN
    SkipIfEqualByte(usize, u8),
    /// 4XNN - skip next if VX does not equal NN
    SkipIfNotEqualByte(usize, u8),
    /// 5XY0 - skip next if VX equals VY
    SkipIfRegistersEqual(usize, usize),
    /// 6XNN - set VX to NN
    SetRegisterToValue(usize, u8),
    /// 7XNN - add NN to VX
    AddToRegister(usize, u8),
    /// 8XY0 - set VX to value of VY
    SetRegisterToRegisterValue(usize, usize),
    /// 8XY1 - set VX | VY
    RegistersBitwiseOr(usize, usize),
    /// 8XY2 - set VX & VY
    RegistersBitwiseAnd(usize, usize),
    /// 8XY3 - set VX ^ VY
    RegistersBitwiseXor(usize, usize),
    /// 8XY4 - add VY to VX (with VF as overflow control)
    RegistersSumWithOverflow(usize, usize),
    /// 8XY5 - VX = VX - VY (VF cleared on borrow)
    SubtractRegisterFromRegisterValue(usize, usize),
    /// 8XY6 - VX >>= 1, LSB stored in VF
    ShiftRegisterBitsRight(usize),
    /// 8XY7 - VX = VY - VX (VF cleared on borrow)
    SubtractRegisterValueFromRegister(usize, usize),
    /// 8XYE - VX <<= 1, MSB stored in VF
    ShiftRegisterBitsLeft(usize),
    /// 9XY0 - skip next if VX does not equal VY
    SkipIfRegistersNotEqual(usize, usize),
    /// ANNN - set I to NNN
    SetIndexRegisterToValue(u16),
    /// BNNN - jump to V0 + NNN
    JumpByValue(u16),
    /// CXNN - set VX to rand(0, 255) & NN
    SetRegisterToRandAndValue(usize, u8),
    /// DXYN - draw a sprite
    DrawSprite(usize, usize, u8),
    /// EX9E - skip next if key VX is pressed
    SkipIfKeyPressed(usize),
    /// EXA1 - skip next if key VX is not pressed
    SkipIfKeyNotPressed(usize),
    /// FX07 - set VX to delay timer value
    SetRegisterToDelayTimerValue(usize),
    /// FX0A - wait for a key press, store it in VX
    WaitForKeyPress(usize),
    /// FX15 - set delay timer to VX
    SetDelayTimerToRegisterValue(usize),
    /// FX18 - set sound timer to VX
    SetSoundTimerToRegisterValue(usize),
    /// FX1E - add VX to I (don't consider overflow)
    AddRegisterToIndexRegister(usize),
    /// FX29 - set I to location of sprite for character in VX
    SetIndexRegisterToSpriteForRegister(usize),
    /// FX33 - store binary coded decimal at memory under I(I+1)(I+2)
    StoreBinaryCodedDecimalAtIndexRegisterValue(usize),
    /// FX55 - dump registers V0 to VX in memory, starting from I
    DumpRegistersToMemoryAtIndexRegister(usize),
    /// FX65 - load memory starting from I into V0 to VX
    LoadMemoryToRegistersAtIndexRegister(usize),
}

impl Instruction {
    pub fn from_opcode(opcode: u16) -> Result<Self> {
        let n1 = ((opcode >> 12) & 0xF) as usize;
        let x = ((opcode >> 8) & 0xF) as usize;
        let y = ((opcode >> 4) & 0xF) as usize;
        let n = (opcode & 0xF) as u8;
        let byte_value = (opcode & 0x00FF) as u8;
        let address = opcode & 0x0FFF;

        let instruction = match n1 {
            0x0 => match byte_value {
                0x00 => Instruction::MachineRoutine(address),
                0xE0 => Instruction::ClearScreen,
                0xEE => Instruction::ReturnFromSubroutine,
                _ => return Err(Error::UnsupportedOpcode(opcode)),
            },
            0x1 => Instruction::Jump(address),
            0x2 => Instruction::Call(address),
            0x3 => Instruction::SkipIfEqualByte(x, byte_value),
            0x4 => Instruction::SkipIfNotEqualByte(x, byte_value),
            0x5 => Instruction::SkipIfRegistersEqual(x, y),
            0x6 => Instruction::SetRegisterToValue(x, byte_value),
            0x7 => Instruction::AddToRegister(x, byte_value),
            0x8 => match n {
                0x0 => Instruction::SetRegisterToRegisterValue(x, y),
                0x1 => Instruction::RegistersBitwiseOr(x, y),
                0x2 => Instruction::RegistersBitwiseAnd(x, y),
                0x3 => Instruction::RegistersBitwiseXor(x, y),
                0x4 => Instruction::RegistersSumWithOverflow(x, y),
                0x5 => Instruction::SubtractRegisterFromRegisterValue(x, y),
                0x6 => Instruction::ShiftRegisterBitsRight(x),
                0x7 => Instruction::SubtractRegisterValueFromRegister(x, y),
                0xE => Instruction::ShiftRegisterBitsLeft(x),
                _ => return Err(Error::UnsupportedOpcode(opcode)),
            },
            0x9 => Instruction::SkipIfRegistersNotEqual(x, y),
            0xA => Instruction::SetIndexRegisterToValue(address),
            0xB => Instruction::JumpByValue(address),
            0xC => Instruction::SetRegisterToRandAndValue(x, byte_value),
            0xD => Instruction::DrawSprite(x, y, n),
            0xE => match byte_value {
                0x9E => Instruction::SkipIfKeyPressed(x),
                0xA1 => Instruction::SkipIfKeyNotPressed(x),
                _ => return Err(Error::UnsupportedOpcode(opcode)),
            },
            0xF => match byte_value {
                0x07 => Instruction::SetRegisterToDelayTimerValue(x),
                0x0A => Instruction::WaitForKeyPress(x),
                0x15 => Instruction::SetDelayTimerToRegisterValue(x),
                0x18 => Instruction::SetSoundTimerToRegisterValue(x),
                0x1E => Instruction::AddRegisterToIndexRegister(x),
                0x29 => Instruction::SetIndexRegisterToSpriteForRegister(x),
                0x33 => Instruction::StoreBinaryCodedDecimalAtIndexRegisterValue(x),
                0x55 => Instruction::DumpRegistersToMemoryAtIndexRegister(x),
                0x65 => Instruction::LoadMemoryToRegistersAtIndexRegister(x),
                _ => return Err(Error::UnsupportedOpcode(opcode)),
            },
            _ => return Err(Error::UnsupportedOpcode(opcode)),
        };

        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_family_zero_on_low_byte() {
        assert_eq!(Instruction::from_opcode(0x00E0), Ok(Instruction::ClearScreen));
        assert_eq!(
            Instruction::from_opcode(0x00EE),
            Ok(Instruction::ReturnFromSubroutine)
        );
        assert_eq!(
            Instruction::from_opcode(0x0300),
            Ok(Instruction::MachineRoutine(0x300))
        );
        assert_eq!(
            Instruction::from_opcode(0x00E1),
            Err(Error::UnsupportedOpcode(0x00E1))
        );
    }

    #[test]
    fn decodes_operands() {
        assert_eq!(Instruction::from_opcode(0x1ABC), Ok(Instruction::Jump(0xABC)));
        assert_eq!(Instruction::from_opcode(0x2ABC), Ok(Instruction::Call(0xABC)));
        assert_eq!(
            Instruction::from_opcode(0x3A42),
            Ok(Instruction::SkipIfEqualByte(0xA, 0x42))
        );
        assert_eq!(
            Instruction::from_opcode(0xD12F),
            Ok(Instruction::DrawSprite(1, 2, 0xF))
        );
        assert_eq!(
            Instruction::from_opcode(0xC7FF),
            Ok(Instruction::SetRegisterToRandAndValue(7, 0xFF))
        );
    }

    #[test]
    fn family_eight_uses_low_nibble() {
        assert_eq!(
            Instruction::from_opcode(0x8AB4),
            Ok(Instruction::RegistersSumWithOverflow(0xA, 0xB))
        );
        assert_eq!(
            Instruction::from_opcode(0x8ABE),
            Ok(Instruction::ShiftRegisterBitsLeft(0xA))
        );
        for unknown in [0x8008, 0x8009, 0x800A, 0x800F] {
            assert_eq!(
                Instruction::from_opcode(unknown),
                Err(Error::UnsupportedOpcode(unknown))
            );
        }
    }

    #[test]
    fn register_compare_families_ignore_low_nibble() {
        assert_eq!(
            Instruction::from_opcode(0x5121),
            Ok(Instruction::SkipIfRegistersEqual(1, 2))
        );
        assert_eq!(
            Instruction::from_opcode(0x912F),
            Ok(Instruction::SkipIfRegistersNotEqual(1, 2))
        );
    }

    #[test]
    fn decodes_input_and_misc_families() {
        assert_eq!(
            Instruction::from_opcode(0xE39E),
            Ok(Instruction::SkipIfKeyPressed(3))
        );
        assert_eq!(
            Instruction::from_opcode(0xE3A1),
            Ok(Instruction::SkipIfKeyNotPressed(3))
        );
        assert_eq!(
            Instruction::from_opcode(0xF50A),
            Ok(Instruction::WaitForKeyPress(5))
        );
        assert_eq!(
            Instruction::from_opcode(0xE300),
            Err(Error::UnsupportedOpcode(0xE300))
        );
        assert_eq!(
            Instruction::from_opcode(0xF0FF),
            Err(Error::UnsupportedOpcode(0xF0FF))
        );
    }
}
