use super::memory::little_endian;
use super::registers::Registers;
use std::fmt;

/// Inline data following an opcode. Word operands are stored as they sit in
/// memory: low byte first.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Operand {
    None,
    Byte([u8; 1]),
    Word([u8; 2]),
}

impl Operand {
    pub fn len(&self) -> usize {
        match self {
            Operand::None => 0,
            Operand::Byte(_) => 1,
            Operand::Word(_) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_operands(&self) -> Vec<u8> {
        match self {
            Operand::None => vec![],
            Operand::Byte(v) => vec![v[0]],
            Operand::Word(v) => vec![v[0], v[1]],
        }
    }

    pub fn byte(&self) -> u8 {
        match self {
            Operand::Byte(v) => v[0],
            _ => 0x00,
        }
    }

    pub fn word(&self) -> u16 {
        match self {
            Operand::Word(v) => little_endian(v) as u16,
            _ => 0x0000,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operand::None => String::new(),
            Operand::Byte(v) => format!("#{:02X}", v[0]),
            Operand::Word(v) => format!("#{:02X}{:02X}", v[1], v[0]),
        };

        f.pad(&text)
    }
}

/// Condition field (bits 3-5) of conditional jumps, calls and returns.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    pub fn from_code(opcode: u8) -> Condition {
        match (opcode >> 3) & 0b111 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    pub fn is_met(&self, registers: &Registers) -> bool {
        match self {
            Condition::NotZero => !registers.z_flag_is_set(),
            Condition::Zero => registers.z_flag_is_set(),
            Condition::NoCarry => !registers.cy_flag_is_set(),
            Condition::Carry => registers.cy_flag_is_set(),
            Condition::ParityOdd => !registers.p_flag_is_set(),
            Condition::ParityEven => registers.p_flag_is_set(),
            Condition::Plus => !registers.s_flag_is_set(),
            Condition::Minus => registers.s_flag_is_set(),
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NoCarry => "NC",
            Condition::Carry => "C",
            Condition::ParityOdd => "PO",
            Condition::ParityEven => "PE",
            Condition::Plus => "P",
            Condition::Minus => "M",
        }
    }
}
