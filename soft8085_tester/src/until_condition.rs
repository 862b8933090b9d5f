use anyhow::anyhow;
use soft8085_lib::{Memory, RegisterPair, Registers};
use std::fmt::{self};

use crate::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSource {
    Accumulator,
    RegisterB,
    RegisterC,
    RegisterD,
    RegisterE,
    RegisterH,
    RegisterL,
    Status,
    PairBC,
    PairDE,
    PairHL,
    StackPointer,
    ProgramCounter,
}

impl RegisterSource {
    pub fn get_value(&self, registers: &Registers) -> usize {
        match self {
            Self::Accumulator => registers.accumulator as usize,
            Self::RegisterB => registers.register_b as usize,
            Self::RegisterC => registers.register_c as usize,
            Self::RegisterD => registers.register_d as usize,
            Self::RegisterE => registers.register_e as usize,
            Self::RegisterH => registers.register_h as usize,
            Self::RegisterL => registers.register_l as usize,
            Self::Status => registers.get_status_register() as usize,
            Self::PairBC => registers.get_pair(RegisterPair::BC) as usize,
            Self::PairDE => registers.get_pair(RegisterPair::DE) as usize,
            Self::PairHL => registers.get_pair(RegisterPair::HL) as usize,
            Self::StackPointer => registers.stack_pointer as usize,
            Self::ProgramCounter => registers.program_counter as usize,
        }
    }

    pub fn is_16_bits(&self) -> bool {
        matches!(
            self,
            Self::PairBC | Self::PairDE | Self::PairHL | Self::StackPointer | Self::ProgramCounter
        )
    }
}

impl fmt::Display for RegisterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Accumulator => "A",
            Self::RegisterB => "B",
            Self::RegisterC => "C",
            Self::RegisterD => "D",
            Self::RegisterE => "E",
            Self::RegisterH => "H",
            Self::RegisterL => "L",
            Self::Status => "F",
            Self::PairBC => "BC",
            Self::PairDE => "DE",
            Self::PairHL => "HL",
            Self::StackPointer => "SP",
            Self::ProgramCounter => "PC",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSource {
    Sign,
    Zero,
    AuxiliaryCarry,
    Parity,
    Carry,
}

impl FlagSource {
    pub fn get_value(&self, registers: &Registers) -> usize {
        let flag = match self {
            Self::Sign => registers.s_flag_is_set(),
            Self::Zero => registers.z_flag_is_set(),
            Self::AuxiliaryCarry => registers.ac_flag_is_set(),
            Self::Parity => registers.p_flag_is_set(),
            Self::Carry => registers.cy_flag_is_set(),
        };

        usize::from(flag)
    }
}

impl fmt::Display for FlagSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sign => "S",
            Self::Zero => "Z",
            Self::AuxiliaryCarry => "AC",
            Self::Parity => "P",
            Self::Carry => "CY",
        };

        write!(f, "{name}")
    }
}

/// `registers set` command: direct write of a value in a register.
#[derive(Debug)]
pub struct Assignment {
    pub value: usize,
    pub destination: RegisterSource,
}

impl Assignment {
    pub fn new(value: usize, destination: RegisterSource) -> Self {
        Self { value, destination }
    }

    pub fn execute(&self, registers: &mut Registers) -> AppResult<Vec<String>> {
        let destination = self.destination;

        if destination.is_16_bits() {
            let val = Self::to_u16(self.value)?;
            match destination {
                RegisterSource::PairBC => registers.set_pair(RegisterPair::BC, val),
                RegisterSource::PairDE => registers.set_pair(RegisterPair::DE, val),
                RegisterSource::PairHL => registers.set_pair(RegisterPair::HL, val),
                RegisterSource::StackPointer => registers.stack_pointer = val,
                _ => registers.program_counter = val,
            }

            return Ok(vec![format!("register {destination} set to 0x{val:04x}")]);
        }

        let val = Self::to_u8(self.value)?;
        match destination {
            RegisterSource::Accumulator => registers.accumulator = val,
            RegisterSource::RegisterB => registers.register_b = val,
            RegisterSource::RegisterC => registers.register_c = val,
            RegisterSource::RegisterD => registers.register_d = val,
            RegisterSource::RegisterE => registers.register_e = val,
            RegisterSource::RegisterH => registers.register_h = val,
            RegisterSource::RegisterL => registers.register_l = val,
            _ => registers.set_status_register(val),
        }

        Ok(vec![format!("register {destination} set to 0x{val:02x}")])
    }

    fn to_u8(val: usize) -> AppResult<u8> {
        u8::try_from(val).map_err(|_| anyhow!("Value {val} cannot fit in 8 bits destination."))
    }

    fn to_u16(val: usize) -> AppResult<u16> {
        u16::try_from(val).map_err(|_| anyhow!("Value {val} cannot fit in 16 bits destination."))
    }
}

#[cfg(test)]
mod assignment_tests {
    use super::*;

    #[test]
    fn test_to_u8() {
        assert_eq!(0, Assignment::to_u8(0).expect("0 is a valid 8 bits number"));
        assert_eq!(
            255,
            Assignment::to_u8(255).expect("255 is a valid 8 bits number")
        );
        Assignment::to_u8(256).expect_err("9 bits usize can not fit in 8 bits");
    }

    #[test]
    fn test_assign_pair() {
        let mut registers = Registers::new(0x0000);
        let output = Assignment::new(0x1234, RegisterSource::PairHL)
            .execute(&mut registers)
            .unwrap();

        assert_eq!("register HL set to 0x1234", output[0]);
        assert_eq!(0x12, registers.register_h);
        assert_eq!(0x34, registers.register_l);
    }

    #[test]
    fn test_assign_too_large() {
        let mut registers = Registers::new(0x0000);
        Assignment::new(0x1234, RegisterSource::Accumulator)
            .execute(&mut registers)
            .expect_err("a 16 bits value does not fit in the accumulator");
        assert_eq!(0x00, registers.accumulator);
    }

    #[test]
    fn test_assign_status() {
        let mut registers = Registers::new(0x0000);
        Assignment::new(0xff, RegisterSource::Status)
            .execute(&mut registers)
            .unwrap();

        assert_eq!(0xd5, registers.get_status_register());
    }
}

#[derive(Debug)]
pub enum Source {
    Register(RegisterSource),
    Flag(FlagSource),
    Memory(usize),
    Value(usize),
}

impl Source {
    pub fn get_value(&self, registers: &Registers, memory: &Memory) -> usize {
        match self {
            Self::Register(register_source) => register_source.get_value(registers),
            Self::Flag(flag_source) => flag_source.get_value(registers),
            // addresses are 4 hex digits long in the grammar
            Self::Memory(addr) => memory.peek(*addr as u16) as usize,
            Self::Value(data) => *data,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register(register_source) => write!(f, "{register_source}"),
            Self::Flag(flag_source) => write!(f, "{flag_source}"),
            Self::Memory(addr) => write!(f, "#0x{addr:04X}"),
            Self::Value(data) => write!(f, "0x{data:02X}"),
        }
    }
}

#[derive(Debug)]
pub enum BooleanExpression {
    Equal(Source, Source),
    GreaterOrEqual(Source, Source),
    StrictlyGreater(Source, Source),
    LesserOrEqual(Source, Source),
    StrictlyLesser(Source, Source),
    Different(Source, Source),
    Value(bool),
}

impl BooleanExpression {
    /// Solve the boolean expression with the given registers and memory.
    /// If the expression is true, None is returned. Otherwise, the failure message is returned.
    pub fn solve(&self, registers: &Registers, memory: &Memory) -> Option<String> {
        let (left, right, holds, relation) = match self {
            BooleanExpression::Value(true) => return None,
            BooleanExpression::Value(false) => return Some("false".to_string()),
            BooleanExpression::Equal(l, r) => (l, r, usize::eq as fn(&usize, &usize) -> bool, "equal to"),
            BooleanExpression::Different(l, r) => (l, r, usize::ne as fn(&usize, &usize) -> bool, "different from"),
            BooleanExpression::GreaterOrEqual(l, r) => (l, r, usize::ge as fn(&usize, &usize) -> bool, "greater than or equal to"),
            BooleanExpression::StrictlyGreater(l, r) => (l, r, usize::gt as fn(&usize, &usize) -> bool, "strictly greater than"),
            BooleanExpression::LesserOrEqual(l, r) => (l, r, usize::le as fn(&usize, &usize) -> bool, "lesser than or equal to"),
            BooleanExpression::StrictlyLesser(l, r) => (l, r, usize::lt as fn(&usize, &usize) -> bool, "strictly lesser than"),
        };
        let left_value = left.get_value(registers, memory);
        let right_value = right.get_value(registers, memory);

        if holds(&left_value, &right_value) {
            None
        } else {
            Some(format!(
                "({self}) 0x{:02x} is not {} 0x{:02x}",
                left_value, relation, right_value
            ))
        }
    }

    pub fn is_true(&self, registers: &Registers, memory: &Memory) -> bool {
        self.solve(registers, memory).is_none()
    }
}

impl fmt::Display for BooleanExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanExpression::Value(val) => write!(f, "{}", if *val { "true" } else { "false" }),
            BooleanExpression::Equal(lh, rh) => write!(f, "{lh} = {rh}"),
            BooleanExpression::GreaterOrEqual(lh, rh) => write!(f, "{lh} >= {rh}"),
            BooleanExpression::StrictlyGreater(lh, rh) => write!(f, "{lh} > {rh}"),
            BooleanExpression::LesserOrEqual(lh, rh) => write!(f, "{lh} <= {rh}"),
            BooleanExpression::StrictlyLesser(lh, rh) => write!(f, "{lh} < {rh}"),
            BooleanExpression::Different(lh, rh) => write!(f, "{lh} != {rh}"),
        }
    }
}
