use super::memory::RAM as Memory;
use std::fmt;
/*
 * 8085 registers
 * accumulator, B, C, D, E, H & L are 8 bits general purpose registers.
 * B:C, D:E and H:L are seen as 16 bits register pairs, H:L also being the
 * memory pointer for the M pseudo register.
 * status flags register (low byte of the program status word):
 * bit 7: Sign flag
 * bit 6: Zero flag
 * bit 5: not used
 * bit 4: Auxiliary carry flag
 * bit 3: not used
 * bit 2: Parity flag
 * bit 1: not used
 * bit 0: Carry flag
 *
 * program counter & stack pointer: 16 bits address registers, the stack
 * pointer is set at 0xffff at start.
 */
pub const STACK_INIT_ADDR: u16 = 0xffff;
pub const STATUS_MASK: u8 = 0b11010101;

/// Operand selected by a 3 bits register field, in encoding order.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Register {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Register {
    pub fn from_code(code: u8) -> Register {
        match code & 0b111 {
            0 => Register::B,
            1 => Register::C,
            2 => Register::D,
            3 => Register::E,
            4 => Register::H,
            5 => Register::L,
            6 => Register::M,
            _ => Register::A,
        }
    }

    /// source register field: bits 0-2
    pub fn source(opcode: u8) -> Register {
        Register::from_code(opcode)
    }

    /// destination register field: bits 3-5
    pub fn destination(opcode: u8) -> Register {
        Register::from_code(opcode >> 3)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Register::B => "B",
            Register::C => "C",
            Register::D => "D",
            Register::E => "E",
            Register::H => "H",
            Register::L => "L",
            Register::M => "M",
            Register::A => "A",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum RegisterPair {
    BC,
    DE,
    HL,
    SP,
    PSW,
}

impl RegisterPair {
    /// Register pair field (bits 4-5) of LXI, INX, DCX & DAD.
    pub fn from_code(opcode: u8) -> RegisterPair {
        match (opcode >> 4) & 0b11 {
            0 => RegisterPair::BC,
            1 => RegisterPair::DE,
            2 => RegisterPair::HL,
            _ => RegisterPair::SP,
        }
    }

    /// Same field for PUSH & POP where the fourth pair is the PSW.
    pub fn from_stack_code(opcode: u8) -> RegisterPair {
        match (opcode >> 4) & 0b11 {
            0 => RegisterPair::BC,
            1 => RegisterPair::DE,
            2 => RegisterPair::HL,
            _ => RegisterPair::PSW,
        }
    }

    /// Name as written in mnemonics: `LXI B`, `PUSH PSW`.
    pub fn name(&self) -> &'static str {
        match self {
            RegisterPair::BC => "B",
            RegisterPair::DE => "D",
            RegisterPair::HL => "H",
            RegisterPair::SP => "SP",
            RegisterPair::PSW => "PSW",
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Registers {
    pub accumulator: u8,
    pub register_b: u8,
    pub register_c: u8,
    pub register_d: u8,
    pub register_e: u8,
    pub register_h: u8,
    pub register_l: u8,
    status_register: u8,
    pub program_counter: u16,
    pub stack_pointer: u16,
    pub halted: bool,
}

impl Default for Registers {
    fn default() -> Self {
        Registers::new(0x0000)
    }
}

impl Registers {
    pub fn new(init_address: u16) -> Registers {
        Registers {
            accumulator: 0x00,
            register_b: 0x00,
            register_c: 0x00,
            register_d: 0x00,
            register_e: 0x00,
            register_h: 0x00,
            register_l: 0x00,
            status_register: 0x00,
            program_counter: init_address,
            stack_pointer: STACK_INIT_ADDR,
            halted: false,
        }
    }

    pub fn initialize(&mut self, init_address: u16) {
        *self = Registers::new(init_address);
    }

    /*
     * register selection
     * M is the memory cell pointed by HL, every other code is a register.
     */
    pub fn read_register(&self, register: Register, memory: &Memory) -> u8 {
        match register {
            Register::B => self.register_b,
            Register::C => self.register_c,
            Register::D => self.register_d,
            Register::E => self.register_e,
            Register::H => self.register_h,
            Register::L => self.register_l,
            Register::M => memory.peek(self.get_pair(RegisterPair::HL)),
            Register::A => self.accumulator,
        }
    }

    pub fn write_register(&mut self, register: Register, memory: &mut Memory, value: u8) {
        match register {
            Register::B => self.register_b = value,
            Register::C => self.register_c = value,
            Register::D => self.register_d = value,
            Register::E => self.register_e = value,
            Register::H => self.register_h = value,
            Register::L => self.register_l = value,
            Register::M => memory.poke(self.get_pair(RegisterPair::HL), value),
            Register::A => self.accumulator = value,
        }
    }

    pub fn get_pair(&self, pair: RegisterPair) -> u16 {
        let (high, low) = match pair {
            RegisterPair::BC => (self.register_b, self.register_c),
            RegisterPair::DE => (self.register_d, self.register_e),
            RegisterPair::HL => (self.register_h, self.register_l),
            RegisterPair::SP => return self.stack_pointer,
            RegisterPair::PSW => (self.accumulator, self.status_register),
        };

        u16::from_be_bytes([high, low])
    }

    pub fn set_pair(&mut self, pair: RegisterPair, value: u16) {
        let [high, low] = value.to_be_bytes();

        match pair {
            RegisterPair::BC => {
                self.register_b = high;
                self.register_c = low;
            }
            RegisterPair::DE => {
                self.register_d = high;
                self.register_e = low;
            }
            RegisterPair::HL => {
                self.register_h = high;
                self.register_l = low;
            }
            RegisterPair::SP => self.stack_pointer = value,
            RegisterPair::PSW => {
                self.accumulator = high;
                self.set_status_register(low);
            }
        }
    }

    /*
     * stack
     * The stack grows downward, the high byte lands at the higher address.
     */
    pub fn stack_push(&mut self, memory: &mut Memory, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
        memory.poke(self.stack_pointer, high);
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
        memory.poke(self.stack_pointer, low);
    }

    pub fn stack_pull(&mut self, memory: &Memory) -> u16 {
        let low = memory.peek(self.stack_pointer);
        self.stack_pointer = self.stack_pointer.wrapping_add(1);
        let high = memory.peek(self.stack_pointer);
        self.stack_pointer = self.stack_pointer.wrapping_add(1);

        u16::from_be_bytes([high, low])
    }

    /// Sign, zero and parity flags after a result. Carry and auxiliary carry
    /// are left to the caller.
    pub fn update_szp(&mut self, result: u8) {
        self.set_s_flag(result & 0x80 != 0);
        self.set_z_flag(result == 0);
        self.set_p_flag(result.count_ones() % 2 == 0);
    }

    pub fn get_status_register(&self) -> u8 {
        self.status_register
    }

    /// Unused bits are never stored.
    pub fn set_status_register(&mut self, value: u8) {
        self.status_register = value & STATUS_MASK;
    }

    pub fn s_flag_is_set(&self) -> bool {
        self.status_register & 0b10000000 == 0b10000000
    }

    pub fn z_flag_is_set(&self) -> bool {
        self.status_register & 0b01000000 == 0b01000000
    }

    pub fn ac_flag_is_set(&self) -> bool {
        self.status_register & 0b00010000 == 0b00010000
    }

    pub fn p_flag_is_set(&self) -> bool {
        self.status_register & 0b00000100 == 0b00000100
    }

    pub fn cy_flag_is_set(&self) -> bool {
        self.status_register & 0b00000001 == 0b00000001
    }

    pub fn set_s_flag(&mut self, flag: bool) {
        if flag {
            self.status_register |= 0b10000000;
        } else {
            self.status_register &= 0b01111111;
        }
    }

    pub fn set_z_flag(&mut self, flag: bool) {
        if flag {
            self.status_register |= 0b01000000;
        } else {
            self.status_register &= 0b10111111;
        }
    }

    pub fn set_ac_flag(&mut self, flag: bool) {
        if flag {
            self.status_register |= 0b00010000;
        } else {
            self.status_register &= 0b11101111;
        }
    }

    pub fn set_p_flag(&mut self, flag: bool) {
        if flag {
            self.status_register |= 0b00000100;
        } else {
            self.status_register &= 0b11111011;
        }
    }

    pub fn set_cy_flag(&mut self, flag: bool) {
        if flag {
            self.status_register |= 0b00000001;
        } else {
            self.status_register &= 0b11111110;
        }
    }

    pub fn format_status(&self) -> String {
        format!(
            "{}{}-{}-{}-{}",
            if self.s_flag_is_set() { "S" } else { "s" },
            if self.z_flag_is_set() { "Z" } else { "z" },
            if self.ac_flag_is_set() { "A" } else { "a" },
            if self.p_flag_is_set() { "P" } else { "p" },
            if self.cy_flag_is_set() { "C" } else { "c" },
        )
    }
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Registers [A:0x{:02x}, B:0x{:02x}, C:0x{:02x}, D:0x{:02x}, E:0x{:02x}, H:0x{:02x}, L:0x{:02x} | SP:0x{:04x} PC:0x{:04x} | {}]{}",
            self.accumulator,
            self.register_b,
            self.register_c,
            self.register_d,
            self.register_e,
            self.register_h,
            self.register_l,
            self.stack_pointer,
            self.program_counter,
            self.format_status(),
            if self.halted { " HALTED" } else { "" },
        )
    }
}
