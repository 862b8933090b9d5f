#[test]
fn read_program() {
    use soft8085_lib::{disassemble, AddressableIO, Memory};

    let start: u16 = 0x0800;
    let mut memory = Memory::new();
    memory
        .write(
            start as usize,
            &[
                0x3e, 0x05, 0x21, 0x00, 0x20, 0x77, 0xcd, 0x00, 0x09, 0xfe, 0x10, 0xc2, 0x00,
                0x08, 0xdd, 0x76,
            ],
        )
        .unwrap();
    let expected_output: Vec<&str> = vec![
        "#0x0800: (3e 05)    MVI A    #05",
        "#0x0802: (21 00 20) LXI H    #2000",
        "#0x0805: (77)       MOV M,A",
        "#0x0806: (cd 00 09) CALL     #0900",
        "#0x0809: (fe 10)    CPI      #10",
        "#0x080B: (c2 00 08) JNZ      #0800",
        "#0x080E: (dd)       UNKNOWN",
        "#0x080F: (76)       HLT",
    ];
    let output = disassemble(start, expected_output.len(), &memory);

    assert_eq!(expected_output.len(), output.len());
    output.iter().enumerate().for_each(|(i, line)| {
        assert_eq!(expected_output[i], line.to_string().trim_end())
    });
}

#[test]
fn describe_agrees_with_execution() {
    use soft8085_lib::{describe, execute_step, operand_width, Memory, Registers};

    // every opcode with its operand bytes, the processor must land right
    // after the bytes the disassembler shows
    for opcode in 0..=0xffu8 {
        let mut memory = Memory::new();
        memory.poke(0x4000, opcode);
        memory.poke(0x4001, 0x00);
        memory.poke(0x4002, 0x40);
        let mut registers = Registers::new(0x4000);
        let (_, operand_text) = describe(opcode, &memory, 0x4000);
        let shown_bytes = match operand_text.len() {
            0 => 0,
            3 => 1,
            _ => 2,
        };
        assert_eq!(operand_width(opcode), shown_bytes, "opcode 0x{opcode:02X}");

        let log_line = execute_step(&mut registers, &mut memory);
        assert_eq!(operand_width(opcode), log_line.operand.len());
    }
}

#[test]
fn machine_code() {
    use soft8085_lib::{resolve_opcode, AddressableIO, Memory};

    let mut memory = Memory::new();
    memory.write(0x0000, &[0x3e, 0x05, 0x32, 0x50, 0x20]).unwrap();

    assert_eq!("3E 05", resolve_opcode(0x0000, &memory).machine_code());
    assert_eq!("32 50 20", resolve_opcode(0x0002, &memory).machine_code());
}
