use anyhow::anyhow;
use pest::{
    iterators::{Pair, Pairs},
    Parser,
};
use pest_derive::Parser;

use crate::{
    commands::*,
    until_condition::{Assignment, BooleanExpression, FlagSource, RegisterSource, Source},
    AppResult,
};

#[derive(Parser)]
#[grammar = "../rules.pest"]
struct PestParser;

pub struct MemoryCommandParser;

impl MemoryCommandParser {
    pub fn from_pairs(mut pairs: Pairs<'_, Rule>) -> AppResult<MemoryCommand> {
        let pair = pairs
            .next()
            .expect("memory instruction shall be followed by write or show");

        let command = match pair.as_rule() {
            Rule::memory_write => {
                let mut pairs = pair.into_inner();
                let address = parse_memory(
                    &pairs
                        .next()
                        .expect("there shall be a memory address argument to memory write")
                        .as_str()[3..],
                )?;
                let bytes = parse_bytes(
                    pairs
                        .next()
                        .expect("There shall be some bytes to write to memory.")
                        .as_str(),
                )?;
                MemoryCommand::Write { address, bytes }
            }
            Rule::memory_show => {
                let mut pairs = pair.into_inner();
                let address = parse_memory(
                    &pairs
                        .next()
                        .expect("there shall be a memory address argument to memory show")
                        .as_str()[3..],
                )?;
                let lines = parse_size(
                    pairs
                        .next()
                        .expect("there shall be a line count to memory show")
                        .as_str(),
                )?;
                MemoryCommand::Show { address, lines }
            }
            _ => {
                panic!("Unexpected pair '{pair:?}'. memory_{{write,show}} expected.");
            }
        };

        Ok(command)
    }
}


pub struct RegisterCommandParser;

impl RegisterCommandParser {
    pub fn from_pairs(mut pairs: Pairs<'_, Rule>) -> AppResult<RegisterCommand> {
        let pair = pairs
            .next()
            .expect("registers instruction shall be followed by show or set");

        let command = match pair.as_rule() {
            Rule::registers_show => RegisterCommand::Show,
            Rule::registers_set => {
                let mut pairs = pair.into_inner();
                let destination = parse_register(
                    &pairs
                        .next()
                        .expect("there shall be a register to assign"),
                );
                let value = parse_memory(
                    &pairs
                        .next()
                        .expect("there shall be a value to assign")
                        .as_str()[2..],
                )?;
                RegisterCommand::Set(Assignment::new(value, destination))
            }
            _ => {
                panic!("Unexpected rule '{}', register rule was expected.", pair);
            }
        };

        Ok(command)
    }
}


pub struct RunCommandParser;

impl RunCommandParser {
    pub fn from_pairs(pairs: Pairs<'_, Rule>) -> AppResult<RunCommand> {
        let mut start_address = None;
        let mut stop_condition = None;

        for pair in pairs {
            match pair.as_rule() {
                Rule::memory_address => {
                    start_address = Some(parse_memory(&pair.as_str()[3..])?);
                }
                Rule::run_until_condition => {
                    stop_condition = Some(parse_boolean_condition(
                        pair.into_inner()
                            .next()
                            .expect("until shall be followed by a condition")
                            .into_inner(),
                    )?);
                }
                stmt => panic!("unknown node type {stmt:?}. Is the Pest grammar up to date?"),
            }
        }

        Ok(RunCommand {
            stop_condition,
            start_address,
            max_steps: DEFAULT_MAX_STEPS,
        })
    }
}

#[cfg(test)]
mod run_command_parser_tests {
    use super::*;

    #[test]
    fn simple_run() {
        let input = "run";
        let pairs = PestParser::parse(Rule::run_instruction, input)
            .unwrap()
            .next()
            .unwrap()
            .into_inner();
        let command = RunCommandParser::from_pairs(pairs).unwrap();

        assert!(command.stop_condition.is_none());
        assert!(command.start_address.is_none());
        assert_eq!(DEFAULT_MAX_STEPS, command.max_steps);
    }

    #[test]
    fn run_with_start_address() {
        let input = "run #0x1234";
        let mut parser = PestParser::parse(Rule::run_instruction, input).unwrap();
        let command = RunCommandParser::from_pairs(parser.next().unwrap().into_inner()).unwrap();

        assert!(command.stop_condition.is_none());
        assert!(matches!(command.start_address, Some(addr) if addr == 0x1234));
    }

    #[test]
    fn run_with_stop_condition() {
        let input = "run until A > 0x12";
        let mut parser = PestParser::parse(Rule::run_instruction, input).unwrap();
        let command = RunCommandParser::from_pairs(parser.next().unwrap().into_inner()).unwrap();

        if let Some(BooleanExpression::StrictlyGreater(lt, rt)) = command.stop_condition {
            assert!(matches!(lt, Source::Register(RegisterSource::Accumulator)));
            assert!(matches!(rt, Source::Value(data) if data == 0x12));
        } else {
            panic!(
                "Expected StrictlyGreater boolean expression, got '{:?}'.",
                command.stop_condition
            );
        }
        assert!(command.start_address.is_none());
    }

    #[test]
    fn run_from_address_until_flag() {
        let input = "run #0x0800 until CY = 0x01";
        let mut parser = PestParser::parse(Rule::run_instruction, input).unwrap();
        let command = RunCommandParser::from_pairs(parser.next().unwrap().into_inner()).unwrap();

        assert!(matches!(
            command.stop_condition,
            Some(BooleanExpression::Equal(Source::Flag(FlagSource::Carry), Source::Value(1)))
        ));
        assert_eq!(Some(0x0800), command.start_address);
    }
}

pub struct AssertCommandParser;

impl AssertCommandParser {
    pub fn from_pairs(mut pairs: Pairs<'_, Rule>) -> AppResult<AssertCommand> {
        let condition = parse_boolean_condition(
            pairs
                .next()
                .expect("assert shall be followed by a condition")
                .into_inner(),
        )?;
        let comment = pairs
            .next()
            .expect("assert shall end with a description")
            .as_str()
            .to_string();
        let command = AssertCommand { comment, condition };

        Ok(command)
    }
}


pub struct CliCommandParser;

impl CliCommandParser {
    pub fn from(line: &str) -> AppResult<CliCommand> {
        let line = line.trim();

        if line.is_empty() {
            return Ok(CliCommand::None);
        }

        let pair = PestParser::parse(Rule::sentence, line)?
            .next()
            .expect("There is only one sentence per input.");

        // comments are ignored
        if pair.as_rule() == Rule::EOI {
            return Ok(CliCommand::None);
        }

        let pair = pair
            .into_inner()
            .next()
            .expect("There is only one instruction per sentence.");

        let command = match pair.as_rule() {
            Rule::run_instruction => {
                CliCommand::Run(RunCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::assert_instruction => {
                CliCommand::Assert(AssertCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::marker => {
                let marker = pair
                    .into_inner()
                    .next()
                    .expect("marker shall carry a description")
                    .as_str();
                CliCommand::Marker(marker.to_owned())
            }
            Rule::registers_instruction => {
                CliCommand::Registers(RegisterCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::memory_instruction => {
                CliCommand::Memory(MemoryCommandParser::from_pairs(pair.into_inner())?)
            }
            Rule::reset_instruction => CliCommand::Reset,
            Rule::step_instruction => CliCommand::Step,
            Rule::goto_instruction => {
                let address = pair
                    .into_inner()
                    .next()
                    .expect("goto shall be followed by an address");
                CliCommand::Goto(parse_memory(&address.as_str()[3..])?)
            }
            Rule::load_instruction => {
                let mut pairs = pair.into_inner();
                let address = parse_memory(
                    &pairs
                        .next()
                        .expect("load shall be followed by an address")
                        .as_str()[3..],
                )?;
                let bytes = parse_bytes(
                    pairs
                        .next()
                        .expect("load shall carry the program bytes")
                        .as_str(),
                )?;
                CliCommand::Load { address, bytes }
            }
            Rule::disassemble_instruction => {
                let mut pairs = pair.into_inner();
                let start = parse_memory(
                    &pairs
                        .next()
                        .expect("disassemble shall be followed by an address")
                        .as_str()[3..],
                )?;
                let count = parse_size(
                    pairs
                        .next()
                        .expect("disassemble shall carry an instruction count")
                        .as_str(),
                )?;
                CliCommand::Disassemble { start, count }
            }
            _ => {
                panic!(
                    "'{}' was not expected here: 'register|memory|run|assert|reset instruction'.",
                    pair.as_str()
                );
            }
        };

        Ok(command)
    }
}


fn parse_memory(addr: &str) -> AppResult<usize> {
    if addr.is_empty() {
        return Err(anyhow!("Empty string is not a valid Hexadecimal."));
    }

    let bytes = hex::decode(addr)?;
    let mut addr: usize = 0;

    for byte in bytes.iter() {
        addr = addr << 8 | (*byte as usize);
    }

    Ok(addr)
}

fn parse_size(size: &str) -> AppResult<usize> {
    size.parse::<usize>()
        .map_err(|e| anyhow!("'{size}' is not a valid count: {e}"))
}

pub fn parse_boolean_condition(mut nodes: Pairs<Rule>) -> AppResult<BooleanExpression> {
    let node = nodes.next().expect("a condition is never empty");
    let expression = match node.as_rule() {
        Rule::boolean => BooleanExpression::Value(node.as_str() == "true"),
        Rule::operation => parse_operation(node.into_inner())?,
        smt => panic!("unknown node type '{smt:?}'. Is the Pest grammar up to date?"),
    };

    Ok(expression)
}

fn parse_operation(mut nodes: Pairs<Rule>) -> AppResult<BooleanExpression> {
    let lh = parse_source(&nodes.next().expect("operation has a left operand"))?;
    let middle_node = nodes.next().expect("operation has an operator");
    let rh = parse_source(&nodes.next().expect("operation has a right operand"))?;
    let expression = match middle_node.as_str() {
        "=" => BooleanExpression::Equal(lh, rh),
        ">=" => BooleanExpression::GreaterOrEqual(lh, rh),
        ">" => BooleanExpression::StrictlyGreater(lh, rh),
        "<=" => BooleanExpression::LesserOrEqual(lh, rh),
        "<" => BooleanExpression::StrictlyLesser(lh, rh),
        "!=" => BooleanExpression::Different(lh, rh),
        v => panic!("unknown operator {:?}", v),
    };

    Ok(expression)
}

fn parse_source(node: &Pair<Rule>) -> AppResult<Source> {
    let source = match node.as_rule() {
        Rule::register8 | Rule::register16 => Source::Register(parse_register(node)),
        Rule::flag => Source::Flag(parse_flag(node)),
        Rule::memory_address => Source::Memory(parse_memory(&node.as_str()[3..])?),
        Rule::value8 | Rule::value16 => Source::Value(parse_memory(&node.as_str()[2..])?),
        v => panic!("unexpected node '{:?}' here.", v),
    };

    Ok(source)
}

fn parse_register(node: &Pair<Rule>) -> RegisterSource {
    match node.as_str() {
        "A" => RegisterSource::Accumulator,
        "B" => RegisterSource::RegisterB,
        "C" => RegisterSource::RegisterC,
        "D" => RegisterSource::RegisterD,
        "E" => RegisterSource::RegisterE,
        "H" => RegisterSource::RegisterH,
        "L" => RegisterSource::RegisterL,
        "F" => RegisterSource::Status,
        "BC" => RegisterSource::PairBC,
        "DE" => RegisterSource::PairDE,
        "HL" => RegisterSource::PairHL,
        "SP" => RegisterSource::StackPointer,
        "PC" => RegisterSource::ProgramCounter,
        v => panic!("unknown register type '{:?}'.", v),
    }
}

fn parse_flag(node: &Pair<Rule>) -> FlagSource {
    match node.as_str() {
        "S" => FlagSource::Sign,
        "Z" => FlagSource::Zero,
        "AC" => FlagSource::AuxiliaryCarry,
        "P" => FlagSource::Parity,
        "CY" => FlagSource::Carry,
        v => panic!("unknown flag '{:?}'.", v),
    }
}

fn parse_bytes(bytes: &str) -> AppResult<Vec<u8>> {
    let mut output = Vec::new();

    for byte in bytes.split(',') {
        output.extend(hex::decode(byte.trim())?);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::until_condition::{BooleanExpression, Source};

    #[test]
    fn test_parse_boolean_condition() {
        let input = "A != 0xff";
        let node = PestParser::parse(Rule::boolean_condition, input)
            .unwrap()
            .next()
            .expect("There is one node in this input.");
        let output = parse_boolean_condition(node.into_inner()).unwrap();

        assert!(matches!(
            output,
            BooleanExpression::Different(
                Source::Register(RegisterSource::Accumulator),
                Source::Value(0xff)
            )
        ));
    }

    #[test]
    fn test_parse_sources() {
        let input = "#0x2000 <= HL";
        let node = PestParser::parse(Rule::boolean_condition, input)
            .unwrap()
            .next()
            .expect("There is one node in this input.");
        let output = parse_boolean_condition(node.into_inner()).unwrap();

        assert!(matches!(
            output,
            BooleanExpression::LesserOrEqual(
                Source::Memory(0x2000),
                Source::Register(RegisterSource::PairHL)
            )
        ));
    }

    #[test]
    fn test_parse_flag_and_register() {
        for (input, flag) in [("AC = 0x01", FlagSource::AuxiliaryCarry), ("S = 0x00", FlagSource::Sign)] {
            let node = PestParser::parse(Rule::boolean_condition, input)
                .unwrap()
                .next()
                .unwrap();
            let output = parse_boolean_condition(node.into_inner()).unwrap();

            assert!(
                matches!(output, BooleanExpression::Equal(Source::Flag(f), _) if f == flag),
                "{input}"
            );
        }

        let node = PestParser::parse(Rule::boolean_condition, "C = 0x01")
            .unwrap()
            .next()
            .unwrap();
        let output = parse_boolean_condition(node.into_inner()).unwrap();
        assert!(matches!(
            output,
            BooleanExpression::Equal(Source::Register(RegisterSource::RegisterC), _)
        ));
    }

    #[test]
    fn test_parse_memory_ok() {
        assert_eq!(0x02ff, parse_memory("02ff").unwrap());
        assert_eq!(0x0000, parse_memory("0000").unwrap());
        assert_eq!(0xea, parse_memory("ea").unwrap());
    }

    #[test]
    fn test_parse_memory_bad() {
        parse_memory("").expect_err("Empty string must yield an error.");
        parse_memory("   ").expect_err("Invisible string must yield an error.");
        parse_memory("xxx").expect_err("Non hexa must yield an error.");
    }

    #[test]
    fn test_parse_bytes() {
        assert_eq!(vec![0x3e, 0x05, 0x76], parse_bytes("3e,05, 76").unwrap());
        parse_bytes("3e,zz").expect_err("zz is not hexadecimal");
    }
}
