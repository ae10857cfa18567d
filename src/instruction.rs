//! The closed instruction set and the filtered program built from raw source.

use std::fmt;

/// One of the eight Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `,`
    Read,
    /// `.`
    Write,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Instruction {
    /// Map a source character to its instruction. Anything else is commentary.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '>' => Instruction::MoveRight,
            '<' => Instruction::MoveLeft,
            ',' => Instruction::Read,
            '.' => Instruction::Write,
            '[' => Instruction::LoopStart,
            ']' => Instruction::LoopEnd,
            _ => return None,
        })
    }

    /// The source symbol for this instruction.
    pub fn as_char(self) -> char {
        match self {
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Read => ',',
            Instruction::Write => '.',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A program with every non-instruction character removed.
///
/// Each instruction remembers the character offset it came from so that
/// runtime errors can point back into the original source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
    positions: Vec<usize>,
}

impl Program {
    pub fn parse(source: &str) -> Self {
        let mut program = Program::default();
        for (pos, c) in source.chars().enumerate() {
            if let Some(instr) = Instruction::from_char(c) {
                program.instructions.push(instr);
                program.positions.push(pos);
            }
        }
        program
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, ip: usize) -> Option<Instruction> {
        self.instructions.get(ip).copied()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Character offset in the raw source of the instruction at `ip`.
    pub fn source_position(&self, ip: usize) -> Option<usize> {
        self.positions.get(ip).copied()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instr in &self.instructions {
            write!(f, "{instr}")?;
        }
        Ok(())
    }
}
