use std::collections::VecDeque;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::{debug, trace, warn};

use crate::error::InterpreterError;
use crate::instruction::{Instruction, Program};
use crate::validate::{check_brackets, check_inputs};

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone)]
pub struct StepControl {
    pub max_steps: Option<u64>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<u64>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self { max_steps, cancel_flag }
    }
}

/// A Brainfuck interpreter with pre-supplied input and accumulated output.
///
/// The interpreter maintains:
/// - the filtered program and a program counter into it,
/// - a tape that starts as a single zero cell and grows to the right,
/// - a data pointer indexing into that tape,
/// - a FIFO queue of input characters and an output buffer.
///
/// A fresh interpreter is needed per execution; there is no reset.
pub struct Interpreter {
    program: Program,
    tape: Vec<u8>,
    pointer: usize,
    pc: usize,
    input: VecDeque<char>,
    output: String,
    // When set, '.' streams characters here instead of into `output`.
    output_sink: Option<Box<dyn FnMut(char) + Send>>,
}

impl Interpreter {
    /// Validate `source` against `input` and build an interpreter for it.
    ///
    /// Input sufficiency is checked first, then brackets. Both checks look at
    /// the raw source, so commentary without instruction symbols is harmless.
    pub fn new(source: &str, input: &str) -> Result<Self, InterpreterError> {
        check_inputs(source, input)?;
        check_brackets(source)?;

        let program = Program::parse(source);
        debug!(
            instructions = program.len(),
            inputs = input.chars().count(),
            "interpreter ready"
        );

        Ok(Self {
            program,
            tape: vec![0],
            pointer: 0,
            pc: 0,
            input: input.chars().collect(),
            output: String::new(),
            output_sink: None,
        })
    }

    /// Provide an output sink. When set, '.' hands each character to the sink
    /// as it is produced and the returned output stays empty.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: FnMut(char) + Send + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn program_counter(&self) -> usize {
        self.pc
    }

    /// Output produced so far. A successful run takes it, so this is only
    /// non-empty after a run aborted with an error.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Input characters not yet consumed by ','.
    pub fn remaining_input(&self) -> String {
        self.input.iter().collect()
    }

    /// Execute the program until completion and return its output.
    pub fn run(&mut self) -> Result<String, InterpreterError> {
        self.execute(false, None)
    }

    /// Run while printing a step-by-step table of operations to stdout.
    /// Program state and output evolve exactly as in [`Interpreter::run`].
    pub fn run_debug(&mut self) -> Result<String, InterpreterError> {
        self.execute(true, None)
    }

    /// Execute with cooperative cancellation and optional step limit.
    pub fn run_with_control(&mut self, step_control: StepControl) -> Result<String, InterpreterError> {
        self.execute(false, Some(&step_control))
    }

    /// Debug-run with cooperative cancellation and optional step limit.
    pub fn run_debug_with_control(&mut self, step_control: StepControl) -> Result<String, InterpreterError> {
        self.execute(true, Some(&step_control))
    }

    /// Internal executor shared by the run variants.
    fn execute(&mut self, debug: bool, step_control: Option<&StepControl>) -> Result<String, InterpreterError> {
        let mut step: u64 = 0;
        if debug {
            println!("STEP | IP  | PTR | CELL | INSTR | ACTION");
            println!("-----+-----+-----+------+-------+------------------------------------------------");
        }

        while self.pc < self.program.len() {
            if let Some(ctrl) = step_control {
                if ctrl.cancel_flag.load(Ordering::Relaxed) {
                    return Err(InterpreterError::Canceled);
                }
                if let Some(max) = ctrl.max_steps {
                    if step >= max {
                        warn!(limit = max, ip = self.pc, "step limit exceeded");
                        return Err(InterpreterError::StepLimitExceeded { limit: max });
                    }
                }
            }

            let ip = self.pc;
            let instr = self.program.instructions()[ip];
            let (ptr_before, cell_before) = (self.pointer, self.tape[self.pointer]);
            let mut action: Option<String> = if debug { Some(String::new()) } else { None };

            match instr {
                Instruction::Increment => {
                    let after = cell_before.wrapping_add(1);
                    self.tape[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Increment cell[{ptr_before}] from {cell_before} to {after}"); }
                }
                Instruction::Decrement => {
                    let after = cell_before.wrapping_sub(1);
                    self.tape[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Decrement cell[{ptr_before}] from {cell_before} to {after}"); }
                }
                Instruction::MoveRight => {
                    self.pointer += 1;
                    self.grow_tape();
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                Instruction::MoveLeft => {
                    if self.pointer == 0 {
                        let pos = self.program.source_position(ip).unwrap_or(ip);
                        warn!(ip, pos, "pointer moved left of cell 0");
                        return Err(InterpreterError::PointerUnderflow { ip, pos });
                    }
                    self.pointer -= 1;
                    self.grow_tape();
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                Instruction::Read => {
                    // Loops can read more often than the static ',' count; an
                    // exhausted queue behaves like EOF and stores 0.
                    let value = match self.input.pop_front() {
                        Some(c) => c as u32 as u8,
                        None => {
                            trace!(ip, "input exhausted, storing 0");
                            0
                        }
                    };
                    self.tape[self.pointer] = value;
                    if let Some(a) = action.as_mut() { *a = format!("Read input -> {value}"); }
                }
                Instruction::Write => {
                    let c = char::from(cell_before);
                    match self.output_sink.as_mut() {
                        Some(sink) => sink(c),
                        None => self.output.push(c),
                    }
                    if let Some(a) = action.as_mut() { *a = format!("Output {c:?}"); }
                }
                Instruction::LoopStart => {
                    if cell_before == 0 {
                        let target = self.matching_close(ip);
                        trace!(ip, target, "skip loop");
                        if let Some(a) = action.as_mut() { *a = format!("Cell is 0; jump forward to matching ']' at IP {target}"); }
                        self.pc = target;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Enter loop (cell != 0)".to_string();
                    }
                }
                Instruction::LoopEnd => {
                    if cell_before != 0 {
                        let target = self.matching_open(ip);
                        trace!(ip, target, "repeat loop");
                        if let Some(a) = action.as_mut() { *a = format!("Cell != 0; jump back to matching '[' at IP {target}"); }
                        self.pc = target;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Exit loop (cell is 0)".to_string();
                    }
                }
            }

            if debug {
                println!(
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    step,
                    ip,
                    ptr_before,
                    cell_before,
                    instr,
                    action.unwrap_or_default()
                );
            }

            step += 1;
            // Jumps leave pc on a bracket; this lands just past it.
            self.pc += 1;
        }

        debug!(steps = step, tape_len = self.tape.len(), "program finished");
        Ok(std::mem::take(&mut self.output))
    }

    /// Zero-fill the tape until the pointer is addressable.
    fn grow_tape(&mut self) {
        while self.tape.len() <= self.pointer {
            self.tape.push(0);
        }
    }

    /// Index of the `]` closing the `[` at `open`.
    ///
    /// Validated programs always have a match; should the scan run off the
    /// end anyway, the program length is returned and execution stops.
    fn matching_close(&self, open: usize) -> usize {
        let code = self.program.instructions();
        let mut depth = 0usize;
        for (i, &instr) in code.iter().enumerate().skip(open + 1) {
            match instr {
                Instruction::LoopStart => depth += 1,
                Instruction::LoopEnd if depth == 0 => return i,
                Instruction::LoopEnd => depth -= 1,
                _ => {}
            }
        }
        code.len()
    }

    /// Index of the `[` opening the `]` at `close`.
    fn matching_open(&self, close: usize) -> usize {
        let code = self.program.instructions();
        let mut depth = 0usize;
        for i in (0..close).rev() {
            match code[i] {
                Instruction::LoopEnd => depth += 1,
                Instruction::LoopStart if depth == 0 => return i,
                Instruction::LoopStart => depth -= 1,
                _ => {}
            }
        }
        code.len()
    }
}
