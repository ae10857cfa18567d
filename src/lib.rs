//! A tiny Brainfuck interpreter library.
//!
//! Programs run against a pre-supplied input string and hand back everything
//! they printed once they finish.
//!
//! Features and behaviors:
//! - The tape starts as a single zero cell and grows to the right on demand.
//! - Cells are unsigned bytes; `+` and `-` wrap around.
//! - Moving left of cell 0 is reported as a pointer underflow error.
//! - Any character outside `><+-.,[]` is treated as a comment and ignored.
//! - Unbalanced brackets, and programs with more `,` than input characters,
//!   are rejected before anything runs.
//! - `,` on an exhausted input queue stores 0 (EOF).
//!
//! Quick start:
//!
//! ```
//! use bfi::Interpreter;
//!
//! // Echo characters until a NUL terminator.
//! let mut bf = Interpreter::new(",[.[-],]", "Hello World!\0").expect("valid program");
//! assert_eq!(bf.run().expect("program should run"), "Hello World!");
//! ```

pub mod cli_util;
pub mod config;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod validate;

pub use error::{InterpreterError, UnmatchedBracketKind};
pub use instruction::{Instruction, Program};
pub use interpreter::{Interpreter, StepControl};

/// Program run when the command line supplies no code.
pub const DEMO_PROGRAM: &str = ",[.[-],]";

/// Input paired with [`DEMO_PROGRAM`].
pub const DEMO_INPUT: &str = "Hello World!\0";
