use crate::{
    lang::{
        source_buffer::SourceLocation,
        tokenizing::{BlockBody, Token},
    },
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            value::Value,
            value_stack::ValueStack,
        },
        error,
    },
};
use std::fmt::{self, Display, Formatter};

pub mod vorth_interpreter;

/// A call stack item is a record of the executing word's name and the location within the original
/// source code from which it was invoked.  This items are read-only and the fields are accessed by
/// member functions.
#[derive(Clone, Debug)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where in the source code was the execution of this word found?
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this word can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

/// Type to represent a call stack.  This is a stack of the user words currently being executed by
/// the interpreter.  This is used to help track errors and provide a scripts stack trace to the
/// user.
pub type CallStack = Vec<CallItem>;

/// The control registers of one run over a token sequence.  Control flow never jumps, `if`, `else`
/// and `times` only set how many of the following units are suppressed or how often the next one
/// is repeated.
///
/// Blocks get their own registers.  A user word's body shares skip, last if and repeat with the
/// code that called it, so calling a word behaves as if its body were written in its place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    /// Index of the token being executed.
    pub pc: usize,

    /// Count of executable units still to be suppressed, including the current one.  Decremented
    /// after every unit, so 2 suppresses exactly the unit following the one that set it.
    pub skip: usize,

    /// Truthiness of the most recently evaluated `if`.
    pub last_if: bool,

    /// How many times the next executed unit runs.  Reset to 1 once used.
    pub repeat: i64,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Registers {
        Registers {
            pc: 0,
            skip: 0,
            last_if: false,
            repeat: 1,
        }
    }
}

/// Trait for managing the interpreter's data stack.  Intended to be called by the built-in words.
///
/// Words that can fail are expected to check their operands before changing the stack, the peek
/// and typed pop functions make that easy.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required.  One example is for the stack listing
    /// `.stack`.
    fn stack(&self) -> &ValueStack;

    /// Direct access to the stack for words that rearrange it.
    fn stack_mut(&mut self) -> &mut ValueStack;

    /// Push a value onto the stack.  This is the primary way of sending values to words.
    fn push(&mut self, value: Value);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Get a copy of the value `depth` places down from the top, 0 being the top.
    fn peek(&self, depth: usize) -> error::Result<Value>;

    /// Pop the top value if it is an integer.  If it is not, a type error is returned and the stack
    /// is left alone.  We also fail if the stack is empty.
    fn pop_as_int(&mut self) -> error::Result<i64>;

    /// Pop the top value if it is a string.  If it is not, a type error is returned and the stack
    /// is left alone.  We also fail if the stack is empty.
    fn pop_as_string(&mut self) -> error::Result<String>;
}

/// Trait for the text produced by a `parse` call.
pub trait OutputManagement {
    /// The text written so far by the current, or the last, call.
    fn output(&self) -> &str;

    /// Append text to the output.
    fn write_output(&mut self, text: &str);
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// If currently set, this represents the current executing location in the original source
    /// code.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// The dictionary of user defined words.
    fn dictionary(&self) -> &Dictionary;

    /// Define a word, replacing any earlier definition of the same name.  Built-in words can be
    /// shadowed this way as user words are always looked up first.
    fn define_word(&mut self, name: &str, location: SourceLocation, body: BlockBody);

    /// Find a user defined word by name.
    fn find_word(&self, word: &str) -> Option<&WordInfo>;

    /// Find and execute a word by name, user words first then built-ins.  Supply a source location
    /// to represent where the word was executed from.
    ///
    /// If the word is not found an unknown word error is returned.
    fn execute_word_named(&mut self, location: &SourceLocation, word: &str) -> error::Result<()>;

    /// The current script execution call stack.
    fn call_stack(&self) -> &CallStack;
}

/// Trait for the token stream being executed and the control registers that drive it.
pub trait CodeManagement {
    /// The registers of the innermost running token sequence.
    fn registers(&self) -> &Registers;

    /// Mutable access to the innermost registers.  This is how `if`, `else` and `times` do their
    /// work.
    fn registers_mut(&mut self) -> &mut Registers;

    /// Consume the token following the current one in the running sequence.  Returns None at the
    /// end of the sequence.
    fn next_token(&mut self) -> Option<Token>;

    /// Run a token sequence as an independent unit with it's own registers.
    fn execute_tokens(&mut self, tokens: BlockBody) -> error::Result<()>;

    /// Ask the interpreter to stop.  This persists for the lifetime of the interpreter.
    fn request_exit(&mut self);

    /// Has `bye` been executed?
    fn is_exiting(&self) -> bool;

    /// Tokenize and run source code from a string, returning the text it produced.  The path is
    /// used to represent the source code in error reporting.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<String>;

    /// Tokenize and run a whole source file as one call.
    fn process_source_file(&mut self, path: &str) -> error::Result<String>;
}

/// Core interpreter trait.
///
/// This trait brings together the stack, output, word and code management functionality that the
/// built-in words are written against.
pub trait Interpreter:
    InterpreterStack + OutputManagement + WordManagement + CodeManagement
{
}
