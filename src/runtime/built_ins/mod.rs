/// Arithmetic and comparison words.
pub mod math_words;

/// Words that manipulate the data stack.
pub mod stack_words;

/// Words that convert and inspect Value types.
pub mod value_type_words;

/// Words that write to the output buffer.
pub mod io_words;

/// Words that drive control flow and create new words.
pub mod control_words;

use crate::runtime::{
    built_ins::{
        control_words::register_control_words, io_words::register_io_words,
        math_words::register_math_words, stack_words::register_stack_words,
        value_type_words::register_value_type_words,
    },
    error,
    interpreter::Interpreter,
};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Definition of a built-in word handler function.  Built-ins are plain functions written against
/// the Interpreter trait, so the table of them can be built once and shared.
pub type WordHandler = fn(&mut dyn Interpreter) -> error::Result<()>;

/// Information about a built-in word.
#[derive(Clone)]
pub struct BuiltInWord {
    /// The name of the word itself, always lower case.
    pub name: &'static str,

    /// The function executed for the word.
    pub handler: WordHandler,

    /// A simple description of the word.
    pub description: &'static str,

    /// The stack signature of the word.
    pub signature: &'static str,
}

/// The fixed table of built-in words, keyed by name.
#[derive(Default)]
pub struct BuiltInTable {
    words: HashMap<&'static str, BuiltInWord>,
}

impl BuiltInTable {
    pub fn new() -> BuiltInTable {
        BuiltInTable {
            words: HashMap::new(),
        }
    }

    /// Register a word with the table.  Use the add_native_word! macro rather than calling this
    /// directly.
    pub fn add_word(
        &mut self,
        name: &'static str,
        handler: WordHandler,
        description: &'static str,
        signature: &'static str,
    ) {
        let info = BuiltInWord {
            name,
            handler,
            description,
            signature,
        };

        let _ = self.words.insert(name, info);
    }

    /// Find a built-in by it's lower-cased name.
    pub fn get(&self, name: &str) -> Option<&BuiltInWord> {
        self.words.get(name)
    }

    /// All of the built-in words, sorted by name.
    pub fn sorted(&self) -> Vec<&BuiltInWord> {
        let mut words: Vec<&BuiltInWord> = self.words.values().collect();

        words.sort_by_key(|word| word.name);
        words
    }
}

/// Simplify registering a built-in word with the table.
///
/// Required parameters are, the table to register with.  The name of the word to register.  The
/// word function handler to execute for the word.  A simple description of the word.  As well as
/// the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $table:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        $table.add_word(
            $name,        // Name.
            $function,    // Function handler.
            $description, // Word description.
            $signature,   // Word signature.
        );
    }};
}

lazy_static! {
    // Every built-in word, registered once on first use.
    static ref BUILT_IN_WORDS: BuiltInTable = {
        let mut table = BuiltInTable::new();

        register_math_words(&mut table);
        register_stack_words(&mut table);
        register_value_type_words(&mut table);
        register_io_words(&mut table);
        register_control_words(&mut table);

        table
    };
}

/// The table of all built-in words.
pub fn built_in_words() -> &'static BuiltInTable {
    &BUILT_IN_WORDS
}

/// Find a built-in word by it's lower-cased name.
pub fn find_built_in(name: &str) -> Option<&'static BuiltInWord> {
    built_in_words().get(name)
}

/// A help listing of every built-in word, one per line, sorted by name.  Each line holds the
/// name, the stack signature and the description.
pub fn built_in_listing() -> String {
    let words = built_in_words().sorted();
    let width = words.iter().map(|word| word.name.len()).max().unwrap_or(0);

    words
        .iter()
        .map(|word| {
            format!(
                "{:width$}  ( {} )  {}",
                word.name,
                word.signature.trim(),
                word.description,
                width = width
            )
        })
        .collect::<Vec<String>>()
        .join("\n")
}
