/// Module contains the Value enumeration and it's implementation.  The value is one of the core
/// data structures of the interpreter.  It is used to represent all data types that the interpreter
/// and underlying Forth code can understand and manage.
pub mod value;

/// The bounds checked data stack.
pub mod value_stack;

/// The dictionary module provides the word dictionary of user defined words.
pub mod dictionary;
