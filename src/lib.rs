/// Module for managing source code and turning it into the token stream executed by the
/// interpreter.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;
