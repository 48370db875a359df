use crate::{
    add_native_word,
    lang::tokenizing::{Token, TokenList},
    runtime::{
        built_ins::BuiltInTable,
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::Interpreter,
    },
};
use std::rc::Rc;
use tracing::debug;

/// Stop the interpreter.  No further code is run by this or any later call.
///
/// Signature: ` -- `
fn word_bye(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    debug!("exit requested");
    interpreter.request_exit();

    Ok(())
}

/// Pop a condition.  If it is falsy the following unit is suppressed.
///
/// Signature: `condition -- `
fn word_if(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let truthy = interpreter.pop()?.is_truthy();
    let registers = interpreter.registers_mut();

    // The if itself uses one count of the skip, leaving the next unit to be suppressed.
    registers.skip = if truthy { 0 } else { 2 };
    registers.last_if = truthy;

    Ok(())
}

/// Suppress the following unit if the last `if` ran it's own.
///
/// Signature: ` -- `
fn word_else(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let registers = interpreter.registers_mut();

    registers.skip = if registers.last_if { 2 } else { 0 };

    Ok(())
}

/// Pop a count and run the following unit that many times.
///
/// Signature: `count -- `
fn word_times(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let count = interpreter.pop_as_int()?;

    interpreter.registers_mut().repeat = count;

    Ok(())
}

/// Read a new word definition from the running token sequence.  The name is the next token and the
/// body is everything up to the closing `;`.
///
/// Signature: ` -- `
fn word_start_word(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let location = interpreter.current_location().clone().unwrap_or_default();

    let name = match interpreter.next_token() {
        Some(Token::Word(_, name)) if name != ":" && name != ";" => name,
        Some(token) => {
            return script_error(
                interpreter,
                ErrorKind::Syntax,
                format!("{} is not a valid word name", token),
            );
        }
        None => {
            return script_error_str(
                interpreter,
                ErrorKind::Syntax,
                "missing name for word definition",
            );
        }
    };

    let mut body = TokenList::new();

    loop {
        match interpreter.next_token() {
            Some(token) if token.is_word_named(";") => break,
            Some(token) => body.push(token),
            None => {
                return script_error_str(interpreter, ErrorKind::Syntax, "definition not closed");
            }
        }
    }

    let redefined = interpreter.find_word(&name).is_some();

    debug!(word = %name, redefined, tokens = body.len(), "defining word");
    interpreter.define_word(&name, location, Rc::new(body));

    Ok(())
}

/// A `;` outside of a definition.
///
/// Signature: ` -- `
fn word_end_word(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    script_error_str(interpreter, ErrorKind::Syntax, "; without a matching :")
}

/// A `}` outside of a block.
///
/// Signature: ` -- `
fn word_end_block(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    script_error_str(interpreter, ErrorKind::Syntax, "} without a matching {")
}

/// Register the control flow and word creation words.
pub fn register_control_words(table: &mut BuiltInTable) {
    add_native_word!(
        table,
        "bye",
        word_bye,
        "Stop the interpreter.",
        " -- "
    );

    add_native_word!(
        table,
        "if",
        word_if,
        "Run the following unit only if the condition is true.",
        "condition -- "
    );

    add_native_word!(
        table,
        "else",
        word_else,
        "Run the following unit only if the last if did not run it's own.",
        " -- "
    );

    add_native_word!(
        table,
        "times",
        word_times,
        "Run the following unit count times.",
        "count -- "
    );

    add_native_word!(
        table,
        ":",
        word_start_word,
        "Define a new word, ending at the next ;.",
        " -- "
    );

    add_native_word!(
        table,
        ";",
        word_end_word,
        "Ends a word definition, an error anywhere else.",
        " -- "
    );

    add_native_word!(
        table,
        "}",
        word_end_block,
        "Ends a block, an error anywhere else.",
        " -- "
    );
}
