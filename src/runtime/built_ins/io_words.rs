use crate::{
    add_native_word,
    runtime::{
        built_ins::{BuiltInTable, value_type_words::code_to_char},
        data_structures::value::check_string_length,
        error,
        interpreter::Interpreter,
    },
};

/// Pop the top value and write it's textual form to the output.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.write_output(&value.to_string());

    Ok(())
}

/// Write a new line to the output.
///
/// Signature: ` -- `
fn word_break(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.write_output("\n");

    Ok(())
}

/// Write a single space to the output.
///
/// Signature: ` -- `
fn word_space(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.write_output(" ");

    Ok(())
}

/// Write a number of spaces to the output.  A count of zero or less writes nothing.
///
/// Signature: `count -- `
fn word_spaces(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let count = *interpreter.peek(0)?.as_int()?;
    let count = usize::try_from(count).unwrap_or(0);

    check_string_length(Some(count), "spaces")?;

    let _ = interpreter.pop()?;
    interpreter.write_output(&" ".repeat(count));

    Ok(())
}

/// Write the character with the given code to the output.
///
/// Signature: `code -- `
fn word_emit(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let code = *interpreter.peek(0)?.as_int()?;
    let character = code_to_char(interpreter, code)?;

    let _ = interpreter.pop()?;
    interpreter.write_output(&character.to_string());

    Ok(())
}

/// Write the listing of the data stack, bottom first, to the output.
///
/// Signature: ` -- `
fn word_print_stack(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let listing = interpreter.stack().to_string();

    interpreter.write_output(&listing);

    Ok(())
}

/// Write the listing of the user defined words to the output.
///
/// Signature: ` -- `
fn word_print_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let listing = interpreter.dictionary().to_string();

    interpreter.write_output(&listing);

    Ok(())
}

/// Register the words that write to the output buffer.
pub fn register_io_words(table: &mut BuiltInTable) {
    add_native_word!(
        table,
        ".",
        word_print,
        "Pop a value and write it to the output.",
        "value -- "
    );

    add_native_word!(
        table,
        "br",
        word_break,
        "Write a new line to the output.",
        " -- "
    );

    add_native_word!(
        table,
        "cr",
        word_break,
        "Write a new line to the output.",
        " -- "
    );

    add_native_word!(
        table,
        "space",
        word_space,
        "Write a single space to the output.",
        " -- "
    );

    add_native_word!(
        table,
        "spaces",
        word_spaces,
        "Write a number of spaces to the output.",
        "count -- "
    );

    add_native_word!(
        table,
        "emit",
        word_emit,
        "Write the character with the given code to the output.",
        "code -- "
    );

    add_native_word!(
        table,
        ".stack",
        word_print_stack,
        "Write a listing of the data stack to the output.",
        " -- "
    );

    add_native_word!(
        table,
        ".s",
        word_print_stack,
        "Write a listing of the data stack to the output.",
        " -- "
    );

    add_native_word!(
        table,
        ".words",
        word_print_words,
        "Write a listing of the user defined words to the output.",
        " -- "
    );
}
