use crate::{
    add_native_word,
    runtime::{
        built_ins::BuiltInTable,
        data_structures::value::{ToValue, Value},
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Convert a character code to it's character, or fail with a type error.
pub fn code_to_char(interpreter: &dyn Interpreter, code: i64) -> error::Result<char> {
    match u32::try_from(code).ok().and_then(char::from_u32) {
        Some(character) => Ok(character),
        None => script_error(
            interpreter,
            ErrorKind::Type,
            format!("{} is not a valid character code", code),
        ),
    }
}

/// Convert an integer character code into a one character string.
///
/// Signature: `code -- string`
fn word_chr(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let code = *interpreter.peek(0)?.as_int()?;
    let character = code_to_char(interpreter, code)?;

    let _ = interpreter.pop()?;
    interpreter.push(Value::String(character.to_string()));

    Ok(())
}

/// Get the character code of the first character of a string.
///
/// Signature: `string -- code`
fn word_ord(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let text = interpreter.peek(0)?.as_string()?.clone();

    let code = match text.chars().next() {
        Some(character) => character as i64,
        None => {
            return script_error(
                interpreter,
                ErrorKind::Type,
                "can't take ord of an empty string".to_string(),
            );
        }
    };

    let _ = interpreter.pop()?;
    interpreter.push(Value::Int(code));

    Ok(())
}

/// Replace a value with the name of it's type.
///
/// Signature: `value -- type-name`
fn word_type(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value.type_name().to_value());

    Ok(())
}

/// Register the value conversion words.
pub fn register_value_type_words(table: &mut BuiltInTable) {
    add_native_word!(
        table,
        "chr",
        word_chr,
        "Convert a character code into a one character string.",
        "code -- string"
    );

    add_native_word!(
        table,
        "ord",
        word_ord,
        "Get the character code of the first character of a string.",
        "string -- code"
    );

    add_native_word!(
        table,
        "type",
        word_type,
        "Replace a value with the name of it's type: int, float or string.",
        "value -- type-name"
    );
}
