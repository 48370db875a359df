use crate::{
    add_native_word,
    runtime::{
        built_ins::BuiltInTable,
        data_structures::value::{Comparison, ToValue, Value},
        error::{self, ErrorKind, script_error_str},
        interpreter::Interpreter,
    },
};

/// Helper function to handle binary operations.  The operands are read and the result computed
/// before anything is removed from the stack, so a failing operation leaves it's operands in
/// place.
fn binary_op(
    interpreter: &mut dyn Interpreter,
    op: fn(&Value, &Value) -> error::Result<Value>,
) -> error::Result<()> {
    let b = interpreter.peek(0)?;
    let a = interpreter.peek(1)?;
    let result = op(&a, &b)?;

    let _ = interpreter.pop()?;
    let _ = interpreter.pop()?;

    interpreter.push(result);

    Ok(())
}

/// Helper function to handle the comparison words.  The result is pushed as 1 or 0.
fn comparison_op(interpreter: &mut dyn Interpreter, comparison: Comparison) -> error::Result<()> {
    let b = interpreter.peek(0)?;
    let a = interpreter.peek(1)?;
    let result = a.compare(&b, comparison)?;

    let _ = interpreter.pop()?;
    let _ = interpreter.pop()?;

    interpreter.push(result.to_value());

    Ok(())
}

/// Add 2 numbers, or concatenate if either is a string.
///
/// Signature: `a b -- result`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, Value::add)
}

/// Subtract 2 numbers, or delete the occurrences of b from the string a.
///
/// Signature: `a b -- result`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, Value::subtract)
}

/// Multiply 2 numbers, or repeat a string.
///
/// Signature: `a b -- result`
fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, Value::multiply)
}

/// Divide 2 numbers giving a float.  A string divided by an integer is split into chunks of that
/// length, each chunk is pushed.
///
/// Signature: `a b -- result` or `string size -- chunk...`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.peek(0)?;
    let a = interpreter.peek(1)?;
    let results = a.divide(&b)?;

    let _ = interpreter.pop()?;
    let _ = interpreter.pop()?;

    for result in results {
        interpreter.push(result);
    }

    Ok(())
}

/// Divide 2 numbers truncating toward zero.
///
/// Signature: `a b -- result`
fn word_int_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, Value::int_divide)
}

/// The remainder of dividing 2 integers.
///
/// Signature: `a b -- result`
fn word_mod(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    binary_op(interpreter, Value::remainder)
}

/// Remainder and truncated quotient of 2 integers.
///
/// Signature: `a b -- remainder quotient`
fn word_div_mod(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = *interpreter.peek(0)?.as_int()?;
    let a = *interpreter.peek(1)?.as_int()?;

    if b == 0 {
        return script_error_str(interpreter, ErrorKind::DivisionByZero, "division by zero in /mod");
    }

    let _ = interpreter.pop()?;
    let _ = interpreter.pop()?;

    interpreter.push(Value::Int(a.wrapping_rem(b)));
    interpreter.push(Value::Int(a.wrapping_div(b)));

    Ok(())
}

fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, Comparison::Equal)
}

fn word_not_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, Comparison::NotEqual)
}

fn word_greater(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, Comparison::Greater)
}

fn word_greater_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, Comparison::GreaterEqual)
}

fn word_less(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, Comparison::Less)
}

fn word_less_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, Comparison::LessEqual)
}

/// Register the arithmetic and comparison words.
pub fn register_math_words(table: &mut BuiltInTable) {
    add_native_word!(
        table,
        "+",
        word_add,
        "Add 2 numbers, or concatenate if either one is a string.",
        "a b -- result"
    );

    add_native_word!(
        table,
        "-",
        word_subtract,
        "Subtract 2 numbers, or remove every b from the string a.",
        "a b -- result"
    );

    add_native_word!(
        table,
        "*",
        word_multiply,
        "Multiply 2 numbers, or repeat a string an integer number of times.",
        "a b -- result"
    );

    add_native_word!(
        table,
        "/",
        word_divide,
        "Divide 2 numbers giving a float, or split a string into chunks.",
        "a b -- result"
    );

    add_native_word!(
        table,
        "//",
        word_int_divide,
        "Divide 2 numbers, truncating the quotient toward zero.",
        "a b -- result"
    );

    add_native_word!(
        table,
        "%",
        word_mod,
        "Remainder after dividing 2 integers.",
        "a b -- result"
    );

    add_native_word!(
        table,
        "mod",
        word_mod,
        "Remainder after dividing 2 integers.",
        "a b -- result"
    );

    add_native_word!(
        table,
        "/mod",
        word_div_mod,
        "Remainder and truncated quotient of 2 integers.",
        "a b -- remainder quotient"
    );

    add_native_word!(
        table,
        "=",
        word_equal,
        "Are the 2 values equal?",
        "a b -- flag"
    );

    add_native_word!(
        table,
        "!=",
        word_not_equal,
        "Are the 2 values different?",
        "a b -- flag"
    );

    add_native_word!(
        table,
        ">",
        word_greater,
        "Is a greater than b?",
        "a b -- flag"
    );

    add_native_word!(
        table,
        ">=",
        word_greater_equal,
        "Is a greater than or equal to b?",
        "a b -- flag"
    );

    add_native_word!(
        table,
        "<",
        word_less,
        "Is a less than b?",
        "a b -- flag"
    );

    add_native_word!(
        table,
        "<=",
        word_less_equal,
        "Is a less than or equal to b?",
        "a b -- flag"
    );
}
