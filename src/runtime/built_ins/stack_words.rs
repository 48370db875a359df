use crate::{
    add_native_word,
    runtime::{
        built_ins::BuiltInTable, data_structures::value::ToValue, error,
        interpreter::Interpreter,
    },
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.peek(0)?;

    interpreter.push(value);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack().require(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Make a copy of the second value and push it on top.
///
/// Signature: `a b -- a b a`
fn word_over(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.peek(1)?;

    interpreter.push(a);

    Ok(())
}

/// Rotate the top 3 values on the stack, bringing the third one to the top.
///
/// Signature: `a b c -- b c a`
fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack().require(3)?;

    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(c);
    interpreter.push(a);

    Ok(())
}

/// Reverse the whole data stack.
///
/// Signature: `a ... z -- z ... a`
fn word_reverse(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack_mut().reverse();

    Ok(())
}

/// Duplicate the top pair of values.
///
/// Signature: `a b -- a b a b`
fn word_two_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.peek(0)?;
    let a = interpreter.peek(1)?;

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Drop the top pair of values.
///
/// Signature: `a b -- `
fn word_two_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack().require(2)?;

    let _ = interpreter.pop()?;
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 pairs of values.
///
/// Signature: `a b c d -- c d a b`
fn word_two_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.stack().require(4)?;

    let d = interpreter.pop()?;
    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(c);
    interpreter.push(d);
    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Copy the second pair of values over the top pair.
///
/// Signature: `a b c d -- a b c d a b`
fn word_two_over(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.peek(3)?;
    let b = interpreter.peek(2)?;

    interpreter.push(a);
    interpreter.push(b);

    Ok(())
}

/// Get the depth of the data stack before calling this word.
///
/// Signature: ` -- depth`
fn word_depth(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let depth = interpreter.stack().len();

    interpreter.push(depth.to_value());

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(table: &mut BuiltInTable) {
    add_native_word!(
        table,
        "dup",
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        table,
        "drop",
        word_drop,
        "Discard the top value on the data stack.",
        "value -- "
    );

    add_native_word!(
        table,
        "swap",
        word_swap,
        "Swap the top 2 values on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        table,
        "over",
        word_over,
        "Copy the second value to the top.",
        "a b -- a b a"
    );

    add_native_word!(
        table,
        "rot",
        word_rot,
        "Rotate the third value to the top.",
        "a b c -- b c a"
    );

    add_native_word!(
        table,
        "reverse",
        word_reverse,
        "Reverse the order of the whole data stack.",
        "a ... z -- z ... a"
    );

    add_native_word!(
        table,
        "2dup",
        word_two_dup,
        "Duplicate the top pair of values.",
        "a b -- a b a b"
    );

    add_native_word!(
        table,
        "2drop",
        word_two_drop,
        "Discard the top pair of values.",
        "a b -- "
    );

    add_native_word!(
        table,
        "2swap",
        word_two_swap,
        "Swap the top 2 pairs of values.",
        "a b c d -- c d a b"
    );

    add_native_word!(
        table,
        "2over",
        word_two_over,
        "Copy the second pair of values to the top.",
        "a b c d -- a b c d a b"
    );

    add_native_word!(
        table,
        "depth",
        word_depth,
        "Get the depth of the stack before calling this word.",
        " -- depth"
    );
}
