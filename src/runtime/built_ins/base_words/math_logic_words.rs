use crate::{
    add_native_word,
    runtime::{
        data_structures::{number::Number, value::Value},
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};
use std::cmp::Ordering;

/// Helper function to handle math operations.  The operation is passed in as an argument.  The
/// stack operations and value conversions are handled here.
fn math_op(interpreter: &mut dyn Interpreter, op: fn(Number, Number) -> Number) -> error::Result<()> {
    let b = interpreter.pop_as_number()?;
    let a = interpreter.pop_as_number()?;

    interpreter.push(Value::Number(op(a, b)));
    Ok(())
}

/// Helper for division style operations that can fail on an integer zero divisor.
fn checked_math_op(
    interpreter: &mut dyn Interpreter,
    op: fn(Number, Number) -> Option<Number>,
) -> error::Result<()> {
    let b = interpreter.pop_as_number()?;
    let a = interpreter.pop_as_number()?;

    match op(a, b) {
        Some(result) => {
            interpreter.push(Value::Number(result));
            Ok(())
        }

        None => script_error(
            interpreter,
            ErrorKind::DivisionByZero,
            format!("Integer division of {} by zero.", a),
        ),
    }
}

/// Add 2 numbers, or concatenate when either side is text.
///
/// Signature: `a b -- result`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    if a.is_textual() || b.is_textual() {
        interpreter.push(Value::Text(format!("{}{}", a, b)));
        return Ok(());
    }

    interpreter.push(a);
    interpreter.push(b);

    math_op(interpreter, Number::add)
}

/// Subtract the top number from the one below it.
///
/// Signature: `a b -- a-b`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, Number::sub)
}

/// Multiply 2 numbers.
///
/// Signature: `a b -- result`
fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    math_op(interpreter, Number::mul)
}

/// Divide 2 numbers.  Two integers that divide exactly give an integer.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    checked_math_op(interpreter, Number::checked_div)
}

/// Take the remainder of a division.
///
/// Signature: `a b -- a%b`
fn word_mod(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    checked_math_op(interpreter, Number::checked_rem)
}

/// Value selecting and.  Gives `b` when `a` is truthy, otherwise `a`.
///
/// Signature: `a b -- a|b`
fn word_and(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(if a.is_truthy() { b } else { a });
    Ok(())
}

/// Value selecting or.  Gives `a` when `a` is truthy, otherwise `b`.
///
/// Signature: `a b -- a|b`
fn word_or(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(if a.is_truthy() { a } else { b });
    Ok(())
}

/// Logically invert a value's truthiness.
///
/// Signature: `a -- bool`
fn word_not(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop()?;

    interpreter.push(Value::Boolean(!a.is_truthy()));
    Ok(())
}

/// Order two values.  Numbers and booleans compare numerically, text compares by its characters.
/// Any other pairing has no order.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    fn numeric(value: &Value) -> Option<Number> {
        match value {
            Value::Number(number) => Some(*number),
            Value::Boolean(value) => Some(Number::Int(*value as i64)),
            _ => None,
        }
    }

    if let (Some(x), Some(y)) = (numeric(a), numeric(b)) {
        return x.partial_cmp(&y);
    }

    match (a.as_text(), b.as_text()) {
        (Some(x), Some(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Is `a` greater than `b`?  Values without an order are never greater.
///
/// Signature: `a b -- bool`
fn word_greater(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(Value::Boolean(compare(&a, &b) == Some(Ordering::Greater)));
    Ok(())
}

/// Are the two values loosely equal?
///
/// Signature: `a b -- bool`
fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(Value::Boolean(a == b));
    Ok(())
}

/// Register the math and logic words.
pub fn register_math_logic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "add",
        word_add,
        "Add 2 numbers, or concatenate if either is text.",
        "a b -- result"
    );

    add_native_word!(
        interpreter,
        "sub",
        word_subtract,
        "Subtract 2 numbers.",
        "a b -- result"
    );

    add_native_word!(
        interpreter,
        "mul",
        word_multiply,
        "Multiply 2 numbers.",
        "a b -- result"
    );

    add_native_word!(
        interpreter,
        "div",
        word_divide,
        "Divide 2 numbers.",
        "a b -- result"
    );

    add_native_word!(
        interpreter,
        "mod",
        word_mod,
        "Remainder of dividing 2 numbers.",
        "a b -- result"
    );

    add_native_word!(
        interpreter,
        "and",
        word_and,
        "Give b if a is truthy, otherwise a.",
        "a b -- result"
    );

    add_native_word!(
        interpreter,
        "or",
        word_or,
        "Give a if a is truthy, otherwise b.",
        "a b -- result"
    );

    add_native_word!(
        interpreter,
        "not",
        word_not,
        "Invert the truthiness of a value.",
        "a -- bool"
    );

    add_native_word!(
        interpreter,
        "gt",
        word_greater,
        "Is a greater than b?",
        "a b -- bool"
    );

    add_native_word!(
        interpreter,
        "eq",
        word_equal,
        "Are a and b equal?",
        "a b -- bool"
    );
}
