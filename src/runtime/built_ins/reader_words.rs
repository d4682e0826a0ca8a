use crate::{
    add_native_word,
    runtime::{
        data_structures::{
            value::Value,
            value_block::{BlockPtr, ValueBlock},
        },
        error::{self, ErrorKind, ScriptError},
        interpreter::Interpreter,
    },
};

/// The word that opens a block.
pub const BLOCK_OPEN: &str = "[";

/// The word that closes a block.
pub const BLOCK_CLOSE: &str = "]";

fn unbalanced(interpreter: &dyn Interpreter, message: &str) -> ScriptError {
    ScriptError::new(
        ErrorKind::UnbalancedBlock,
        None,
        message.to_string(),
        interpreter.current_word().clone(),
    )
}

/// Collect code values into a block up to the matching close marker.  Nested blocks are read
/// recursively.  Running out of code before the close is reported and the partial block is kept.
fn read_block(interpreter: &mut dyn Interpreter) -> error::Result<BlockPtr> {
    let mut values = Vec::new();

    loop {
        let Some(next) = interpreter.code_mut().pop_front() else {
            let diagnostic = unbalanced(interpreter, "Did not find the expected ']'.");
            interpreter.report(diagnostic);
            break;
        };

        match next.as_word() {
            Some(BLOCK_CLOSE) => break,
            Some(BLOCK_OPEN) => values.push(Value::Block(read_block(interpreter)?)),
            _ => values.push(next),
        }
    }

    Ok(ValueBlock::from_vec(values))
}

/// Read a block.
///
/// Signature: `| ... ] -- block |`
fn word_block_open(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let block = read_block(interpreter)?;

    interpreter.push(Value::Block(block));
    Ok(())
}

/// A close marker reached outside of any block.  It is reported and dropped.
///
/// Signature: ` -- `
fn word_block_close(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let diagnostic = unbalanced(interpreter, "Found a ']' without a matching '['.");

    interpreter.report(diagnostic);
    Ok(())
}

/// Bind a macro in the pre-processor namespace.  A block macro is expanded in place wherever its
/// name appears at the top level of later source, any other value is substituted as it is.
///
/// Signature: `| name value -- |`
fn word_macro(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.next_code()?;
    let mut value = interpreter.next_code()?;

    if value.as_word() == Some(BLOCK_OPEN) {
        value = Value::Block(read_block(interpreter)?);
    }

    let Some(name) = name.as_text() else {
        return error::script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!("Expected a macro name, found {}.", name.type_name()),
        );
    };

    interpreter.define(name.to_string(), value);
    Ok(())
}

/// Register the words of the pre-processor namespace.  They are added with the pre-processor
/// namespace temporarily active, the active namespace is restored afterwards.
pub fn register_reader_words(interpreter: &mut dyn Interpreter) {
    let namespace = interpreter.namespace();
    let pre_namespace = interpreter.pre_namespace();

    interpreter.set_namespace(pre_namespace);

    add_native_word!(
        interpreter,
        BLOCK_OPEN,
        word_block_open,
        "Read the following code up to the matching ']' into a block.",
        "| ... ] -- block |"
    );

    add_native_word!(
        interpreter,
        BLOCK_CLOSE,
        word_block_close,
        "Report a stray close marker.",
        " -- "
    );

    add_native_word!(
        interpreter,
        "macro:",
        word_macro,
        "Bind a pre-processor macro.",
        "| name value -- |"
    );

    interpreter.set_namespace(namespace);
}
