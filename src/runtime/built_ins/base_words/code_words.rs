use crate::{
    add_native_word,
    lang::{block_reader::read_structure, tokenizing::tokenize_from_source},
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// The contents of a value when run as code.  A block gives its elements, anything else is run as
/// a one element block.
pub fn code_of(value: &Value) -> Vec<Value> {
    match value {
        Value::Block(block) => block.borrow().values().clone(),
        other => vec![other.clone()],
    }
}

/// Do nothing at all.
///
/// Signature: ` -- `
fn word_nop(_interpreter: &mut dyn Interpreter) -> error::Result<()> {
    Ok(())
}

/// Stop the current run loop, leaving any remaining code unrun.
///
/// Signature: ` -- `
fn word_exit(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.halt();
    Ok(())
}

/// Exchange values between the top of the stack and the front of the code.  The top `n` stack
/// values move to the front of the code, and the first `c` code values move to the top of the
/// stack.  Both sides keep their order and are padded with undefined when they run short.
///
/// Signature: `... n c -- ...`
fn word_swap_n(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let code_count = interpreter.pop_as_count()?;
    let stack_count = interpreter.pop_as_count()?;

    // Reserve both paddings before anything moves, so a count too large to allocate leaves the
    // stack and the code untouched.
    let stack_len = interpreter.stack().len();
    let available = code_count.min(interpreter.code().len());

    let mut to_code = Vec::new();
    let mut to_stack = Vec::new();

    if to_code.try_reserve(stack_count).is_err() || to_stack.try_reserve(code_count).is_err() {
        return script_error(
            interpreter,
            ErrorKind::InvalidArgument,
            format!("Can not transpose {} and {} values.", stack_count, code_count),
        );
    }

    to_code.extend(
        interpreter
            .stack_mut()
            .drain(stack_len - stack_count.min(stack_len)..),
    );
    to_code.resize(stack_count, Value::Undefined);

    to_stack.extend(interpreter.code_mut().drain(..available));
    to_stack.resize(code_count, Value::Undefined);

    interpreter.splice_code(to_code);
    interpreter.stack_mut().extend(to_stack);

    Ok(())
}

/// Exchange the whole stack and the whole code.  The stack becomes the reversed code and the code
/// becomes the reversed stack, so the top of the stack is the next value to run.
///
/// Signature: `... -- ...`
fn word_flip(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let stack: Vec<Value> = interpreter.stack_mut().drain(..).collect();
    let code: Vec<Value> = interpreter.code_mut().drain(..).collect();

    interpreter.stack_mut().extend(code.into_iter().rev());
    interpreter.code_mut().extend(stack.into_iter().rev());

    Ok(())
}

/// Push the next value of the code onto the stack without running it.
///
/// Signature: `| x -- x |`
fn word_quote(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.next_code()?;

    interpreter.push(value);
    Ok(())
}

/// Bind the name that follows in the code to the value after it, in the active namespace.
///
/// Signature: `| name value -- |`
fn word_define(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.next_code()?;
    let value = interpreter.next_code()?;

    let Some(name) = name.as_text() else {
        return script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!("Expected a name to define, found {}.", name.type_name()),
        );
    };

    interpreter.define(name.to_string(), value);
    Ok(())
}

/// Run a block in a fresh context seeded with the contents of another block.  The final stack of
/// the run is pushed as a new block.
///
/// Signature: `stack-block block -- result-block`
fn word_exec(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let block = interpreter.pop()?;
    let seed = interpreter.pop_as_block()?;

    let stack = seed.borrow().values().clone();
    let result = interpreter.execute_isolated(stack, code_of(&block))?;

    interpreter.push(Value::from(result));
    Ok(())
}

/// Wrap the whole stack in a block.
///
/// Signature: `... -- [ ... ]`
fn word_stack_to_block(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let values: Vec<Value> = interpreter.stack_mut().drain(..).collect();

    interpreter.push(Value::from(values));
    Ok(())
}

/// Append the contents of a block to the stack.
///
/// Signature: `[ ... ] -- ...`
fn word_block_to_stack(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let block = interpreter.pop_as_block()?;
    let values = block.borrow().values().clone();

    interpreter.stack_mut().extend(values);
    Ok(())
}

/// Lex text into a flat block of values.  A block is passed through, it is already lexed.
///
/// Signature: `text -- block`
fn word_lex(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let source = interpreter.pop()?;

    if source.is_block() {
        interpreter.push(source);
        return Ok(());
    }

    let Some(text) = source.as_text() else {
        return script_error(
            interpreter,
            ErrorKind::TypeMismatch,
            format!("Can not lex a {}.", source.type_name()),
        );
    };

    let tokenized = tokenize_from_source("<lex>", text);

    for diagnostic in tokenized.diagnostics.iter().cloned() {
        interpreter.report(diagnostic);
    }

    interpreter.push(Value::from(tokenized.values()));
    Ok(())
}

/// Structure a flat block of values into nested blocks, expanding macros along the way.
///
/// Signature: `block -- block`
fn word_prep(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let block = interpreter.pop_as_block()?;
    let values = block.borrow().values().clone();

    let structured = read_structure(interpreter, values)?;

    interpreter.push(Value::from(structured));
    Ok(())
}

/// Register the words that work with code and execution.
pub fn register_code_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "nop", word_nop, "Do nothing.", " -- ");

    add_native_word!(
        interpreter,
        "_exit",
        word_exit,
        "Stop running the current code.",
        " -- "
    );

    add_native_word!(
        interpreter,
        "_swapN",
        word_swap_n,
        "Move n stack values to the code and c code values to the stack.",
        "... n c -- ..."
    );

    add_native_word!(
        interpreter,
        "_flip",
        word_flip,
        "Exchange the stack and the code, reversing both.",
        "... -- ..."
    );

    add_native_word!(
        interpreter,
        "\\",
        word_quote,
        "Push the next value of the code without running it.",
        "| x -- x |"
    );

    add_native_word!(
        interpreter,
        "::",
        word_define,
        "Bind the following name to the value after it.",
        "| name value -- |"
    );

    add_native_word!(
        interpreter,
        "_exec",
        word_exec,
        "Run a block in isolation, seeded with a stack block.",
        "stack-block block -- result-block"
    );

    add_native_word!(
        interpreter,
        "s2b",
        word_stack_to_block,
        "Wrap the whole stack into a block.",
        "... -- [ ... ]"
    );

    add_native_word!(
        interpreter,
        "b2s",
        word_block_to_stack,
        "Append a block's contents to the stack.",
        "[ ... ] -- ..."
    );

    add_native_word!(
        interpreter,
        "lex",
        word_lex,
        "Lex text into a flat block.",
        "text -- block"
    );

    add_native_word!(
        interpreter,
        "prep",
        word_prep,
        "Structure a flat block into nested blocks.",
        "block -- block"
    );
}
