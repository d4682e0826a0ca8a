use crate::{
    add_native_word,
    runtime::{
        data_structures::{namespace::Word, object::Object, value::Value},
        error,
        interpreter::Interpreter,
    },
};

/// Push the active namespace.  It is an ordinary object, so the object words work on it.
///
/// Signature: ` -- namespace`
fn word_namespace(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let namespace = interpreter.namespace();

    interpreter.push(Value::Object(namespace));
    Ok(())
}

/// Make an object the active namespace.  Words are resolved through it from here on and new
/// definitions land in it.
///
/// Signature: `namespace -- `
fn word_set_namespace(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let namespace = interpreter.pop_as_object()?;

    interpreter.set_namespace(namespace);
    Ok(())
}

/// Describe what a name is bound to in the active namespace.  Native words report their
/// documentation and where they were registered, other words only their kind.  An unbound name
/// gives undefined.
///
/// Signature: `name -- info`
fn word_info(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.pop_as_text()?;

    let Some(word) = interpreter.find_word(&name) else {
        interpreter.push(Value::Undefined);
        return Ok(());
    };

    let info = Object::new();

    {
        let mut fields = info.borrow_mut();

        fields.set("name".to_string(), Value::from(name));

        match word {
            Word::Native(native) => {
                let location = native.location();

                fields.set("kind".to_string(), Value::from("native"));
                fields.set("description".to_string(), Value::from(native.description().clone()));
                fields.set("signature".to_string(), Value::from(native.signature().clone()));
                fields.set("path".to_string(), Value::from(location.path().clone()));
                fields.set("line".to_string(), Value::from(location.line() as i64));
                fields.set("column".to_string(), Value::from(location.column() as i64));
            }

            Word::Block(_) => fields.set("kind".to_string(), Value::from("block")),
            Word::Constant(_) => fields.set("kind".to_string(), Value::from("constant")),
        }
    }

    interpreter.push(Value::Object(info));
    Ok(())
}

pub fn register_namespace_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "ns",
        word_namespace,
        "Push the active namespace.",
        " -- namespace"
    );

    add_native_word!(
        interpreter,
        "ns!",
        word_set_namespace,
        "Make an object the active namespace.",
        "namespace -- "
    );

    add_native_word!(
        interpreter,
        "info",
        word_info,
        "Describe the word a name is bound to.",
        "name -- info"
    );
}
