use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{
        data_structures::{
            object::{Object, ObjectPtr},
            value::Value,
            value_block::BlockPtr,
        },
        interpreter::WordHandler,
    },
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// A word implemented in Rust.  Along with the handler we keep the registration location and the
/// word's documentation so that hosts can list what a namespace offers.
pub struct NativeWord {
    name: String,
    location: SourceLocation,
    description: String,
    signature: String,
    handler: Rc<WordHandler>,
}

/// Native words are shared between namespaces by reference.
pub type NativeWordPtr = Rc<NativeWord>;

impl NativeWord {
    pub fn new(
        name: String,
        location: SourceLocation,
        description: String,
        signature: String,
        handler: Rc<WordHandler>,
    ) -> NativeWordPtr {
        Rc::new(NativeWord {
            name,
            location,
            description,
            signature,
            handler,
        })
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    /// Where in the Rust source the word was registered.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn description(&self) -> &String {
        &self.description
    }

    /// The word's stack effect, for example `a b -- c`.
    pub fn signature(&self) -> &String {
        &self.signature
    }

    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }
}

impl Display for NativeWord {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ( {} ) {}", self.name, self.signature, self.description)
    }
}

/// What a name resolves to when it reaches the front of the code.
#[derive(Clone)]
pub enum Word {
    /// Called with full access to the context.
    Native(NativeWordPtr),

    /// Its elements are spliced onto the front of the code.
    Block(BlockPtr),

    /// Pushed onto the stack as it is.
    Constant(Value),
}

impl From<Value> for Word {
    fn from(value: Value) -> Word {
        match value {
            Value::Native(native) => Word::Native(native),
            Value::Block(block) => Word::Block(block),
            other => Word::Constant(other),
        }
    }
}

/// Create a fresh, empty namespace.
pub fn new_namespace() -> ObjectPtr {
    Object::new()
}

/// The native words bound in a namespace, in name order.
pub fn native_words(namespace: &ObjectPtr) -> Vec<NativeWordPtr> {
    namespace
        .borrow()
        .iter()
        .filter_map(|(_, value)| match value {
            Value::Native(native) => Some(native.clone()),
            _ => None,
        })
        .collect()
}

/// Resolve a name in a namespace.  Lookup is single level, a namespace's parent is never searched.
pub fn find_word(namespace: &ObjectPtr, name: &str) -> Option<Word> {
    namespace.borrow().get(name).cloned().map(Word::from)
}
