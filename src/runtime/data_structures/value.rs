use std::{ rc::Rc,
           collections::HashMap,
           fmt::{ self,
                  Debug,
                  Display,
                  Formatter } };
use crate::runtime::data_structures::{ number::Number,
                                       namespace::NativeWordPtr,
                                       object::{ Object,
                                                 ObjectPtr },
                                       value_block::{ BlockPtr,
                                                      ValueBlock } };



/// Core value enumeration used by the Slang runtime.  Everything that can live on the stack, in
/// the code or in a namespace is one of these.
#[derive(Clone, Default)]
pub enum Value
{
    /// The sentinel for missing values.  Padding and out of range reads produce this.
    #[default]
    Undefined,

    /// An integer or floating point number.
    Number(Number),

    /// A boolean value.
    Boolean(bool),

    /// A quoted string literal.  Text is data, it is never looked up in a namespace.
    Text(String),

    /// A bare identifier.  Words dispatch through the active namespace when they reach the front of
    /// the code, unbound words are pushed as they are.
    Word(String),

    /// An ordered, mutable sequence of values.  Handled by reference with a BlockPtr.  Blocks are
    /// both the list type and the code type of the language.
    Block(BlockPtr),

    /// A string keyed mapping with an optional parent.  Handled by reference with an ObjectPtr.
    /// Namespaces are objects too.
    Object(ObjectPtr),

    /// An operation implemented in Rust.
    Native(NativeWordPtr)
}


/// Convert an arbitrary data type to a Value.
pub trait ToValue
{
    fn to_value(&self) -> Value;
}


/// The copies made so far by one deep clone, keyed by the address of the original block or
/// object.
pub type CopyMap = HashMap<usize, Value>;


/// Make sure that it's possible to create a completely separate copy of a value while keeping the
/// copy logically equivalent to the original.  Sharing is preserved, a block reached twice is
/// copied once, which also lets a block that contains itself be copied.
pub trait DeepClone
{
    fn deep_clone(&self) -> Value
    {
        self.deep_clone_with(&mut CopyMap::new())
    }

    fn deep_clone_with(&self, copies: &mut CopyMap) -> Value;
}


/// How a block or object is printed where it recurs inside itself.
const RECURRING_BLOCK: &str = "[ ... ]";
const RECURRING_OBJECT: &str = "{ ... }";



/// Define the conversions from the raw data types into Values.
macro_rules! value_conversion
{
    ($data_type:ty, $variant:ident) =>
    {
        impl ToValue for $data_type
        {
            fn to_value(&self) -> Value
            {
                Value::$variant(self.clone().into())
            }
        }

        impl From<$data_type> for Value
        {
            fn from(original: $data_type) -> Value
            {
                Value::$variant(original.into())
            }
        }
    };
}


value_conversion!(i64,       Number);
value_conversion!(f64,       Number);
value_conversion!(Number,    Number);
value_conversion!(bool,      Boolean);
value_conversion!(String,    Text);
value_conversion!(BlockPtr,  Block);
value_conversion!(ObjectPtr, Object);


impl From<&str> for Value
{
    fn from(original: &str) -> Value
    {
        Value::Text(original.to_string())
    }
}


/// A plain vector becomes a fresh block.
impl From<Vec<Value>> for Value
{
    fn from(values: Vec<Value>) -> Value
    {
        Value::Block(ValueBlock::from_vec(values))
    }
}



/// Loose equality.  Numbers compare by value, words and text compare by their string, blocks
/// compare element by element, while objects and native words compare by identity.
impl PartialEq for Value
{
    fn eq(&self, other: &Value) -> bool
    {
        self.equals_within(other, &mut Vec::new())
    }
}


impl Value
{
    /// Equality with `pairs` holding the block pairs already being compared further up.  A pair
    /// met again is taken as equal, whatever else differs is found by the comparison in progress.
    fn equals_within(&self, other: &Value, pairs: &mut Vec<( usize, usize )>) -> bool
    {
        match ( self, other )
        {
            ( Value::Undefined,  Value::Undefined  ) => true,
            ( Value::Number(a),  Value::Number(b)  ) => a == b,
            ( Value::Boolean(a), Value::Boolean(b) ) => a == b,

            ( Value::Boolean(a), Value::Number(b)  ) => Number::Int(*a as i64) == *b,
            ( Value::Number(a),  Value::Boolean(b) ) => *a == Number::Int(*b as i64),

            ( Value::Block(a),   Value::Block(b)   ) =>
                {
                    if Rc::ptr_eq(a, b)
                    {
                        return true;
                    }

                    let pair = ( Rc::as_ptr(a) as usize, Rc::as_ptr(b) as usize );

                    if pairs.contains(&pair)
                    {
                        return true;
                    }

                    pairs.push(pair);

                    let ( a, b ) = ( a.borrow(), b.borrow() );
                    let equal =    a.len() == b.len()
                                && a.iter().zip(b.iter()).all(|( x, y )| x.equals_within(y, pairs));

                    pairs.pop();
                    equal
                },

            ( Value::Object(a),  Value::Object(b)  ) => Rc::ptr_eq(a, b),
            ( Value::Native(a),  Value::Native(b)  ) => Rc::ptr_eq(a, b),

            _ =>
                {
                    match ( self.as_text(), other.as_text() )
                    {
                        ( Some(a), Some(b) ) => a == b,
                        _                    => false
                    }
                }
        }
    }
}


impl Display for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            Value::Undefined      => write!(f, "undefined"),
            Value::Number(value)  => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Text(value)    => write!(f, "{}", value),
            Value::Word(value)    => write!(f, "{}", value),
            Value::Block(_)       => write!(f, "{}", self.to_source()),
            Value::Object(_)      => write!(f, "{}", self.to_source()),
            Value::Native(value)  => write!(f, "<native {}>", value.name())
        }
    }
}


/// Debug output shows values the way they would be written in source, so that text and words can
/// be told apart.
impl Debug for Value
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self.to_source())
    }
}


impl DeepClone for Value
{
    fn deep_clone_with(&self, copies: &mut CopyMap) -> Value
    {
        match self
        {
            Value::Block(block)   => block.deep_clone_with(copies),
            Value::Object(object) => object.deep_clone_with(copies),
            _                     => self.clone()
        }
    }
}



/// Handily implement variant checks for the types the Value enumeration supports.
macro_rules! is_variant
{
    ($name:ident , $variant:ident) =>
    {
        pub fn $name(&self) -> bool
        {
            matches!(self, Value::$variant(_))
        }
    };
}


impl Value
{
    pub fn is_undefined(&self) -> bool
    {
        matches!(self, Value::Undefined)
    }

    is_variant!(is_number,  Number);
    is_variant!(is_boolean, Boolean);
    is_variant!(is_text,    Text);
    is_variant!(is_word,    Word);
    is_variant!(is_block,   Block);
    is_variant!(is_object,  Object);
    is_variant!(is_native,  Native);

    /// Is the value either quoted text or a bare word?
    pub fn is_textual(&self) -> bool
    {
        self.is_text() || self.is_word()
    }

    /// Get the string of a textual value.
    pub fn as_text(&self) -> Option<&str>
    {
        match self
        {
            Value::Text(text) | Value::Word(text) => Some(text),
            _                                     => None
        }
    }

    /// Get the bare word name, if this is a word.
    pub fn as_word(&self) -> Option<&str>
    {
        match self
        {
            Value::Word(word) => Some(word),
            _                 => None
        }
    }

    pub fn as_number(&self) -> Option<Number>
    {
        match self
        {
            Value::Number(number) => Some(*number),
            _                     => None
        }
    }

    /// Undefined, false, zero and empty text are falsy.  Everything else is truthy.
    pub fn is_truthy(&self) -> bool
    {
        match self
        {
            Value::Undefined                      => false,
            Value::Boolean(value)                 => *value,
            Value::Number(number)                 => number.is_truthy(),
            Value::Text(text) | Value::Word(text) => !text.is_empty(),
            Value::Block(_)
            | Value::Object(_)
            | Value::Native(_)                    => true
        }
    }

    /// The name of the value's type as reported by the `type` word.
    pub fn type_name(&self) -> &'static str
    {
        match self
        {
            Value::Undefined  => "undefined",
            Value::Number(_)  => "number",
            Value::Boolean(_) => "boolean",
            Value::Text(_)    => "text",
            Value::Word(_)    => "word",
            Value::Block(_)   => "block",
            Value::Object(_)  => "object",
            Value::Native(_)  => "native"
        }
    }

    /// Render the value as source text.  Text is quoted, blocks are bracketed and everything else
    /// prints as it displays.  Passing structured code through this and back through the lexer and
    /// block reader gives back an equal block.
    ///
    /// A block or object that contains itself prints as `[ ... ]` or `{ ... }` where it recurs.
    pub fn to_source(&self) -> String
    {
        self.source_within(&mut Vec::new())
    }

    /// Render as source, with `path` holding the addresses of the blocks and objects currently
    /// being printed.
    pub fn source_within(&self, path: &mut Vec<usize>) -> String
    {
        match self
        {
            Value::Text(text) => Value::stringify(text),

            Value::Block(block) =>
                {
                    let address = Rc::as_ptr(block) as usize;

                    if path.contains(&address)
                    {
                        return RECURRING_BLOCK.to_string();
                    }

                    path.push(address);
                    let source = block.borrow().source_within(path);
                    path.pop();

                    source
                },

            Value::Object(object) =>
                {
                    let address = Rc::as_ptr(object) as usize;

                    if path.contains(&address)
                    {
                        return RECURRING_OBJECT.to_string();
                    }

                    path.push(address);
                    let source = object.borrow().source_within(path);
                    path.pop();

                    source
                },

            _ => self.to_string()
        }
    }

    /// Quote a string.  Double quotes are preferred, single quotes are used when the text itself
    /// holds a double quote.  The lexer does no escape processing, so text holding both kinds of
    /// quote can not be written back faithfully.
    pub fn stringify(text: &str) -> String
    {
        if text.contains('"') && !text.contains('\'')
        {
            format!("'{}'", text)
        }
        else
        {
            format!("\"{}\"", text)
        }
    }
}


/// Create a fresh object, copying the attributes deeply.  The parent is shared, not copied.
impl DeepClone for ObjectPtr
{
    fn deep_clone_with(&self, copies: &mut CopyMap) -> Value
    {
        let address = Rc::as_ptr(self) as usize;

        if let Some(copy) = copies.get(&address)
        {
            return copy.clone();
        }

        let copy = Object::new();
        copies.insert(address, Value::Object(copy.clone()));

        let original = self.borrow();

        for (key, value) in original.iter()
        {
            let value = value.deep_clone_with(copies);

            copy.borrow_mut().set(key.clone(), value);
        }

        copy.borrow_mut().set_parent(original.parent().clone());

        Value::Object(copy)
    }
}
