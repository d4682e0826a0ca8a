use crate::runtime::data_structures::value::{CopyMap, DeepClone, Value};
use std::{
    cell::RefCell,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// An ordered sequence of values.  Blocks serve as the list type of the language and, because a
/// block's elements can be spliced onto the code, as its code type as well.
#[derive(Clone, Default)]
pub struct ValueBlock {
    values: Vec<Value>,
}

/// A pointer to the ValueBlock used to manage this object by reference.
pub type BlockPtr = Rc<RefCell<ValueBlock>>;

/// Why a write into a block was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IndexError {
    /// A negative index reached past the start of the block.
    BeforeStart,

    /// Growing the block to reach the index would not fit in memory.
    TooLarge,
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            IndexError::BeforeStart => write!(f, "reaches before the start of the block"),
            IndexError::TooLarge => write!(f, "is too large to grow the block to"),
        }
    }
}

/// Blocks display as the source text that would read back into them.
impl Display for ValueBlock {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_source())
    }
}

/// The copy is registered before its elements are copied, so an element that leads back to this
/// block gets the new copy.
impl DeepClone for BlockPtr {
    fn deep_clone_with(&self, copies: &mut CopyMap) -> Value {
        let address = Rc::as_ptr(self) as usize;

        if let Some(copy) = copies.get(&address) {
            return copy.clone();
        }

        let copy = ValueBlock::new();
        copies.insert(address, Value::Block(copy.clone()));

        let values: Vec<Value> = self
            .borrow()
            .values
            .iter()
            .map(|value| value.deep_clone_with(copies))
            .collect();

        copy.borrow_mut().values = values;

        Value::Block(copy)
    }
}

impl ValueBlock {
    /// Create a new empty block.
    pub fn new() -> BlockPtr {
        Rc::new(RefCell::new(ValueBlock::default()))
    }

    /// Create a new block holding the given values.
    pub fn from_vec(values: Vec<Value>) -> BlockPtr {
        Rc::new(RefCell::new(ValueBlock { values }))
    }

    pub fn values(&self) -> &Vec<Value> {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Turn a possibly negative index into a position.  Negative indices count back from the end.
    fn resolve(&self, index: i64) -> Option<usize> {
        let position = if index < 0 {
            self.values.len() as i64 + index
        } else {
            index
        };

        usize::try_from(position).ok()
    }

    /// Read the value at an index.  Negative indices count from the end, anything out of range
    /// reads as undefined.
    pub fn at(&self, index: i64) -> Value {
        self.resolve(index)
            .and_then(|position| self.values.get(position))
            .cloned()
            .unwrap_or_default()
    }

    /// Write the value at an index, growing the block with undefined values when writing past the
    /// end.
    pub fn set(&mut self, index: i64, value: Value) -> Result<(), IndexError> {
        let Some(position) = self.resolve(index) else {
            return Err(IndexError::BeforeStart);
        };

        if position >= self.values.len() {
            let growth = position + 1 - self.values.len();

            self.values
                .try_reserve(growth)
                .map_err(|_| IndexError::TooLarge)?;
            self.values.resize(position + 1, Value::Undefined);
        }

        self.values[position] = value;
        Ok(())
    }

    /// Insert a value so that it lands before the given index.  A negative index inserts at
    /// `len + index + 1`, so `-1` appends.  Positions are clamped to the block.
    pub fn insert_before(&mut self, index: i64, value: Value) {
        let length = self.values.len() as i64;
        let position = if index < 0 { length + index + 1 } else { index };
        let position = position.clamp(0, length) as usize;

        self.values.insert(position, value);
    }

    /// Remove and return the last element, or undefined if the block is empty.
    pub fn pop(&mut self) -> Value {
        self.values.pop().unwrap_or_default()
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Replace the element at `index` with the given values, returning the number of values that
    /// were inserted.
    pub fn replace_with(&mut self, index: usize, values: Vec<Value>) -> usize {
        let count = values.len();

        if index < self.values.len() {
            self.values.splice(index..index + 1, values);
        } else {
            self.values.extend(values);
        }

        count
    }

    /// Write the block as source text.
    pub fn to_source(&self) -> String {
        self.source_within(&mut Vec::new())
    }

    /// Write the block as source text, `path` holding the blocks and objects already being
    /// written further out.
    pub fn source_within(&self, path: &mut Vec<usize>) -> String {
        if self.values.is_empty() {
            return "[ ]".to_string();
        }

        let inner: Vec<String> = self
            .values
            .iter()
            .map(|value| value.source_within(path))
            .collect();

        format!("[ {} ]", inner.join(" "))
    }
}
