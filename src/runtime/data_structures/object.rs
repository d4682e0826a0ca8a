use crate::runtime::data_structures::value::Value;
use std::{
    cell::RefCell,
    collections::{BTreeMap, btree_map},
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// A string keyed mapping of values with an optional parent object.  The parent is only consulted
/// by an explicit lookup, plain reads see the object's own attributes.
///
/// Namespaces are objects as well, the words of a namespace are its attributes.
#[derive(Clone, Default)]
pub struct Object {
    attributes: BTreeMap<String, Value>,
    parent: Option<ObjectPtr>,
}

/// A pointer to the Object used to manage it by reference.
pub type ObjectPtr = Rc<RefCell<Object>>;

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.source_within(&mut Vec::new()))
    }
}

impl Object {
    /// Create a new empty object with no parent.
    pub fn new() -> ObjectPtr {
        Rc::new(RefCell::new(Object::default()))
    }

    /// Read one of the object's own attributes.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set(&mut self, key: String, value: Value) {
        self.attributes.insert(key, value);
    }

    /// Remove an attribute, returning its old value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// The attribute names in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.attributes.keys().cloned().collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn parent(&self) -> &Option<ObjectPtr> {
        &self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ObjectPtr>) {
        self.parent = parent;
    }

    /// Write the object as text, `path` holding the blocks and objects already being written
    /// further out.
    pub fn source_within(&self, path: &mut Vec<usize>) -> String {
        let mut text = String::from("{ ");

        for (key, value) in self.attributes.iter() {
            // Namespaces hold themselves and each other, so nested objects stay shallow.
            match value {
                Value::Object(_) => text.push_str(&format!("{}: {{ ... }} ", key)),
                _ => text.push_str(&format!("{}: {} ", key, value.source_within(path))),
            }
        }

        text.push('}');
        text
    }

    /// Look up an attribute on the object, walking up the parent chain until it is found.  A
    /// parent chain that loops back on itself ends the walk.
    pub fn lookup(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.attributes.get(key) {
            return Some(value.clone());
        }

        let mut visited: Vec<ObjectPtr> = Vec::new();
        let mut current = self.parent.clone();

        while let Some(object) = current {
            if visited.iter().any(|seen| Rc::ptr_eq(seen, &object)) {
                break;
            }

            if let Some(value) = object.borrow().attributes.get(key) {
                return Some(value.clone());
            }

            current = object.borrow().parent.clone();
            visited.push(object);
        }

        None
    }
}
