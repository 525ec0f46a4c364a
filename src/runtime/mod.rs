//! Variable runtime: an ordered record of declared variables.
//!
//! Declarations are kept in insertion order and looked up by a linear scan,
//! so the earliest declaration of a name always wins:
//! - `add` appends unconditionally, even if the name is already declared.
//!   The later entry is kept (and listed) but never found by name.
//! - `update` rewrites the first declaration with that name, in place.
//!
//! Names are interned; a lookup first probes the interner
//! (a name that was never interned cannot be declared) and then compares symbols.
//!
//! The runtime is plain owned data. Sharing one between threads means wrapping it in a lock.

use std::str::FromStr;

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Declared type of a variable.
///
/// This is a hint: it is never checked against the textual value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    Boolean,
    String,
    Number,
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VariableType::Boolean => "boolean",
            VariableType::String => "string",
            VariableType::Number => "number",
        })
    }
}

impl FromStr for VariableType {
    type Err = RuntimeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boolean" => Ok(VariableType::Boolean),
            "string" => Ok(VariableType::String),
            "number" => Ok(VariableType::Number),
            _ => Err(RuntimeErr::UnknownType(s.to_owned())),
        }
    }
}

/// A variable as seen by callers: a copy, detached from the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub ty: VariableType,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>, ty: VariableType) -> Self {
        Declaration {
            name: name.into(),
            value: value.into(),
            ty,
        }
    }
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} = {:?}", self.name, self.ty, self.value)
    }
}

#[derive(Debug)]
pub enum RuntimeErr {
    /// No declaration has this name.
    NotFound(String),
    /// The string does not name a variable type.
    UnknownType(String),
}

impl std::fmt::Display for RuntimeErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            RuntimeErr::NotFound(name) => write!(f, "no variable named {name:?}"),
            RuntimeErr::UnknownType(ty) => write!(f, "unknown variable type {ty:?}"),
        }
    }
}

impl std::error::Error for RuntimeErr {}

pub type RuntimeResult<T> = Result<T, RuntimeErr>;

#[derive(Debug, Clone)]
struct Slot {
    name: DefaultSymbol,
    value: String,
    ty: VariableType,
}

/// Runtime holds the declared variables, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Runtime {
    slots: Vec<Slot>,
    names: DefaultStringInterner,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable. Always appends.
    pub fn add(&mut self, name: &str, value: impl Into<String>, ty: VariableType) -> &mut Self {
        if self.position(name).is_some() {
            tracing::debug!("variable {:?} declared again; the new entry is shadowed", name);
        }
        let name = self.names.get_or_intern(name);
        self.slots.push(Slot {
            name,
            value: value.into(),
            ty,
        });
        self
    }

    /// Builder form of [`Runtime::add`].
    pub fn with_variable(
        mut self,
        name: &str,
        value: impl Into<String>,
        ty: VariableType,
    ) -> Self {
        self.add(name, value, ty);
        self
    }

    /// Overwrite the value and/or type of the first variable with the given name.
    ///
    /// A `None` leaves the corresponding field unchanged.
    pub fn update(
        &mut self,
        name: &str,
        value: Option<&str>,
        ty: Option<VariableType>,
    ) -> RuntimeResult<&mut Self> {
        let Some(idx) = self.position(name) else {
            tracing::debug!("update of undeclared variable {:?}", name);
            return Err(RuntimeErr::NotFound(name.to_owned()));
        };

        let slot = &mut self.slots[idx];
        if let Some(value) = value {
            slot.value = value.to_owned();
        }
        if let Some(ty) = ty {
            slot.ty = ty;
        }
        Ok(self)
    }

    /// The first variable with the given name.
    pub fn get(&self, name: &str) -> Option<Declaration> {
        self.position(name).map(|idx| self.declaration(&self.slots[idx]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// All variables, in declaration order, including shadowed duplicates.
    pub fn variables(&self) -> Vec<Declaration> {
        self.slots.iter().map(|slot| self.declaration(slot)).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let symbol = self.names.get(name)?;
        self.slots.iter().position(|slot| slot.name == symbol)
    }

    fn declaration(&self, slot: &Slot) -> Declaration {
        let name = self
            .names
            .resolve(slot.name)
            .expect("internal error: variable name was not interned");
        Declaration::new(name, slot.value.as_str(), slot.ty)
    }
}
