//! Entity construction and weak registration into the external index.
//!
//! Thin shim over the surrounding AST model: entities are built from their
//! constituent parts, registered under a caller-supplied stable identifier,
//! and handed back to the caller; the index only ever holds a non-owning
//! reference. The kind tag set is closed; the broader model dispatches on
//! [`Entity::kind`].

use crate::token::Token;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use thiserror::Error;

/// Closed kind tag for entity dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Function,
    FunctionParameter,
}

/// One node of the produced model. Every variant reports a fixed kind.
pub trait Entity {
    fn kind(&self) -> EntityKind;
    fn name(&self) -> &str;
}

/// Stable identifier an entity is registered under (e.g. a mangled name).
pub type EntityId = String;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("entity id '{0}' is already registered")]
    DuplicateId(EntityId),
}

/// The external entity index: stable id -> weak reference.
///
/// Registration goes through a shared reference (the index is passed around
/// immutably by the model layer), so the map lives behind a `RefCell`. The
/// index never owns entities and never manages their lifetime; a looked-up id
/// resolves only while the caller still holds the entity.
#[derive(Default)]
pub struct EntityIndex {
    entities: RefCell<HashMap<EntityId, Weak<dyn Entity>>>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` under `id` as a non-owning reference.
    pub fn register(&self, id: EntityId, entity: Weak<dyn Entity>) -> Result<(), IndexError> {
        let mut entities = self.entities.borrow_mut();
        if entities.contains_key(&id) {
            return Err(IndexError::DuplicateId(id));
        }
        entities.insert(id, entity);
        Ok(())
    }

    /// Resolve an id to the registered entity, if it is still alive.
    pub fn lookup(&self, id: &str) -> Option<Rc<dyn Entity>> {
        self.entities.borrow().get(id).and_then(Weak::upgrade)
    }

    pub fn len(&self) -> usize {
        self.entities.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.borrow().is_empty()
    }
}

/// A type as spelled in the source. The full type model belongs to the
/// surrounding layer; this carries what the shim needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppType {
    spelling: String,
}

impl CppType {
    pub fn new(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
        }
    }

    pub fn spelling(&self) -> &str {
        &self.spelling
    }
}

/// An expression as spelled in the source (default arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppExpression {
    spelling: String,
}

impl CppExpression {
    pub fn new(spelling: impl Into<String>) -> Self {
        Self {
            spelling: spelling.into(),
        }
    }

    pub fn spelling(&self) -> &str {
        &self.spelling
    }
}

/// A single function parameter.
#[derive(Debug)]
pub struct FunctionParameter {
    name: String,
    param_type: CppType,
    default_value: Option<CppExpression>,
}

impl FunctionParameter {
    /// Build a parameter, register it in `index` under `id`, and return
    /// ownership to the caller.
    pub fn build(
        index: &EntityIndex,
        id: EntityId,
        name: impl Into<String>,
        param_type: CppType,
        default_value: Option<CppExpression>,
    ) -> Result<Rc<Self>, IndexError> {
        let result = Rc::new(Self {
            name: name.into(),
            param_type,
            default_value,
        });
        // Downgrade first, then unsize; annotating the downgrade itself would
        // make it expect an already-unsized Rc.
        let weak = Rc::downgrade(&result);
        let weak: Weak<dyn Entity> = weak;
        index.register(id, weak)?;
        Ok(result)
    }

    pub fn param_type(&self) -> &CppType {
        &self.param_type
    }

    pub fn default_value(&self) -> Option<&CppExpression> {
        self.default_value.as_ref()
    }
}

impl Entity for FunctionParameter {
    fn kind(&self) -> EntityKind {
        EntityKind::FunctionParameter
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A function declaration carrying its repaired token sequence.
#[derive(Debug)]
pub struct Function {
    name: String,
    tokens: Vec<Token>,
}

impl Function {
    /// Build a function, register it in `index` under `id`, and return
    /// ownership to the caller. `tokens` is the corrected sequence produced
    /// by [`crate::tokenize::CursorTokens`].
    pub fn build(
        index: &EntityIndex,
        id: EntityId,
        name: impl Into<String>,
        tokens: Vec<Token>,
    ) -> Result<Rc<Self>, IndexError> {
        let result = Rc::new(Self {
            name: name.into(),
            tokens,
        });
        let weak = Rc::downgrade(&result);
        let weak: Weak<dyn Entity> = weak;
        index.register(id, weak)?;
        Ok(result)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl Entity for Function {
    fn kind(&self) -> EntityKind {
        EntityKind::Function
    }

    fn name(&self) -> &str {
        &self.name
    }
}
