//! Semantic view of the host compilation: symbol identities and the
//! resolution service the host provides. The core never string-matches type
//! names; annotation and capability checks are identity comparisons on the
//! `SymbolId`s the host minted.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::syntax::{ClassNode, FieldNode};

/// Opaque semantic identity minted by the host's semantic model.
///
/// Compared only by equality/hash. Two partial declarations of one class
/// resolve to the same id; an aliased annotation spelling resolves to the
/// annotation's one id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SymbolId(Uuid);

impl SymbolId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Bound type identity plus the host-language display text used verbatim in
/// emitted fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    pub id: SymbolId,
    pub display: String,
}

impl TypeRef {
    pub fn new(id: SymbolId, display: impl Into<String>) -> Self {
        Self {
            id,
            display: display.into(),
        }
    }
}

/// Source position of a declaration, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Sentinel for diagnostics with no backing tree (listener never installed).
    pub fn unknown() -> Self {
        Self {
            file: String::new(),
            line: 0,
            column: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.file.is_empty()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "<unknown>")
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        }
    }
}

/// An annotation occurrence after binding: the annotation type's identity plus
/// its named arguments, verbatim.
#[derive(Debug, Clone)]
pub struct BoundAnnotation {
    pub symbol: SymbolId,
    pub named_args: Vec<(String, String)>,
}

impl BoundAnnotation {
    pub fn marker(symbol: SymbolId) -> Self {
        Self {
            symbol,
            named_args: Vec::new(),
        }
    }

    pub fn named_arg(&self, key: &str) -> Option<&str> {
        self.named_args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A field declaration after binding.
#[derive(Debug, Clone)]
pub struct FieldSymbol {
    pub name: String,
    pub declared_type: TypeRef,
    pub containing_class: SymbolId,
    pub containing_class_name: String,
    pub annotations: Vec<BoundAnnotation>,
    pub location: Location,
}

/// A class declaration after binding. The three structural queries the
/// validator needs are answered as data on this record.
#[derive(Debug, Clone)]
pub struct ClassSymbol {
    pub id: SymbolId,
    pub name: String,
    pub namespace: String,
    pub is_partial: bool,
    /// Immediate container is a namespace, not another type.
    pub container_is_namespace: bool,
    /// Base type plus implemented capabilities, by identity.
    pub declared_capabilities: Vec<SymbolId>,
    pub location: Location,
}

/// Host-bound identities of the marker annotation and the runtime capability
/// base, looked up once per pass.
#[derive(Debug, Clone)]
pub struct KnownTypes {
    pub annotation: SymbolId,
    pub capability: SymbolId,
    /// Qualified display name of the capability base, spliced into fragments.
    pub capability_qualified_name: String,
}

/// Resolution service the host compiler provides. `None` from a resolver means
/// the node has no semantic view; the core skips it.
pub trait SemanticModel {
    fn resolve_field(&self, node: &FieldNode) -> Option<FieldSymbol>;
    fn resolve_class(&self, node: &ClassNode) -> Option<ClassSymbol>;
    /// `None` when the host could not bind the marker annotation or the
    /// capability base; no field can match and the pass produces nothing.
    fn known_types(&self) -> Option<&KnownTypes>;
}
