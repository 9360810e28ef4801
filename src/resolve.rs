//! Semantic resolution: bind scanned candidates through the host model and
//! keep only fields whose annotation is *the* marker annotation, matched by
//! symbol identity.

use crate::symbol::{KnownTypes, Location, SemanticModel, SymbolId, TypeRef};
use crate::syntax::SyntaxReceiver;

/// Named argument carrying the optional property-name override.
pub const PROPERTY_NAME_ARG: &str = "PropertyName";

/// A field that opted into generation, fully resolved.
#[derive(Debug, Clone)]
pub struct AnnotatedField {
    pub field_name: String,
    pub declared_type: TypeRef,
    pub containing_class: SymbolId,
    pub containing_class_name: String,
    pub override_property_name: Option<String>,
    pub location: Location,
}

/// A class declaration with the three structural answers the validator needs.
#[derive(Debug, Clone)]
pub struct CandidateClass {
    pub class_id: SymbolId,
    pub name: String,
    pub namespace: String,
    pub is_partial: bool,
    pub is_top_level: bool,
    pub implements_capability: bool,
    pub location: Location,
}

/// Bind every candidate field and keep those marked with the known annotation.
/// The marker is non-repeatable, so the first identity match wins; the
/// override name is taken verbatim from its `PropertyName` argument.
pub fn resolve_fields(
    model: &impl SemanticModel,
    receiver: &SyntaxReceiver,
    known: &KnownTypes,
) -> Vec<AnnotatedField> {
    let mut kept = Vec::new();
    for node in receiver.candidate_fields() {
        let Some(field) = model.resolve_field(node) else {
            tracing::warn!(node = %node.id, "candidate field has no semantic view; skipped");
            continue;
        };
        let Some(matched) = field
            .annotations
            .iter()
            .find(|a| a.symbol == known.annotation)
        else {
            continue;
        };
        let override_property_name = matched.named_arg(PROPERTY_NAME_ARG).map(str::to_owned);
        kept.push(AnnotatedField {
            field_name: field.name,
            declared_type: field.declared_type,
            containing_class: field.containing_class,
            containing_class_name: field.containing_class_name,
            override_property_name,
            location: field.location,
        });
    }
    kept
}

/// Bind every candidate class. Later stages match these against field groups
/// by class identity; a class that fails to resolve simply has no record,
/// which the validator reports as a missing partial declaration.
pub fn resolve_classes(
    model: &impl SemanticModel,
    receiver: &SyntaxReceiver,
    known: &KnownTypes,
) -> Vec<CandidateClass> {
    let mut classes = Vec::new();
    for node in receiver.candidate_classes() {
        let Some(class) = model.resolve_class(node) else {
            tracing::warn!(node = %node.id, "candidate class has no semantic view; skipped");
            continue;
        };
        classes.push(CandidateClass {
            class_id: class.id,
            name: class.name,
            namespace: class.namespace,
            is_partial: class.is_partial,
            is_top_level: class.container_is_namespace,
            implements_capability: class.declared_capabilities.contains(&known.capability),
            location: class.location,
        });
    }
    classes
}
