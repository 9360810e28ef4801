//! Structural validation: group annotated fields by containing class, check
//! the class shape (declared, partial, top-level, capability), then derive a
//! property name per field. Class-shape violations fail the whole group;
//! field-name violations fail only their field.

use crate::config::{CapabilityPolicy, GeneratorConfig};
use crate::resolve::{AnnotatedField, CandidateClass};
use crate::symbol::{Location, SymbolId, TypeRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Class does not derive from the reactive capability base.
    Capability,
    /// Class declaration missing entirely, or not declared partial.
    Partial,
    /// Class is nested inside another type.
    TopLevel,
    /// Derived or overridden property name is empty.
    FieldEmpty,
    /// Property name equals the backing field name.
    FieldDuplicate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    /// Class name for class-shape kinds, field or property name for field kinds.
    pub context: String,
    pub location: Location,
}

/// One generated property, fully determined.
/// `property_name` is non-empty and differs from `backing_field_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub backing_field_name: String,
    pub property_name: String,
    pub property_type: TypeRef,
}

/// All annotated fields of one class, in field declaration order.
#[derive(Debug, Clone)]
pub struct ClassGroup {
    pub class_id: SymbolId,
    pub class_name: String,
    pub fields: Vec<AnnotatedField>,
}

/// Stable grouping: group order is the order each class first appears among
/// the resolved fields; field order inside a group is declaration order.
pub fn group_by_class(fields: Vec<AnnotatedField>) -> Vec<ClassGroup> {
    let mut groups: Vec<ClassGroup> = Vec::new();
    for field in fields {
        match groups
            .iter_mut()
            .find(|g| g.class_id == field.containing_class)
        {
            Some(group) => group.fields.push(field),
            None => groups.push(ClassGroup {
                class_id: field.containing_class,
                class_name: field.containing_class_name.clone(),
                fields: vec![field],
            }),
        }
    }
    groups
}

/// Exactly one outcome per grouped class per pass.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Valid {
        class: CandidateClass,
        /// Specs for the fields that passed, in declaration order.
        specs: Vec<PropertySpec>,
        /// Per-field failures; each voids only its own field.
        field_failures: Vec<Failure>,
        /// Present under the lenient posture when the capability base is missing.
        capability_warning: Option<Failure>,
    },
    Invalid(Failure),
}

pub fn validate_group(
    group: &ClassGroup,
    classes: &[CandidateClass],
    config: &GeneratorConfig,
) -> ValidationOutcome {
    // 类记录按标识匹配；同一类的多个 partial 声明取首个记录。
    let Some(class) = classes.iter().find(|c| c.class_id == group.class_id) else {
        let location = group
            .fields
            .first()
            .map(|f| f.location.clone())
            .unwrap_or_else(Location::unknown);
        return ValidationOutcome::Invalid(Failure {
            kind: FailureKind::Partial,
            context: group.class_name.clone(),
            location,
        });
    };
    if !class.is_partial {
        return ValidationOutcome::Invalid(Failure {
            kind: FailureKind::Partial,
            context: class.name.clone(),
            location: class.location.clone(),
        });
    }
    if !class.is_top_level {
        return ValidationOutcome::Invalid(Failure {
            kind: FailureKind::TopLevel,
            context: class.name.clone(),
            location: class.location.clone(),
        });
    }
    let mut capability_warning = None;
    if !class.implements_capability {
        let failure = Failure {
            kind: FailureKind::Capability,
            context: class.name.clone(),
            location: class.location.clone(),
        };
        match config.capability_policy {
            CapabilityPolicy::Strict => return ValidationOutcome::Invalid(failure),
            CapabilityPolicy::Lenient => {
                tracing::warn!(class = %class.name, "capability base missing; generating anyway");
                capability_warning = Some(failure);
            }
        }
    }

    let mut specs = Vec::new();
    let mut field_failures = Vec::new();
    for field in &group.fields {
        match derive_property_name(&field.field_name, field.override_property_name.as_deref()) {
            Ok(property_name) => specs.push(PropertySpec {
                backing_field_name: field.field_name.clone(),
                property_name,
                property_type: field.declared_type.clone(),
            }),
            Err(NameFailure::Empty) => field_failures.push(Failure {
                kind: FailureKind::FieldEmpty,
                context: field.field_name.clone(),
                location: field.location.clone(),
            }),
            Err(NameFailure::Duplicate(name)) => field_failures.push(Failure {
                kind: FailureKind::FieldDuplicate,
                context: name,
                location: field.location.clone(),
            }),
        }
    }
    ValidationOutcome::Valid {
        class: class.clone(),
        specs,
        field_failures,
        capability_warning,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFailure {
    /// Nothing left after stripping, or an empty override.
    Empty,
    /// Name collides with the backing field; carries the offending name.
    Duplicate(String),
}

/// Property name for a backing field: the override verbatim when supplied,
/// otherwise the field name with a single leading underscore stripped and the
/// first remaining character uppercased (invariant casing, full expansion).
pub fn derive_property_name(
    field_name: &str,
    override_name: Option<&str>,
) -> Result<String, NameFailure> {
    let name = match override_name {
        Some(over) => over.to_owned(),
        None => {
            let stripped = field_name.strip_prefix('_').unwrap_or(field_name);
            let mut chars = stripped.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        }
    };
    if name.is_empty() {
        return Err(NameFailure::Empty);
    }
    if name == field_name {
        return Err(NameFailure::Duplicate(name));
    }
    Ok(name)
}
