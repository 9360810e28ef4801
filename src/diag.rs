//! Diagnostic reporting: map validation outcomes to coded, located records.
//! Codes are load-bearing; external tooling filters by them, so the table
//! below is frozen and class-failure numbering is never reassigned.

use serde::Serialize;

use crate::symbol::Location;
use crate::validate::{Failure, FailureKind, ValidationOutcome};

pub const CODE_CLASS_GENERATED: &str = "RPG000";
pub const CODE_NO_LISTENER: &str = "RPG001";
pub const CODE_CAPABILITY: &str = "RPG100";
pub const CODE_PARTIAL: &str = "RPG101";
pub const CODE_TOP_LEVEL: &str = "RPG102";
pub const CODE_FIELD_EMPTY: &str = "RPG103";
pub const CODE_FIELD_DUPLICATE: &str = "RPG104";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One report to the host's diagnostic surface. Append-only within a pass;
/// the core never deduplicates (the host may).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

fn failure_code(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Capability => CODE_CAPABILITY,
        FailureKind::Partial => CODE_PARTIAL,
        FailureKind::TopLevel => CODE_TOP_LEVEL,
        FailureKind::FieldEmpty => CODE_FIELD_EMPTY,
        FailureKind::FieldDuplicate => CODE_FIELD_DUPLICATE,
    }
}

fn failure_message(failure: &Failure) -> String {
    let ctx = &failure.context;
    match failure.kind {
        FailureKind::Capability => format!("{ctx} should derive from the reactive capability base"),
        FailureKind::Partial => format!("{ctx} must be declared partial"),
        FailureKind::TopLevel => format!("{ctx} must be at top level"),
        FailureKind::FieldEmpty => format!("empty property name derived from field {ctx}"),
        FailureKind::FieldDuplicate => format!("property name {ctx} same as backing field"),
    }
}

pub fn error(failure: &Failure) -> Diagnostic {
    Diagnostic {
        code: failure_code(failure.kind),
        severity: Severity::Error,
        message: failure_message(failure),
        location: failure.location.clone(),
    }
}

pub fn warning(failure: &Failure) -> Diagnostic {
    Diagnostic {
        code: failure_code(failure.kind),
        severity: Severity::Warning,
        message: failure_message(failure),
        location: failure.location.clone(),
    }
}

/// Fatal: the host never installed the declaration-tree listener. The one
/// diagnostic without a source location.
pub fn no_listener() -> Diagnostic {
    Diagnostic {
        code: CODE_NO_LISTENER,
        severity: Severity::Error,
        message: "declaration-tree listener was never installed; cannot collect candidates".into(),
        location: Location::unknown(),
    }
}

pub fn class_generated(class_name: &str, location: Location) -> Diagnostic {
    Diagnostic {
        code: CODE_CLASS_GENERATED,
        severity: Severity::Info,
        message: format!("successfully generated reactive properties for {class_name}"),
        location,
    }
}

/// Append one class outcome's diagnostics in the fixed order: capability
/// warning, per-field failures in field order, then the success report. The
/// success report is only issued when the class actually produced a property.
pub fn report_outcome(outcome: &ValidationOutcome, out: &mut Vec<Diagnostic>) {
    match outcome {
        ValidationOutcome::Invalid(failure) => out.push(error(failure)),
        ValidationOutcome::Valid {
            class,
            specs,
            field_failures,
            capability_warning,
        } => {
            if let Some(failure) = capability_warning {
                out.push(warning(failure));
            }
            for failure in field_failures {
                out.push(error(failure));
            }
            if !specs.is_empty() {
                out.push(class_generated(&class.name, class.location.clone()));
            }
        }
    }
}
