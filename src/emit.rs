//! Synthesis: render one partial-class fragment per validated class. Pure
//! text construction; the same specs always render byte-identical output.

use serde::Serialize;
use smallvec::SmallVec;

use crate::resolve::CandidateClass;
use crate::symbol::{SymbolId, TypeRef};
use crate::validate::PropertySpec;

/// One unit of generated source, keyed by class identity. The host owns
/// merging fragments into its compilation; the core emits at most one per
/// class per pass and never reads prior fragments back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFragment {
    pub class_id: SymbolId,
    /// Host-facing name for the generated unit, `{ClassName}_reactiveProperty`.
    pub hint_name: String,
    pub text: String,
}

#[derive(Default)]
struct Writer {
    out: String,
}

impl Writer {
    fn line(&mut self, indent: usize, text: &str) {
        for _ in 0..indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

/// Render the fragment for one class: accessors in field declaration order,
/// the any-property registration, then one typed registration per distinct
/// property type in first-appearance order.
pub fn render_fragment(
    class: &CandidateClass,
    specs: &[PropertySpec],
    capability: &str,
) -> SourceFragment {
    let mut w = Writer::default();
    let wrapped = !class.namespace.is_empty();
    let base = usize::from(wrapped);

    w.line(0, "using System;");
    w.blank();
    if wrapped {
        w.line(0, &format!("namespace {}", class.namespace));
        w.line(0, "{");
    }
    w.line(
        base,
        &format!("public partial class {} : {}", class.name, capability),
    );
    w.line(base, "{");
    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        accessor(&mut w, base + 1, spec);
    }
    if !specs.is_empty() {
        w.blank();
    }
    register_any(&mut w, base + 1);
    for (ty, members) in group_by_type(specs) {
        w.blank();
        register_typed(&mut w, base + 1, ty, &members);
    }
    w.line(base, "}");
    if wrapped {
        w.line(0, "}");
    }

    SourceFragment {
        class_id: class.class_id,
        hint_name: format!("{}_reactiveProperty", class.name),
        text: w.out,
    }
}

/// Getter returns the backing field; setter stores and announces only when the
/// new value differs under the type's default equality.
fn accessor(w: &mut Writer, at: usize, spec: &PropertySpec) {
    let field = &spec.backing_field_name;
    let prop = &spec.property_name;
    w.line(
        at,
        &format!("public {} {}", spec.property_type.display, prop),
    );
    w.line(at, "{");
    w.line(at + 1, "get");
    w.line(at + 1, "{");
    w.line(at + 2, &format!("return this.{field};"));
    w.line(at + 1, "}");
    w.line(at + 1, "set");
    w.line(at + 1, "{");
    w.line(at + 2, &format!("if (this.{field} != value)"));
    w.line(at + 2, "{");
    w.line(at + 3, &format!("this.{field} = value;"));
    w.line(at + 3, &format!("NotifyChange(nameof({prop}));"));
    w.line(at + 2, "}");
    w.line(at + 1, "}");
    w.line(at, "}");
}

/// Zero-argument callback on every announcement, whatever the property.
fn register_any(w: &mut Writer, at: usize) {
    w.line(at, "public void RegisterReactiveAction(Action action)");
    w.line(at, "{");
    w.line(at + 1, "AddToDisposeBag(Changed");
    w.line(at + 2, ".Subscribe(p => action()));");
    w.line(at, "}");
}

/// Name-filtered registration for one property type. The switch over property
/// names is total for this type's properties; an unmatched name is a
/// programming error and throws rather than being dropped.
fn register_typed(w: &mut Writer, at: usize, ty: &TypeRef, members: &[&PropertySpec]) {
    w.line(
        at,
        &format!(
            "public void RegisterReactiveAction(Action<{}> action, string propertyName)",
            ty.display
        ),
    );
    w.line(at, "{");
    w.line(at + 1, "AddToDisposeBag(Changed");
    w.line(at + 2, ".Where(p => p == propertyName)");
    w.line(at + 2, ".Select(p => propertyName switch");
    w.line(at + 2, "{");
    for member in members {
        w.line(
            at + 3,
            &format!(
                "\"{}\" => this.{},",
                member.property_name, member.backing_field_name
            ),
        );
    }
    w.line(at + 3, "_ => throw new ArgumentOutOfRangeException(propertyName)");
    w.line(at + 2, "})");
    w.line(at + 2, ".Subscribe(v => action(v)));");
    w.line(at, "}");
}

fn group_by_type(specs: &[PropertySpec]) -> Vec<(&TypeRef, SmallVec<[&PropertySpec; 4]>)> {
    let mut groups: Vec<(&TypeRef, SmallVec<[&PropertySpec; 4]>)> = Vec::new();
    for spec in specs {
        match groups
            .iter_mut()
            .find(|(ty, _)| ty.id == spec.property_type.id)
        {
            Some((_, members)) => members.push(spec),
            None => {
                let mut members: SmallVec<[&PropertySpec; 4]> = SmallVec::new();
                members.push(spec);
                groups.push((&spec.property_type, members));
            }
        }
    }
    groups
}
