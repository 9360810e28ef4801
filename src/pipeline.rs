//! Pass orchestration: scan results in, fragments and diagnostics out. One
//! synchronous pass per invocation; nothing is carried between passes.

use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::diag::{self, Diagnostic};
use crate::emit::{render_fragment, SourceFragment};
use crate::resolve::{resolve_classes, resolve_fields};
use crate::symbol::SemanticModel;
use crate::syntax::SyntaxReceiver;
use crate::validate::{group_by_class, validate_group, ValidationOutcome};

/// Everything one pass produces. Fragments and diagnostics are both in
/// class-group order; the host pushes them to its own surfaces.
#[derive(Debug, Default, Serialize)]
pub struct PassOutput {
    pub fragments: Vec<SourceFragment>,
    pub diagnostics: Vec<Diagnostic>,
}

/// One generation pass over a host compilation view.
#[derive(Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Run the pass. `receiver` is the listener the host populated during its
    /// tree walk; `None` means the host never installed one, which aborts the
    /// pass with the single fatal diagnostic.
    pub fn execute<M>(&self, model: &M, receiver: Option<&SyntaxReceiver>) -> PassOutput
    where
        M: SemanticModel,
    {
        let mut output = PassOutput::default();
        let Some(receiver) = receiver else {
            tracing::error!("declaration-tree listener missing; aborting pass");
            output.diagnostics.push(diag::no_listener());
            return output;
        };
        let Some(known) = model.known_types() else {
            // 标记注解/能力基类未绑定：没有字段能匹配，本趟静默产出为空。
            tracing::debug!("known types unbound; pass produces nothing");
            return output;
        };

        let fields = resolve_fields(model, receiver, known);
        let classes = resolve_classes(model, receiver, known);
        tracing::debug!(
            candidate_fields = receiver.candidate_fields().len(),
            annotated = fields.len(),
            classes = classes.len(),
            "resolution complete"
        );

        for group in group_by_class(fields) {
            let outcome = validate_group(&group, &classes, &self.config);
            if let ValidationOutcome::Valid { class, specs, .. } = &outcome {
                if !specs.is_empty() {
                    output
                        .fragments
                        .push(render_fragment(class, specs, &known.capability_qualified_name));
                }
            }
            diag::report_outcome(&outcome, &mut output.diagnostics);
        }
        tracing::debug!(
            fragments = output.fragments.len(),
            diagnostics = output.diagnostics.len(),
            "pass complete"
        );
        output
    }
}
