//! Pre-semantic view of the declaration tree. The host walks its tree and
//! feeds every node to a [`SyntaxListener`]; the receiver keeps candidates in
//! declaration order, which fixes diagnostic and emission order downstream.

use uuid::Uuid;

/// Syntax-node identity within one walk.
pub type NodeId = Uuid;

/// An annotation as written, before binding. The spelling may be an alias and
/// is never matched by the core.
#[derive(Debug, Clone)]
pub struct AnnotationSyntax {
    pub written_name: String,
}

impl AnnotationSyntax {
    pub fn new(written_name: impl Into<String>) -> Self {
        Self {
            written_name: written_name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldNode {
    pub id: NodeId,
    pub annotations: Vec<AnnotationSyntax>,
}

#[derive(Debug, Clone)]
pub struct ClassNode {
    pub id: NodeId,
}

/// The node shapes the walk distinguishes; everything else is `Other`.
#[derive(Debug, Clone)]
pub enum SyntaxNode {
    Field(FieldNode),
    Class(ClassNode),
    Other(NodeId),
}

/// Walk callback, invoked once per declaration-tree node.
pub trait SyntaxListener {
    fn visit_node(&mut self, node: &SyntaxNode);
}

/// Collects candidate declarations during the walk: every field carrying at
/// least one annotation (any annotation) and every class (any modifiers).
/// Which annotation a field carries is decided after binding, not here;
/// spellings are unreliable under aliasing.
#[derive(Debug, Default)]
pub struct SyntaxReceiver {
    candidate_fields: Vec<FieldNode>,
    candidate_classes: Vec<ClassNode>,
}

impl SyntaxReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate_fields(&self) -> &[FieldNode] {
        &self.candidate_fields
    }

    pub fn candidate_classes(&self) -> &[ClassNode] {
        &self.candidate_classes
    }
}

impl SyntaxListener for SyntaxReceiver {
    fn visit_node(&mut self, node: &SyntaxNode) {
        match node {
            SyntaxNode::Field(field) if !field.annotations.is_empty() => {
                self.candidate_fields.push(field.clone());
            }
            SyntaxNode::Class(class) => {
                self.candidate_classes.push(class.clone());
            }
            _ => {}
        }
    }
}

/// Drive a listener over an already-flattened node sequence.
pub fn walk<'a, L>(nodes: impl IntoIterator<Item = &'a SyntaxNode>, listener: &mut L)
where
    L: SyntaxListener,
{
    for node in nodes {
        listener.visit_node(node);
    }
}
