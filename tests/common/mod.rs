//! In-memory fake of the host compiler: a declaration list plus canned
//! semantic views, standing in for the parser and semantic model.
#![allow(dead_code)]

use std::collections::HashMap;

use rxprop::config::GeneratorConfig;
use rxprop::pipeline::{Generator, PassOutput};
use rxprop::resolve::PROPERTY_NAME_ARG;
use rxprop::symbol::{
    BoundAnnotation, ClassSymbol, FieldSymbol, KnownTypes, Location, SemanticModel, SymbolId,
    TypeRef,
};
use rxprop::syntax::{
    walk, AnnotationSyntax, ClassNode, FieldNode, NodeId, SyntaxNode, SyntaxReceiver,
};
use uuid::Uuid;

pub const CAPABILITY_NAME: &str = "ReactiveProperty.ReactivePropertyBase";
pub const SOURCE_FILE: &str = "Demo.cs";

pub fn init_tracing() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Debug, Clone, Copy)]
pub struct ClassShape {
    pub namespace: &'static str,
    pub partial: bool,
    pub nested: bool,
    pub derives_capability: bool,
}

impl Default for ClassShape {
    fn default() -> Self {
        Self {
            namespace: "Demo",
            partial: true,
            nested: false,
            derives_capability: true,
        }
    }
}

pub struct TestHost {
    nodes: Vec<SyntaxNode>,
    field_views: Vec<(NodeId, FieldSymbol)>,
    class_views: Vec<(NodeId, ClassSymbol)>,
    class_names: HashMap<SymbolId, String>,
    types: HashMap<String, TypeRef>,
    known: Option<KnownTypes>,
    next_line: u32,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            field_views: Vec::new(),
            class_views: Vec::new(),
            class_names: HashMap::new(),
            types: HashMap::new(),
            known: Some(KnownTypes {
                annotation: SymbolId::new(),
                capability: SymbolId::new(),
                capability_qualified_name: CAPABILITY_NAME.to_owned(),
            }),
            next_line: 0,
        }
    }

    /// Host that failed to bind the marker annotation and capability base.
    pub fn without_known_types() -> Self {
        let mut host = Self::new();
        host.known = None;
        host
    }

    fn known(&self) -> &KnownTypes {
        self.known.as_ref().expect("host has known types")
    }

    fn next_loc(&mut self) -> Location {
        self.next_line += 1;
        Location::new(SOURCE_FILE, self.next_line, 5)
    }

    /// Same display name, same type identity, within one host.
    fn type_ref(&mut self, display: &str) -> TypeRef {
        self.types
            .entry(display.to_owned())
            .or_insert_with(|| TypeRef::new(SymbolId::new(), display))
            .clone()
    }

    /// Mint a class identity without declaring it anywhere in the tree.
    pub fn undeclared_class(&mut self, name: &str) -> SymbolId {
        let class = SymbolId::new();
        self.class_names.insert(class, name.to_owned());
        class
    }

    pub fn declare_class(&mut self, name: &str, shape: ClassShape) -> SymbolId {
        let class = self.undeclared_class(name);
        self.redeclare_class(class, shape);
        class
    }

    /// Additional declaration of an existing class identity, as with a second
    /// partial fragment of the same class.
    pub fn redeclare_class(&mut self, class: SymbolId, shape: ClassShape) {
        let node = Uuid::new_v4();
        let location = self.next_loc();
        let name = self.class_names.get(&class).cloned().unwrap_or_default();
        let declared_capabilities = if shape.derives_capability {
            vec![self.known().capability]
        } else {
            Vec::new()
        };
        self.nodes.push(SyntaxNode::Class(ClassNode { id: node }));
        self.class_views.push((
            node,
            ClassSymbol {
                id: class,
                name,
                namespace: shape.namespace.to_owned(),
                is_partial: shape.partial,
                container_is_namespace: !shape.nested,
                declared_capabilities,
                location,
            },
        ));
    }

    /// Location of the first declaration of `class`.
    pub fn class_location(&self, class: SymbolId) -> Location {
        self.class_views
            .iter()
            .find(|(_, view)| view.id == class)
            .map(|(_, view)| view.location.clone())
            .expect("class is declared")
    }

    fn insert_field(
        &mut self,
        class: SymbolId,
        field: &str,
        ty: &str,
        written: &str,
        annotations: Vec<BoundAnnotation>,
        annotated_syntax: bool,
    ) -> Location {
        let node = Uuid::new_v4();
        let location = self.next_loc();
        let node_annotations = if annotated_syntax {
            vec![AnnotationSyntax::new(written)]
        } else {
            Vec::new()
        };
        let declared_type = self.type_ref(ty);
        let containing_class_name = self.class_names.get(&class).cloned().unwrap_or_default();
        self.nodes.push(SyntaxNode::Field(FieldNode {
            id: node,
            annotations: node_annotations,
        }));
        self.field_views.push((
            node,
            FieldSymbol {
                name: field.to_owned(),
                declared_type,
                containing_class: class,
                containing_class_name,
                annotations,
                location: location.clone(),
            },
        ));
        location
    }

    /// Field marked with the annotation, no override.
    pub fn declare_field(&mut self, class: SymbolId, field: &str, ty: &str) -> Location {
        let marker = BoundAnnotation::marker(self.known().annotation);
        self.insert_field(class, field, ty, "ReactiveProperty", vec![marker], true)
    }

    /// Field marked with the annotation plus a `PropertyName` override.
    pub fn declare_field_with_override(
        &mut self,
        class: SymbolId,
        field: &str,
        ty: &str,
        override_name: &str,
    ) -> Location {
        let annotation = BoundAnnotation {
            symbol: self.known().annotation,
            named_args: vec![(PROPERTY_NAME_ARG.to_owned(), override_name.to_owned())],
        };
        self.insert_field(class, field, ty, "ReactiveProperty", vec![annotation], true)
    }

    /// Annotation written under an alias; still binds to the marker symbol.
    pub fn declare_aliased_field(&mut self, class: SymbolId, field: &str, ty: &str) -> Location {
        let marker = BoundAnnotation::marker(self.known().annotation);
        self.insert_field(class, field, ty, "RP", vec![marker], true)
    }

    /// Field whose annotation binds to some other annotation type entirely.
    pub fn declare_foreign_annotated_field(
        &mut self,
        class: SymbolId,
        field: &str,
        ty: &str,
    ) -> Location {
        let foreign = BoundAnnotation::marker(SymbolId::new());
        self.insert_field(class, field, ty, "Obsolete", vec![foreign], true)
    }

    /// Field with no annotation at all; never a candidate.
    pub fn declare_plain_field(&mut self, class: SymbolId, field: &str, ty: &str) -> Location {
        self.insert_field(class, field, ty, "", Vec::new(), false)
    }

    /// Annotated field node the semantic model cannot resolve.
    pub fn declare_unresolvable_field(&mut self) {
        let node = Uuid::new_v4();
        self.nodes.push(SyntaxNode::Field(FieldNode {
            id: node,
            annotations: vec![AnnotationSyntax::new("ReactiveProperty")],
        }));
    }

    /// A node of no interest to the scanner.
    pub fn add_noise(&mut self) {
        self.nodes.push(SyntaxNode::Other(Uuid::new_v4()));
    }

    pub fn run(&self) -> PassOutput {
        self.run_with(GeneratorConfig::default())
    }

    pub fn run_with(&self, config: GeneratorConfig) -> PassOutput {
        init_tracing();
        let mut receiver = SyntaxReceiver::new();
        walk(&self.nodes, &mut receiver);
        Generator::new(config).execute(self, Some(&receiver))
    }

    /// The host forgot to install the listener.
    pub fn run_without_listener(&self) -> PassOutput {
        init_tracing();
        Generator::default().execute(self, None)
    }
}

impl SemanticModel for TestHost {
    fn resolve_field(&self, node: &FieldNode) -> Option<FieldSymbol> {
        self.field_views
            .iter()
            .find(|(id, _)| *id == node.id)
            .map(|(_, view)| view.clone())
    }

    fn resolve_class(&self, node: &ClassNode) -> Option<ClassSymbol> {
        self.class_views
            .iter()
            .find(|(id, _)| *id == node.id)
            .map(|(_, view)| view.clone())
    }

    fn known_types(&self) -> Option<&KnownTypes> {
        self.known.as_ref()
    }
}
