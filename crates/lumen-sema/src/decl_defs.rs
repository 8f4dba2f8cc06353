// decl_defs.rs
//
// Declaration definitions stored in the DeclRegistry.
//
// These are the node kinds of the declaration graph: namespaces, records,
// class templates and their parameters, fields, member functions and their
// parameters, static data members, function templates and aliases.

use lumen_identity::{
    AliasId, ExprId, FieldId, FunctionTemplateId, MethodId, NamespaceId, ParamId, RecordId,
    StaticVarId, Symbol, TemplateId, TemplateParamId,
};

use crate::intrinsics::IntrinsicAttr;
use crate::type_arena::{TemplateArgVec, TypeId};

/// A scope that owns member declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclContext {
    TranslationUnit,
    Namespace(NamespaceId),
    Record(RecordId),
}

/// Reference to any declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclRef {
    Namespace(NamespaceId),
    Record(RecordId),
    Template(TemplateId),
    Field(FieldId),
    Method(MethodId),
    StaticVar(StaticVarId),
    FunctionTemplate(FunctionTemplateId),
    Alias(AliasId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverloadedOperator {
    Subscript,
}

impl OverloadedOperator {
    pub fn spelling(self) -> &'static str {
        match self {
            OverloadedOperator::Subscript => "operator[]",
        }
    }
}

/// Name of a declaration: an identifier or an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclName {
    Ident(Symbol),
    Operator(OverloadedOperator),
}

impl DeclName {
    pub fn as_ident(self) -> Option<Symbol> {
        match self {
            DeclName::Ident(sym) => Some(sym),
            DeclName::Operator(_) => None,
        }
    }
}

impl From<Symbol> for DeclName {
    fn from(sym: Symbol) -> Self {
        DeclName::Ident(sym)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Struct,
    Class,
}

impl TagKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TagKind::Struct => "struct",
            TagKind::Class => "class",
        }
    }

    /// Access members get when nothing sets it explicitly
    pub fn default_access(self) -> AccessSpecifier {
        match self {
            TagKind::Struct => AccessSpecifier::Public,
            TagKind::Class => AccessSpecifier::Private,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    pub fn keyword(self) -> &'static str {
        match self {
            AccessSpecifier::Public => "public",
            AccessSpecifier::Protected => "protected",
            AccessSpecifier::Private => "private",
        }
    }
}

/// Definition progress of a record.
///
/// `Declared -> BeingDefined -> Complete`; members may only be attached
/// while `BeingDefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionState {
    Declared,
    BeingDefined,
    Complete,
}

#[derive(Debug, Clone)]
pub struct NamespaceDef {
    pub id: NamespaceId,
    pub name: Symbol,
    pub parent: DeclContext,
    pub is_implicit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseSpecifier {
    pub ty: TypeId,
    pub access: AccessSpecifier,
    pub is_virtual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecializationKind {
    Explicit,
}

/// Ties a specialization record to its primary template.
#[derive(Debug, Clone)]
pub struct SpecializationInfo {
    pub template: TemplateId,
    pub kind: SpecializationKind,
    /// Parameters the pattern is written in terms of
    pub params: Vec<TemplateParamId>,
    /// Canonical argument pattern, e.g. `<T, const T>`
    pub args: TemplateArgVec,
}

#[derive(Debug, Clone)]
pub struct RecordDef {
    pub id: RecordId,
    pub name: Symbol,
    pub tag: TagKind,
    pub semantic_context: DeclContext,
    pub lexical_context: Option<DeclContext>,
    /// None while type creation is delayed and nothing has faulted it in
    pub type_id: Option<TypeId>,
    pub described_template: Option<TemplateId>,
    pub specialization_of: Option<SpecializationInfo>,
    pub state: DefinitionState,
    pub is_implicit: bool,
    pub is_free_standing: bool,
    pub bases: Vec<BaseSpecifier>,
    pub fields: Vec<FieldId>,
    pub methods: Vec<MethodId>,
    pub static_vars: Vec<StaticVarId>,
    pub function_templates: Vec<FunctionTemplateId>,
}

impl RecordDef {
    pub fn is_complete(&self) -> bool {
        self.state == DefinitionState::Complete
    }

    pub fn is_being_defined(&self) -> bool {
        self.state == DefinitionState::BeingDefined
    }
}

#[derive(Debug, Clone)]
pub struct TemplateDef {
    pub id: TemplateId,
    pub name: Symbol,
    pub context: DeclContext,
    pub lexical_context: Option<DeclContext>,
    pub params: Vec<TemplateParamId>,
    pub record: RecordId,
    /// `name<params...>` once materialized
    pub injected_specialization: Option<TypeId>,
    /// Explicit specializations in registration order
    pub specializations: Vec<RecordId>,
    pub is_implicit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateParamKind {
    Type { default: Option<TypeId> },
    NonType { ty: TypeId, default: Option<ExprId> },
}

#[derive(Debug, Clone)]
pub struct TemplateParamDef {
    pub id: TemplateParamId,
    pub name: Symbol,
    pub depth: u32,
    pub index: u32,
    pub kind: TemplateParamKind,
    pub context: DeclContext,
}

impl TemplateParamDef {
    pub fn is_type(&self) -> bool {
        matches!(self.kind, TemplateParamKind::Type { .. })
    }

    pub fn has_default(&self) -> bool {
        match self.kind {
            TemplateParamKind::Type { default } => default.is_some(),
            TemplateParamKind::NonType { default, .. } => default.is_some(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub id: FieldId,
    pub name: Symbol,
    pub record: RecordId,
    pub ty: TypeId,
    pub access: AccessSpecifier,
    pub is_implicit: bool,
    pub is_mutable: bool,
    pub init: Option<ExprId>,
}

#[derive(Debug, Clone)]
pub struct MethodDef {
    pub id: MethodId,
    pub name: DeclName,
    pub record: RecordId,
    pub lexical_context: DeclContext,
    /// Function type (parameters, result, const qualifier)
    pub signature: TypeId,
    pub access: AccessSpecifier,
    pub params: Vec<ParamId>,
    /// One slot per prototype parameter, each filled exactly once
    pub prototype: Vec<Option<ParamId>>,
    pub attrs: Vec<IntrinsicAttr>,
    pub described_template: Option<FunctionTemplateId>,
}

impl MethodDef {
    pub fn intrinsic(&self) -> Option<&IntrinsicAttr> {
        self.attrs.first()
    }
}

#[derive(Debug, Clone)]
pub struct ParamDef {
    pub id: ParamId,
    pub name: Symbol,
    pub ty: TypeId,
    pub method: MethodId,
    /// Function prototype scope depth
    pub scope_depth: u32,
    /// Position in the parameter list
    pub scope_index: u32,
}

#[derive(Debug, Clone)]
pub struct StaticVarDef {
    pub id: StaticVarId,
    pub name: Symbol,
    pub record: RecordId,
    pub ty: TypeId,
    pub init: Option<ExprId>,
    pub is_constexpr: bool,
    pub access: AccessSpecifier,
}

#[derive(Debug, Clone)]
pub struct FunctionTemplateDef {
    pub id: FunctionTemplateId,
    pub name: DeclName,
    pub record: RecordId,
    pub lexical_context: DeclContext,
    pub params: Vec<TemplateParamId>,
    pub method: MethodId,
    pub access: AccessSpecifier,
}

#[derive(Debug, Clone)]
pub struct AliasDef {
    pub id: AliasId,
    pub name: Symbol,
    pub context: DeclContext,
    /// Aliased type as written
    pub target: TypeId,
    /// Sugared type naming this alias
    pub type_id: TypeId,
    pub is_implicit: bool,
}
