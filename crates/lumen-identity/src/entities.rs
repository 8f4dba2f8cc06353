//! First-class identity types for declaration-graph nodes.
//!
//! Every node lives in an append-only arena owned by the compilation; these
//! ids are indices into those arenas and keep the node kinds apart.

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(u32);

        impl $name {
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            pub fn index(self) -> u32 {
                self.0
            }
        }
    };
}

define_entity_id! {
    /// Identity for a namespace declaration (e.g. `std`)
    pub struct NamespaceId;
}

define_entity_id! {
    /// Identity for a record (struct/class) declaration, including the record
    /// templated by a class template and explicit specializations
    pub struct RecordId;
}

define_entity_id! {
    /// Identity for a class template declaration (e.g. `vector`)
    pub struct TemplateId;
}

define_entity_id! {
    /// Identity for a template parameter (type or non-type)
    pub struct TemplateParamId;
}

define_entity_id! {
    /// Identity for a non-static data member
    pub struct FieldId;
}

define_entity_id! {
    /// Identity for a member function (always has a parent record)
    pub struct MethodId;
}

define_entity_id! {
    /// Identity for a parameter variable of a member function
    pub struct ParamId;
}

define_entity_id! {
    /// Identity for a static data member (e.g. `true_type::value`)
    pub struct StaticVarId;
}

define_entity_id! {
    /// Identity for a function template wrapping a member function
    pub struct FunctionTemplateId;
}

define_entity_id! {
    /// Identity for a typedef-like alias declaration (e.g. `float3`)
    pub struct AliasId;
}

define_entity_id! {
    /// Identity for an expression node (literals, parameter references, casts)
    pub struct ExprId;
}
