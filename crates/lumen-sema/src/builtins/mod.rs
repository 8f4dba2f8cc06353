//! Built-in type synthesis.
//!
//! Populates a [`CompilationDb`] with the declarations a shader front end
//! expects to exist before any user code is analyzed:
//! - `vector` and `matrix` class templates with subscript operators
//! - generic resource types (`Buffer<T>`, `Texture2DMS<T, count>`, ...)
//! - non-generic handle records (`SamplerState`, ...)
//! - `std::true_type`, `std::false_type` and `std::is_same`
//!
//! Shorthand spellings (`float3`, `int2x4`) are resolved lazily through
//! [`BuiltinDecls::resolve_shorthand`], which creates each alias once.

mod aliases;
mod containers;
mod handle_field;
mod member_operator;
mod record_builder;
mod shorthand;
mod type_traits;

#[cfg(test)]
mod tests;

pub use aliases::{
    build_matrix_shorthand_alias, build_vector_shorthand_alias, matrix_shorthand_name,
    vector_shorthand_name,
};
pub use containers::{
    ARRAY_EXEMPT_PREFIXES, DEFAULT_COUNT, DEFAULT_DIMENSION, build_generic_handle_type,
    build_handle_record, build_matrix_template, build_vector_template, is_array_exempt,
};
pub use handle_field::{add_handle_field, lookup_handle_field, verify_handle_lookup};
pub use member_operator::{add_member_operator, build_function_template_from_method};
pub use record_builder::{
    Defining, FIRST_TEMPLATE_DEPTH, GenericContainerDecl, Materialized, ParamsDeclared,
    ShellCreated, TemplateRecordBuilder,
};
pub use shorthand::{MAX_DIMENSION, parse_matrix_shorthand, parse_vector_shorthand};
pub use type_traits::{TypeTraitDecls, build_type_equality_support, is_same, trait_value};

use lumen_identity::{AliasId, RecordId, ScalarType, Symbol};
use rustc_hash::FxHashMap;
use smallvec::smallvec;

use crate::compilation_db::CompilationDb;
use crate::type_arena::{TemplateArg, TypeId};

/// Default element type of a generic handle type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultElement {
    None,
    /// `vector<float, 4>`
    Float4,
}

/// One entry of the generic handle type catalogue
#[derive(Debug, Clone, Copy)]
pub struct GenericHandleSpec {
    pub name: &'static str,
    pub param_count: u8,
    pub default_element: DefaultElement,
}

const fn spec(name: &'static str, param_count: u8, default_element: DefaultElement) -> GenericHandleSpec {
    GenericHandleSpec {
        name,
        param_count,
        default_element,
    }
}

/// Generic handle types, in installation order
pub const GENERIC_HANDLE_TYPES: &[GenericHandleSpec] = &[
    spec("Buffer", 1, DefaultElement::Float4),
    spec("RWBuffer", 1, DefaultElement::Float4),
    spec("StructuredBuffer", 1, DefaultElement::None),
    spec("RWStructuredBuffer", 1, DefaultElement::None),
    spec("AppendStructuredBuffer", 1, DefaultElement::None),
    spec("ConsumeStructuredBuffer", 1, DefaultElement::None),
    spec("Texture1D", 1, DefaultElement::Float4),
    spec("Texture1DArray", 1, DefaultElement::Float4),
    spec("Texture2D", 1, DefaultElement::Float4),
    spec("Texture2DArray", 1, DefaultElement::Float4),
    spec("Texture3D", 1, DefaultElement::Float4),
    spec("TextureCube", 1, DefaultElement::Float4),
    spec("TextureCubeArray", 1, DefaultElement::Float4),
    spec("RWTexture1D", 1, DefaultElement::Float4),
    spec("RWTexture1DArray", 1, DefaultElement::Float4),
    spec("RWTexture2D", 1, DefaultElement::Float4),
    spec("RWTexture2DArray", 1, DefaultElement::Float4),
    spec("RWTexture3D", 1, DefaultElement::Float4),
    spec("Texture2DMS", 2, DefaultElement::Float4),
    spec("Texture2DMSArray", 2, DefaultElement::Float4),
    spec("InputPatch", 2, DefaultElement::None),
    spec("OutputPatch", 2, DefaultElement::None),
];

/// Non-generic handle records, in installation order
pub const HANDLE_RECORDS: &[&str] = &[
    "SamplerState",
    "SamplerComparisonState",
    "ByteAddressBuffer",
    "RWByteAddressBuffer",
];

/// Options for [`install_builtins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinOptions {
    /// Also treat `(T, const T)` and `(T, T&)` as the same type in `is_same`
    pub is_same_extensions: bool,
    /// Assert that every handle field is reachable through lookup
    pub verify_lookups: bool,
}

impl Default for BuiltinOptions {
    fn default() -> Self {
        Self {
            is_same_extensions: true,
            verify_lookups: cfg!(debug_assertions),
        }
    }
}

impl BuiltinOptions {
    pub fn with_is_same_extensions(mut self, enabled: bool) -> Self {
        self.is_same_extensions = enabled;
        self
    }

    pub fn with_verify_lookups(mut self, enabled: bool) -> Self {
        self.verify_lookups = enabled;
        self
    }
}

/// Everything [`install_builtins`] created, plus the shorthand alias cache.
#[derive(Debug, Clone)]
pub struct BuiltinDecls {
    pub vector: GenericContainerDecl,
    pub matrix: GenericContainerDecl,
    generic_handles: Vec<(Symbol, GenericContainerDecl)>,
    generic_by_name: FxHashMap<Symbol, usize>,
    pub handle_records: Vec<RecordId>,
    pub traits: TypeTraitDecls,
    shorthands: FxHashMap<Symbol, AliasId>,
}

impl BuiltinDecls {
    /// Generic handle types in installation order
    pub fn generic_handles(&self) -> impl Iterator<Item = (Symbol, GenericContainerDecl)> + '_ {
        self.generic_handles.iter().copied()
    }

    pub fn generic_handle(&self, name: Symbol) -> Option<GenericContainerDecl> {
        self.generic_by_name
            .get(&name)
            .map(|&index| self.generic_handles[index].1)
    }

    /// `vector<scalar, count>`
    pub fn vector_type(&self, db: &mut CompilationDb, scalar: ScalarType, count: u32) -> TypeId {
        specialize_vector(db, self.vector, scalar, count)
    }

    /// `matrix<scalar, rows, cols>`
    pub fn matrix_type(
        &self,
        db: &mut CompilationDb,
        scalar: ScalarType,
        rows: u32,
        cols: u32,
    ) -> TypeId {
        let element = db.types.scalar(scalar);
        db.types.specialization(
            self.matrix.template,
            smallvec![
                TemplateArg::Type(element),
                TemplateArg::Integral(u64::from(rows)),
                TemplateArg::Integral(u64::from(cols)),
            ],
        )
    }

    /// Alias for a shorthand spelling, created on first use.
    ///
    /// Vector spellings are tried before matrix spellings. Returns None if
    /// `name` is not a shorthand; callers continue with ordinary lookup.
    pub fn resolve_shorthand(&mut self, db: &mut CompilationDb, name: &str) -> Option<AliasId> {
        if let Some((scalar, count)) = parse_vector_shorthand(name) {
            let key = db.ident(name);
            if let Some(&alias) = self.shorthands.get(&key) {
                return Some(alias);
            }
            let concrete = self.vector_type(db, scalar, count);
            let alias = build_vector_shorthand_alias(db, scalar, count, concrete);
            self.shorthands.insert(key, alias);
            return Some(alias);
        }

        let (scalar, rows, cols) = parse_matrix_shorthand(name)?;
        let key = db.ident(name);
        if let Some(&alias) = self.shorthands.get(&key) {
            return Some(alias);
        }
        let concrete = self.matrix_type(db, scalar, rows, cols);
        let alias = build_matrix_shorthand_alias(db, scalar, rows, cols, concrete);
        self.shorthands.insert(key, alias);
        Some(alias)
    }

    /// Number of shorthand aliases created so far
    pub fn shorthand_count(&self) -> usize {
        self.shorthands.len()
    }
}

fn specialize_vector(
    db: &mut CompilationDb,
    vector: GenericContainerDecl,
    scalar: ScalarType,
    count: u32,
) -> TypeId {
    let element = db.types.scalar(scalar);
    db.types.specialization(
        vector.template,
        smallvec![
            TemplateArg::Type(element),
            TemplateArg::Integral(u64::from(count)),
        ],
    )
}

/// Install every built-in declaration into the translation unit.
#[tracing::instrument(skip_all)]
pub fn install_builtins(db: &mut CompilationDb, options: &BuiltinOptions) -> BuiltinDecls {
    let verify = |db: &CompilationDb, record: RecordId| {
        if options.verify_lookups {
            verify_handle_lookup(db, record);
        }
    };

    let vector = build_vector_template(db);
    verify(db, vector.record);
    let matrix = build_matrix_template(db, &vector);
    verify(db, matrix.record);

    let float4 = specialize_vector(db, vector, ScalarType::Float, 4);
    let mut generic_handles = Vec::with_capacity(GENERIC_HANDLE_TYPES.len());
    let mut generic_by_name = FxHashMap::default();
    for spec in GENERIC_HANDLE_TYPES {
        let default_element = match spec.default_element {
            DefaultElement::None => None,
            DefaultElement::Float4 => Some(float4),
        };
        let decl = build_generic_handle_type(db, spec.name, spec.param_count, default_element);
        verify(db, decl.record);
        let name = db.ident(spec.name);
        generic_by_name.insert(name, generic_handles.len());
        generic_handles.push((name, decl));
    }

    let handle_records: Vec<RecordId> = HANDLE_RECORDS
        .iter()
        .map(|name| {
            let record = build_handle_record(db, name);
            verify(db, record);
            record
        })
        .collect();

    let traits = build_type_equality_support(db, options.is_same_extensions);

    tracing::debug!(
        generic_handles = generic_handles.len(),
        handle_records = handle_records.len(),
        "installed builtins"
    );
    BuiltinDecls {
        vector,
        matrix,
        generic_handles,
        generic_by_name,
        handle_records,
        traits,
        shorthands: FxHashMap::default(),
    }
}
