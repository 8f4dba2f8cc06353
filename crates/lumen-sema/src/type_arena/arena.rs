// type_arena/arena.rs
//
// TypeArena: interning storage, type builders and canonicalization.

use rustc_hash::FxHashMap;

use lumen_identity::{AliasId, ExprId, RecordId, ScalarType, TemplateId, TemplateParamId};

use super::sema_type::{SemaType, TemplateArg, TemplateArgVec};
use super::type_id::{TypeId, TypeIdVec};
use crate::expr::ExprArena;

/// Per-compilation type storage with automatic deduplication.
#[derive(Clone)]
pub struct TypeArena {
    /// Interned types, indexed by TypeId
    types: Vec<SemaType>,
    /// Deduplication map
    intern_map: FxHashMap<SemaType, TypeId>,
    /// Memoized results of `canonical`
    canonical_cache: FxHashMap<TypeId, TypeId>,
}

impl std::fmt::Debug for TypeArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeArena")
            .field("types_count", &self.types.len())
            .finish_non_exhaustive()
    }
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    /// Create a new TypeArena with the reserved types pre-interned
    pub fn new() -> Self {
        let mut arena = Self {
            types: Vec::new(),
            intern_map: FxHashMap::default(),
            canonical_cache: FxHashMap::default(),
        };

        // Pre-intern in the order defined by the TypeId constants.
        let invalid = arena.intern(SemaType::Invalid);
        debug_assert_eq!(invalid, TypeId::INVALID);
        let void = arena.intern(SemaType::Void);
        debug_assert_eq!(void, TypeId::VOID);
        for scalar in ScalarType::valid() {
            let id = arena.intern(SemaType::Scalar(scalar));
            debug_assert_eq!(id, TypeId::scalar(scalar));
        }
        debug_assert_eq!(arena.types.len() as u32, TypeId::FIRST_DYNAMIC);

        arena
    }

    fn intern(&mut self, ty: SemaType) -> TypeId {
        let next_id = TypeId::from_raw(self.types.len() as u32);
        *self.intern_map.entry(ty.clone()).or_insert_with(|| {
            self.types.push(ty);
            next_id
        })
    }

    /// Get the SemaType for a TypeId
    pub fn get(&self, id: TypeId) -> &SemaType {
        &self.types[id.index() as usize]
    }

    /// Number of interned types, reserved ones included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ===== Builders =====

    pub fn invalid(&self) -> TypeId {
        TypeId::INVALID
    }

    pub fn void(&self) -> TypeId {
        TypeId::VOID
    }

    pub fn scalar(&self, scalar: ScalarType) -> TypeId {
        TypeId::scalar(scalar)
    }

    /// Type of a non-template record
    pub fn record(&mut self, record: RecordId) -> TypeId {
        self.intern(SemaType::Record(record))
    }

    /// Reference to the template type parameter at (depth, index)
    pub fn template_type_param(
        &mut self,
        depth: u32,
        index: u32,
        decl: Option<TemplateParamId>,
    ) -> TypeId {
        self.intern(SemaType::TemplateTypeParam { depth, index, decl })
    }

    /// `template<args...>`
    pub fn specialization(
        &mut self,
        template: TemplateId,
        args: TemplateArgVec,
    ) -> TypeId {
        let has_invalid = args
            .iter()
            .any(|arg| matches!(arg, TemplateArg::Type(ty) if ty.is_invalid()));
        if has_invalid {
            return self.invalid();
        }
        self.intern(SemaType::Specialization { template, args })
    }

    pub fn injected_class_name(&mut self, record: RecordId, specialization: TypeId) -> TypeId {
        if specialization.is_invalid() {
            return self.invalid();
        }
        self.intern(SemaType::InjectedClassName {
            record,
            specialization,
        })
    }

    /// `inner&`. References to references collapse.
    pub fn lvalue_reference(&mut self, inner: TypeId) -> TypeId {
        if inner.is_invalid() {
            return self.invalid();
        }
        if self.get(inner).is_reference() {
            return inner;
        }
        self.intern(SemaType::LValueReference(inner))
    }

    /// `const inner`. Const on a reference has no effect; const is idempotent.
    pub fn const_qualified(&mut self, inner: TypeId) -> TypeId {
        if inner.is_invalid() {
            return self.invalid();
        }
        match self.get(inner) {
            SemaType::LValueReference(_) | SemaType::Const(_) => inner,
            _ => self.intern(SemaType::Const(inner)),
        }
    }

    pub fn constant_array(&mut self, element: TypeId, size: u64) -> TypeId {
        if element.is_invalid() {
            return self.invalid();
        }
        self.intern(SemaType::ConstantArray { element, size })
    }

    pub fn dependent_sized_array(&mut self, element: TypeId, size: ExprId) -> TypeId {
        if element.is_invalid() {
            return self.invalid();
        }
        self.intern(SemaType::DependentSizedArray { element, size })
    }

    pub fn constant_vector(&mut self, element: TypeId, size: u64) -> TypeId {
        if element.is_invalid() {
            return self.invalid();
        }
        self.intern(SemaType::ConstantVector { element, size })
    }

    pub fn dependent_sized_vector(&mut self, element: TypeId, size: ExprId) -> TypeId {
        if element.is_invalid() {
            return self.invalid();
        }
        self.intern(SemaType::DependentSizedVector { element, size })
    }

    /// Member function type
    pub fn function(&mut self, params: TypeIdVec, ret: TypeId, is_const: bool) -> TypeId {
        // Propagate invalid through function types
        if params.iter().any(|p| p.is_invalid()) || ret.is_invalid() {
            return self.invalid();
        }
        self.intern(SemaType::Function {
            params,
            ret,
            is_const,
        })
    }

    /// Typedef sugar over `target`
    pub fn alias(&mut self, alias: AliasId, target: TypeId) -> TypeId {
        if target.is_invalid() {
            return self.invalid();
        }
        self.intern(SemaType::Alias { alias, target })
    }

    // ===== Queries =====

    /// Strip one level of reference, if present
    pub fn strip_reference(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            SemaType::LValueReference(inner) => *inner,
            _ => id,
        }
    }

    /// Strip one level of const, if present
    pub fn strip_const(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            SemaType::Const(inner) => *inner,
            _ => id,
        }
    }

    /// Strip alias sugar without canonicalizing children
    pub fn desugar(&self, mut id: TypeId) -> TypeId {
        while let SemaType::Alias { target, .. } = self.get(id) {
            id = *target;
        }
        id
    }

    /// Template and arguments of a specialization type (through aliases)
    pub fn specialization_parts(&self, id: TypeId) -> Option<(TemplateId, &TemplateArgVec)> {
        match self.get(self.desugar(id)) {
            SemaType::Specialization { template, args } => Some((*template, args)),
            _ => None,
        }
    }

    /// Parameters, result and const qualifier of a function type
    pub fn function_parts(&self, id: TypeId) -> Option<(&TypeIdVec, TypeId, bool)> {
        match self.get(id) {
            SemaType::Function {
                params,
                ret,
                is_const,
            } => Some((params, *ret, *is_const)),
            _ => None,
        }
    }

    /// Does this type depend on a template parameter?
    pub fn is_dependent(&self, id: TypeId, exprs: &ExprArena) -> bool {
        match self.get(id) {
            SemaType::Invalid | SemaType::Void | SemaType::Scalar(_) | SemaType::Record(_) => {
                false
            }
            SemaType::TemplateTypeParam { .. } | SemaType::InjectedClassName { .. } => true,
            SemaType::Specialization { args, .. } => args.iter().any(|arg| match arg {
                TemplateArg::Type(ty) => self.is_dependent(*ty, exprs),
                TemplateArg::Expr(expr) => exprs.literal_value(*expr).is_none(),
                TemplateArg::Integral(_) => false,
                TemplateArg::NonTypeParam { .. } => true,
            }),
            SemaType::LValueReference(inner) | SemaType::Const(inner) => {
                self.is_dependent(*inner, exprs)
            }
            SemaType::ConstantArray { element, .. } | SemaType::ConstantVector { element, .. } => {
                self.is_dependent(*element, exprs)
            }
            SemaType::DependentSizedArray { element, size }
            | SemaType::DependentSizedVector { element, size } => {
                exprs.literal_value(*size).is_none() || self.is_dependent(*element, exprs)
            }
            SemaType::Function { params, ret, .. } => {
                self.is_dependent(*ret, exprs) || params.iter().any(|p| self.is_dependent(*p, exprs))
            }
            SemaType::Alias { target, .. } => self.is_dependent(*target, exprs),
        }
    }

    // ===== Canonicalization =====

    /// Canonical form of a type.
    ///
    /// Strips alias sugar and template-parameter declarations, resolves the
    /// injected class name to its specialization, folds literal array and vector sizes
    /// and rewrites template arguments to their canonical kinds. Two types
    /// are the same type iff their canonical ids are equal.
    pub fn canonical(&mut self, id: TypeId, exprs: &ExprArena) -> TypeId {
        if let Some(&cached) = self.canonical_cache.get(&id) {
            return cached;
        }
        let result = match self.get(id).clone() {
            SemaType::Invalid | SemaType::Void | SemaType::Scalar(_) | SemaType::Record(_) => id,
            SemaType::TemplateTypeParam { depth, index, .. } => {
                self.template_type_param(depth, index, None)
            }
            SemaType::Specialization { template, args } => {
                let args: TemplateArgVec = args
                    .iter()
                    .map(|arg| self.canonical_arg(*arg, exprs))
                    .collect();
                self.specialization(template, args)
            }
            SemaType::InjectedClassName { specialization, .. } => {
                self.canonical(specialization, exprs)
            }
            SemaType::LValueReference(inner) => {
                let inner = self.canonical(inner, exprs);
                self.lvalue_reference(inner)
            }
            SemaType::Const(inner) => {
                let inner = self.canonical(inner, exprs);
                self.const_qualified(inner)
            }
            SemaType::ConstantArray { element, size } => {
                let element = self.canonical(element, exprs);
                self.constant_array(element, size)
            }
            SemaType::DependentSizedArray { element, size } => {
                let element = self.canonical(element, exprs);
                match exprs.literal_value(size) {
                    Some(len) => self.constant_array(element, len),
                    None => self.dependent_sized_array(element, size),
                }
            }
            SemaType::ConstantVector { element, size } => {
                let element = self.canonical(element, exprs);
                self.constant_vector(element, size)
            }
            SemaType::DependentSizedVector { element, size } => {
                let element = self.canonical(element, exprs);
                match exprs.literal_value(size) {
                    Some(len) => self.constant_vector(element, len),
                    None => self.dependent_sized_vector(element, size),
                }
            }
            SemaType::Function {
                params,
                ret,
                is_const,
            } => {
                let params: TypeIdVec = params.iter().map(|p| self.canonical(*p, exprs)).collect();
                let ret = self.canonical(ret, exprs);
                self.function(params, ret, is_const)
            }
            SemaType::Alias { target, .. } => self.canonical(target, exprs),
        };
        self.canonical_cache.insert(id, result);
        result
    }

    /// Canonical form of one template argument
    pub fn canonical_arg(&mut self, arg: TemplateArg, exprs: &ExprArena) -> TemplateArg {
        match arg {
            TemplateArg::Type(ty) => TemplateArg::Type(self.canonical(ty, exprs)),
            TemplateArg::Expr(expr) => {
                if let Some(value) = exprs.literal_value(expr) {
                    TemplateArg::Integral(value)
                } else if let Some((depth, index)) = exprs.param_position(expr) {
                    TemplateArg::NonTypeParam { depth, index }
                } else {
                    arg
                }
            }
            TemplateArg::Integral(_) | TemplateArg::NonTypeParam { .. } => arg,
        }
    }

    /// Are two types the same type after canonicalization?
    pub fn same_type(&mut self, a: TypeId, b: TypeId, exprs: &ExprArena) -> bool {
        self.canonical(a, exprs) == self.canonical(b, exprs)
    }
}
