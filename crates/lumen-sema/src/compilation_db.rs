// compilation_db.rs
//
// Unified compilation database: identifier table, type and expression
// arenas, and the declaration registry. Every built-in synthesizer takes
// `&mut CompilationDb` as its single handle to the declaration graph.

use lumen_identity::{Interner, RecordId, ReservedIdents, Symbol};

use crate::decl_registry::DeclRegistry;
use crate::expr::ExprArena;
use crate::type_arena::{TypeArena, TypeId};

/// Long-lived state of one compilation.
///
/// # Usage
/// ```ignore
/// let mut db = CompilationDb::new();
/// let builtins = install_builtins(&mut db, &BuiltinOptions::default());
/// let float3 = builtins.resolve_shorthand(&mut db, "float3");
/// ```
#[derive(Debug, Clone)]
pub struct CompilationDb {
    /// Identifier interner
    pub idents: Interner,
    /// Identifiers the built-in synthesizers use, interned up front
    pub reserved: ReservedIdents,
    /// Interned types
    pub types: TypeArena,
    /// Constant expressions (literals, parameter references, casts)
    pub exprs: ExprArena,
    /// Declarations and per-context lookup
    pub decls: DeclRegistry,
}

impl CompilationDb {
    /// Create a new database with the reserved identifiers registered.
    pub fn new() -> Self {
        let mut idents = Interner::new();
        let reserved = ReservedIdents::register(&mut idents);
        Self {
            idents,
            reserved,
            types: TypeArena::new(),
            exprs: ExprArena::new(),
            decls: DeclRegistry::new(),
        }
    }

    /// Intern an identifier
    #[inline]
    pub fn ident(&mut self, name: &str) -> Symbol {
        self.idents.intern(name)
    }

    /// Spelling of an identifier
    #[inline]
    pub fn name(&self, sym: Symbol) -> &str {
        self.idents.resolve(sym)
    }

    /// Canonical form of a type
    pub fn canonical(&mut self, ty: TypeId) -> TypeId {
        self.types.canonical(ty, &self.exprs)
    }

    /// Are two types the same type after canonicalization?
    pub fn same_type(&mut self, a: TypeId, b: TypeId) -> bool {
        self.types.same_type(a, b, &self.exprs)
    }

    /// Type of a record, faulting it in if needed
    pub fn record_type(&mut self, record: RecordId) -> TypeId {
        self.decls.record_type(record, &mut self.types)
    }
}

impl Default for CompilationDb {
    fn default() -> Self {
        Self::new()
    }
}
