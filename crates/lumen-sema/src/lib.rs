//! Lumen semantic model: declaration graph, type arena and built-in type
//! synthesis.

// Public modules
pub mod builtins;
pub mod compilation_db;
pub mod decl_defs;
pub mod decl_registry;
pub mod errors;
pub mod expr;
pub mod intrinsics;
pub mod printer;
pub mod specialization;
pub mod type_arena;
pub mod type_display;
pub mod type_spelling;

pub use builtins::{BuiltinDecls, BuiltinOptions, install_builtins};
pub use compilation_db::CompilationDb;
pub use decl_defs::{DeclContext, DeclName, DeclRef};
pub use decl_registry::DeclRegistry;
pub use errors::SemanticError;
pub use expr::ExprArena;
pub use intrinsics::{IntrinsicAttr, OpcodeGroup, SubscriptOpcode};
pub use printer::{print_decl, print_decls};
pub use specialization::select_specialization;
pub use type_arena::{SemaType, TemplateArg, TypeArena, TypeId};
pub use type_display::display_type;
pub use type_spelling::resolve_type_spelling;
