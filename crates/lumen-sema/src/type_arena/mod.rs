// type_arena/mod.rs
//
// Interned type system using TypeId handles for O(1) equality and minimal allocations.
//
// - TypeId: u32 handle to an interned type (Copy, trivial Eq/Hash)
// - TypeArena: per-compilation storage with automatic deduplication
// - SemaType: the type representation using TypeId for child types

mod arena;
pub mod sema_type;
pub mod type_id;

pub use arena::*;
pub use sema_type::*;
pub use type_id::*;
