// reserved.rs
//
// Identifiers the built-in synthesizers spell into the declaration graph.

use crate::{Interner, Symbol};

/// Macro for defining reserved identifiers with a single source of truth.
/// Each entry is (field_name, "spelling").
macro_rules! define_reserved_idents {
    ($(($field:ident, $spelling:literal)),* $(,)?) => {
        /// Cached Symbols for identifiers used by built-in declarations.
        /// Registered once per compilation, always available.
        #[derive(Debug, Clone)]
        pub struct ReservedIdents {
            $(pub $field: Symbol),*
        }

        impl ReservedIdents {
            /// Intern every reserved identifier.
            pub fn register(interner: &mut Interner) -> Self {
                Self {
                    $($field: interner.intern($spelling)),*
                }
            }

            /// Look up a reserved identifier by spelling
            pub fn by_name(&self, name: &str) -> Option<Symbol> {
                match name {
                    $($spelling => Some(self.$field)),*,
                    _ => None,
                }
            }

            /// Iterate over all reserved Symbols.
            pub fn iter(&self) -> impl Iterator<Item = Symbol> + '_ {
                [$(self.$field),*].into_iter()
            }
        }
    };
}

define_reserved_idents!(
    (handle, "h"),
    (element, "element"),
    (element_count, "element_count"),
    (row_count, "row_count"),
    (col_count, "col_count"),
    (count, "count"),
    (index, "index"),
    (vector, "vector"),
    (matrix, "matrix"),
    (std, "std"),
    (true_type, "true_type"),
    (false_type, "false_type"),
    (value, "value"),
    (is_same, "is_same"),
    (param_t, "T"),
    (param_v, "V"),
);
