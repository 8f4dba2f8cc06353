// builtins/shorthand.rs
//
// Parsing of compact vector and matrix spellings (`float3`, `int64_t2x4`).
//
// The trailing dimensions are checked first since they are cheap, then the
// remaining prefix is matched against the scalar spelling table in table
// order. The first spelling that starts with the prefix decides: it must
// match over its whole length, otherwise parsing fails.

use lumen_identity::ScalarType;

/// Shortest vector shorthand: a three-letter scalar plus one digit
const VECTOR_MIN_LEN: usize = 3 + 1;

/// Shortest matrix shorthand: a three-letter scalar plus `RxC`
const MATRIX_MIN_LEN: usize = 3 + 3;

/// Largest vector element count or matrix dimension
pub const MAX_DIMENSION: u32 = 4;

/// A dimension digit in `1..=4`
fn parse_dimension(digit: u8) -> Option<u32> {
    match digit {
        b'1'..=b'4' => Some(u32::from(digit - b'0')),
        _ => None,
    }
}

/// Scalar type spelled exactly by `prefix`.
fn match_scalar_prefix(prefix: &[u8]) -> Option<ScalarType> {
    let scalar = ScalarType::valid().find(|scalar| scalar.as_str().as_bytes().starts_with(prefix))?;
    (scalar.as_str().len() == prefix.len()).then_some(scalar)
}

/// Parse `<scalar><count>`, e.g. `float3`.
pub fn parse_vector_shorthand(name: &str) -> Option<(ScalarType, u32)> {
    let bytes = name.as_bytes();
    if bytes.len() < VECTOR_MIN_LEN {
        return None;
    }
    let (prefix, suffix) = bytes.split_at(bytes.len() - 1);
    let count = parse_dimension(suffix[0])?;
    let scalar = match_scalar_prefix(prefix)?;
    Some((scalar, count))
}

/// Parse `<scalar><rows>x<cols>`, e.g. `float3x2`.
pub fn parse_matrix_shorthand(name: &str) -> Option<(ScalarType, u32, u32)> {
    let bytes = name.as_bytes();
    if bytes.len() < MATRIX_MIN_LEN {
        return None;
    }
    let (prefix, suffix) = bytes.split_at(bytes.len() - 3);
    let cols = parse_dimension(suffix[2])?;
    if suffix[1] != b'x' {
        return None;
    }
    let rows = parse_dimension(suffix[0])?;
    let scalar = match_scalar_prefix(prefix)?;
    Some((scalar, rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scalar_and_count_parses() {
        for scalar in ScalarType::valid() {
            for count in 1..=MAX_DIMENSION {
                let name = format!("{}{}", scalar.as_str(), count);
                assert_eq!(
                    parse_vector_shorthand(&name),
                    Some((scalar, count)),
                    "{name}"
                );
            }
        }
    }

    #[test]
    fn every_scalar_and_dimension_pair_parses() {
        for scalar in ScalarType::valid() {
            for rows in 1..=MAX_DIMENSION {
                for cols in 1..=MAX_DIMENSION {
                    let name = format!("{}{}x{}", scalar.as_str(), rows, cols);
                    assert_eq!(
                        parse_matrix_shorthand(&name),
                        Some((scalar, rows, cols)),
                        "{name}"
                    );
                }
            }
        }
    }

    #[test]
    fn out_of_range_digits_fail() {
        assert_eq!(parse_vector_shorthand("float5"), None);
        assert_eq!(parse_vector_shorthand("float0"), None);
        assert_eq!(parse_matrix_shorthand("float5x2"), None);
        assert_eq!(parse_matrix_shorthand("float2x0"), None);
    }

    #[test]
    fn matrix_requires_separator() {
        assert_eq!(parse_matrix_shorthand("float32"), None);
        assert_eq!(parse_matrix_shorthand("float3y2"), None);
        assert_eq!(parse_matrix_shorthand("float3x"), None);
    }

    #[test]
    fn too_short_fails() {
        assert_eq!(parse_vector_shorthand("in3"), None);
        assert_eq!(parse_vector_shorthand(""), None);
        assert_eq!(parse_matrix_shorthand("in3x3"), None);
        assert_eq!(parse_matrix_shorthand("x"), None);
    }

    #[test]
    fn longer_spelling_wins_over_shared_prefix() {
        assert_eq!(
            parse_vector_shorthand("int64_t3"),
            Some((ScalarType::Int64, 3))
        );
        assert_eq!(
            parse_vector_shorthand("uint64_t2"),
            Some((ScalarType::Uint64, 2))
        );
        assert_eq!(
            parse_matrix_shorthand("min16uint4x4"),
            Some((ScalarType::Min16Uint, 4, 4))
        );
        assert_eq!(parse_vector_shorthand("int3"), Some((ScalarType::Int, 3)));
    }

    #[test]
    fn partial_scalar_spelling_fails() {
        // "min1" is a prefix of "min10float", which is tried first
        assert_eq!(parse_vector_shorthand("min12"), None);
        assert_eq!(parse_vector_shorthand("floa3"), None);
        assert_eq!(parse_vector_shorthand("floatt3"), None);
        assert_eq!(parse_vector_shorthand("vector3"), None);
    }

    #[test]
    fn unknown_spelling_is_not_a_scalar() {
        assert_eq!(parse_vector_shorthand("<unknown>1"), None);
    }

    #[test]
    fn non_ascii_input_is_rejected() {
        assert_eq!(parse_vector_shorthand("flöat3"), None);
        assert_eq!(parse_vector_shorthand("float\u{0663}"), None);
    }
}
