//! Request path validation.

use crate::error::PathError;

/// Nested percent-encoding deeper than this is not unwrapped.
const MAX_DECODE_ROUNDS: usize = 3;

/// Reject paths that would climb out of the API root.
///
/// Both `/` and `\` separate segments. A `..` segment is rejected whether it
/// appears literally or behind one or more layers of percent-encoding
/// (`%2e%2e%2f`, `%252e%252e%255c`, ...). Dots that do not form a `..`
/// segment, as in `/prices/v1.0`, are accepted.
///
/// # Errors
///
/// Returns [`PathError`] describing the traversal found.
pub fn assert_safe_path(path: &str) -> Result<(), PathError> {
    if has_parent_segment(path) {
        return Err(PathError::Traversal(path.to_string()));
    }

    let mut current = path.to_string();
    for _ in 0..MAX_DECODE_ROUNDS {
        if !current.contains('%') {
            break;
        }

        let decoded =
            String::from_utf8_lossy(&urlencoding::decode_binary(current.as_bytes())).into_owned();
        if decoded == current {
            break;
        }
        if has_parent_segment(&decoded) {
            return Err(PathError::EncodedTraversal(path.to_string()));
        }
        current = decoded;
    }

    Ok(())
}

fn has_parent_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}
