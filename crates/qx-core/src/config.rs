use std::sync::OnceLock;

// Fits a 2 MiB thread stack in debug builds, the default for spawned threads.
pub const DEFAULT_MAX_EXPR_DEPTH: usize = 128;

fn usize_from_env(key: &str) -> Option<usize> {
    let raw = std::env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<usize>() {
        Ok(0) | Err(_) => {
            crate::warn!("ignoring {}={:?}: expected a positive integer", key, raw);
            None
        }
        Ok(value) => Some(value),
    }
}

/// Recursion limit for tree walks, read once from `QX_MAX_EXPR_DEPTH`.
pub fn max_expr_depth() -> usize {
    static DEPTH: OnceLock<usize> = OnceLock::new();
    *DEPTH.get_or_init(|| usize_from_env("QX_MAX_EXPR_DEPTH").unwrap_or(DEFAULT_MAX_EXPR_DEPTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_yields_none() {
        assert_eq!(usize_from_env("QX_TEST_SURELY_UNSET_VARIABLE"), None);
    }

    #[test]
    fn max_depth_is_positive() {
        assert!(max_expr_depth() > 0);
    }
}
