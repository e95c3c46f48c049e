//! Validation helpers shared across latcrypt crates

use super::{Error, Result};

/// Validate a parameter condition, producing `InvalidParameter` on failure.
pub fn parameter(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::InvalidParameter {
            context,
            #[cfg(feature = "std")]
            message: reason.into(),
        });
    }
    #[cfg(not(feature = "std"))]
    let _ = reason;
    Ok(())
}

/// Validate that a byte slice has exactly the expected length.
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validate that a byte slice meets a minimum length.
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::InvalidLength {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}
