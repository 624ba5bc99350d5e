//! Pool sizing configuration.

use super::error::PoolError;

/// Page sizing for a [`super::NodePool`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolConfig {
    /// Number of slots in the first page.
    pub start_page_size: usize,
    /// Multiplier applied to the previous page size when a new page is added.
    pub grow_rate: f64,
}

impl PoolConfig {
    /// Check that the configuration can produce non-empty, non-shrinking pages.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `start_page_size` is zero or
    /// `grow_rate` is not a finite number `>= 1.0`.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.start_page_size == 0 {
            return Err(PoolError::InvalidConfig {
                detail: "start_page_size must be at least 1".into(),
            });
        }
        if !self.grow_rate.is_finite() || self.grow_rate < 1.0 {
            return Err(PoolError::InvalidConfig {
                detail: format!("grow_rate must be finite and >= 1.0, got {}", self.grow_rate),
            });
        }
        Ok(())
    }

    /// Size of the page that follows a page of `previous` slots.
    ///
    /// Truncates toward zero, never returns less than one slot.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn next_page_size(&self, previous: usize) -> usize {
        let grown = (previous as f64 * self.grow_rate).floor();
        if grown >= usize::MAX as f64 {
            usize::MAX
        } else {
            (grown as usize).max(1)
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            start_page_size: 256,
            grow_rate: 1.0,
        }
    }
}
