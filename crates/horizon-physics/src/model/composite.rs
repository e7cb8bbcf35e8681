//! The aggregate-settings contract.

use horizon_physics_core::ChangeFlag;
use horizon_physics_core::logging::targets;

use crate::error::UnitResult;

/// A value object made of several observable fields that reports changes
/// through one aggregate [`ChangeFlag`].
///
/// Implementors guarantee:
///
/// - Any field mutation marks [`changed`](Self::changed).
/// - [`set_all`](Self::set_all) applies every field and publishes exactly one
///   notification cycle, even when no field actually differs.
/// - [`reset`](Self::reset) is `set_all` with [`defaults`](Self::defaults).
pub trait CompositeSettings {
    /// Plain snapshot of every field.
    type Values: Clone + PartialEq;

    /// Snapshot the current field values.
    fn values(&self) -> Self::Values;

    /// The values restored by [`reset`](Self::reset).
    fn defaults(&self) -> Self::Values;

    /// Apply every field as one batch.
    ///
    /// Invalid values are rejected before any field is touched.
    fn set_all(&self, values: &Self::Values) -> UnitResult<()>;

    /// The aggregate change flag.
    fn changed(&self) -> &ChangeFlag;

    /// Restore the defaults as one batch.
    fn reset(&self) {
        if let Err(err) = self.set_all(&self.defaults()) {
            tracing::error!(target: targets::MODEL, error = %err, "failed to restore defaults");
        }
    }

    /// Edge-triggered read of the aggregate flag.
    fn is_changed(&self) -> bool {
        self.changed().take()
    }
}
