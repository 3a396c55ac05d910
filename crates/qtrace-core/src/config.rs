/// Knobs controlling how a partial trace is computed.
///
/// The defaults check every precondition and collapse adjacent traced
/// subsystems. Building with the `unchecked` feature flips the default of
/// [`validate`](TraceOptions::validate) to `false` for the whole build;
/// individual calls can still override it.
///
/// # Examples
///
/// ```
/// # use qtrace_core::TraceOptions;
/// let fast = TraceOptions::default().validate(false);
/// assert!(!fast.validates());
/// assert!(fast.collapses());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceOptions {
    validate: bool,
    collapse: bool,
}

impl TraceOptions {
    /// Options that check preconditions and collapse adjacent traced subsystems.
    pub const fn new() -> Self {
        Self {
            validate: !cfg!(feature = "unchecked"),
            collapse: true,
        }
    }

    /// Enable or disable precondition checks.
    ///
    /// When disabled, malformed input produces unspecified numbers or a
    /// panic from bounds-checked indexing instead of a [`QtraceError`].
    ///
    /// [`QtraceError`]: crate::QtraceError
    pub const fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Enable or disable merging of adjacent traced subsystems.
    ///
    /// This only changes the number of loop counters, never the result.
    pub const fn collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    /// Returns true if preconditions are checked.
    #[inline(always)]
    pub const fn validates(&self) -> bool {
        self.validate
    }

    /// Returns true if adjacent traced subsystems are merged.
    #[inline(always)]
    pub const fn collapses(&self) -> bool {
        self.collapse
    }
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let opts = TraceOptions::new().validate(true).collapse(false);
        assert!(opts.validates());
        assert!(!opts.collapses());
        assert_eq!(opts.collapse(true), TraceOptions::new().validate(true));
    }

    #[cfg(not(feature = "unchecked"))]
    #[test]
    fn test_default_validates() {
        assert!(TraceOptions::default().validates());
    }
}
