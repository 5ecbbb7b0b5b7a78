//! UTF-8 validation helper for name accessors.

/// Validate bytes as UTF-8 using simdutf8.
#[inline]
pub(crate) fn from_utf8(bytes: &[u8]) -> Option<&str> {
    #[cfg(not(miri))]
    {
        simdutf8::basic::from_utf8(bytes).ok()
    }

    #[cfg(miri)]
    {
        core::str::from_utf8(bytes).ok()
    }
}
