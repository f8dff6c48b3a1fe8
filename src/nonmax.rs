//! Arena index that can never be `usize::MAX`.

use core::cmp::Ordering;
use core::fmt;
use core::num::NonZeroUsize;

/// `usize` known not to equal `usize::MAX`.
///
/// The value is stored bit-inverted in a `NonZeroUsize`, so
/// `Option<NonMaxUsize>` needs no extra space.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct NonMaxUsize(NonZeroUsize);

impl NonMaxUsize {
    /// Wraps the value, or returns `None` for `usize::MAX`.
    #[inline]
    #[must_use]
    pub(crate) const fn new(n: usize) -> Option<Self> {
        match NonZeroUsize::new(!n) {
            Some(inverted) => Some(Self(inverted)),
            None => None,
        }
    }

    /// Returns the plain value.
    #[inline]
    #[must_use]
    pub(crate) const fn get(self) -> usize {
        !self.0.get()
    }
}

impl Ord for NonMaxUsize {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(&other.get())
    }
}

impl PartialOrd for NonMaxUsize {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for NonMaxUsize {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.get(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::NonMaxUsize;

    use core::mem::size_of;

    #[test]
    fn same_size_as_usize() {
        assert_eq!(size_of::<NonMaxUsize>(), size_of::<usize>());
        assert_eq!(size_of::<Option<NonMaxUsize>>(), size_of::<usize>());
    }

    #[test]
    fn ordering_follows_plain_value() {
        let small = NonMaxUsize::new(1).expect("1 is not the max value");
        let large = NonMaxUsize::new(2).expect("2 is not the max value");
        assert!(small < large);
        assert_eq!(large.get(), 2);
        assert!(NonMaxUsize::new(usize::MAX).is_none());
    }
}
