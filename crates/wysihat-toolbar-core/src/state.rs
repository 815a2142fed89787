//! Per-control state cache.

use std::cell::RefCell;

/// Last state a control displayed.
///
/// Owned by a single state observer, which is the only reader and writer.
/// Lets the observer skip visual updates when the queried state repeats.
#[derive(Debug, Default)]
pub struct StateCache<T> {
    previous: RefCell<T>,
}

impl<T: PartialEq> StateCache<T> {
    pub fn new(initial: T) -> Self {
        Self {
            previous: RefCell::new(initial),
        }
    }

    /// Store `next` if it differs from the cached value.
    ///
    /// Returns true when the value changed and the visual state needs an
    /// update.
    pub fn update(&self, next: T) -> bool {
        let mut previous = self.previous.borrow_mut();
        if *previous == next {
            return false;
        }
        *previous = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_cache_starts_false() {
        let cache = StateCache::new(false);
        // Same as the initial sentinel: nothing to draw.
        assert!(!cache.update(false));
        assert!(cache.update(true));
        assert!(!cache.update(true));
        assert!(cache.update(false));
        assert!(!cache.update(false));
    }

    #[test]
    fn test_option_cache() {
        let cache: StateCache<Option<String>> = StateCache::default();
        assert!(!cache.update(None));
        assert!(cache.update(Some("Georgia".into())));
        assert!(!cache.update(Some("Georgia".into())));
        assert!(cache.update(Some("Arial".into())));
        assert!(cache.update(None));
    }
}
