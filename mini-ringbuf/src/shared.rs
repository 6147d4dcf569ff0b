use crate::RingBuf;
use core::cell::RefCell;
use critical_section::Mutex;

/// A [`RingBuf`] that can sit in a `static` and be used from both interrupt handlers
/// and the main loop. Every call runs inside a critical section.
pub struct SharedRingBuf<E, const N: usize> {
    inner: Mutex<RefCell<RingBuf<E, N>>>,
}

impl<E: Copy, const N: usize> SharedRingBuf<E, N> {
    #[must_use]
    pub const fn new(fill: E) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RingBuf::filled(fill))),
        }
    }

    /// Run `func` with exclusive access to the buffer.
    ///
    /// # Panics
    /// If called again from inside `func`.
    #[inline]
    pub fn with<R, F: FnOnce(&mut RingBuf<E, N>) -> R>(&self, func: F) -> R {
        critical_section::with(|cs| func(&mut self.inner.borrow_ref_mut(cs)))
    }

    #[inline]
    pub fn insert(&self, entry: E) {
        self.with(|rb| rb.insert(entry));
    }

    #[inline]
    pub fn insert_if_ok(&self, entry: E) -> bool {
        self.with(|rb| rb.insert_if_ok(entry))
    }

    #[inline]
    pub fn take(&self) -> E {
        self.with(RingBuf::take)
    }

    #[inline]
    pub fn try_take(&self) -> Option<E> {
        self.with(RingBuf::try_take)
    }

    #[inline]
    #[must_use]
    pub fn count(&self) -> u8 {
        self.with(|rb| rb.count())
    }
}

#[cfg(test)]
mod tests {
    use crate::shared::SharedRingBuf;

    #[test]
    fn shared_static() {
        static EVENTS: SharedRingBuf<u8, 4> = SharedRingBuf::new(0);
        assert!(EVENTS.try_take().is_none());
        for i in 0..6 {
            EVENTS.insert(i);
        }
        assert_eq!(4, EVENTS.count());
        assert!(!EVENTS.insert_if_ok(9));
        assert_eq!(2, EVENTS.take());
        assert_eq!(Some(3), EVENTS.try_take());
        assert_eq!(2, EVENTS.with(|rb| rb.remove(u8::MAX)));
        assert_eq!(0, EVENTS.count());
    }

    #[test]
    fn shared_across_threads() {
        static COUNTS: SharedRingBuf<u32, 255> = SharedRingBuf::new(0);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                std::thread::spawn(move || {
                    for i in 0..50 {
                        assert!(COUNTS.insert_if_ok(t * 100 + i));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(200, COUNTS.count());
        let mut seen = COUNTS.with(|rb| rb.iter().collect::<Vec<_>>());
        seen.sort_unstable();
        let mut expected: Vec<u32> = (0..4).flat_map(|t| (0..50).map(move |i| t * 100 + i)).collect();
        expected.sort_unstable();
        assert_eq!(expected, seen);
    }
}
