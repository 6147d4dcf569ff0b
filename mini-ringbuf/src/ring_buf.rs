use core::fmt;
use core::iter::FusedIterator;

/// A fixed-capacity ring buffer of at most `N` entries, `1 <= N <= 255`.
///
/// All `N` slots are usable. When `head == tail` the `empty` flag tells an empty
/// buffer apart from a full one. Inserting into a full buffer evicts the oldest
/// entry, use [`RingBuf::insert_if_ok`] to reject instead.
///
/// Reads that violate their precondition (`take`/`peek` on an empty buffer,
/// `at` past `count()`) return whatever the addressed slot holds, either the fill
/// value or a stale entry, and leave the state untouched.
///
/// The buffer is not synchronised, see [`crate::SharedRingBuf`].
#[derive(Copy, Clone)]
pub struct RingBuf<E, const N: usize> {
    // Next slot to consume, always < N
    head: u8,
    // Next slot to store into, sits at N after filling the last slot until the next insert
    tail: u8,
    empty: bool,
    slots: [E; N],
}

impl<E: Copy, const N: usize> RingBuf<E, N> {
    /// The capacity as a `u8`, fails to compile for `N == 0` or `N > 255`.
    ///
    /// ```compile_fail
    /// let rb = mini_ringbuf::RingBuf::<u8, 0>::new();
    /// ```
    ///
    /// ```compile_fail
    /// let rb = mini_ringbuf::RingBuf::<u8, 256>::new();
    /// ```
    ///
    /// ```compile_fail
    /// static RB: mini_ringbuf::RingBuf<u8, 0> = mini_ringbuf::RingBuf::filled(0);
    /// ```
    ///
    /// ```compile_fail
    /// static RB: mini_ringbuf::SharedRingBuf<u8, 0> = mini_ringbuf::SharedRingBuf::new(0);
    /// ```
    ///
    /// ```
    /// assert_eq!(1, mini_ringbuf::RingBuf::<u8, 1>::CAPACITY);
    /// assert_eq!(255, mini_ringbuf::RingBuf::<u8, 255>::CAPACITY);
    /// ```
    pub const CAPACITY: u8 = {
        assert!(N > 0, "A ring-buffer of 0 can't hold anything");
        assert!(N <= u8::MAX as usize, "Ring-buffer capacity must fit in a u8");
        #[expect(clippy::cast_possible_truncation)]
        let cap = N as u8;
        cap
    };

    /// Create an empty buffer with every slot set to `fill`.
    /// Usable in a `static`.
    #[must_use]
    pub const fn filled(fill: E) -> Self {
        let _ = Self::CAPACITY;
        Self {
            head: 0,
            tail: 0,
            empty: true,
            slots: [fill; N],
        }
    }

    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u8 {
        Self::CAPACITY
    }

    /// Number of entries currently held.
    #[inline]
    #[must_use]
    pub fn count(&self) -> u8 {
        let cap = Self::CAPACITY;
        let tail = if self.tail >= cap { 0 } else { self.tail };
        let dist = if tail >= self.head {
            tail - self.head
        } else {
            cap - self.head + tail
        };
        if dist == 0 && !self.empty {
            cap
        } else {
            dist
        }
    }

    /// Number of entries that can be inserted before the oldest starts getting evicted.
    #[inline]
    #[must_use]
    pub fn available(&self) -> u8 {
        Self::CAPACITY - self.count()
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count() == Self::CAPACITY
    }

    /// The entry the next [`RingBuf::take`] would return, unspecified if empty.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> E {
        self.slots[usize::from(self.head)]
    }

    /// The entry at logical position `idx`, unspecified unless `idx < count()`.
    #[inline]
    #[must_use]
    pub fn at(&self, idx: u16) -> E {
        self.slots[(usize::from(self.head) + usize::from(idx)) % N]
    }

    /// The entry in storage slot `idx % N`, disregarding where the buffer starts.
    #[inline]
    #[must_use]
    pub fn at_abs(&self, idx: u16) -> E {
        self.slots[usize::from(idx) % N]
    }

    #[inline]
    #[must_use]
    pub fn try_peek(&self) -> Option<E> {
        (!self.empty).then(|| self.slots[usize::from(self.head)])
    }

    #[inline]
    #[must_use]
    pub fn get(&self, idx: u16) -> Option<E> {
        (idx < u16::from(self.count())).then(|| self.at(idx))
    }

    /// Remove and return the oldest entry.
    /// On an empty buffer the returned value is unspecified and nothing moves.
    pub fn take(&mut self) -> E {
        let entry = self.slots[usize::from(self.head)];
        if self.empty {
            debug_log!("take on an empty ring-buffer, head={}", self.head);
            return entry;
        }
        if self.count() == 1 {
            self.empty = true;
        }
        self.head = Self::advance(self.head, 1);
        entry
    }

    #[inline]
    pub fn try_take(&mut self) -> Option<E> {
        (!self.empty).then(|| self.take())
    }

    /// Discard up to `c` entries from the front, returns how many were discarded.
    pub fn remove(&mut self, c: u8) -> u8 {
        let count = self.count();
        let removed = c.min(count);
        if removed == 0 {
            return 0;
        }
        self.head = Self::advance(self.head, removed);
        if removed == count {
            self.empty = true;
            // Start writing where the next read happens
            self.tail = self.head;
        }
        removed
    }

    #[inline]
    pub fn clear(&mut self) {
        self.remove(self.count());
    }

    /// Store `entry` at the back, evicting the oldest entry if full.
    pub fn insert(&mut self, entry: E) {
        if self.is_full() {
            trace_log!("ring-buffer full, evicting entry at {}", self.head);
            self.remove(1);
        }
        let tail = if self.tail >= Self::CAPACITY {
            0
        } else {
            self.tail
        };
        self.slots[usize::from(tail)] = entry;
        // Left at N when the last slot was written, wrapped by the next insert
        self.tail = tail + 1;
        self.empty = false;
    }

    /// Store `entry` only if there's room, a full buffer is left untouched.
    pub fn insert_if_ok(&mut self, entry: E) -> bool {
        if self.available() == 0 {
            return false;
        }
        self.insert(entry);
        true
    }

    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E, N> {
        Iter {
            buf: self,
            front: 0,
            back: u16::from(self.count()),
        }
    }

    /// Copy out the held entries, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> heapless::Vec<E, N> {
        let mut out = heapless::Vec::new();
        // count() <= N so this can't overflow
        out.extend(self.iter());
        out
    }

    /// Move entries, oldest first, into `out` until either runs out.
    /// Returns the number of entries moved.
    pub fn take_into<const M: usize>(&mut self, out: &mut heapless::Vec<E, M>) -> u8 {
        let mut moved = 0;
        while !self.empty && !out.is_full() {
            if out.push(self.take()).is_err() {
                break;
            }
            moved += 1;
        }
        moved
    }

    // offset < N and by <= N, stays within u8 without widening
    #[inline]
    fn advance(offset: u8, by: u8) -> u8 {
        let room = Self::CAPACITY - offset;
        if by >= room {
            by - room
        } else {
            offset + by
        }
    }
}

impl<E: Copy + Default, const N: usize> RingBuf<E, N> {
    #[must_use]
    pub fn new() -> Self {
        Self::filled(E::default())
    }
}

impl<E: Copy + Default, const N: usize> Default for RingBuf<E, N> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy, const N: usize> Extend<E> for RingBuf<E, N> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl<E: Copy + Default, const N: usize> FromIterator<E> for RingBuf<E, N> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut rb = Self::new();
        rb.extend(iter);
        rb
    }
}

impl<E: Copy + PartialEq, const N: usize> PartialEq for RingBuf<E, N> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.iter().eq(other.iter())
    }
}

impl<E: Copy + Eq, const N: usize> Eq for RingBuf<E, N> {}

impl<E: Copy + fmt::Debug, const N: usize> fmt::Debug for RingBuf<E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Rolling text log, only the newest `N` bytes are kept.
impl<const N: usize> fmt::Write for RingBuf<u8, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend(s.bytes());
        Ok(())
    }
}

impl<'a, E: Copy, const N: usize> IntoIterator for &'a RingBuf<E, N> {
    type Item = E;
    type IntoIter = Iter<'a, E, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the held entries of a [`RingBuf`], oldest first.
pub struct Iter<'a, E, const N: usize> {
    buf: &'a RingBuf<E, N>,
    front: u16,
    back: u16,
}

impl<E: Copy, const N: usize> Iterator for Iter<'_, E, N> {
    type Item = E;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let entry = self.buf.at(self.front);
        self.front += 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = usize::from(self.back - self.front);
        (rem, Some(rem))
    }
}

impl<E: Copy, const N: usize> DoubleEndedIterator for Iter<'_, E, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.buf.at(self.back))
    }
}

impl<E: Copy, const N: usize> ExactSizeIterator for Iter<'_, E, N> {}

impl<E: Copy, const N: usize> FusedIterator for Iter<'_, E, N> {}
