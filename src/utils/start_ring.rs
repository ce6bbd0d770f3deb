//! # Window Start Ring
//!
//! While a window is filled, some of its haplotypes are the first haplotype of
//! a later window. Their start loci are parked here, keyed by the window number
//! on the chromosome, until that window is finalized. At most `ceil(W / O)`
//! starts are pending at once, so a ring of that many slots suffices.

/// Fixed-capacity circular buffer of pending window start loci
#[derive(Clone, Debug)]
pub struct StartRing {
    slots: Vec<Option<u32>>,
}

impl StartRing {
    /// Ring with `capacity` slots (at least one)
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn slot(&self, window_number: usize) -> usize {
        window_number % self.slots.len()
    }

    /// Remember the start locus of window `window_number`
    pub fn record_start(&mut self, window_number: usize, locus: u32) {
        let slot = self.slot(window_number);
        self.slots[slot] = Some(locus);
    }

    /// Take the start locus recorded for `window_number`, freeing its slot
    pub fn take_start(&mut self, window_number: usize) -> Option<u32> {
        let slot = self.slot(window_number);
        self.slots[slot].take()
    }

    /// Forget all pending starts
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}
