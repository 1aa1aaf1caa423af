/// Wrap-aware index into a fixed-length ring of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingCursor {
    pos: usize,
    len: usize,
}

impl RingCursor {
    pub fn new(len: usize) -> Self {
        Self { pos: 0, len }
    }

    pub fn get(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move one slot forward, wrapping at the end
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.pos = (self.pos + 1) % self.len;
        }
    }

    /// Point at the slot following `slot`
    pub fn move_past(&mut self, slot: usize) {
        if self.len > 0 {
            self.pos = (slot + 1) % self.len;
        }
    }

    /// Slots in ring order starting at the cursor, each visited once
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |step| (self.pos + step) % self.len)
    }
}
