//! `VolumeCollapse` — the resize/restore hook used to force exit events.
//!
//! A collaborator that only reports overlap edges will not report an exit
//! when a volume is merely disabled.  Shrinking the volume to zero extent
//! while it stays enabled makes every current contact end on the next
//! detection pass; restoring afterwards puts the authored extent back.

use crate::Shape;

/// Remembers the authored shape while a volume is collapsed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VolumeCollapse {
    saved: Option<Shape>,
}

impl VolumeCollapse {
    /// Shrink `shape` to zero extent, recording the original.
    ///
    /// Returns `false` (and leaves `shape` alone) if already collapsed.
    pub fn collapse(&mut self, shape: &mut Shape) -> bool {
        if self.saved.is_some() {
            return false;
        }
        self.saved = Some(*shape);
        *shape = shape.collapsed();
        true
    }

    /// Put the recorded shape back.  Returns `false` if nothing was collapsed.
    pub fn restore(&mut self, shape: &mut Shape) -> bool {
        match self.saved.take() {
            Some(original) => {
                *shape = original;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.saved.is_some()
    }

    /// The authored shape, if currently collapsed.
    pub fn saved(&self) -> Option<&Shape> {
        self.saved.as_ref()
    }
}
