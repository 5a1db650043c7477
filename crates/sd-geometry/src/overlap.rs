//! The overlap-detection boundary and a reference R-tree detector.
//!
//! # Event contract
//!
//! For every unordered pair of volumes that touch, a detector reports one
//! event per direction (`observer → other` and `other → observer`):
//!
//! ```text
//! tick N    : pair starts touching          → Enter
//! tick N+k  : pair still touching           → Stay
//! tick N+m  : pair stops touching           → Exit
//! ```
//!
//! Contact is edge-triggered: a pair never gets two `Enter`s without an
//! `Exit` in between.  Only a geometric separation between two enabled
//! volumes (including one shrinking to zero extent) produces an `Exit`.
//!
//! Disabling a volume suspends its contacts instead of ending them: no events
//! are reported while it is off, and once both volumes are enabled again the
//! pair resumes with `Stay` if still touching, or settles its owed `Exit` if
//! not.  Removing a volume ends its contacts silently.

use std::collections::BTreeSet;

use rstar::{AABB, RTree, RTreeObject};

use sd_core::{Vec3, VolumeId};

use crate::{Volume, VolumeSet};

/// Edge of a contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverlapPhase {
    Enter,
    Stay,
    Exit,
}

/// One directed overlap notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OverlapEvent {
    /// The volume whose owner receives the callback.
    pub observer: VolumeId,
    /// The volume it touched.
    pub other: VolumeId,
    pub phase: OverlapPhase,
}

/// A geometry collaborator that turns volume state into overlap events.
pub trait OverlapDetector: Send {
    /// Compare the current volume state with the previous pass and return
    /// this tick's events in a deterministic order.
    fn detect(&mut self, volumes: &VolumeSet) -> Vec<OverlapEvent>;

    /// Drop every remembered contact involving `volume`, without events.
    ///
    /// Called when a volume is removed from the set.
    fn forget(&mut self, _volume: VolumeId) {}

    /// Number of unordered contacts currently remembered, suspended ones
    /// included.
    fn contact_count(&self) -> usize {
        0
    }
}

// ── Narrow phase ──────────────────────────────────────────────────────────────

/// Exact overlap test between two rounded boxes (see [`crate::shape`]).
pub fn volumes_overlap(a: &Volume, b: &Volume) -> bool {
    let delta = (a.center - b.center).abs();
    let reach = a.shape.core_half_extents() + b.shape.core_half_extents();
    let gap = Vec3::new(
        (delta.x - reach.x).max(0.0),
        (delta.y - reach.y).max(0.0),
        (delta.z - reach.z).max(0.0),
    );
    let r = a.shape.round_radius() + b.shape.round_radius();
    gap.length_squared() <= r * r
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct VolumeEntry {
    id: VolumeId,
    envelope: AABB<[f32; 3]>,
}

impl RTreeObject for VolumeEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn envelope_of(volume: &Volume) -> AABB<[f32; 3]> {
    let (lo, hi) = volume.bounds();
    AABB::from_corners([lo.x, lo.y, lo.z], [hi.x, hi.y, hi.z])
}

// ── SweepDetector ─────────────────────────────────────────────────────────────

/// Reference detector: rebuilds an R-tree over live volumes every pass,
/// confirms candidates with [`volumes_overlap`], and diffs against the
/// previous contact set.
///
/// Particle–particle pairs are never reported.
#[derive(Default)]
pub struct SweepDetector {
    /// Unordered contacts entered and not yet exited, stored as
    /// `(low, high)`.  Includes contacts suspended by a disabled volume.
    contacts: BTreeSet<(VolumeId, VolumeId)>,
}

impl SweepDetector {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_contacts(volumes: &VolumeSet) -> BTreeSet<(VolumeId, VolumeId)> {
        let entries: Vec<VolumeEntry> = volumes
            .iter()
            .filter(|(_, v)| v.is_live())
            .map(|(id, v)| VolumeEntry { id, envelope: envelope_of(v) })
            .collect();
        let tree = RTree::bulk_load(entries.clone());

        let mut now = BTreeSet::new();
        for entry in &entries {
            let Some(a) = volumes.get(entry.id) else { continue };
            for candidate in tree.locate_in_envelope_intersecting(&entry.envelope) {
                if candidate.id <= entry.id {
                    continue;
                }
                let Some(b) = volumes.get(candidate.id) else { continue };
                if a.owner.particle().is_some() && b.owner.particle().is_some() {
                    continue;
                }
                if volumes_overlap(a, b) {
                    now.insert((entry.id, candidate.id));
                }
            }
        }
        now
    }
}

impl OverlapDetector for SweepDetector {
    fn detect(&mut self, volumes: &VolumeSet) -> Vec<OverlapEvent> {
        let now = Self::current_contacts(volumes);
        let mut events = Vec::new();

        let enabled = |id: VolumeId| volumes.get(id).map(|v| v.enabled);
        let mut suspended = Vec::new();
        for &(a, b) in self.contacts.difference(&now) {
            match (enabled(a), enabled(b)) {
                (Some(true), Some(true)) => push_pair(&mut events, a, b, OverlapPhase::Exit),
                (Some(_), Some(_)) => suspended.push((a, b)),
                _ => {}
            }
        }
        for &(a, b) in &now {
            let phase = if self.contacts.contains(&(a, b)) {
                OverlapPhase::Stay
            } else {
                OverlapPhase::Enter
            };
            push_pair(&mut events, a, b, phase);
        }

        self.contacts = now;
        self.contacts.extend(suspended);
        events
    }

    fn forget(&mut self, volume: VolumeId) {
        self.contacts.retain(|&(a, b)| a != volume && b != volume);
    }

    fn contact_count(&self) -> usize {
        self.contacts.len()
    }
}

fn push_pair(events: &mut Vec<OverlapEvent>, a: VolumeId, b: VolumeId, phase: OverlapPhase) {
    events.push(OverlapEvent { observer: a, other: b, phase });
    events.push(OverlapEvent { observer: b, other: a, phase });
}
