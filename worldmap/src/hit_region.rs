//! Per-node UI hit regions provided by the host.
//!
//! Every node record owns exactly one region. Regions are created when the node
//! array grows, disposed when it shrinks, and re-placed on each layout pass. When
//! the host sees input on a region it calls the model's `forward_input` with the
//! region's node index.

use std::collections::BTreeMap;

use crate::model::Rect;

pub trait HitRegionHost {
    type Region;

    fn create(&mut self, index: usize) -> Self::Region;

    /// Move/resize a region. `active` is false for nodes without a node type,
    /// which must swallow input.
    fn place(&mut self, region: &mut Self::Region, rect: Rect, active: bool);

    fn dispose(&mut self, region: Self::Region);

    /// The region's node moved to a new index after a removal.
    fn reindex(&mut self, _region: &mut Self::Region, _index: usize) {}
}

/// No host UI; regions are unit values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl HitRegionHost for Headless {
    type Region = ();

    fn create(&mut self, _index: usize) {}
    fn place(&mut self, _region: &mut (), _rect: Rect, _active: bool) {}
    fn dispose(&mut self, _region: ()) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegionId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionEntry {
    pub index: usize,
    pub rect: Rect,
    pub active: bool,
}

/// Keeps placed regions in a table a host can hit-test or export.
#[derive(Clone, Debug, Default)]
pub struct RegionTable {
    next_id: u32,
    entries: BTreeMap<RegionId, RegionEntry>,
    pub created: usize,
    pub disposed: usize,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegionEntry> {
        self.entries.values()
    }

    /// Index of the topmost active region containing `p` (last placed wins ties).
    pub fn hit(&self, p: crate::model::Vec2) -> Option<usize> {
        self.entries
            .values()
            .filter(|e| e.active && e.rect.contains(p))
            .map(|e| e.index)
            .last()
    }
}

impl HitRegionHost for RegionTable {
    type Region = RegionId;

    fn create(&mut self, index: usize) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.insert(
            id,
            RegionEntry {
                index,
                rect: Rect::default(),
                active: false,
            },
        );
        self.created += 1;
        id
    }

    fn place(&mut self, region: &mut RegionId, rect: Rect, active: bool) {
        if let Some(e) = self.entries.get_mut(region) {
            e.rect = rect;
            e.active = active;
        }
    }

    fn dispose(&mut self, region: RegionId) {
        if self.entries.remove(&region).is_some() {
            self.disposed += 1;
        }
    }

    fn reindex(&mut self, region: &mut RegionId, index: usize) {
        if let Some(e) = self.entries.get_mut(region) {
            e.index = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Vec2;

    #[test]
    fn table_tracks_lifecycle_and_hits() {
        let mut t = RegionTable::new();
        let mut a = t.create(0);
        let mut b = t.create(1);
        t.place(&mut a, Rect::centered(Vec2::ZERO, Vec2::new(10.0, 10.0)), true);
        t.place(&mut b, Rect::centered(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0)), false);
        assert_eq!(t.hit(Vec2::new(1.0, 1.0)), Some(0));
        assert_eq!(t.hit(Vec2::new(20.0, 0.0)), None, "inactive regions swallow hits");
        t.dispose(b);
        assert_eq!((t.created, t.disposed, t.len()), (2, 1, 1));
    }
}
