use rustc_hash::FxHashMap;

use crate::{DiscretizedPosition, Discretizer, Vector3};

pub type VicinityKey = u64;

const GOLDEN_RATIO: u64 = 0x9e37_79b9_7f4a_7c15;

#[inline]
fn combine(hash: u64, value: u64) -> u64 {
    hash ^ value
        .wrapping_add(GOLDEN_RATIO)
        .wrapping_add(hash << 6)
        .wrapping_add(hash >> 2)
}

/// Hashes a grid cell. Order sensitive, so `(1, 2, 3)` and `(3, 2, 1)` map to
/// different keys.
///
/// Distinct cells may collide. That only adds candidates to a lookup, and
/// every candidate is tested with [`crate::mergeable`] anyway.
#[inline]
pub fn hash_discretized_position(dp: &DiscretizedPosition) -> VicinityKey {
    let hash = dp.x as u32 as u64;
    let hash = combine(hash, dp.y as u32 as u64);
    combine(hash, dp.z as u32 as u64)
}

/// Multimap from hashed grid cell to the vertices that fall into it.
#[derive(Debug, Default)]
pub struct VicinityMap {
    buckets: FxHashMap<VicinityKey, Vec<u32>>,
    len: usize,
}

impl VicinityMap {
    /// Buckets every position. Within a bucket vertices keep their input order.
    pub fn build(positions: &[Vector3], discretizer: &Discretizer) -> Self {
        let mut buckets = FxHashMap::<VicinityKey, Vec<u32>>::default();
        for (index, p) in positions.iter().enumerate() {
            let key = hash_discretized_position(&discretizer.discretize(p));
            buckets.entry(key).or_default().push(index as u32);
        }
        log::trace!(
            "vicinity map: {} vertices in {} buckets",
            positions.len(),
            buckets.len()
        );
        Self {
            buckets,
            len: positions.len(),
        }
    }

    /// Vertices whose cell hashes to the same key as `dp`.
    pub fn candidates(&self, dp: &DiscretizedPosition) -> &[u32] {
        self.buckets
            .get(&hash_discretized_position(dp))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of vertices in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
