use crate::{mergeable, Discretizer, TriangleSoup, VicinityMap};

/// Result of welding a soup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collapse {
    /// One entry per soup corner: the welded vertex the corner now refers to.
    pub indices: Vec<u32>,
    /// One entry per welded vertex: the soup corner whose attributes it takes.
    pub representatives: Vec<usize>,
}

impl Collapse {
    pub fn vertex_count(&self) -> usize {
        self.representatives.len()
    }
}

/// Welds the corners of `soup` in a single pass.
///
/// Corners are visited in order. A corner that has not been claimed yet
/// becomes a new vertex, and every unclaimed corner in the surrounding 27
/// cells that is [`mergeable`] with it is claimed by that vertex.
///
/// Merging is one hop only: if A welds with B and B with C, but A and C are
/// too far apart, then C only joins A and B when B is visited before A.
pub fn collapse_vertices(
    soup: &TriangleSoup,
    vicinity: &VicinityMap,
    discretizer: &Discretizer,
    tolerance: f32,
) -> Collapse {
    let count = soup.vertex_count();
    let mut indices = Vec::with_capacity(count);
    let mut representatives = Vec::with_capacity(count);

    // Welded vertex per corner, once known.
    let mut targets: Vec<Option<u32>> = vec![None; count];

    for i in 0..count {
        // Already claimed by an earlier corner.
        if let Some(target) = targets[i] {
            indices.push(target);
            continue;
        }

        let cell = discretizer.discretize(&soup.positions[i]);
        let mut target = None;
        for neighbour in cell.neighbours() {
            for &candidate in vicinity.candidates(&neighbour) {
                let candidate = candidate as usize;
                if candidate == i || targets[candidate].is_some() {
                    continue;
                }
                if mergeable(soup, i, candidate, tolerance) {
                    let slot = *target.get_or_insert_with(|| {
                        representatives.push(i);
                        (representatives.len() - 1) as u32
                    });
                    targets[candidate] = Some(slot);
                }
            }
        }

        let slot = target.unwrap_or_else(|| {
            representatives.push(i);
            (representatives.len() - 1) as u32
        });
        targets[i] = Some(slot);
        indices.push(slot);
    }

    log::trace!(
        "collapsed {} corners into {} vertices",
        count,
        representatives.len()
    );

    Collapse {
        indices,
        representatives,
    }
}
