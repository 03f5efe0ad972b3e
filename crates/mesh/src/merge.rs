use crate::{geometry::within, TriangleSoup};

/// Returns true if corners `i` and `j` of the soup can be welded into one
/// vertex.
///
/// Positions, normals (when the soup has them) and texture coordinates are
/// compared component by component; every absolute difference must be at most
/// `tolerance`. This is not a Euclidean distance test.
pub fn mergeable(soup: &TriangleSoup, i: usize, j: usize, tolerance: f32) -> bool {
    if !within::<3>(soup.positions[i].into(), soup.positions[j].into(), tolerance) {
        return false;
    }
    if let Some(normals) = &soup.normals {
        if !within::<3>(normals[i].into(), normals[j].into(), tolerance) {
            return false;
        }
    }
    within::<2>(soup.texcoords[i].into(), soup.texcoords[j].into(), tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vector2, Vector3};

    fn soup(normals: bool) -> TriangleSoup {
        let positions = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.01, -0.01, 0.01),
            Vector3::new(0.0, 0.0, 0.2),
        ];
        let texcoords = vec![
            Vector2::new(0.5, 0.5),
            Vector2::new(0.55, 0.45),
            Vector2::new(0.5, 0.5),
        ];
        let normals = normals.then(|| {
            vec![
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
            ]
        });
        TriangleSoup::new(positions, texcoords, normals)
    }

    #[test]
    fn merge_within_tolerance() {
        let soup = soup(false);
        assert!(mergeable(&soup, 0, 1, 0.1));
        assert!(mergeable(&soup, 1, 0, 0.1));
        assert!(mergeable(&soup, 0, 0, 0.0));
    }

    #[test]
    fn position_out_of_tolerance() {
        let soup = soup(false);
        assert!(!mergeable(&soup, 0, 2, 0.1));
        assert!(!mergeable(&soup, 2, 0, 0.1));
    }

    #[test]
    fn texcoord_out_of_tolerance() {
        let soup = soup(false);
        assert!(!mergeable(&soup, 0, 1, 0.04));
    }

    #[test]
    fn normals_are_compared_when_present() {
        let soup = soup(true);
        assert!(!mergeable(&soup, 0, 1, 0.1));
        assert!(mergeable(&soup, 0, 1, 1.0));
    }

    #[test]
    fn component_wise_not_euclidean() {
        // Each component differs by exactly the tolerance, so the Euclidean
        // distance is larger than the tolerance but the corners still weld.
        let soup = TriangleSoup::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(0.25, 0.25, 0.25),
                Vector3::new(1.0, 1.0, 1.0),
            ],
            vec![Vector2::new(0.0, 0.0); 3],
            None,
        );
        assert!(mergeable(&soup, 0, 1, 0.25));
    }
}
