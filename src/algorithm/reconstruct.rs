use num_traits::{Float, Zero};
use std::fmt::Debug;

use crate::algorithm::eppstein::Sidetrack;
use crate::algorithm::ReverseShortestPaths;
use crate::{Error, Result};

/// Replays a candidate's sidetrack sequence into the full vertex walk from
/// `source` to the target of `paths`.
///
/// At each step, if the next unconsumed sidetrack originates at the current
/// vertex it is followed; otherwise the walk continues along the
/// shortest-path tree. A sequence produced by the enumerator always replays
/// cleanly; failure here means the sidetrack index was built incorrectly and
/// is surfaced as [`Error::MalformedSidetracks`], never patched over.
pub fn reconstruct_path<W>(
    paths: &ReverseShortestPaths<W>,
    sidetracks: &[Sidetrack],
    source: usize,
) -> Result<Vec<usize>>
where
    W: Float + Zero + Debug + Copy,
{
    if source >= paths.distances.len() {
        return Err(Error::InvalidVertex(source));
    }
    if !paths.is_reachable(source) {
        return Err(Error::NoPath {
            source,
            target: paths.target,
        });
    }

    // Each tree-walk segment between consecutive detours is simple, so the
    // whole walk visits at most (segments) * n vertices.
    let n = paths.distances.len();
    let step_limit = n * (sidetracks.len() + 1) + 1;

    let mut nodes = Vec::new();
    let mut current = source;
    let mut cursor = 0;

    loop {
        nodes.push(current);

        if current == paths.target && cursor == sidetracks.len() {
            return Ok(nodes);
        }
        if nodes.len() > step_limit {
            return Err(Error::MalformedSidetracks(format!(
                "walk from {} exceeded {} steps",
                source, step_limit
            )));
        }

        if cursor < sidetracks.len() && sidetracks[cursor].origin == current {
            current = sidetracks[cursor].target;
            cursor += 1;
        } else {
            match paths.next_hops[current] {
                Some(hop) => current = hop,
                None => {
                    return Err(Error::MalformedSidetracks(format!(
                        "walk stuck at {} with {} unconsumed sidetracks",
                        current,
                        sidetracks.len() - cursor
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    fn w(x: f64) -> Option<OrderedFloat<f64>> {
        Some(OrderedFloat(x))
    }

    // Tree: 0 -> 1 -> 2, target 2
    fn chain_paths() -> ReverseShortestPaths<OrderedFloat<f64>> {
        ReverseShortestPaths {
            distances: vec![w(2.0), w(1.0), w(0.0)],
            next_hops: vec![Some(1), Some(2), None],
            target: 2,
        }
    }

    #[test]
    fn empty_sequence_follows_the_tree() {
        let nodes = reconstruct_path(&chain_paths(), &[], 0).unwrap();
        assert_eq!(nodes, vec![0, 1, 2]);
    }

    #[test]
    fn sidetrack_replaces_tree_step() {
        // Detour 0 -> 2 directly
        let sidetracks = [Sidetrack {
            origin: 0,
            target: 2,
        }];
        let nodes = reconstruct_path(&chain_paths(), &sidetracks, 0).unwrap();
        assert_eq!(nodes, vec![0, 2]);
    }

    #[test]
    fn unmatched_sidetrack_is_malformed() {
        // Origin 9 is never visited, so the sidetrack cannot be consumed
        let sidetracks = [Sidetrack {
            origin: 9,
            target: 0,
        }];
        assert!(matches!(
            reconstruct_path(&chain_paths(), &sidetracks, 0),
            Err(Error::MalformedSidetracks(_))
        ));
    }

    #[test]
    fn unreachable_source_is_no_path() {
        let paths = ReverseShortestPaths::<OrderedFloat<f64>> {
            distances: vec![None, w(0.0)],
            next_hops: vec![None, None],
            target: 1,
        };
        assert!(matches!(
            reconstruct_path(&paths, &[], 0),
            Err(Error::NoPath {
                source: 0,
                target: 1
            })
        ));
    }
}
