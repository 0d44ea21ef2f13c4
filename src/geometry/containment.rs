//! Even-odd point containment over geographic rings.
//!
//! Ring 0 is the outer boundary. Every further ring flips containment
//! inside its own boundary, so a ring nested in the outer one acts as a
//! hole, two identical rings cancel, and disjoint rings add area.
//!
//! Longitudes are treated linearly: rings crossing the antimeridian are
//! not unwrapped.

use super::GeoPoint;

/// Test `point` against every ring, combining the results with XOR.
///
/// Returns `false` for an empty ring list.
pub fn contains_point<R: AsRef<[GeoPoint]>>(point: GeoPoint, rings: &[R]) -> bool {
    let Some((outer, modifiers)) = rings.split_first() else {
        return false;
    };

    let mut result = is_inside_ring(point, outer.as_ref());
    for ring in modifiers {
        result ^= is_inside_ring(point, ring.as_ref());
    }
    result
}

/// Crossing-number test for a single ring.
///
/// Each edge is counted when the point's latitude lies in the half-open
/// span `(min, max]` of the edge, and the edge's interpolated longitude at
/// that latitude is strictly west of the point. Rings with fewer than three
/// points contain nothing.
pub fn is_inside_ring(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    let count = ring.len();
    if count < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = count - 1;

    for i in 0..count {
        let p1 = ring[i];
        let p2 = ring[j];

        let straddles = (p1.lat < point.lat && p2.lat >= point.lat)
            || (p2.lat < point.lat && p1.lat >= point.lat);

        if straddles {
            let lng_at_lat = p1.lng + (point.lat - p1.lat) / (p2.lat - p1.lat) * (p2.lng - p1.lng);
            if lng_at_lat < point.lng {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}
