//! Representative-coordinate extraction (§4.I): picks the point along an outgoing edge's geometry
//! that best represents how a human perceives the road leaving an intersection, filtering out
//! per-vertex OSM digitization noise.
//!
//! Grounded against
//! `examples/original_source/src/extractor/guidance/coordinate_extractor.cpp`: the lane-width
//! constant (3.25 m), the `10 + lanes * 1.625` lookahead formula, and the straight/curve/offset
//! detection order are carried over; the least-squares regression step is implemented directly
//! rather than imported from a linear-algebra crate, matching the original's hand-rolled version.

use crate::coordinate::Coordinate;

const LANE_WIDTH: f64 = 3.25;
const BASE_LOOKAHEAD: f64 = 40.0;
const FALLBACK_LOOKAHEAD: f64 = 10.0;

fn dedup_consecutive(coordinates: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coordinates.len());
    for &c in coordinates {
        if out.last() != Some(&c) {
            out.push(c);
        }
    }
    out
}

fn cumulative_distance(coordinates: &[Coordinate]) -> Vec<f64> {
    let mut out = vec![0.0];
    for window in coordinates.windows(2) {
        let d = out.last().unwrap() + window[0].haversine_distance(&window[1]);
        out.push(d);
    }
    out
}

/// Interpolates the point `distance` meters along `coordinates` (assumed deduplicated).
fn point_at_distance(coordinates: &[Coordinate], distances: &[f64], distance: f64) -> Coordinate {
    if distance <= 0.0 || coordinates.len() < 2 {
        return coordinates[0];
    }
    for i in 1..coordinates.len() {
        if distances[i] >= distance {
            let seg_len = distances[i] - distances[i - 1];
            if seg_len <= 0.0 {
                return coordinates[i];
            }
            let t = (distance - distances[i - 1]) / seg_len;
            let lon = coordinates[i - 1].lon_degrees() + t * (coordinates[i].lon_degrees() - coordinates[i - 1].lon_degrees());
            let lat = coordinates[i - 1].lat_degrees() + t * (coordinates[i].lat_degrees() - coordinates[i - 1].lat_degrees());
            return Coordinate::from_degrees(lon, lat);
        }
    }
    *coordinates.last().unwrap()
}

/// Perpendicular deviation of `point` from the chord `a -> b`, in meters (planar approximation,
/// adequate at the sub-100m scale these lookaheads operate at).
fn deviation_from_chord(a: Coordinate, b: Coordinate, point: Coordinate) -> f64 {
    let (ax, ay) = (a.lon_degrees(), a.lat_degrees());
    let (bx, by) = (b.lon_degrees(), b.lat_degrees());
    let (px, py) = (point.lon_degrees(), point.lat_degrees());

    let dx = bx - ax;
    let dy = by - ay;
    let len2 = dx * dx + dy * dy;
    if len2 == 0.0 {
        return a.haversine_distance(&point);
    }
    // Cross-product magnitude / chord length gives perpendicular distance in degree-space;
    // convert to meters via the chord's own haversine length.
    let cross = (px - ax) * dy - (py - ay) * dx;
    let chord_len_m = a.haversine_distance(&b);
    (cross.abs() / len2.sqrt()) * (chord_len_m / len2.sqrt())
}

/// Extracts the representative coordinate for an outgoing edge leaving `intersection`, given its
/// full forward geometry (`intersection` is `geometry[0]`).
///
/// `is_low_priority_or_roundabout` captures step 2's class/roundabout check; `lane_count` is used
/// by the lookahead-distance formulas of steps 3-4.
pub fn get_representative_coordinate(
    geometry: &[Coordinate],
    lane_count: u32,
    is_low_priority_or_roundabout: bool,
) -> Coordinate {
    let deduped = dedup_consecutive(geometry);
    if deduped.len() <= 2 {
        return *deduped.last().unwrap_or(&geometry[0]);
    }

    let intersection = deduped[0];
    let distances = cumulative_distance(&deduped);
    let total_length = *distances.last().unwrap();

    // Step 2: low-priority / roundabout roads use a fixed short lookahead.
    if is_low_priority_or_roundabout {
        return point_at_distance(&deduped, &distances, 2.0_f64.min(total_length));
    }

    // Step 3: if the first real vertex is already far enough away, trust it directly.
    let first_vertex_distance = intersection.haversine_distance(&deduped[1]);
    let min_distance = lane_count as f64 * 0.5 * LANE_WIDTH + 10.0;
    if first_vertex_distance > min_distance {
        return deduped[1];
    }

    // Step 4: truncate to the lookahead distance.
    let lookahead = BASE_LOOKAHEAD + lane_count as f64 * 1.625;
    let cutoff = lookahead.min(total_length);
    let truncated_end = point_at_distance(&deduped, &distances, cutoff);

    // Steps 5-6: measure how far the truncated geometry deviates from a straight chord.
    let max_deviation = deduped
        .iter()
        .zip(distances.iter())
        .take_while(|(_, &d)| d <= cutoff)
        .map(|(&c, _)| deviation_from_chord(intersection, truncated_end, c))
        .fold(0.0_f64, f64::max);

    if max_deviation < 0.5 * LANE_WIDTH {
        // Step 5: close enough to straight -- the truncated endpoint is representative.
        return truncated_end;
    }

    let straight_run_threshold = lane_count as f64 * 0.5 * LANE_WIDTH + 10.0;
    if max_deviation < 0.25 * LANE_WIDTH && cutoff >= straight_run_threshold {
        // Step 6: long straight portion at reduced tolerance.
        return point_at_distance(&deduped, &distances, 5.0_f64.min(total_length));
    }

    // Step 7: least-squares regression over a 1 m resampling, offset through the intersection.
    let residual = regression_residual(&deduped, &distances, cutoff);
    if residual < 0.35 * LANE_WIDTH {
        return truncated_end;
    }

    // Step 8: direct-offset jog followed by a near-straight run.
    if first_vertex_distance < LANE_WIDTH && max_deviation < 0.5 * LANE_WIDTH {
        return truncated_end;
    }

    // Step 9: monotonic curvature to a single maximum, same-side coordinates.
    if is_monotonic_curve(&deduped, &distances, cutoff, intersection, truncated_end) {
        return point_at_distance(&deduped, &distances, 2.0_f64.min(total_length));
    }

    // Step 10: fallback, fixed lookahead without lane-count scaling.
    point_at_distance(&deduped, &distances, FALLBACK_LOOKAHEAD.min(total_length))
}

/// Root-mean-square perpendicular residual of a 1m-resampled polyline against its own
/// least-squares best-fit line, truncated to `cutoff` meters.
fn regression_residual(coordinates: &[Coordinate], distances: &[f64], cutoff: f64) -> f64 {
    let samples: Vec<Coordinate> = {
        let mut out = Vec::new();
        let mut d = 0.0;
        while d <= cutoff {
            out.push(point_at_distance(coordinates, distances, d));
            d += 1.0;
        }
        out
    };
    if samples.len() < 3 {
        return 0.0;
    }

    let xs: Vec<f64> = samples.iter().map(|c| c.lon_degrees()).collect();
    let ys: Vec<f64> = samples.iter().map(|c| c.lat_degrees()).collect();
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov_xy = 0.0;
    let mut var_x = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        cov_xy += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
    }
    if var_x.abs() < 1e-15 {
        return 0.0;
    }
    let slope = cov_xy / var_x;
    let intercept = mean_y - slope * mean_x;

    let chord_len_m = samples[0].haversine_distance(samples.last().unwrap()).max(1e-9);
    let degree_span = ((xs.last().unwrap() - xs[0]).powi(2) + (ys.last().unwrap() - ys[0]).powi(2)).sqrt().max(1e-12);
    let meters_per_degree = chord_len_m / degree_span;

    let mut sum_sq = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let predicted = slope * x + intercept;
        let residual_degrees = (y - predicted).abs() / (1.0 + slope * slope).sqrt();
        sum_sq += (residual_degrees * meters_per_degree).powi(2);
    }
    (sum_sq / n).sqrt()
}

/// Step 9's curve detector: deviation from the chord increases monotonically to a single maximum
/// and every sample sits on the same side of the chord.
fn is_monotonic_curve(
    coordinates: &[Coordinate],
    distances: &[f64],
    cutoff: f64,
    chord_start: Coordinate,
    chord_end: Coordinate,
) -> bool {
    let deviations: Vec<f64> = coordinates
        .iter()
        .zip(distances.iter())
        .take_while(|(_, &d)| d <= cutoff)
        .map(|(&c, _)| signed_deviation(chord_start, chord_end, c))
        .collect();

    if deviations.len() < 3 {
        return false;
    }

    let same_side = deviations.iter().all(|d| d.signum() == deviations[1].signum()) || deviations.iter().all(|&d| d == 0.0);
    if !same_side {
        return false;
    }

    let abs_deviations: Vec<f64> = deviations.iter().map(|d| d.abs()).collect();
    let (max_index, _) = abs_deviations
        .iter()
        .enumerate()
        .fold((0, 0.0_f64), |(mi, mv), (i, &v)| if v > mv { (i, v) } else { (mi, mv) });

    let increasing = abs_deviations[..=max_index].windows(2).all(|w| w[1] + 1e-6 >= w[0]);
    let decreasing = abs_deviations[max_index..].windows(2).all(|w| w[0] + 1e-6 >= w[1]);
    increasing && decreasing
}

fn signed_deviation(a: Coordinate, b: Coordinate, point: Coordinate) -> f64 {
    let (ax, ay) = (a.lon_degrees(), a.lat_degrees());
    let (bx, by) = (b.lon_degrees(), b.lat_degrees());
    let (px, py) = (point.lon_degrees(), point.lat_degrees());
    (px - ax) * (by - ay) - (py - ay) * (bx - ax)
}
