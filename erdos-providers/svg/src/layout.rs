//! Fruchterman–Reingold force-directed layout.
//!
//! Nodes repel each other with force `k² / d` and edges pull their endpoints
//! together with force `d² / k`. Each iteration moves every node along its net
//! displacement, capped by a temperature that cools linearly to zero. The
//! result is centred and scaled into `[-1, 1]` on both axes.

use std::collections::HashMap;

use erdos_core::{Graph, NodeId};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Distances below this are clamped so coincident nodes still separate.
const MIN_DISTANCE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Point {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

/// Iteration count and optimal distance for a graph of `node_count` nodes.
pub(crate) const fn schedule(node_count: usize) -> (usize, f64) {
    if node_count <= 100 { (50, 1.0) } else { (30, 0.5) }
}

/// Positions for every node of `graph`, in node insertion order.
pub(crate) fn spring_layout(graph: &Graph, seed: u64) -> Vec<Point> {
    let count = graph.node_count();
    let (iterations, k) = schedule(count);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut positions: Vec<Point> = (0..count)
        .map(|_| Point {
            x: rng.r#gen::<f64>(),
            y: rng.r#gen::<f64>(),
        })
        .collect();
    if count < 2 {
        return rescale(positions);
    }

    let index: HashMap<&NodeId, usize> = graph.nodes().enumerate().map(|(i, n)| (n, i)).collect();
    let mut neighbours = vec![Vec::new(); count];
    for (left, right) in graph.edges() {
        if let (Some(&l), Some(&r)) = (index.get(left), index.get(right)) {
            neighbours[l].push(r);
            neighbours[r].push(l);
        }
    }

    let mut temperature = 0.1 * extent(&positions).max(MIN_DISTANCE);
    let cooling = temperature / (iterations as f64 + 1.0);
    let mut displacement = vec![Point { x: 0.0, y: 0.0 }; count];
    for _ in 0..iterations {
        for (i, shift) in displacement.iter_mut().enumerate() {
            let here = positions[i];
            let (mut dx, mut dy) = (0.0, 0.0);
            for (j, there) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (ux, uy) = (here.x - there.x, here.y - there.y);
                let distance = ux.hypot(uy).max(MIN_DISTANCE);
                let mut force = k * k / (distance * distance);
                if neighbours[i].contains(&j) {
                    force -= distance / k;
                }
                dx += ux * force;
                dy += uy * force;
            }
            *shift = Point { x: dx, y: dy };
        }
        for (position, shift) in positions.iter_mut().zip(&displacement) {
            let length = shift.x.hypot(shift.y).max(MIN_DISTANCE);
            position.x += shift.x * temperature / length;
            position.y += shift.y * temperature / length;
        }
        temperature -= cooling;
    }
    rescale(positions)
}

fn extent(points: &[Point]) -> f64 {
    let span = |get: fn(&Point) -> f64| {
        let (min, max) = points
            .iter()
            .map(get)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        max - min
    };
    span(|p| p.x).max(span(|p| p.y))
}

/// Centres the points on the origin and scales the largest coordinate to 1.
fn rescale(mut points: Vec<Point>) -> Vec<Point> {
    if points.is_empty() {
        return points;
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    let mut reach: f64 = 0.0;
    for point in &mut points {
        point.x -= cx;
        point.y -= cy;
        reach = reach.max(point.x.abs()).max(point.y.abs());
    }
    if reach > 0.0 {
        for point in &mut points {
            point.x /= reach;
            point.y /= reach;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn cycle(n: usize) -> Graph {
        let mut graph = Graph::with_node_count(n);
        for i in 0..n {
            graph
                .add_edge(&NodeId::from(i), &NodeId::from((i + 1) % n))
                .expect("nodes exist");
        }
        graph
    }

    #[rstest]
    #[case(1, (50, 1.0))]
    #[case(100, (50, 1.0))]
    #[case(101, (30, 0.5))]
    fn schedule_depends_on_size(#[case] nodes: usize, #[case] expected: (usize, f64)) {
        assert_eq!(schedule(nodes), expected);
    }

    #[rstest]
    fn layout_is_deterministic_for_a_seed() {
        let graph = cycle(12);
        assert_eq!(spring_layout(&graph, 42), spring_layout(&graph, 42));
        assert_ne!(spring_layout(&graph, 42), spring_layout(&graph, 7));
    }

    #[rstest]
    fn positions_fill_the_unit_square() {
        let positions = spring_layout(&cycle(8), 42);
        assert_eq!(positions.len(), 8);
        let reach = positions
            .iter()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0_f64, f64::max);
        assert!((reach - 1.0).abs() < 1e-9);
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[rstest]
    fn single_node_sits_at_the_origin() {
        let positions = spring_layout(&Graph::with_node_count(1), 42);
        assert_eq!(positions, vec![Point { x: 0.0, y: 0.0 }]);
    }
}
