//! Outline tracing for rectilinear bitmaps.
//!
//! [`trace_bitmap`] turns a set of pixels into closed orthogonal polygons:
//! each set pixel contributes its four edges clockwise, edges shared by two
//! set pixels cancel, and the remaining directed edges are walked into
//! chains with collinear runs merged. Outer contours come out clockwise
//! (with `y` growing downwards) and holes counter-clockwise.
//!
//! Chains start at the smallest remaining vertex by `(x, y)`, so output is
//! a pure function of the input.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A polygon vertex. Ordered by `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A closed polygon; the last vertex connects back to the first.
pub type Chain = Vec<Point>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    a: Point,
    b: Point,
}

impl Edge {
    fn collinear(self, next: Self) -> bool {
        let vertical = self.a.x == self.b.x && self.b.x == next.a.x && next.a.x == next.b.x;
        let horizontal = self.a.y == self.b.y && self.b.y == next.a.y && next.a.y == next.b.y;
        vertical || horizontal
    }

    fn turns_clockwise(self, next: Self) -> bool {
        let (x1, y1) = (self.b.x - self.a.x, self.b.y - self.a.y);
        let (x2, y2) = (next.b.x - next.a.x, next.b.y - next.a.y);
        x1 * y2 - y1 * x2 < 0
    }
}

/// Trace the outlines of the set pixels in a row-major bitmap.
///
/// `scale` multiplies pixel coordinates. Where two pixels touch only at a
/// corner, `join_diagonals` decides whether their outlines merge into one
/// chain through the shared vertex or stay separate.
#[must_use]
pub fn trace_bitmap(pixels: &[bool], width: usize, scale: Point, join_diagonals: bool) -> Vec<Chain> {
    if width == 0 {
        return Vec::new();
    }

    let corner = |x: usize, y: usize| {
        Point::new(
            scale.x * i32::try_from(x).unwrap_or(i32::MAX),
            scale.y * i32::try_from(y).unwrap_or(i32::MAX),
        )
    };

    // Outgoing edges keyed by start vertex, in insertion order.
    let mut outgoing: BTreeMap<Point, Vec<Edge>> = BTreeMap::new();
    for (i, _) in pixels.iter().enumerate().filter(|&(_, &set)| set) {
        let (cx, cy) = (i % width, i / width);
        let square = [
            corner(cx, cy),
            corner(cx + 1, cy),
            corner(cx + 1, cy + 1),
            corner(cx, cy + 1),
        ];
        for (k, &a) in square.iter().enumerate() {
            let edge = Edge {
                a,
                b: square[(k + 1) % 4],
            };
            // An edge cancels against its reverse, left by a neighbour.
            let reverse = outgoing
                .get(&edge.b)
                .and_then(|edges| edges.iter().position(|e| e.b == edge.a));
            match reverse {
                Some(pos) => remove_edge(&mut outgoing, edge.b, pos),
                None => outgoing.entry(edge.a).or_default().push(edge),
            }
        }
    }

    let mut chains: Vec<Chain> = Vec::new();
    let mut current: Option<Edge> = None;
    while let Some((&start, _)) = outgoing.first_key_value() {
        let candidates = current.and_then(|cur| outgoing.get(&cur.b).map(|edges| (cur, edges)));
        let Some((cur, edges)) = candidates else {
            current = Some(Edge { a: start, b: start });
            chains.push(vec![start]);
            continue;
        };

        // Two exits only where pixels meet diagonally.
        debug_assert!(edges.len() <= 2, "vertex with {} exits", edges.len());
        let pick = usize::from(edges.len() > 1 && cur.turns_clockwise(edges[1]) == join_diagonals);
        let next = edges[pick];
        remove_edge(&mut outgoing, cur.b, pick);

        if cur.collinear(next) {
            current = Some(Edge { a: cur.a, b: next.b });
        } else {
            if let Some(chain) = chains.last_mut() {
                chain.push(cur.b);
            }
            current = Some(next);
        }
    }
    chains
}

fn remove_edge(outgoing: &mut BTreeMap<Point, Vec<Edge>>, from: Point, pos: usize) {
    if let Some(edges) = outgoing.get_mut(&from) {
        edges.remove(pos);
        if edges.is_empty() {
            outgoing.remove(&from);
        }
    }
}

/// SVG path data for `chains`: `M x y x y .. z` per chain.
#[must_use]
pub fn svg_path(chains: &[Chain]) -> String {
    let mut out = String::new();
    for chain in chains {
        out.push('M');
        for p in chain {
            let _ = write!(out, "{} {} ", p.x, p.y);
        }
        out.push_str("z ");
    }
    out
}

/// Shift every segment sideways: positive amounts move the edges of a
/// clockwise chain inwards, negative amounts outwards.
///
/// Chains must be orthogonal with collinear runs merged, as produced by
/// [`trace_bitmap`]; diagonal segments are left in place.
pub fn extrude(chains: &mut [Chain], dx: i32, dy: i32) {
    for chain in chains {
        let n = chain.len();
        for i in 1..=n {
            let (a, b) = (chain[i - 1], chain[i % n]);
            let (off_x, off_y) = if a.y == b.y {
                (0, if b.x > a.x { dy } else { -dy })
            } else if a.x == b.x {
                (if b.y > a.y { -dx } else { dx }, 0)
            } else {
                (0, 0)
            };
            for j in [i - 1, i % n] {
                chain[j].x += off_x;
                chain[j].y += off_y;
            }
        }
    }
}
