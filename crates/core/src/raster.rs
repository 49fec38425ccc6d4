//! Integer rasterization walks.
//!
//! These produce the points a primitive covers without touching any buffer,
//! so they can be tested in isolation and reused outside a grid. Arithmetic is
//! widened to `i64` so extreme `i32` inputs cannot overflow.

/// Points of the 8-connected Bresenham line from start to end, inclusive.
///
/// Each point is yielded exactly once; a degenerate line yields its single
/// point. At most `max(|dx|, |dy|) + 1` points are produced.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i64,
    y: i64,
    x2: i64,
    y2: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LinePoints {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        Self {
            x: x1,
            y: y1,
            x2,
            y2,
            dx,
            dy,
            sx: if x1 < x2 { 1 } else { -1 },
            sy: if y1 < y2 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for LinePoints {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // Every point lies between the two i32 endpoints.
        let point = (self.x as i32, self.y as i32);

        if self.x == self.x2 && self.y == self.y2 {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (self.x2 - self.x).abs().max((self.y2 - self.y).abs()) as usize + 1;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinePoints {}

impl std::iter::FusedIterator for LinePoints {}

/// Points plotted by the midpoint circle walk around `(x0, y0)`.
///
/// Each step yields the eight octant-symmetric points, so a point can repeat
/// (radius 0 yields the center eight times). A negative radius yields nothing.
/// Points beyond the `i32` range are clamped to it and stay off any grid.
#[derive(Debug, Clone)]
pub struct CirclePoints {
    x0: i64,
    y0: i64,
    x: i64,
    y: i64,
    err: i64,
    octant: u8,
}

/// Convenience constructor for [`CirclePoints`].
pub fn circle_points(x0: i32, y0: i32, radius: i32) -> CirclePoints {
    CirclePoints {
        x0: x0 as i64,
        y0: y0 as i64,
        x: radius as i64,
        y: 0,
        err: 0,
        octant: 0,
    }
}

impl CirclePoints {
    fn advance(&mut self) {
        self.y += 1;
        self.err += 2 * self.y + 1;
        if self.err > 0 {
            self.x -= 1;
            self.err -= 2 * self.x + 1;
        }
    }
}

impl Iterator for CirclePoints {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x < self.y {
            return None;
        }
        let (x, y) = (self.x, self.y);
        let (dx, dy) = match self.octant {
            0 => (x, y),
            1 => (y, x),
            2 => (-y, x),
            3 => (-x, y),
            4 => (-x, -y),
            5 => (-y, -x),
            6 => (y, -x),
            _ => (x, -y),
        };

        self.octant += 1;
        if self.octant == 8 {
            self.octant = 0;
            self.advance();
        }

        Some((clamp_i32(self.x0 + dx), clamp_i32(self.y0 + dy)))
    }
}

impl std::iter::FusedIterator for CirclePoints {}

#[inline]
pub(crate) fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn line(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
        LinePoints::new(x1, y1, x2, y2).collect()
    }

    fn circle(r: i32) -> BTreeSet<(i32, i32)> {
        circle_points(0, 0, r).collect()
    }

    #[test]
    fn horizontal_line() {
        assert_eq!(line(0, 0, 3, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn reversed_vertical_line() {
        assert_eq!(line(2, 3, 2, 0), vec![(2, 3), (2, 2), (2, 1), (2, 0)]);
    }

    #[test]
    fn degenerate_line_is_one_point() {
        assert_eq!(line(5, -7, 5, -7), vec![(5, -7)]);
    }

    #[test]
    fn diagonal_line_moves_both_axes() {
        assert_eq!(line(0, 0, 3, 3), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(line(3, 0, 0, 3), vec![(3, 0), (2, 1), (1, 2), (0, 3)]);
    }

    #[test]
    fn shallow_line_is_eight_connected() {
        let pts = line(0, 0, 6, 2);
        assert_eq!(pts.len(), 7);
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(6, 2)));
        for w in pts.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn line_point_count_is_exact() {
        for &(x1, y1, x2, y2) in &[(0, 0, 10, 3), (-4, 9, 4, -9), (1, 1, 1, 1), (7, 2, -3, 2)] {
            let it = LinePoints::new(x1, y1, x2, y2);
            let hint = it.len();
            let pts: Vec<_> = it.collect();
            let expected = (x2 - x1).abs().max((y2 - y1).abs()) as usize + 1;
            assert_eq!(pts.len(), expected);
            assert_eq!(hint, expected);
            let unique: BTreeSet<_> = pts.iter().copied().collect();
            assert_eq!(unique.len(), pts.len());
        }
    }

    #[test]
    fn extreme_endpoints_do_not_overflow() {
        let pts: Vec<_> = LinePoints::new(i32::MIN, 0, i32::MIN + 2, 0).collect();
        assert_eq!(pts, vec![(i32::MIN, 0), (i32::MIN + 1, 0), (i32::MIN + 2, 0)]);

        let mut it = LinePoints::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(it.next(), Some((i32::MIN, i32::MIN)));
    }

    #[test]
    fn radius_zero_is_center() {
        let pts: Vec<_> = circle_points(4, 5, 0).collect();
        assert_eq!(pts.len(), 8);
        assert!(pts.iter().all(|&p| p == (4, 5)));
    }

    #[test]
    fn negative_radius_is_empty() {
        assert_eq!(circle_points(0, 0, -1).count(), 0);
    }

    #[test]
    fn small_circles() {
        let r1: BTreeSet<_> = [(-1, 0), (0, -1), (0, 1), (1, 0)].into_iter().collect();
        assert_eq!(circle(1), r1);

        let r2: BTreeSet<_> = [
            (-2, 0),
            (-1, -1),
            (-1, 1),
            (0, -2),
            (0, 2),
            (1, -1),
            (1, 1),
            (2, 0),
        ]
        .into_iter()
        .collect();
        assert_eq!(circle(2), r2);
    }

    #[test]
    fn circle_is_eightfold_symmetric() {
        let pts = circle(9);
        for &(x, y) in &pts {
            for p in [(x, -y), (-x, y), (y, x), (-y, -x)] {
                assert!(pts.contains(&p), "missing mirror {p:?} of {:?}", (x, y));
            }
        }
        assert!(pts.contains(&(9, 0)));
        assert!(pts.contains(&(0, -9)));
    }

    // Midpoint walk that only steps y while the error is non-positive.
    fn conditional_walk(r: i64) -> Vec<(i64, i64)> {
        let (mut x, mut y, mut err) = (r, 0i64, 0i64);
        let mut steps = Vec::new();
        while x >= y {
            steps.push((x, y));
            if err <= 0 {
                y += 1;
                err += 2 * y + 1;
            }
            if err > 0 {
                x -= 1;
                err -= 2 * x + 1;
            }
        }
        steps
    }

    #[test]
    fn y_steps_every_iteration() {
        for r in 0..=500 {
            let expected: Vec<(i32, i32)> = conditional_walk(r)
                .into_iter()
                .flat_map(|(x, y)| {
                    let (x, y) = (x as i32, y as i32);
                    [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)]
                })
                .collect();
            let actual: Vec<(i32, i32)> = circle_points(0, 0, r as i32).collect();
            assert_eq!(actual, expected, "radius {r}");
        }
    }

    #[test]
    fn clamp_keeps_in_range_values() {
        assert_eq!(clamp_i32(12), 12);
        assert_eq!(clamp_i32(i64::MAX), i32::MAX);
        assert_eq!(clamp_i32(i64::MIN), i32::MIN);
    }
}
