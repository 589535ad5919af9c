#![allow(dead_code)]

use std::f64::consts::PI;

use geo::{Coord, LineString, Point, Rect};

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Standard;

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coord<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coord {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

/// A polyline starting uniformly in `bounds`, taking `steps` segments
/// of length `step` with a slowly drifting heading.
pub fn random_walk<R: Rng>(rng: &mut R, bounds: Rect<f64>, steps: usize, step: f64) -> LineString<f64> {
    let mut pt = uniform_point(rng, bounds);
    let mut heading = rng.sample::<f64, _>(Standard) * 2. * PI;
    let mut coords = vec![pt];
    for _ in 0..steps {
        heading += (rng.sample::<f64, _>(Standard) - 0.5) * PI / 2.;
        pt = pt + Coord {
            x: step * heading.cos(),
            y: step * heading.sin(),
        };
        coords.push(pt);
    }
    LineString::new(coords)
}

/// `count` seeded random polylines of about `length` in a square of
/// side `extent`.
pub fn random_lines(seed: u64, count: usize, extent: f64, length: f64) -> Vec<LineString<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = Rect::new(Coord { x: 0., y: 0. }, Coord { x: extent, y: extent });
    (0..count)
        .map(|_| random_walk(&mut rng, bounds, 3, length / 3.))
        .collect()
}

/// An `n` by `n` grid of points spaced `step` apart from the origin.
pub fn point_grid(n: usize, step: f64) -> Vec<Point<f64>> {
    (0..n)
        .flat_map(|i| (0..n).map(move |j| Point::new(i as f64 * step, j as f64 * step)))
        .collect()
}

pub fn line_string_length(ls: &LineString<f64>) -> f64 {
    ls.lines().map(|l| l.dx().hypot(l.dy())).sum()
}
