//! Fixed-size points with basic vector math.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use srtest::assert::fp_string;
use srtest::{
    require, require_eq, require_le, require_near_eq_abs, test_fast, test_message_always,
    test_message_failure, test_slow,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<const N: usize>(pub [f64; N]);

impl<const N: usize> Point<N> {
    pub fn dot(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0.0, |acc, (a, b)| a.mul_add(*b, acc))
    }

    pub fn norm_l1(&self) -> f64 {
        self.0.iter().map(|c| c.abs()).sum()
    }

    pub fn norm_l2(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn norm_max(&self) -> f64 {
        self.0.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()))
    }
}

impl Point<2> {
    /// z component of the 3d cross product.
    pub fn cross(&self, other: &Self) -> f64 {
        self.0[0] * other.0[1] - self.0[1] * other.0[0]
    }
}

impl Point<3> {
    pub fn cross(&self, other: &Self) -> Self {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = other.0;
        Point([a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0])
    }
}

impl<const N: usize> Add for Point<N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
        self
    }
}

impl<const N: usize> Sub for Point<N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
        self
    }
}

impl<const N: usize> Mul<f64> for Point<N> {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self {
        for a in self.0.iter_mut() {
            *a *= rhs;
        }
        self
    }
}

impl<const N: usize> fmt::Display for Point<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| fp_string(*c)).collect();
        write!(f, "({})", parts.join(","))
    }
}

// Componentwise relative error; records both points when it fails.
fn points_eq_rel<const N: usize>(actual: &Point<N>, expected: &Point<N>, bound: f64) -> bool {
    let ok = actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| ((a - e) / e).abs() <= bound);
    if !ok {
        test_message_failure!("expected {expected} but computed {actual}");
    }
    ok
}

const SEED: u64 = 0x5eed_2024;

fn random_point<const N: usize>(rng: &mut Xoshiro256StarStar) -> Point<N> {
    let mut point = Point([0.0; N]);
    for c in point.0.iter_mut() {
        *c = rng.gen_range(-100.0..100.0);
    }
    point
}

test_fast! {
    fn add_manual() {
        let tol = 10.0 * f64::EPSILON;
        require_eq!(
            Point([1.0, 2.0, 3.0]) + Point([4.0, 5.0, 6.0]),
            Point([5.0, 7.0, 9.0])
        );
        let sum = Point([3.1, 3.2, 3.3, -2.5]) + Point([1.7, 1.8, 1.9, -3.5]);
        require!(points_eq_rel(&sum, &Point([4.8, 5.0, 5.2, -6.0]), tol));
        let zero = Point([3.25]) + Point([-3.25]);
        require_eq!(zero.0[0], 0.0);
    }
}

test_fast! {
    fn sub_manual() {
        let tol = 10.0 * f64::EPSILON;
        let diff = Point([60.0, 50.0, 40.0]) - Point([70.0, 80.0, 90.0]);
        require_eq!(diff, Point([-10.0, -30.0, -50.0]));
        let diff = Point([1.19, 2.21, 3.23]) - Point([-5.16, 2.73, 0.91]);
        require!(points_eq_rel(&diff, &Point([6.35, -0.52, 2.32]), tol));
    }
}

test_fast! {
    fn scale_manual() {
        let scaled = Point([1.5, -2.0, 0.25]) * 4.0;
        require_eq!(scaled, Point([6.0, -8.0, 1.0]));
    }
}

test_fast! {
    fn dot_manual() {
        require_eq!(Point([1.0, 2.0, 3.0]).dot(&Point([4.0, 5.0, 6.0])), 32.0);
        require_eq!(Point([1.0, 0.0]).dot(&Point([0.0, 1.0])), 0.0);
    }
}

test_fast! {
    fn cross_manual() {
        let x = Point([1.0, 0.0, 0.0]);
        let y = Point([0.0, 1.0, 0.0]);
        require_eq!(x.cross(&y), Point([0.0, 0.0, 1.0]));
        require_eq!(y.cross(&x), Point([0.0, 0.0, -1.0]));
        require_eq!(Point([2.0, 0.0]).cross(&Point([0.0, 3.0])), 6.0);
    }
}

test_fast! {
    fn norms_manual() {
        let p = Point([3.0, -4.0]);
        require_eq!(p.norm_l1(), 7.0);
        require_eq!(p.norm_l2(), 5.0);
        require_eq!(p.norm_max(), 4.0);
        require_eq!(p.to_string(), "(3.0,-4.0)");
    }
}

test_slow! {
    fn random_add_sub_inverse() {
        test_message_always!("seed {SEED:#x}");
        let mut rng = Xoshiro256StarStar::seed_from_u64(SEED);
        for _ in 0..10_000 {
            let a: Point<4> = random_point(&mut rng);
            let b: Point<4> = random_point(&mut rng);
            let back = (a + b) - b;
            for (x, y) in back.0.iter().zip(a.0.iter()) {
                require_near_eq_abs!(*x, *y, 1e-12);
            }
        }
    }
}

test_slow! {
    fn random_norm_inequalities() {
        test_message_always!("seed {SEED:#x}");
        let mut rng = Xoshiro256StarStar::seed_from_u64(SEED ^ 1);
        for _ in 0..10_000 {
            let a: Point<3> = random_point(&mut rng);
            let b: Point<3> = random_point(&mut rng);
            require_eq!(a.dot(&b), b.dot(&a));
            require_le!((a + b).norm_l2(), (a.norm_l2() + b.norm_l2()) * (1.0 + 1e-12));
            require_le!(a.dot(&b).abs(), a.norm_l2() * b.norm_l2() * (1.0 + 1e-12));
            require_le!(a.norm_max(), a.norm_l2() * (1.0 + 1e-12));
            require_le!(a.norm_l2(), a.norm_l1() * (1.0 + 1e-12));
        }
    }
}
