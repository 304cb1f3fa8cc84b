//!  Distances between embedded vectors
//!


use ndarray::{ArrayView1};
use num_traits::float::Float;

/// The distance used to build cost matrices between embedded nodes.
/// It is the L2 distance: the square root of the sum of squared coordinate differences.
/// Computed in f64 whatever the embedding type is.
pub fn euclidean_distance<F:Float>(v1:&ArrayView1<F>, v2 : &ArrayView1<F>) -> f64 {
    assert_eq!(v1.len(), v2.len());
    let sum = v1.iter().zip(v2.iter()).fold(0f64, |acc, (a, b)| {
        let diff = a.to_f64().unwrap_or(f64::NAN) - b.to_f64().unwrap_or(f64::NAN);
        acc + diff * diff
    });
    sum.sqrt()
} // end of euclidean_distance



#[cfg(test)]
mod tests {

use super::*;
use ndarray::array;

#[test]
fn test_euclidean_345() {
    let v1 = array![0f32, 0.];
    let v2 = array![3f32, 4.];
    assert!((euclidean_distance(&v1.view(), &v2.view()) - 5.).abs() < 1.0E-10);
    assert_eq!(euclidean_distance(&v2.view(), &v2.view()), 0.);
}

#[test]
fn test_euclidean_symetric() {
    let v1 = array![1f64, 2., -1.5];
    let v2 = array![0.5f64, -2., 3.];
    assert_eq!(euclidean_distance(&v1.view(), &v2.view()), euclidean_distance(&v2.view(), &v1.view()));
}

}  // end of mod tests
