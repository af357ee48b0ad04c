//! Index-tensor helpers for the curl terms.
//!
//! The curl of a vector field and the cross product are written with the
//! Levi-Civita symbol so the residual and its derivatives share one
//! triple-sum structure:
//!
//! (a × b)_k = Σ_i Σ_j ε_{ijk} a_i b_j
//!
//! All functions are pure and fixed to three dimensions.

use num_complex::Complex64;

/// Spatial dimension of the vector fields.
pub const DIM: usize = 3;

/// Levi-Civita permutation symbol ε_{ijk}.
///
/// Returns +1 for even permutations of (0, 1, 2), -1 for odd permutations,
/// and 0 if any index repeats.
///
/// # Example
/// ```
/// use emwave_rs::algebra::permutation;
///
/// assert_eq!(permutation(0, 1, 2), 1);
/// assert_eq!(permutation(1, 0, 2), -1);
/// assert_eq!(permutation(2, 2, 0), 0);
/// ```
#[inline]
pub fn permutation(i: usize, j: usize, k: usize) -> i32 {
    if i == j || j == k || i == k || i >= DIM || j >= DIM || k >= DIM {
        return 0;
    }
    // (i, j, k) is a cyclic shift of (0, 1, 2) exactly when j follows i
    if (i + 1) % DIM == j { 1 } else { -1 }
}

/// Kronecker delta δ_{ij}.
#[inline]
pub fn kronecker(i: usize, j: usize) -> i32 {
    if i == j { 1 } else { 0 }
}

/// Complex cross product v0 × v1.
///
/// Built from the permutation triple sum, so it agrees term by term with the
/// curl assembly in the boundary kernel.
pub fn complex_cross(v0: &[Complex64; DIM], v1: &[Complex64; DIM]) -> [Complex64; DIM] {
    let mut v2 = [Complex64::new(0.0, 0.0); DIM];
    for i in 0..DIM {
        for j in 0..DIM {
            for k in 0..DIM {
                let eps = permutation(i, j, k);
                if eps != 0 {
                    v2[k] += f64::from(eps) * v0[i] * v1[j];
                }
            }
        }
    }
    v2
}

/// Real cross product, used for normals and geometry.
#[inline]
pub fn cross(a: &[f64; DIM], b: &[f64; DIM]) -> [f64; DIM] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Lift a real vector into the complex plane.
#[inline]
pub fn to_complex(v: &[f64; DIM]) -> [Complex64; DIM] {
    [
        Complex64::new(v[0], 0.0),
        Complex64::new(v[1], 0.0),
        Complex64::new(v[2], 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-14;

    #[test]
    fn test_permutation_even_odd() {
        // Even permutations of (0, 1, 2)
        assert_eq!(permutation(0, 1, 2), 1);
        assert_eq!(permutation(1, 2, 0), 1);
        assert_eq!(permutation(2, 0, 1), 1);

        // Odd permutations
        assert_eq!(permutation(0, 2, 1), -1);
        assert_eq!(permutation(2, 1, 0), -1);
        assert_eq!(permutation(1, 0, 2), -1);
    }

    #[test]
    fn test_permutation_repeated_indices() {
        for i in 0..DIM {
            for j in 0..DIM {
                assert_eq!(permutation(i, i, j), 0);
                assert_eq!(permutation(i, j, i), 0);
                assert_eq!(permutation(j, i, i), 0);
            }
        }
    }

    #[test]
    fn test_permutation_antisymmetric_in_every_pair() {
        for i in 0..DIM {
            for j in 0..DIM {
                for k in 0..DIM {
                    let e = permutation(i, j, k);
                    assert_eq!(permutation(j, i, k), -e);
                    assert_eq!(permutation(i, k, j), -e);
                    assert_eq!(permutation(k, j, i), -e);
                }
            }
        }
    }

    #[test]
    fn test_kronecker() {
        for i in 0..DIM {
            for j in 0..DIM {
                assert_eq!(kronecker(i, j), if i == j { 1 } else { 0 });
            }
        }
    }

    #[test]
    fn test_complex_cross_unit_vectors() {
        let ex = to_complex(&[1.0, 0.0, 0.0]);
        let ey = to_complex(&[0.0, 1.0, 0.0]);
        let ez = complex_cross(&ex, &ey);

        assert!((ez[0].norm()) < TOL);
        assert!((ez[1].norm()) < TOL);
        assert!((ez[2] - Complex64::new(1.0, 0.0)).norm() < TOL);
    }

    #[test]
    fn test_complex_cross_matches_real_cross() {
        let a = [0.3, -1.2, 2.5];
        let b = [1.7, 0.4, -0.9];
        let expected = cross(&a, &b);
        let got = complex_cross(&to_complex(&a), &to_complex(&b));

        for k in 0..DIM {
            assert!((got[k].re - expected[k]).abs() < TOL);
            assert!(got[k].im.abs() < TOL);
        }
    }

    #[test]
    fn test_complex_cross_anticommutes() {
        let a = [
            Complex64::new(1.0, 2.0),
            Complex64::new(-0.5, 0.25),
            Complex64::new(3.0, -1.0),
        ];
        let b = [
            Complex64::new(0.1, -0.7),
            Complex64::new(2.2, 1.1),
            Complex64::new(-1.4, 0.6),
        ];

        let ab = complex_cross(&a, &b);
        let ba = complex_cross(&b, &a);
        for k in 0..DIM {
            assert!((ab[k] + ba[k]).norm() < TOL, "a × b should equal -(b × a)");
        }
    }

    #[test]
    fn test_complex_cross_self_is_zero() {
        let a = [
            Complex64::new(1.0, -2.0),
            Complex64::new(0.5, 0.5),
            Complex64::new(-3.0, 1.0),
        ];
        let aa = complex_cross(&a, &a);
        for k in 0..DIM {
            assert!(aa[k].norm() < TOL);
        }
    }
}
