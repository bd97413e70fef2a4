use qcirc_utils::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

fn assert_almost_eq(a: f64, b: f64, prec: i32) {
    let mult = 10.0f64.powi(prec);
    let (a, b) = (a * mult, b * mult);
    let (a, b) = (a.round(), b.round());
    assert_eq!(a / mult, b / mult);
}

fn ghz(n: usize) -> Vec<Complex<f64>> {
    let mut psi = vec![Complex::new(0.0, 0.0); 1 << n];
    psi[0] = Complex::new(FRAC_1_SQRT_2, 0.0);
    psi[(1 << n) - 1] = Complex::new(FRAC_1_SQRT_2, 0.0);
    psi
}

#[test]
fn test_measure_plus_in_x() -> UtilResult<()> {
    let plus = [Complex::new(FRAC_1_SQRT_2, 0.0); 2];
    let rotated = prerotation(&plus, Basis::X, 1)?;
    let p = probabilities(&rotated);
    assert_almost_eq(p[0], 1.0, 10);
    assert_almost_eq(p[1], 0.0, 10);
    Ok(())
}

#[test]
fn test_measure_minus_i_in_y() -> UtilResult<()> {
    let minus_i = [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(0.0, -FRAC_1_SQRT_2),
    ];
    let rotated = prerotation(&minus_i, Basis::Y, 1)?;
    let p = probabilities(&rotated);
    assert_almost_eq(p[0], 0.0, 10);
    assert_almost_eq(p[1], 1.0, 10);
    Ok(())
}

#[test]
fn test_z_leaves_state() -> UtilResult<()> {
    let psi = ghz(3);
    let rotated = prerotation(&psi, Basis::Z, 3)?;
    assert_eq!(rotated, psi);
    Ok(())
}

#[test]
fn test_ghz_x_parity_is_even() -> UtilResult<()> {
    let n = 3;
    let rotated = prerotation(&ghz(n), "X".parse()?, n)?;
    let mut rng = SmallRng::seed_from_u64(2024);
    let (outcomes, _) = sample_psi_with_rng(&rotated, 500, &mut rng)?;
    for row in outcomes.rows() {
        let ones: u8 = row.iter().sum();
        assert_eq!(ones % 2, 0, "odd parity outcome {:?}", row);
    }
    Ok(())
}

#[test]
fn test_rotation_preserves_norm() -> UtilResult<()> {
    let psi: Vec<_> = (0..16)
        .map(|i| Complex::from_polar(0.25, i as f64 * 0.3))
        .collect();
    for basis in [Basis::X, Basis::Y, Basis::Z] {
        let rotated = prerotation(&psi, basis, 4)?;
        let total: f64 = probabilities(&rotated).iter().sum();
        assert_almost_eq(total, 1.0, 10);
    }
    Ok(())
}

#[test]
fn test_rotation_gates() {
    let x = rx(PI);
    assert_almost_eq(x[1].im, -1.0, 10);
    assert_almost_eq(x[0].re, 0.0, 10);

    let y = ry(FRAC_PI_2);
    assert_almost_eq(y[2].re, FRAC_1_SQRT_2, 10);
    assert_almost_eq(y[1].re, -FRAC_1_SQRT_2, 10);

    let z = rz(PI);
    assert_almost_eq(z[0].im, -1.0, 10);
    assert_almost_eq(z[3].im, 1.0, 10);
    assert_almost_eq(z[1].norm(), 0.0, 10);
}

#[test]
fn test_operator_is_unitary() -> UtilResult<()> {
    let n = 2;
    let op = prerotation_operator::<f64>(Basis::Y, n)?;
    let side = 1 << n;
    for i in 0..side {
        for j in 0..side {
            let dot: Complex<f64> = (0..side)
                .map(|k| op[k * side + i].conj() * op[k * side + j])
                .sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_almost_eq(dot.re, expected, 10);
            assert_almost_eq(dot.im, 0.0, 10);
        }
    }
    Ok(())
}

#[test]
fn test_invalid_basis() {
    assert!(matches!(
        "Q".parse::<Basis>(),
        Err(UtilError::InvalidArgument(_))
    ));
}
