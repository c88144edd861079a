//! Unit tests for the quasirandom module.
//!
//! This module contains tests verifying:
//! - Range of every coordinate for every method
//! - Reinitialisation, cloning and copying
//! - Behaviour after release and on exhaustion

use super::*;

/// Verifies that every method's points lie in the unit hypercube.
#[test]
fn test_points_in_unit_cube() {
    for method in QrngMethod::ALL {
        let dimension = method.max_dimension().min(8);
        let mut qrng = QuasiRandom::new(method, dimension).unwrap();
        for point in qrng.take_points(1_000).unwrap() {
            assert_eq!(point.len(), dimension);
            for x in point {
                assert!((0.0..1.0).contains(&x), "{}: coordinate {} out of range", method, x);
            }
        }
    }
}

/// Verifies that `init` reproduces the sequence from the start.
#[test]
fn test_init_reproduces_sequence() {
    for method in QrngMethod::ALL {
        let mut qrng = QuasiRandom::new(method, 3).unwrap();
        let first = qrng.take_points(10_000).unwrap();
        qrng.init().unwrap();
        assert_eq!(qrng.take_points(10_000).unwrap(), first, "{}", method);
    }
}

#[test]
fn test_halton_first_point() {
    let mut qrng = QuasiRandom::new(QrngMethod::Halton, 1).unwrap();
    assert_eq!(qrng.next_point().unwrap(), vec![0.5]);
}

#[test]
fn test_niederreiter_reference_points() {
    let mut qrng = QuasiRandom::new(QrngMethod::Niederreiter2, 2).unwrap();
    let points = qrng.take_points(7).unwrap();
    assert_eq!(points[2], vec![0.75, 0.25]);
    assert_eq!(points[3], vec![0.25, 0.75]);
    assert_eq!(points[6], vec![0.625, 0.125]);
}

#[test]
fn test_clone_matches() {
    for method in QrngMethod::ALL {
        let mut qrng = QuasiRandom::new(method, 2).unwrap();
        qrng.take_points(13).unwrap();
        let mut copy = qrng.try_clone().unwrap();
        assert_eq!(copy.take_points(100).unwrap(), qrng.take_points(100).unwrap());
    }
}

#[test]
fn test_copy_from() {
    let mut src = QuasiRandom::new(QrngMethod::Sobol, 3).unwrap();
    src.take_points(5).unwrap();
    let mut dst = QuasiRandom::new(QrngMethod::Sobol, 3).unwrap();
    dst.copy_from(&src).unwrap();
    assert_eq!(dst.next_point().unwrap(), src.next_point().unwrap());

    let other = QuasiRandom::new(QrngMethod::Sobol, 4).unwrap();
    assert_eq!(
        dst.copy_from(&other),
        Err(GeneratorError::KindMismatch {
            expected: "sobol/3".to_string(),
            found: "sobol/4".to_string(),
        })
    );
    let halton = QuasiRandom::new(QrngMethod::Halton, 3).unwrap();
    assert!(matches!(
        dst.copy_from(&halton),
        Err(GeneratorError::KindMismatch { .. })
    ));
}

#[test]
fn test_fill_point() {
    let mut qrng = QuasiRandom::new(QrngMethod::Sobol, 2).unwrap();
    let mut out = [0.0; 2];
    qrng.fill_point(&mut out).unwrap();
    assert_eq!(out, [0.5, 0.5]);

    let mut wrong = [0.0; 3];
    assert!(matches!(
        qrng.fill_point(&mut wrong),
        Err(GeneratorError::InvalidParameter { name: "out", .. })
    ));
}

#[test]
fn test_skip() {
    for method in QrngMethod::ALL {
        let mut stepped = QuasiRandom::new(method, 2).unwrap();
        let mut skipped = QuasiRandom::new(method, 2).unwrap();
        stepped.take_points(50).unwrap();
        skipped.skip(50).unwrap();
        assert_eq!(stepped.next_point().unwrap(), skipped.next_point().unwrap());
    }
}

#[test]
fn test_exhaustion_reported() {
    let mut qrng = QuasiRandom::new(QrngMethod::Sobol, 1).unwrap();
    qrng.skip(usize::MAX).unwrap();
    assert_eq!(qrng.next_point(), Err(GeneratorError::SequenceExhausted));
    qrng.init().unwrap();
    assert!(qrng.next_point().is_ok());
}

#[test]
fn test_invalid_dimension() {
    for method in QrngMethod::ALL {
        assert!(QuasiRandom::new(method, 0).is_err());
        assert_eq!(
            QuasiRandom::new(method, method.max_dimension() + 1).unwrap_err(),
            GeneratorError::InvalidDimension {
                method: method.name(),
                dimension: method.max_dimension() + 1,
                max: method.max_dimension(),
            }
        );
    }
}

#[test]
fn test_method_names_round_trip() {
    for method in QrngMethod::ALL {
        assert_eq!(method.name().parse::<QrngMethod>(), Ok(method));
    }
    assert!("faure".parse::<QrngMethod>().is_err());
}

/// Verifies that every operation fails once the generator is released.
#[test]
fn test_released_rejects_everything() {
    let mut qrng = QuasiRandom::new(QrngMethod::Halton, 2).unwrap();
    let other = QuasiRandom::new(QrngMethod::Halton, 2).unwrap();
    qrng.release().unwrap();
    assert!(qrng.is_released());

    let mut out = [0.0; 2];
    assert_eq!(qrng.next_point(), Err(GeneratorError::Released));
    assert_eq!(qrng.fill_point(&mut out), Err(GeneratorError::Released));
    assert_eq!(qrng.take_points(3), Err(GeneratorError::Released));
    assert_eq!(qrng.skip(3), Err(GeneratorError::Released));
    assert_eq!(qrng.init(), Err(GeneratorError::Released));
    assert_eq!(qrng.copy_from(&other), Err(GeneratorError::Released));
    assert!(matches!(qrng.try_clone(), Err(GeneratorError::Released)));
    assert_eq!(qrng.release(), Err(GeneratorError::Released));
}
