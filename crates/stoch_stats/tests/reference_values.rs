//! Reference values for the statistics layer.
//!
//! Expected values were computed independently with R, except the lag-1
//! autocorrelation and the weighted higher moments, which come from the
//! GNU Scientific Library.

use approx::assert_relative_eq;
use stoch_stats::correlation::{correlation, covariance, covariance_m, spearman};
use stoch_stats::moments::*;
use stoch_stats::order::{
    max, max_index, median_from_sorted_data, min, min_index, minmax, minmax_index,
    quantile_from_sorted_data,
};
use stoch_stats::weighted::*;

const TOL: f64 = 1e-12;

const NORM_DATA: [f64; 33] = [
    1.33830225764885e-04,
    3.52595682367445e-04,
    8.72682695045760e-04,
    2.02904805729977e-03,
    4.43184841193801e-03,
    9.09356250159105e-03,
    1.75283004935685e-02,
    3.17396518356674e-02,
    5.39909665131881e-02,
    8.62773188265115e-02,
    1.29517595665892e-01,
    1.82649085389022e-01,
    2.41970724519143e-01,
    3.01137432154804e-01,
    3.52065326764300e-01,
    3.86668116802849e-01,
    3.98942280401433e-01,
    3.86668116802849e-01,
    3.52065326764300e-01,
    3.01137432154804e-01,
    2.41970724519143e-01,
    1.82649085389022e-01,
    1.29517595665892e-01,
    8.62773188265115e-02,
    5.39909665131881e-02,
    3.17396518356674e-02,
    1.75283004935685e-02,
    9.09356250159105e-03,
    4.43184841193801e-03,
    2.02904805729977e-03,
    8.72682695045760e-04,
    3.52595682367445e-04,
    1.33830225764885e-04,
];

const DATA1: [f64; 20] = [
    16.0, 99.0, 26.0, 85.0, 76.0, 50.0, 46.0, 11.0, 79.0, 97.0, 24.0, 20.0, 100.0, 68.0, 22.0,
    15.0, 5.0, 89.0, 45.0, 2.0,
];

const DATA2: [f64; 20] = [
    39.0, 10.0, 34.0, 29.0, 82.0, 54.0, 30.0, 65.0, 56.0, 55.0, 20.0, 52.0, 96.0, 95.0, 23.0,
    51.0, 27.0, 59.0, 31.0, 99.0,
];

const WEIGHTS: [f64; 20] = [
    0.1, 0.2, 0.3, 0.4, 0.1, 0.2, 0.2, 0.1, 0.8, 0.8, 0.1, 0.2, 0.1, 0.1, 0.2, 0.3, 0.3, 0.3, 0.2,
    0.1,
];

fn one_to_ten() -> Vec<f64> {
    (1..=10).map(f64::from).collect()
}

#[test]
fn test_basic_moments_one_to_ten() {
    let data = one_to_ten();
    let m = mean(&data).unwrap();
    assert_relative_eq!(m, 5.5, max_relative = TOL);

    let v = variance(&data).unwrap();
    assert_relative_eq!(v, 9.166_666_666_666_666, max_relative = TOL);
    assert_relative_eq!(variance_m(&data, m).unwrap(), v, max_relative = TOL);
    assert_relative_eq!(sd(&data).unwrap(), v.sqrt(), max_relative = TOL);
    assert_relative_eq!(sd_m(&data, m).unwrap(), v.sqrt(), max_relative = TOL);

    let expected_tss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    assert_relative_eq!(tss(&data).unwrap(), expected_tss, max_relative = TOL);
    assert_relative_eq!(tss_m(&data, m).unwrap(), expected_tss, max_relative = TOL);

    let fixed = variance_with_fixed_mean(&data, m).unwrap();
    assert_relative_eq!(fixed, 8.25, max_relative = TOL);
    assert_relative_eq!(sd_with_fixed_mean(&data, m).unwrap(), fixed.sqrt(), max_relative = TOL);

    assert_relative_eq!(absdev(&data).unwrap(), 2.5, max_relative = TOL);
    assert_relative_eq!(absdev_m(&data, m).unwrap(), 2.5, max_relative = TOL);
}

#[test]
fn test_higher_moments_normal_density_samples() {
    let m = mean(&NORM_DATA).unwrap();
    assert_relative_eq!(m, 0.121_207_831_923_616_3, max_relative = TOL);

    let s = sd(&NORM_DATA).unwrap();
    assert_relative_eq!(s, 0.141_814_688_813_811_12, max_relative = TOL);

    let sk = skew(&NORM_DATA).unwrap();
    assert_relative_eq!(sk, 0.794_461_497_158_338_6, max_relative = TOL);
    assert_relative_eq!(skew_m_sd(&NORM_DATA, m, s).unwrap(), sk, max_relative = TOL);

    let k = kurtosis(&NORM_DATA).unwrap();
    assert_relative_eq!(k, -0.985_913_313_254_298_1, max_relative = TOL);
    assert_relative_eq!(kurtosis_m_sd(&NORM_DATA, m, s).unwrap(), k, max_relative = TOL);

    let r1 = lag1_autocorrelation(&NORM_DATA).unwrap();
    assert_relative_eq!(r1, 0.950_039_540_235_816_9, max_relative = TOL);
    assert_relative_eq!(lag1_autocorrelation_m(&NORM_DATA, m).unwrap(), r1, max_relative = TOL);
}

#[test]
fn test_association_measures() {
    let cov = covariance(&DATA1, &DATA2).unwrap();
    assert_relative_eq!(cov, 130.934_210_526_315_78, max_relative = TOL);

    let m1 = mean(&DATA1).unwrap();
    let m2 = mean(&DATA2).unwrap();
    assert_relative_eq!(covariance_m(&DATA1, &DATA2, m1, m2).unwrap(), cov, max_relative = TOL);

    assert_relative_eq!(
        correlation(&DATA1, &DATA2).unwrap(),
        0.142_691_877_531_861_13,
        max_relative = TOL
    );
    assert_relative_eq!(
        spearman(&DATA1, &DATA2).unwrap(),
        0.091_729_323_308_270_69,
        max_relative = TOL
    );
}

#[test]
fn test_weighted_moments() {
    let wm = wmean(&DATA1, &WEIGHTS).unwrap();
    assert_relative_eq!(wm, 59.098_039_215_686_28, max_relative = TOL);

    let wv = wvariance(&DATA1, &WEIGHTS).unwrap();
    assert_relative_eq!(wv, 1_248.934_728_033_472_5, max_relative = TOL);
    assert_relative_eq!(wvariance_m(&DATA1, &WEIGHTS, wm).unwrap(), wv, max_relative = TOL);

    let ws = wsd(&DATA1, &WEIGHTS).unwrap();
    assert_relative_eq!(ws, 35.340_270_627_620_73, max_relative = TOL);
    assert_relative_eq!(wsd_m(&DATA1, &WEIGHTS, wm).unwrap(), ws, max_relative = TOL);

    let fixed = wvariance_with_fixed_mean(&DATA1, &WEIGHTS, wm).unwrap();
    assert_relative_eq!(fixed, 1_147.617_839_292_579_7, max_relative = TOL);
    assert_relative_eq!(
        wsd_with_fixed_mean(&DATA1, &WEIGHTS, wm).unwrap(),
        fixed.sqrt(),
        max_relative = TOL
    );

    let wt = wtss(&DATA1, &WEIGHTS).unwrap();
    assert_relative_eq!(wt, 5_852.850_980_392_157, max_relative = TOL);
    assert_relative_eq!(wtss_m(&DATA1, &WEIGHTS, wm).unwrap(), wt, max_relative = TOL);

    let wa = wabsdev(&DATA1, &WEIGHTS).unwrap();
    assert_relative_eq!(wa, 31.460_976_547_481_74, max_relative = TOL);
    assert_relative_eq!(wabsdev_m(&DATA1, &WEIGHTS, wm).unwrap(), wa, max_relative = TOL);

    let wsk = wskew(&DATA1, &WEIGHTS).unwrap();
    assert_relative_eq!(wsk, -0.286_792_951_096_486_56, max_relative = TOL);
    assert_relative_eq!(wskew_m_sd(&DATA1, &WEIGHTS, wm, ws).unwrap(), wsk, max_relative = TOL);

    let wk = wkurtosis(&DATA1, &WEIGHTS).unwrap();
    assert_relative_eq!(wk, -1.741_423_196_573_203_7, max_relative = TOL);
    assert_relative_eq!(
        wkurtosis_m_sd(&DATA1, &WEIGHTS, wm, ws).unwrap(),
        wk,
        max_relative = TOL
    );
}

#[test]
fn test_order_statistics() {
    assert_eq!(max(&DATA1), Ok(100.0));
    assert_eq!(min(&DATA1), Ok(2.0));
    assert_eq!(minmax(&DATA1), Ok((2.0, 100.0)));
    assert_eq!(max_index(&DATA1), Ok(12));
    assert_eq!(min_index(&DATA1), Ok(19));
    assert_eq!(minmax_index(&DATA1), Ok((19, 12)));

    let sorted = one_to_ten();
    assert_relative_eq!(median_from_sorted_data(&sorted).unwrap(), 5.5);
    assert_relative_eq!(quantile_from_sorted_data(&sorted, 0.15).unwrap(), 2.35, max_relative = TOL);
    assert_relative_eq!(quantile_from_sorted_data(&sorted, 0.92).unwrap(), 9.28, max_relative = TOL);
    assert_eq!(
        quantile_from_sorted_data(&sorted, 0.5),
        median_from_sorted_data(&sorted)
    );
}
