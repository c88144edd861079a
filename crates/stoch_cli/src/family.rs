//! Distribution family selection by name.
//!
//! Maps a family name and a positional parameter list, as given on the
//! command line, onto the concrete distribution types of `stoch_random`.

use stoch_random::distributions::{
    BivariateGaussian, Cauchy, Cdf, Density, Exponential, ExponentialPower, Flat, Gamma, Gaussian,
    GaussianMethod, GaussianTail, InverseCdf, Laplace, Lognormal, Rayleigh, RayleighTail,
    UnitGaussian,
};
use stoch_random::rng::Generator;

use crate::{CliError, Result};

/// Family names and their positional parameters, in listing order.
pub const SIGNATURES: [(&str, &[&str]); 13] = [
    ("gaussian", &["sigma"]),
    ("ugaussian", &[]),
    ("gaussian_tail", &["a", "sigma"]),
    ("bivariate_gaussian", &["sigma_x", "sigma_y", "rho"]),
    ("exponential", &["mu"]),
    ("laplace", &["a"]),
    ("exppow", &["a", "b"]),
    ("cauchy", &["a"]),
    ("rayleigh", &["sigma"]),
    ("rayleigh_tail", &["a", "sigma"]),
    ("gamma", &["shape", "scale"]),
    ("flat", &["a", "b"]),
    ("lognormal", &["zeta", "sigma"]),
];

/// A distribution chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Family {
    Gaussian(Gaussian),
    UnitGaussian(UnitGaussian),
    GaussianTail(GaussianTail),
    BivariateGaussian(BivariateGaussian),
    Exponential(Exponential),
    Laplace(Laplace),
    ExponentialPower(ExponentialPower),
    Cauchy(Cauchy),
    Rayleigh(Rayleigh),
    RayleighTail(RayleighTail),
    Gamma(Gamma),
    Flat(Flat),
    Lognormal(Lognormal),
}

impl Family {
    /// Build the family `name` from `params`.
    ///
    /// `method` applies to `gaussian` and `ugaussian` only.
    pub fn parse(name: &str, params: &[f64], method: GaussianMethod) -> Result<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        let (canonical, expected) = SIGNATURES
            .iter()
            .find(|(family, _)| *family == wanted)
            .ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "Unknown distribution: {}. Supported: {}",
                    name,
                    SIGNATURES.map(|(family, _)| family).join(", ")
                ))
            })?;
        if params.len() != expected.len() {
            return Err(CliError::InvalidArgument(format!(
                "{} takes {} parameter(s) ({}), got {}",
                canonical,
                expected.len(),
                expected.join(", "),
                params.len()
            )));
        }

        let family = match *canonical {
            "gaussian" => Family::Gaussian(Gaussian::new(params[0])?.with_method(method)),
            "ugaussian" => Family::UnitGaussian(UnitGaussian::with_method(method)),
            "gaussian_tail" => Family::GaussianTail(GaussianTail::new(params[0], params[1])?),
            "bivariate_gaussian" => Family::BivariateGaussian(BivariateGaussian::new(
                params[0], params[1], params[2],
            )?),
            "exponential" => Family::Exponential(Exponential::new(params[0])?),
            "laplace" => Family::Laplace(Laplace::new(params[0])?),
            "exppow" => Family::ExponentialPower(ExponentialPower::new(params[0], params[1])?),
            "cauchy" => Family::Cauchy(Cauchy::new(params[0])?),
            "rayleigh" => Family::Rayleigh(Rayleigh::new(params[0])?),
            "rayleigh_tail" => Family::RayleighTail(RayleighTail::new(params[0], params[1])?),
            "gamma" => Family::Gamma(Gamma::new(params[0], params[1])?),
            "flat" => Family::Flat(Flat::new(params[0], params[1])?),
            "lognormal" => Family::Lognormal(Lognormal::new(params[0], params[1])?),
            other => return Err(CliError::InvalidArgument(format!("Unknown distribution: {}", other))),
        };
        Ok(family)
    }

    /// Number of values produced per draw.
    pub fn width(&self) -> usize {
        match self {
            Family::BivariateGaussian(_) => 2,
            _ => 1,
        }
    }

    /// One draw: a single value, or an `(x, y)` pair for the bivariate Gaussian.
    pub fn draw(&self, rng: &mut Generator) -> Result<Vec<f64>> {
        let value = match self {
            Family::Gaussian(d) => rng.sample(d)?,
            Family::UnitGaussian(d) => rng.sample(d)?,
            Family::GaussianTail(d) => rng.sample(d)?,
            Family::BivariateGaussian(d) => {
                let (x, y) = rng.sample(d)?;
                return Ok(vec![x, y]);
            }
            Family::Exponential(d) => rng.sample(d)?,
            Family::Laplace(d) => rng.sample(d)?,
            Family::ExponentialPower(d) => rng.sample(d)?,
            Family::Cauchy(d) => rng.sample(d)?,
            Family::Rayleigh(d) => rng.sample(d)?,
            Family::RayleighTail(d) => rng.sample(d)?,
            Family::Gamma(d) => rng.sample(d)?,
            Family::Flat(d) => rng.sample(d)?,
            Family::Lognormal(d) => rng.sample(d)?,
        };
        Ok(vec![value])
    }

    /// Univariate density, if the family has one.
    pub fn density(&self) -> Option<&dyn Density> {
        match self {
            Family::BivariateGaussian(_) => None,
            Family::RayleighTail(d) => Some(d),
            _ => self.cdf().map(|(density, _, _)| density),
        }
    }

    /// Density, both-tail CDF and quantiles, for families that provide all three.
    pub fn cdf(&self) -> Option<(&dyn Density, &dyn Cdf, &dyn InverseCdf)> {
        match self {
            Family::Gaussian(d) => Some((d, d, d)),
            Family::UnitGaussian(d) => Some((d, d, d)),
            Family::GaussianTail(d) => Some((d, d, d)),
            Family::Exponential(d) => Some((d, d, d)),
            Family::Laplace(d) => Some((d, d, d)),
            Family::ExponentialPower(d) => Some((d, d, d)),
            Family::Cauchy(d) => Some((d, d, d)),
            Family::Rayleigh(d) => Some((d, d, d)),
            Family::Gamma(d) => Some((d, d, d)),
            Family::Flat(d) => Some((d, d, d)),
            Family::Lognormal(d) => Some((d, d, d)),
            Family::BivariateGaussian(_) | Family::RayleighTail(_) => None,
        }
    }
}

/// Parse a comma-separated list of numbers, e.g. `"2.0,1.5"`.
pub fn parse_list(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| CliError::InvalidArgument(format!("Not a number: {}", field)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stoch_random::rng::GeneratorKind;

    #[test]
    fn test_every_signature_parses() {
        let sample_params: [&[f64]; 13] = [
            &[1.0],
            &[],
            &[1.0, 1.0],
            &[1.0, 1.0, 0.5],
            &[1.0],
            &[1.0],
            &[1.0, 2.0],
            &[1.0],
            &[1.0],
            &[1.0, 1.0],
            &[2.0, 1.0],
            &[0.0, 1.0],
            &[0.0, 1.0],
        ];
        let mut rng = Generator::with_seed(GeneratorKind::Pcg64, 1);
        for ((name, _), params) in SIGNATURES.iter().zip(sample_params) {
            let family = Family::parse(name, params, GaussianMethod::Polar).unwrap();
            assert_eq!(family.draw(&mut rng).unwrap().len(), family.width(), "{}", name);
        }
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let family = Family::parse("Gamma", &[2.0, 3.0], GaussianMethod::Polar).unwrap();
        assert!(matches!(family, Family::Gamma(_)));
    }

    #[test]
    fn test_wrong_parameter_count() {
        let err = Family::parse("gamma", &[2.0], GaussianMethod::Polar).unwrap_err();
        assert!(err.to_string().contains("gamma takes 2 parameter(s) (shape, scale), got 1"));
    }

    #[test]
    fn test_unknown_family() {
        assert!(matches!(
            Family::parse("weibull", &[1.0, 1.0], GaussianMethod::Polar),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_invalid_parameter_propagates() {
        assert!(matches!(
            Family::parse("gaussian", &[-1.0], GaussianMethod::Polar),
            Err(CliError::Distribution(_))
        ));
    }

    #[test]
    fn test_method_applied() {
        let family = Family::parse("gaussian", &[2.0], GaussianMethod::RatioMethod).unwrap();
        match family {
            Family::Gaussian(g) => assert_eq!(g.method(), GaussianMethod::RatioMethod),
            other => panic!("unexpected family {:?}", other),
        }
    }

    #[test]
    fn test_cdf_availability() {
        let gamma = Family::parse("gamma", &[2.0, 1.0], GaussianMethod::Polar).unwrap();
        let (density, cdf, inverse) = gamma.cdf().unwrap();
        assert!(density.pdf(1.0) > 0.0);
        let p = cdf.cdf_lower(1.5);
        assert_relative_eq!(inverse.inv_cdf_lower(p).unwrap(), 1.5, epsilon = 1e-9);

        let tail = Family::parse("rayleigh_tail", &[1.0, 1.0], GaussianMethod::Polar).unwrap();
        assert!(tail.cdf().is_none());
        assert!(tail.density().is_some());

        let bivariate =
            Family::parse("bivariate_gaussian", &[1.0, 1.0, 0.0], GaussianMethod::Polar).unwrap();
        assert!(bivariate.density().is_none());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("1, 2.5,-3").unwrap(), vec![1.0, 2.5, -3.0]);
        assert_eq!(parse_list("").unwrap(), Vec::<f64>::new());
        assert!(parse_list("1,x").is_err());
    }
}
