pub mod catalog;
pub mod error;
pub mod forecast;

use forecast::cache::ForecastCacheCalculator;
use forecast::value_source::UniformRandomSource;
use forecast::ForecastBuilder;

/// Returns a default pre-configured forecast calculator that will be used
/// most of the time: the uniform-random value source behind the
/// query-keyed memoization layer, so a query's numbers stay put until one
/// of its parameters changes.
pub fn default_calculator() -> ForecastCacheCalculator<ForecastBuilder> {
    let builder = ForecastBuilder::new(Box::new(UniformRandomSource::default()));

    ForecastCacheCalculator::with_defaults(builder)
}
