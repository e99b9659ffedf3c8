use chrono::NaiveDate;
use rand::Rng;

/// Strategy producing the predicted booking count for one
/// (date, hotel, room type) triple.
///
/// The production implementation is stochastic; tests plug in
/// deterministic sources. Every value must stay within the half-open
/// interval declared by [`bounds`](ForecastValueSource::bounds).
pub trait ForecastValueSource: Send + Sync {
    /// Predicted number of bookings. Must be within `bounds()`.
    fn booking_count(&self, date: NaiveDate, hotel_id: i32, room_type_id: i32) -> u32;

    /// Half-open `[min, max)` interval the produced values lie in.
    fn bounds(&self) -> (u32, u32);
}

/// The placeholder production source: an independent uniform integer draw
/// per triple. Repeated calls with identical arguments return different
/// values; callers that need stable output for a given query must go
/// through the memoizing calculator.
#[derive(Debug, Clone)]
pub struct UniformRandomSource {
    min: u32,
    max: u32,
}

impl UniformRandomSource {
    /// Creates a source drawing uniformly from `[min, max)`.
    pub fn new(min: u32, max: u32) -> Self {
        assert!(min < max, "empty forecast value interval");
        Self { min, max }
    }
}

impl Default for UniformRandomSource {
    /// The dashboard's historical interval: integers in `[50, 100)`.
    fn default() -> Self {
        Self::new(50, 100)
    }
}

impl ForecastValueSource for UniformRandomSource {
    fn booking_count(&self, _date: NaiveDate, _hotel_id: i32, _room_type_id: i32) -> u32 {
        rand::thread_rng().gen_range(self.min..self.max)
    }

    fn bounds(&self) -> (u32, u32) {
        (self.min, self.max)
    }
}

/// Deterministic source returning one fixed count for every triple. Used
/// by tests and by demo setups that want reproducible output.
#[derive(Debug, Clone)]
pub struct FixedValueSource {
    value: u32,
}

impl FixedValueSource {
    pub fn new(value: u32) -> Self {
        Self { value }
    }
}

impl ForecastValueSource for FixedValueSource {
    fn booking_count(&self, _date: NaiveDate, _hotel_id: i32, _room_type_id: i32) -> u32 {
        self.value
    }

    fn bounds(&self) -> (u32, u32) {
        (self.value, self.value + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_source_respects_bounds() {
        let source = UniformRandomSource::default();
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let (min, max) = source.bounds();
        for _ in 0..1000 {
            let value = source.booking_count(date, 1, 10);
            assert!(value >= min && value < max, "value {} out of bounds", value);
        }
    }

    #[test]
    fn test_fixed_source_is_constant() {
        let source = FixedValueSource::new(64);
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        assert_eq!(source.booking_count(date, 1, 10), 64);
        assert_eq!(source.booking_count(date, 2, 11), 64);
        assert_eq!(source.bounds(), (64, 65));
    }

    #[test]
    #[should_panic(expected = "empty forecast value interval")]
    fn test_empty_interval_panics() {
        UniformRandomSource::new(100, 100);
    }
}
