pub mod cache;
pub mod value_source;

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use common::ViewMode;
use polars::prelude::*;
use tracing::debug;

use crate::catalog::CatalogIndex;
use crate::error::{ComputeError, Result};

use self::value_source::ForecastValueSource;

/// The parameters of one forecast request, constructed fresh from the
/// current selections each time a forecast is asked for. Ordered
/// collections keep the query hashable so it can key the memoization
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastQuery {
    pub start_date: NaiveDate,
    /// Last forecast date, inclusive; must not precede `start_date`.
    pub end_date: NaiveDate,
    pub hotel_ids: BTreeSet<i32>,
    pub view_mode: ViewMode,
    /// Per-hotel room-type selection, only consulted in
    /// `ByHotelAndRoomType` mode. A hotel absent from the map contributes
    /// no rows to the filtered output.
    pub selected_room_types: BTreeMap<i32, BTreeSet<i32>>,
}

impl ForecastQuery {
    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(ComputeError::Date(format!(
                "End date {} precedes start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}

/// One generated forecast row before aggregation or filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub hotel_id: i32,
    pub hotel_name: String,
    pub room_type_id: i32,
    pub room_type_name: String,
    pub forecast: u32,
}

/// A forecast table tagged with the view mode that produced it.
///
/// `ByHotel` data has columns `date, hotel_id, hotel_name, forecast`
/// (forecast = mean over room types); `ByHotelAndRoomType` data has
/// columns `date, hotel_id, hotel_name, room_type_id, room_type_name,
/// forecast`.
#[derive(Debug, Clone)]
pub struct ForecastResult {
    pub view_mode: ViewMode,
    pub data: DataFrame,
}

/// The seam between the HTTP surface and the forecast computation.
/// Implementations are pure CPU over the in-memory catalog index.
pub trait ForecastCalculator: Send + Sync {
    fn compute_forecast(
        &self,
        catalog: &CatalogIndex,
        query: &ForecastQuery,
    ) -> Result<ForecastResult>;
}

/// Inclusive daily date sequence from `start` to `end`.
pub fn date_sequence(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current = current.succ_opt().unwrap();
    }
    dates
}

/// Generates booking forecasts from a pluggable value source.
///
/// Rows are produced for every room type of every requested hotel over the
/// whole date range, regardless of the room-type selection; the selection
/// only filters afterwards. The values themselves are whatever the source
/// yields, so repeated computations differ unless routed through the
/// memoizing wrapper.
pub struct ForecastBuilder {
    value_source: Box<dyn ForecastValueSource>,
}

impl ForecastBuilder {
    pub fn new(value_source: Box<dyn ForecastValueSource>) -> Self {
        Self { value_source }
    }

    /// Half-open bounds every generated value stays within, as declared by
    /// the underlying value source.
    pub fn value_bounds(&self) -> (u32, u32) {
        self.value_source.bounds()
    }

    fn generate_rows(
        &self,
        catalog: &CatalogIndex,
        query: &ForecastQuery,
    ) -> Result<Vec<ForecastRow>> {
        let dates = date_sequence(query.start_date, query.end_date);
        let mut rows = Vec::new();

        for &hotel_id in &query.hotel_ids {
            // A requested hotel missing from the catalog is an invariant
            // violation; fail fast instead of dropping it.
            let hotel_name = catalog.hotel_name(hotel_id)?.to_string();

            for &room_type_id in catalog.room_types_for(hotel_id)? {
                let room_type_name = catalog.room_type_name(room_type_id)?.to_string();

                for &date in &dates {
                    rows.push(ForecastRow {
                        date,
                        hotel_id,
                        hotel_name: hotel_name.clone(),
                        room_type_id,
                        room_type_name: room_type_name.clone(),
                        forecast: self.value_source.booking_count(date, hotel_id, room_type_id),
                    });
                }
            }
        }

        Ok(rows)
    }
}

impl ForecastCalculator for ForecastBuilder {
    fn compute_forecast(
        &self,
        catalog: &CatalogIndex,
        query: &ForecastQuery,
    ) -> Result<ForecastResult> {
        query.validate()?;
        debug!(
            "Computing forecast for {} hotels from {} to {} ({:?})",
            query.hotel_ids.len(),
            query.start_date,
            query.end_date,
            query.view_mode
        );

        let mut rows = self.generate_rows(catalog, query)?;

        // Restrict to the requested hotels even though generation already
        // enumerates only them.
        rows.retain(|row| query.hotel_ids.contains(&row.hotel_id));

        let data = match query.view_mode {
            ViewMode::ByHotel => aggregate_by_hotel(rows)?,
            ViewMode::ByHotelAndRoomType => {
                rows.retain(|row| {
                    query
                        .selected_room_types
                        .get(&row.hotel_id)
                        .is_some_and(|selected| selected.contains(&row.room_type_id))
                });
                rows_to_dataframe(&rows)?
            }
        };

        debug!("Forecast computed with {} rows", data.height());
        Ok(ForecastResult {
            view_mode: query.view_mode,
            data,
        })
    }
}

/// Converts generated rows into the detailed-mode DataFrame.
fn rows_to_dataframe(rows: &[ForecastRow]) -> Result<DataFrame> {
    let mut dates = Vec::with_capacity(rows.len());
    let mut hotel_ids = Vec::with_capacity(rows.len());
    let mut hotel_names = Vec::with_capacity(rows.len());
    let mut room_type_ids = Vec::with_capacity(rows.len());
    let mut room_type_names = Vec::with_capacity(rows.len());
    let mut forecasts = Vec::with_capacity(rows.len());

    for row in rows {
        dates.push(row.date);
        hotel_ids.push(row.hotel_id);
        hotel_names.push(row.hotel_name.clone());
        room_type_ids.push(row.room_type_id);
        room_type_names.push(row.room_type_name.clone());
        forecasts.push(row.forecast);
    }

    let df = DataFrame::new(vec![
        Series::new("date".into(), dates).into(),
        Series::new("hotel_id".into(), hotel_ids).into(),
        Series::new("hotel_name".into(), hotel_names).into(),
        Series::new("room_type_id".into(), room_type_ids).into(),
        Series::new("room_type_name".into(), room_type_names).into(),
        Series::new("forecast".into(), forecasts).into(),
    ])?;

    Ok(df)
}

/// Reduces generated rows to one row per (date, hotel) with the arithmetic
/// mean of the per-room-type forecasts.
fn aggregate_by_hotel(rows: Vec<ForecastRow>) -> Result<DataFrame> {
    let df = rows_to_dataframe(&rows)?;

    let aggregated = df
        .lazy()
        .group_by([col("date"), col("hotel_id"), col("hotel_name")])
        .agg([col("forecast").mean()])
        .sort(["date", "hotel_id"], SortMultipleOptions::default())
        .collect()?;

    Ok(aggregated)
}
