use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a forecast is broken out: aggregated per hotel, or split per hotel
/// and room type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    ByHotel,
    ByHotelAndRoomType,
}

/// One aggregated forecast row: the mean booking count over all room types
/// of a hotel on one date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastByHotelPoint {
    pub date: NaiveDate,
    pub hotel_id: i32,
    pub hotel_name: String,
    /// Arithmetic mean of the per-room-type forecasts
    pub forecast: f64,
}

/// One detailed forecast row for a selected (hotel, room type, date) triple.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastByRoomTypePoint {
    pub date: NaiveDate,
    pub hotel_id: i32,
    pub hotel_name: String,
    pub room_type_id: i32,
    pub room_type_name: String,
    /// Predicted booking count
    pub forecast: f64,
}

/// A forecast table, tagged by the view mode that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(tag = "view_mode", content = "rows", rename_all = "snake_case")]
pub enum ForecastTable {
    ByHotel(Vec<ForecastByHotelPoint>),
    ByHotelAndRoomType(Vec<ForecastByRoomTypePoint>),
}

impl ForecastTable {
    pub fn view_mode(&self) -> ViewMode {
        match self {
            ForecastTable::ByHotel(_) => ViewMode::ByHotel,
            ForecastTable::ByHotelAndRoomType(_) => ViewMode::ByHotelAndRoomType,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ForecastTable::ByHotel(rows) => rows.len(),
            ForecastTable::ByHotelAndRoomType(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One point of a chart line.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A single line of a hotel chart. In the aggregated view a hotel has one
/// series; in the detailed view there is one series per room type, labeled
/// with the room type name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

/// The line chart for one selected hotel: x = date, y = forecast value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct HotelChart {
    pub hotel_id: i32,
    pub hotel_name: String,
    pub series: Vec<ChartSeries>,
}
