//! Common transport-layer types shared between the API handlers and the
//! compute crate. These structs mirror the request/response payloads of the
//! forecast endpoints so both sides agree on shapes without duplication.

mod catalog;
mod forecast;

pub use catalog::{HotelDto, HotelRoomTypes, RoomTypeDto};
pub use forecast::{
    ChartPoint, ChartSeries, ForecastByHotelPoint, ForecastByRoomTypePoint, ForecastTable,
    HotelChart, ViewMode,
};
