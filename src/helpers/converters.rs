use std::collections::BTreeMap;

use chrono::NaiveDate;
use common::{
    ChartPoint, ChartSeries, ForecastByHotelPoint, ForecastByRoomTypePoint, ForecastTable,
    HotelChart, ViewMode,
};
use compute::forecast::ForecastResult;
use polars::prelude::{AnyValue, Column, DataFrame};

/// Helper function to convert a compute ForecastResult DataFrame into the
/// transport-friendly ForecastTable.
pub fn forecast_result_to_table(result: &ForecastResult) -> Result<ForecastTable, String> {
    match result.view_mode {
        ViewMode::ByHotel => Ok(ForecastTable::ByHotel(by_hotel_rows(&result.data)?)),
        ViewMode::ByHotelAndRoomType => Ok(ForecastTable::ByHotelAndRoomType(by_room_type_rows(
            &result.data,
        )?)),
    }
}

fn by_hotel_rows(df: &DataFrame) -> Result<Vec<ForecastByHotelPoint>, String> {
    let date_col = column(df, "date")?;
    let hotel_id_col = column(df, "hotel_id")?;
    let hotel_name_col = column(df, "hotel_name")?;
    let forecast_col = column(df, "forecast")?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(ForecastByHotelPoint {
            date: date_at(date_col, i)?,
            hotel_id: int_at(hotel_id_col, i, "hotel_id")?,
            hotel_name: string_at(hotel_name_col, i, "hotel_name")?,
            forecast: float_at(forecast_col, i, "forecast")?,
        });
    }
    Ok(rows)
}

fn by_room_type_rows(df: &DataFrame) -> Result<Vec<ForecastByRoomTypePoint>, String> {
    let date_col = column(df, "date")?;
    let hotel_id_col = column(df, "hotel_id")?;
    let hotel_name_col = column(df, "hotel_name")?;
    let room_type_id_col = column(df, "room_type_id")?;
    let room_type_name_col = column(df, "room_type_name")?;
    let forecast_col = column(df, "forecast")?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        rows.push(ForecastByRoomTypePoint {
            date: date_at(date_col, i)?,
            hotel_id: int_at(hotel_id_col, i, "hotel_id")?,
            hotel_name: string_at(hotel_name_col, i, "hotel_name")?,
            room_type_id: int_at(room_type_id_col, i, "room_type_id")?,
            room_type_name: string_at(room_type_name_col, i, "room_type_name")?,
            forecast: float_at(forecast_col, i, "forecast")?,
        });
    }
    Ok(rows)
}

/// Splits a forecast table into one chart per selected hotel, in selection
/// order: x = date, y = forecast value. In the aggregated view each hotel
/// chart has a single series; in the detailed view the series are split by
/// room-type name. Hotels without rows still get an (empty) chart.
pub fn table_to_charts(table: &ForecastTable, hotels: &[(i32, String)]) -> Vec<HotelChart> {
    hotels
        .iter()
        .map(|(hotel_id, hotel_name)| {
            let series = match table {
                ForecastTable::ByHotel(rows) => {
                    let points: Vec<ChartPoint> = rows
                        .iter()
                        .filter(|row| row.hotel_id == *hotel_id)
                        .map(|row| ChartPoint {
                            date: row.date,
                            value: row.forecast,
                        })
                        .collect();
                    if points.is_empty() {
                        Vec::new()
                    } else {
                        vec![ChartSeries {
                            label: hotel_name.clone(),
                            points,
                        }]
                    }
                }
                ForecastTable::ByHotelAndRoomType(rows) => {
                    let mut by_room: BTreeMap<&str, Vec<ChartPoint>> = BTreeMap::new();
                    for row in rows.iter().filter(|row| row.hotel_id == *hotel_id) {
                        by_room
                            .entry(row.room_type_name.as_str())
                            .or_default()
                            .push(ChartPoint {
                                date: row.date,
                                value: row.forecast,
                            });
                    }
                    by_room
                        .into_iter()
                        .map(|(label, points)| ChartSeries {
                            label: label.to_string(),
                            points,
                        })
                        .collect()
                }
            };

            HotelChart {
                hotel_id: *hotel_id,
                hotel_name: hotel_name.clone(),
                series,
            }
        })
        .collect()
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, String> {
    df.column(name)
        .map_err(|e| format!("Missing {} column: {}", name, e))
}

fn date_at(col: &Column, i: usize) -> Result<NaiveDate, String> {
    let days = col
        .get(i)
        .map_err(|e| format!("Error getting date at row {}: {}", i, e))?
        .try_extract::<i32>()
        .map_err(|e| format!("Error extracting date at row {}: {}", i, e))?;

    // Polars stores dates as days since the Unix epoch
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    Ok(epoch + chrono::Duration::days(i64::from(days)))
}

fn int_at(col: &Column, i: usize, name: &str) -> Result<i32, String> {
    col.get(i)
        .map_err(|e| format!("Error getting {} at row {}: {}", name, i, e))?
        .try_extract::<i32>()
        .map_err(|e| format!("Error extracting {} as i32 at row {}: {}", name, i, e))
}

fn float_at(col: &Column, i: usize, name: &str) -> Result<f64, String> {
    col.get(i)
        .map_err(|e| format!("Error getting {} at row {}: {}", name, i, e))?
        .try_extract::<f64>()
        .map_err(|e| format!("Error extracting {} as f64 at row {}: {}", name, i, e))
}

fn string_at(col: &Column, i: usize, name: &str) -> Result<String, String> {
    let value = col
        .get(i)
        .map_err(|e| format!("Error getting {} at row {}: {}", name, i, e))?;
    match value {
        AnyValue::String(s) => Ok(s.to_string()),
        AnyValue::StringOwned(s) => Ok(s.to_string()),
        other => Ok(format!("{}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_hotel_row(day: u32, hotel_id: i32, name: &str, forecast: f64) -> ForecastByHotelPoint {
        ForecastByHotelPoint {
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            hotel_id,
            hotel_name: name.to_string(),
            forecast,
        }
    }

    #[test]
    fn test_by_hotel_charts_one_series_per_hotel() {
        let table = ForecastTable::ByHotel(vec![
            by_hotel_row(1, 1, "Grand Plaza", 70.0),
            by_hotel_row(2, 1, "Grand Plaza", 72.0),
            by_hotel_row(1, 2, "Seaside Resort", 55.0),
        ]);
        let hotels = vec![
            (1, "Grand Plaza".to_string()),
            (2, "Seaside Resort".to_string()),
        ];

        let charts = table_to_charts(&table, &hotels);
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].series.len(), 1);
        assert_eq!(charts[0].series[0].points.len(), 2);
        assert_eq!(charts[1].series[0].points.len(), 1);
    }

    #[test]
    fn test_detailed_charts_split_by_room_type() {
        let row = |day: u32, room_id: i32, room: &str, forecast: f64| ForecastByRoomTypePoint {
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            hotel_id: 1,
            hotel_name: "Grand Plaza".to_string(),
            room_type_id: room_id,
            room_type_name: room.to_string(),
            forecast,
        };
        let table = ForecastTable::ByHotelAndRoomType(vec![
            row(1, 10, "Standard Double", 60.0),
            row(2, 10, "Standard Double", 61.0),
            row(1, 11, "Suite", 80.0),
        ]);
        let hotels = vec![(1, "Grand Plaza".to_string())];

        let charts = table_to_charts(&table, &hotels);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].series.len(), 2);

        let labels: Vec<&str> = charts[0].series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Standard Double", "Suite"]);
    }

    #[test]
    fn test_hotel_without_rows_gets_empty_chart() {
        let table = ForecastTable::ByHotel(vec![by_hotel_row(1, 1, "Grand Plaza", 70.0)]);
        let hotels = vec![
            (1, "Grand Plaza".to_string()),
            (2, "Seaside Resort".to_string()),
        ];

        let charts = table_to_charts(&table, &hotels);
        assert_eq!(charts.len(), 2);
        assert!(charts[1].series.is_empty());
    }
}
