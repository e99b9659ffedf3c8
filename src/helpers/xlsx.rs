use common::ForecastTable;
use rust_xlsxwriter::{Workbook, XlsxError};

/// MIME type for Office Open XML spreadsheets.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Serializes a forecast table into a single-sheet Excel workbook: one
/// header row followed by one row per forecast point, columns matching the
/// table's view mode.
pub fn forecast_table_to_xlsx(table: &ForecastTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    match table {
        ForecastTable::ByHotel(rows) => {
            write_header(worksheet, &["date", "hotel_id", "hotel_name", "forecast"])?;
            for (i, row) in rows.iter().enumerate() {
                let r = (i + 1) as u32;
                worksheet.write_string(r, 0, row.date.format(DATE_FORMAT).to_string())?;
                worksheet.write_number(r, 1, row.hotel_id as f64)?;
                worksheet.write_string(r, 2, row.hotel_name.as_str())?;
                worksheet.write_number(r, 3, row.forecast)?;
            }
        }
        ForecastTable::ByHotelAndRoomType(rows) => {
            write_header(
                worksheet,
                &[
                    "date",
                    "hotel_id",
                    "hotel_name",
                    "room_type_id",
                    "room_type_name",
                    "forecast",
                ],
            )?;
            for (i, row) in rows.iter().enumerate() {
                let r = (i + 1) as u32;
                worksheet.write_string(r, 0, row.date.format(DATE_FORMAT).to_string())?;
                worksheet.write_number(r, 1, row.hotel_id as f64)?;
                worksheet.write_string(r, 2, row.hotel_name.as_str())?;
                worksheet.write_number(r, 3, row.room_type_id as f64)?;
                worksheet.write_string(r, 4, row.room_type_name.as_str())?;
                worksheet.write_number(r, 5, row.forecast)?;
            }
        }
    }

    workbook.save_to_buffer()
}

fn write_header(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    titles: &[&str],
) -> Result<(), XlsxError> {
    for (col, title) in titles.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use common::ForecastByHotelPoint;

    use super::*;

    #[test]
    fn test_workbook_bytes_look_like_a_zip() {
        let table = ForecastTable::ByHotel(vec![ForecastByHotelPoint {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            hotel_id: 1,
            hotel_name: "Grand Plaza".to_string(),
            forecast: 70.0,
        }]);

        let bytes = forecast_table_to_xlsx(&table).unwrap();
        // XLSX files are ZIP archives and start with the PK magic
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn test_empty_table_still_serializes() {
        let table = ForecastTable::ByHotelAndRoomType(Vec::new());
        let bytes = forecast_table_to_xlsx(&table).unwrap();
        assert!(!bytes.is_empty());
    }
}
