//! Market snapshot CSV ingestion.
//!
//! Exchange exports come in a handful of layouts, so the needed columns are
//! located by header name rather than by position. Prices quoted per MWh
//! are rescaled to the per-kWh unit the engine works in.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::model::point::MarketPoint;

/// Indices of the columns the engine needs, resolved from the header row.
struct ColumnMap {
    date: usize,
    time_block: usize,
    price: usize,
    /// Price column is quoted per MWh and needs a /1000 rescale.
    per_mwh: bool,
}

fn locate_columns(headers: &csv::StringRecord) -> Result<ColumnMap> {
    let lowered: Vec<String> = headers.iter().map(str::to_lowercase).collect();

    let date = lowered
        .iter()
        .position(|h| h.contains("date"))
        .with_context(|| format!("no date column among headers {:?}", headers))?;
    let time_block = lowered
        .iter()
        .position(|h| h.contains("time"))
        .with_context(|| format!("no time block column among headers {:?}", headers))?;

    // Prefer an already-converted per-kWh clearing price when both appear.
    if let Some(price) = lowered
        .iter()
        .position(|h| h.contains("mcp") && h.contains("kwh"))
    {
        return Ok(ColumnMap {
            date,
            time_block,
            price,
            per_mwh: false,
        });
    }
    let price = lowered
        .iter()
        .position(|h| h.contains("mcp"))
        .or_else(|| lowered.iter().position(|h| h.contains("price")))
        .with_context(|| format!("no MCP or price column among headers {:?}", headers))?;
    Ok(ColumnMap {
        date,
        time_block,
        price,
        per_mwh: lowered[price].contains("mwh"),
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .with_context(|| format!("invalid date '{}'", raw))
}

/// Start of the block from either `HH:MM` or an `HH:MM - HH:MM` range.
fn parse_block_start(raw: &str) -> Result<(u32, u32)> {
    let start = raw.split('-').next().unwrap_or("").trim();
    let (hour, minute) = start
        .split_once(':')
        .with_context(|| format!("invalid time block '{}'", raw))?;
    let hour: u32 = hour
        .trim()
        .parse()
        .with_context(|| format!("invalid time block '{}'", raw))?;
    let minute: u32 = minute
        .trim()
        .parse()
        .with_context(|| format!("invalid time block '{}'", raw))?;
    if hour >= 24 || minute >= 60 {
        bail!("time block '{}' is out of range", raw);
    }
    Ok((hour, minute))
}

/// Exchange exports format large prices with thousands separators.
fn parse_price(raw: &str) -> Result<f64> {
    let cleaned = raw.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .with_context(|| format!("invalid price '{}'", raw))
}

/// Loads a market CSV export into a chronologically sorted block series.
pub fn load_history_csv(path: &Path) -> Result<Vec<MarketPoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let columns = locate_columns(reader.headers().context("failed to read CSV headers")?)?;

    let mut points = Vec::new();
    for (index, result) in reader.records().enumerate() {
        // Header is row 1, so the first data row reports as row 2.
        let row = index + 2;
        let record = result.with_context(|| format!("failed to read row {}", row))?;
        let field = |column: usize| {
            record
                .get(column)
                .with_context(|| format!("row {} is missing column {}", row, column + 1))
        };

        let date = parse_date(field(columns.date)?).with_context(|| format!("row {}", row))?;
        let (hour, minute) =
            parse_block_start(field(columns.time_block)?).with_context(|| format!("row {}", row))?;
        let mut price = parse_price(field(columns.price)?).with_context(|| format!("row {}", row))?;
        if columns.per_mwh {
            price /= 1000.0;
        }
        points.push(MarketPoint::from_block(date, hour, minute, price));
    }

    if points.is_empty() {
        bail!("{} has no data rows", path.display());
    }
    points.sort_by_key(|p| p.timestamp);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_an_exchange_style_export() {
        let file = write_csv(
            "Date,Time Block,Purchase Bid (MW),Sell Bid (MW),MCV (MW),MCP (Rs/MWh)\n\
             01-01-2024,00:00 - 00:15,3100,2900,2800,\"4,500.00\"\n\
             01-01-2024,00:15 - 00:30,3000,2950,2750,5250.50\n",
        );
        let points = load_history_csv(file.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date_label, "01-01-2024");
        assert_eq!(points[0].time_block, "00:00");
        assert!((points[0].price_kwh - 4.5).abs() < 1e-12);
        assert_eq!(points[1].time_block, "00:15");
        assert!((points[1].price_kwh - 5.2505).abs() < 1e-12);
    }

    #[test]
    fn per_kwh_column_wins_over_per_mwh() {
        let file = write_csv(
            "Date,Time Block,MCP (Rs/MWh),MCP (Rs/kWh)\n\
             01/01/2024,06:00,3000,3.0\n",
        );
        let points = load_history_csv(file.path()).unwrap();
        assert!((points[0].price_kwh - 3.0).abs() < f64::EPSILON);
        assert_eq!(points[0].hour, 6);
    }

    #[test]
    fn plain_price_header_is_accepted_unscaled() {
        let file = write_csv(
            "Date,Time Block,Price\n\
             02-01-2024,18:30,7.25\n",
        );
        let points = load_history_csv(file.path()).unwrap();
        assert!((points[0].price_kwh - 7.25).abs() < f64::EPSILON);
    }

    #[test]
    fn rows_sort_chronologically() {
        let file = write_csv(
            "Date,Time Block,MCP (Rs/MWh)\n\
             02-01-2024,00:00,2000\n\
             01-01-2024,23:45,1000\n",
        );
        let points = load_history_csv(file.path()).unwrap();
        assert_eq!(points[0].date_label, "01-01-2024");
        assert_eq!(points[1].date_label, "02-01-2024");
    }

    #[test]
    fn bad_rows_report_their_position() {
        let file = write_csv(
            "Date,Time Block,MCP (Rs/MWh)\n\
             01-01-2024,00:00,4500\n\
             01-01-2024,29:00,4500\n",
        );
        let err = load_history_csv(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("row 3"));
    }

    #[test]
    fn missing_price_column_is_an_error() {
        let file = write_csv("Date,Time Block,Volume\n01-01-2024,00:00,3100\n");
        let err = load_history_csv(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("MCP"));
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = write_csv("Date,Time Block,MCP (Rs/MWh)\n");
        assert!(load_history_csv(file.path()).is_err());
    }
}
