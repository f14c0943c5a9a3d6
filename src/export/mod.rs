pub mod delimited;
pub mod spreadsheet;

pub use delimited::to_csv;
pub use spreadsheet::{build_excel_xml, DEFAULT_SHEET_NAME};

use crate::error::{Error, Result};
use crate::models::AdoptionRecord;
use crate::utils::date_stamp;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::{self, Display};
use std::str::FromStr;

pub const FILE_PREFIX: &str = "par_cadastros";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xls,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Xls => "application/vnd.ms-excel",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xls => "xls",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xls" | "excel" => Ok(ExportFormat::Xls),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// A file ready to be handed to a [`Downloader`](crate::download::Downloader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub filename: String,
}

/// `par_cadastros_<YYYYMMDD_HHMM>.<ext>`, stamped in `tz`.
pub fn export_filename<Tz>(format: ExportFormat, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{FILE_PREFIX}_{}.{}",
        date_stamp(&now.with_timezone(tz)),
        format.extension()
    )
}

/// Encodes `records` for download. Refuses an empty list instead of
/// producing a header-only file.
pub fn export<Tz>(
    records: &[AdoptionRecord],
    format: ExportFormat,
    sheet_name: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<Export>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if records.is_empty() {
        return Err(Error::NothingToExport);
    }
    let body = match format {
        ExportFormat::Csv => to_csv(records)?,
        ExportFormat::Xls => build_excel_xml(records, sheet_name, tz),
    };
    log::info!("exported {} records as {format}", records.len());
    Ok(Export {
        bytes: body.into_bytes(),
        mime: format.mime(),
        filename: export_filename(format, now, tz),
    })
}
