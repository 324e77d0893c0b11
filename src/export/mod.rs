pub mod csv_export;
pub mod preview;

use anyhow::Result;

use crate::core::model::FrequencyTable;

pub use csv_export::CsvExporter;

pub trait Exporter {
    fn export(&self, table: &FrequencyTable) -> Result<()>;
}
