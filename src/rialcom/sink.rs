use crate::{rialcom::TariffRecord, OutputFormat, TariffError, TariffSink};
use rust_xlsxwriter::{Format, Workbook};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Spreadsheet header, in column order.
pub const COLUMNS: [&str; 4] = [
    "Название тарифа",
    "Количество каналов",
    "Скорость (Мбит/с)",
    "Цена",
];

pub fn sink_for(format: OutputFormat, path: impl Into<PathBuf>) -> Box<dyn TariffSink> {
    let path = path.into();
    match format {
        OutputFormat::Xlsx => Box::new(XlsxSink { path }),
        OutputFormat::Csv => Box::new(CsvSink { path }),
        OutputFormat::Json => Box::new(JsonSink { path }),
    }
}

/// Single worksheet, bold header row. Absent channel counts stay blank.
#[derive(Debug)]
pub struct XlsxSink {
    pub path: PathBuf,
}

impl TariffSink for XlsxSink {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[TariffRecord]) -> Result<(), TariffError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();

        for (col, title) in (0u16..).zip(COLUMNS) {
            worksheet.write_string_with_format(0, col, title, &bold)?;
        }

        for (row, record) in (1u32..).zip(records) {
            worksheet.write_string(row, 0, record.name.as_str())?;
            if let Some(channels) = record.channels {
                worksheet.write_number(row, 1, channels)?;
            }
            worksheet.write_number(row, 2, record.speed_mbps as f64)?;
            worksheet.write_number(row, 3, record.price as f64)?;
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct CsvSink {
    pub path: PathBuf,
}

impl TariffSink for CsvSink {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[TariffRecord]) -> Result<(), TariffError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct JsonSink {
    pub path: PathBuf,
}

impl TariffSink for JsonSink {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[TariffRecord]) -> Result<(), TariffError> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
