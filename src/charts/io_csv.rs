// Primitives for reading CSV files.

use std::io::Read;

use log::debug;

use crate::charts::*;

pub fn read_csv_records(path: &str) -> BChartsResult<Vec<Record>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_records(rdr, path)
}

/// Same as [`read_csv_records`], from any reader. `name` is only used in error messages.
pub fn read_csv_records_from<R: Read>(reader: R, name: &str) -> BChartsResult<Vec<Record>> {
    let rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    read_records(rdr, name)
}

fn read_records<R: Read>(mut rdr: csv::Reader<R>, name: &str) -> BChartsResult<Vec<Record>> {
    let header: Vec<String> = rdr
        .headers()
        .context(CsvHeaderSnafu { path: name })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_records: header: {:?}", header);

    let mut res: Vec<Record> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {
            path: name,
            lineno,
        })?;
        let cells: Vec<&str> = line.iter().collect();
        if cells.len() != header.len() {
            debug!(
                "read_csv_records: lineno: {:?} has {} cells for {} columns",
                lineno,
                cells.len(),
                header.len()
            );
        }
        res.push(Record::from_row(&header, &cells));
    }
    Ok(res)
}
