// Reading survey exports in the Excel format (Google Forms, Microsoft Forms).

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;

use crate::charts::*;

pub fn read_xlsx_records(path: &str, worksheet_name: Option<&str>) -> BChartsResult<Vec<Record>> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(cell_to_string)
        .collect();
    debug!("read_xlsx_records: header: {:?}", header);

    let mut res: Vec<Record> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        // Blank lines are skipped, as in CSV files.
        if cells.iter().all(|c| c.is_empty()) {
            debug!("read_xlsx_records: skipping empty row {}", idx + 2);
            continue;
        }
        res.push(Record::from_row(&header, &cells));
    }
    Ok(res)
}

/// The text of a cell, as it would appear in a CSV export.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(true) => "TRUE".to_string(),
        DataType::Bool(false) => "FALSE".to_string(),
        DataType::Empty => "".to_string(),
        // Dates and cell errors carry no answer the charts can use.
        _ => {
            debug!("cell_to_string: treating {:?} as blank", cell);
            "".to_string()
        }
    }
}

fn get_range(path: &str, worksheet_name_o: Option<&str>) -> BChartsResult<calamine::Range<DataType>> {
    debug!(
        "read_xlsx_records: path: {:?} worksheet: {:?}",
        path, worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        // Otherwise the first worksheet, in workbook order.
        let first_name = workbook.sheet_names().first().cloned();
        debug!(
            "read_xlsx_records: path: {:?} default worksheet: {:?}",
            path, first_name
        );
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(cell_to_string(&DataType::String(" Yes".to_string())), " Yes");
        assert_eq!(cell_to_string(&DataType::Int(3)), "3");
        assert_eq!(cell_to_string(&DataType::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&DataType::Empty), "");
        assert_eq!(cell_to_string(&DataType::Bool(true)), "TRUE");
    }

    fn fixture_path() -> String {
        format!(
            "{}/tests/data/student_mental_health.xlsx",
            env!("CARGO_MANIFEST_DIR")
        )
    }

    #[test]
    fn reads_first_sheet_by_default() {
        let default_sheet = read_xlsx_records(&fixture_path(), None).unwrap();
        let named_sheet = read_xlsx_records(&fixture_path(), Some("Responses")).unwrap();
        assert_eq!(default_sheet, named_sheet);
        // 17 data rows, one of them blank.
        assert_eq!(default_sheet.len(), 16);
    }

    #[test]
    fn header_and_cell_text() {
        let records = read_xlsx_records(&fixture_path(), None).unwrap();
        assert_eq!(records[0].get("Choose your gender"), Some("Female"));
        // Numeric cells read as text.
        assert_eq!(records[0].get("Age"), Some("18"));
        assert_eq!(records[1].get("Age"), Some("21"));
        assert_eq!(records[0].get(CGPA_COLUMN), Some("3.00 - 3.49"));
        // The row after the blank one.
        assert_eq!(records[4].get("What is your course?"), Some("Mathemathics"));
        // Cells missing at the end of the last row are blank answers.
        assert_eq!(records[15].get(TREATMENT_COLUMN), Some(""));
    }

    #[test]
    fn named_worksheet() {
        let notes = read_xlsx_records(&fixture_path(), Some("Notes")).unwrap();
        assert!(notes.is_empty());

        let err = read_xlsx_records(&fixture_path(), Some("Sheet1")).unwrap_err();
        assert!(matches!(
            *err,
            ChartsError::MissingWorksheet { ref name, .. } if name == "Sheet1"
        ));
    }

    #[test]
    fn missing_workbook() {
        let path = std::env::temp_dir()
            .join("surveycharts-missing.xlsx")
            .display()
            .to_string();
        let err = read_xlsx_records(&path, None).unwrap_err();
        assert!(matches!(*err, ChartsError::OpeningExcel { .. }));
    }
}
