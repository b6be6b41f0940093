/*!
Aggregation of survey answers into the small tables behind three charts:
the CGPA distribution (donut), the co-occurrence of "yes" answers between
boolean questions (chord diagram) and the treatment answers split by CGPA
bin (stacked bars).

```
use survey_aggregates::*;

let records = vec![
    Record::from_pairs(&[(CGPA_COLUMN, "3.00 - 3.49"), (TREATMENT_COLUMN, "Yes")]),
    Record::from_pairs(&[(CGPA_COLUMN, "3.00 - 3.49"), (TREATMENT_COLUMN, "No")]),
    Record::from_pairs(&[(CGPA_COLUMN, ""), (TREATMENT_COLUMN, "Yes")]),
];
let aggs = aggregate(&records, &SurveyColumns::default())?;
assert_eq!(aggs.cgpa_counts.get("3.00 - 3.49"), Some(2));
assert_eq!(aggs.treatment_by_cgpa.get("3.00 - 3.49"), Some(TreatmentCounts { yes: 1, no: 1 }));
# Ok::<(), AggregateErrors>(())
```
*/

mod config;
use log::{debug, info};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;

pub mod builder;
pub mod manual;
pub mod scene;
pub mod views;

/// Counts the respondents for each distinct CGPA answer.
///
/// Answers are trimmed and otherwise kept verbatim: two spellings of the same
/// range are two entries. Blank and missing answers are skipped.
pub fn cgpa_counts(records: &[Record], columns: &SurveyColumns) -> CgpaCount {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut res = CgpaCount::default();
    for r in records.iter() {
        let cgpa = match r.get(&columns.cgpa).map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => continue,
        };
        if let Some(&idx) = positions.get(cgpa) {
            res.entries[idx].1 += 1;
        } else {
            positions.insert(cgpa.to_string(), res.entries.len());
            res.entries.push((cgpa.to_string(), 1));
        }
    }
    debug!("cgpa_counts: {:?}", res.entries);
    res
}

fn is_yes(answer: Option<&str>) -> bool {
    matches!(answer, Some(s) if s.trim().to_lowercase() == "yes")
}

/// Builds the co-occurrence matrix of "yes" answers between the boolean questions.
///
/// Every respondent adds one to each ordered pair drawn from their own set of
/// "yes" answers, diagonal included. Both (a, b) and (b, a) are incremented,
/// which keeps the matrix symmetric.
pub fn co_occurrence_matrix(records: &[Record], columns: &SurveyColumns) -> CoOccurrenceMatrix {
    let mut res = CoOccurrenceMatrix::zeros(&columns.yes_no_questions);
    for r in records.iter() {
        let yes_idxs: Vec<usize> = columns
            .yes_no_questions
            .iter()
            .enumerate()
            .filter_map(|(idx, q)| if is_yes(r.get(q)) { Some(idx) } else { None })
            .collect();
        for a in yes_idxs.iter() {
            for b in yes_idxs.iter() {
                res.cells[*a][*b] += 1;
            }
        }
    }
    debug!("co_occurrence_matrix: {:?}", res.cells);
    res
}

/// Splits the treatment answers by CGPA bin.
///
/// Only rows whose trimmed CGPA is one of the bins and whose trimmed treatment
/// answer is exactly "Yes" or "No" are counted. The match is case sensitive.
pub fn treatment_by_cgpa(records: &[Record], columns: &SurveyColumns) -> TreatmentByCgpa {
    let mut res = TreatmentByCgpa {
        bins: columns
            .cgpa_bins
            .iter()
            .map(|b| (b.clone(), TreatmentCounts::default()))
            .collect(),
    };
    let mut dropped: usize = 0;
    for r in records.iter() {
        let cgpa = r.get(&columns.cgpa).map(str::trim);
        let response = r.get(&columns.treatment).map(str::trim);
        let slot = match cgpa {
            Some(c) => res.bins.iter_mut().find(|(b, _)| b == c),
            None => None,
        };
        match (slot, response) {
            (Some((_, counts)), Some(TREATMENT_YES)) => counts.yes += 1,
            (Some((_, counts)), Some(TREATMENT_NO)) => counts.no += 1,
            _ => dropped += 1,
        }
    }
    debug!(
        "treatment_by_cgpa: {:?} (dropped {} rows)",
        res.bins, dropped
    );
    res
}

fn check_columns(columns: &SurveyColumns) -> Result<(), AggregateErrors> {
    if columns.yes_no_questions.is_empty() {
        return Err(AggregateErrors::InvalidColumns(
            "no yes/no question to cross".to_string(),
        ));
    }
    if columns.cgpa_bins.is_empty() {
        return Err(AggregateErrors::InvalidColumns(
            "no CGPA bin to group by".to_string(),
        ));
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for q in columns.yes_no_questions.iter() {
        if !seen.insert(q.as_str()) {
            return Err(AggregateErrors::InvalidColumns(format!(
                "duplicate question {:?}",
                q
            )));
        }
    }
    seen.clear();
    for b in columns.cgpa_bins.iter() {
        if !seen.insert(b.as_str()) {
            return Err(AggregateErrors::InvalidColumns(format!(
                "duplicate CGPA bin {:?}",
                b
            )));
        }
    }
    Ok(())
}

/// Runs the three aggregations over the full dataset.
///
/// The only failure is an unusable column configuration. Bad answers in the
/// records are never an error.
pub fn aggregate(records: &[Record], columns: &SurveyColumns) -> Result<Aggregates, AggregateErrors> {
    check_columns(columns)?;
    info!(
        "Aggregating {:?} records, columns: {:?}",
        records.len(),
        columns
    );
    let res = Aggregates {
        record_count: records.len(),
        cgpa_counts: cgpa_counts(records, columns),
        co_occurrence: co_occurrence_matrix(records, columns),
        treatment_by_cgpa: treatment_by_cgpa(records, columns),
    };
    info!(
        "Aggregated: {} CGPA answers in {} groups, {} treatment answers in bins",
        res.cgpa_counts.total(),
        res.cgpa_counts.len(),
        res.treatment_by_cgpa
            .iter()
            .map(|(_, c)| c.total())
            .sum::<u64>()
    );
    Ok(res)
}
