pub use crate::config::*;

/// A builder for adding survey answers one respondent at a time.
///
/// Useful when the answers do not come from a file.
///
/// ```
/// pub use survey_aggregates::builder::Builder;
/// pub use survey_aggregates::*;
///
/// let mut builder = Builder::new(&SurveyColumns::default())?;
///
/// builder.add_answers(&[(CGPA_COLUMN, "2.00 - 2.49"), ("Do you have Anxiety?", "Yes")])?;
/// builder.add_answers(&[(CGPA_COLUMN, "2.00 - 2.49"), (TREATMENT_COLUMN, "No")])?;
///
/// let aggs = builder.aggregate()?;
/// assert_eq!(aggs.cgpa_counts.get("2.00 - 2.49"), Some(2));
///
/// # Ok::<(), AggregateErrors>(())
/// ```
pub struct Builder {
    pub(crate) _columns: SurveyColumns,
    pub(crate) _records: Vec<Record>,
}

impl Builder {
    pub fn new(columns: &SurveyColumns) -> Result<Builder, AggregateErrors> {
        Ok(Builder {
            _columns: columns.clone(),
            _records: Vec::new(),
        })
    }

    /// Adds one respondent, given as (question, answer) pairs.
    ///
    /// Questions that are not used by any chart are kept but ignored.
    pub fn add_answers(&mut self, answers: &[(&str, &str)]) -> Result<(), AggregateErrors> {
        self.add_record(&Record::from_pairs(answers))
    }

    pub fn add_record(&mut self, record: &Record) -> Result<(), AggregateErrors> {
        self._records.push(record.clone());
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self._records
    }

    pub fn aggregate(&self) -> Result<Aggregates, AggregateErrors> {
        crate::aggregate(&self._records, &self._columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_added_one_answer_at_a_time() {
        let mut builder = Builder::new(&SurveyColumns::default()).unwrap();
        let mut record = Record::new();
        record.insert(CGPA_COLUMN, "3.50 - 4.00");
        record.insert(TREATMENT_COLUMN, "Yes");
        record.insert(TREATMENT_COLUMN, "No");
        builder.add_record(&record).unwrap();
        builder
            .add_answers(&[(CGPA_COLUMN, " 3.50 - 4.00"), ("Do you have Depression?", "yes")])
            .unwrap();

        assert_eq!(builder.records().len(), 2);
        // A later answer to the same question replaces the earlier one.
        assert_eq!(builder.records()[0].get(TREATMENT_COLUMN), Some("No"));
        assert_eq!(builder.records()[0].len(), 2);

        let aggs = builder.aggregate().unwrap();
        assert_eq!(aggs.record_count, 2);
        assert_eq!(aggs.cgpa_counts.get("3.50 - 4.00"), Some(2));
        assert_eq!(
            aggs.treatment_by_cgpa.get("3.50 - 4.00"),
            Some(TreatmentCounts { yes: 0, no: 1 })
        );
        let depression = "Do you have Depression?";
        assert_eq!(
            aggs.co_occurrence.get_by_label(depression, depression),
            Some(1)
        );
    }
}
