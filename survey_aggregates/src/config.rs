// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

pub const CGPA_COLUMN: &str = "What is your CGPA?";
pub const TREATMENT_COLUMN: &str = "Did you seek any specialist for a treatment?";

/// The boolean questions crossed in the co-occurrence matrix, in matrix order.
pub const YES_NO_QUESTIONS: [&str; 5] = [
    "Marital status",
    "Do you have Depression?",
    "Do you have Anxiety?",
    "Do you have Panic attack?",
    TREATMENT_COLUMN,
];

/// The CGPA ranges used to group the treatment answers, in axis order.
pub const CGPA_BINS: [&str; 4] = ["2.00 - 2.49", "2.50 - 2.99", "3.00 - 3.49", "3.50 - 4.00"];

/// The two treatment answers that are tabulated. Anything else is dropped.
pub const TREATMENT_YES: &str = "Yes";
pub const TREATMENT_NO: &str = "No";

/// One respondent: the answer given to each question of the survey.
///
/// Values are stored exactly as read. Trimming and case folding happen in
/// the aggregation functions, which each apply their own rule.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Record {
    answers: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    /// Builds a record out of a header row and a data row.
    ///
    /// Short rows are accepted: the missing trailing columns are simply absent.
    /// Extra cells without a header are ignored. When a header appears twice, the
    /// rightmost cell wins.
    pub fn from_row<H: AsRef<str>, V: AsRef<str>>(header: &[H], row: &[V]) -> Record {
        let answers = header
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Record { answers }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Record {
        let answers = pairs
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect();
        Record { answers }
    }

    pub fn insert(&mut self, question: &str, answer: &str) {
        self.answers.insert(question.to_string(), answer.to_string());
    }

    /// The raw answer to a question, if the column exists for this respondent.
    pub fn get(&self, question: &str) -> Option<&str> {
        self.answers.get(question).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// The columns of the dataset that feed the charts.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyColumns {
    pub cgpa: String,
    pub treatment: String,
    pub yes_no_questions: Vec<String>,
    pub cgpa_bins: Vec<String>,
}

impl Default for SurveyColumns {
    fn default() -> Self {
        SurveyColumns {
            cgpa: CGPA_COLUMN.to_string(),
            treatment: TREATMENT_COLUMN.to_string(),
            yes_no_questions: YES_NO_QUESTIONS.iter().map(|s| s.to_string()).collect(),
            cgpa_bins: CGPA_BINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ******** Output data structures *********

/// Number of respondents per CGPA answer, in the order the answers were first seen.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CgpaCount {
    pub(crate) entries: Vec<(String, u64)>,
}

impl CgpaCount {
    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

/// Square matrix of "yes" co-occurrences between the boolean questions.
///
/// Invariant: symmetric, and the diagonal dominates its row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CoOccurrenceMatrix {
    pub(crate) labels: Vec<String>,
    pub(crate) cells: Vec<Vec<u64>>,
}

impl CoOccurrenceMatrix {
    pub(crate) fn zeros(labels: &[String]) -> CoOccurrenceMatrix {
        CoOccurrenceMatrix {
            labels: labels.to_vec(),
            cells: vec![vec![0; labels.len()]; labels.len()],
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Panics if an index is out of range, like slice indexing.
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.cells[i][j]
    }

    pub fn get_by_label(&self, a: &str, b: &str) -> Option<u64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        Some(self.cells[i][j])
    }

    pub fn row(&self, i: usize) -> &[u64] {
        &self.cells[i]
    }

    pub fn row_total(&self, i: usize) -> u64 {
        self.cells[i].iter().sum()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|i| (0..i).all(|j| self.cells[i][j] == self.cells[j][i]))
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct TreatmentCounts {
    pub yes: u64,
    pub no: u64,
}

impl TreatmentCounts {
    pub fn total(&self) -> u64 {
        self.yes + self.no
    }

    /// The count for one of the two tabulated answers.
    pub fn by_key(&self, key: &str) -> Option<u64> {
        match key {
            TREATMENT_YES => Some(self.yes),
            TREATMENT_NO => Some(self.no),
            _ => None,
        }
    }
}

/// Treatment answers split by CGPA bin. Every bin is present, even when empty.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TreatmentByCgpa {
    pub(crate) bins: Vec<(String, TreatmentCounts)>,
}

impl TreatmentByCgpa {
    pub fn get(&self, bin: &str) -> Option<TreatmentCounts> {
        self.bins.iter().find(|(b, _)| b == bin).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TreatmentCounts)> {
        self.bins.iter().map(|(b, c)| (b.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The tallest stacked bar.
    pub fn max_total(&self) -> u64 {
        self.bins.iter().map(|(_, c)| c.total()).max().unwrap_or(0)
    }
}

/// Everything the charts need, computed once from the full dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Aggregates {
    pub record_count: usize,
    pub cgpa_counts: CgpaCount,
    pub co_occurrence: CoOccurrenceMatrix,
    pub treatment_by_cgpa: TreatmentByCgpa,
}

/// Errors that prevent the aggregation from running at all.
///
/// Individual rows never cause an error: unusable answers are left out of the
/// tables they would have contributed to.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AggregateErrors {
    InvalidColumns(String),
}

impl Error for AggregateErrors {}

impl Display for AggregateErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateErrors::InvalidColumns(msg) => {
                write!(f, "invalid survey columns: {}", msg)
            }
        }
    }
}
