use crate::charts::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSettings {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnSettings {
    pub cgpa: Option<String>,
    pub treatment: Option<String>,
    #[serde(rename = "yesNoQuestions")]
    pub yes_no_questions: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    pub views: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartsConfig {
    #[serde(rename = "inputSettings")]
    pub input_settings: Option<InputSettings>,
    pub columns: Option<ColumnSettings>,
    #[serde(rename = "cgpaBins")]
    pub cgpa_bins: Option<Vec<String>>,
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
}

impl ChartsConfig {
    /// The columns to tabulate. Anything not in the configuration keeps the
    /// default survey wording.
    pub fn survey_columns(&self) -> SurveyColumns {
        let mut res = SurveyColumns::default();
        if let Some(cols) = &self.columns {
            if let Some(cgpa) = &cols.cgpa {
                res.cgpa = cgpa.clone();
            }
            if let Some(treatment) = &cols.treatment {
                res.treatment = treatment.clone();
            }
            if let Some(questions) = &cols.yes_no_questions {
                res.yes_no_questions = questions.clone();
            }
        }
        if let Some(bins) = &self.cgpa_bins {
            res.cgpa_bins = bins.clone();
        }
        res
    }
}

pub fn read_config(path: &str) -> BChartsResult<ChartsConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ChartsConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> BChartsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_keeps_defaults() {
        let config: ChartsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ChartsConfig::default());
        assert_eq!(config.survey_columns(), SurveyColumns::default());
    }

    #[test]
    fn partial_columns() {
        let config: ChartsConfig = serde_json::from_str(
            r#"{
                "columns": {"cgpa": "GPA", "yesNoQuestions": ["Q1", "Q2"]},
                "outputSettings": {"outputPath": "out.json"}
            }"#,
        )
        .unwrap();
        let cols = config.survey_columns();
        assert_eq!(cols.cgpa, "GPA");
        assert_eq!(cols.treatment, TREATMENT_COLUMN);
        assert_eq!(cols.yes_no_questions, vec!["Q1", "Q2"]);
        assert_eq!(cols.cgpa_bins.len(), 4);
        assert_eq!(
            config.output_settings.unwrap().output_path,
            Some("out.json".to_string())
        );
    }

    #[test]
    fn malformed_config() {
        let path = std::env::temp_dir()
            .join(format!("surveycharts-bad-config-{}.json", std::process::id()))
            .display()
            .to_string();
        fs::write(&path, "{\"cgpaBins\": 3}").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(*err, ChartsError::ParsingJson { .. }));
        let _ = fs::remove_file(path);
    }
}
