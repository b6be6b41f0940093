use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The reader to use: the explicit choice if any, otherwise the file extension, otherwise csv.
pub fn infer_provider(path: &str, explicit: Option<&str>) -> String {
    if let Some(p) = explicit {
        return p.trim().to_lowercase();
    }
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("xlsx") => "xlsx".to_string(),
        _ => "csv".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers() {
        assert_eq!(infer_provider("data/survey.csv", None), "csv");
        assert_eq!(infer_provider("data/Survey.XLSX", None), "xlsx");
        assert_eq!(infer_provider("data/survey", None), "csv");
        assert_eq!(infer_provider("data/survey.csv", Some(" XLSX")), "xlsx");
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/data/survey.csv"), "survey.csv");
        assert_eq!(simplify_file_name("survey.csv"), "survey.csv");
    }
}
