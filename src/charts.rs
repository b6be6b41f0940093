use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_aggregates::scene::{render, Scene, ShapeKind};
use survey_aggregates::views::{View, ViewCycle};
use survey_aggregates::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::charts::config_reader::*;

pub mod config_reader;
mod io_common;
pub mod io_csv;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum ChartsError {
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading the header of {path}"))]
    CsvHeader { source: csv::Error, path: String },
    #[snafu(display("Error parsing line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Excel file {path} has no header row"))]
    EmptyExcel { path: String },
    #[snafu(display("Excel file {path} has no worksheet named {name:?}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Error reading JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The survey columns cannot be tabulated"))]
    Aggregation { source: AggregateErrors },
    #[snafu(display("Difference detected between computed summary and reference summary {reference}"))]
    ReferenceMismatch { reference: String },
    #[snafu(display("Unknown view {name:?} (expected donut, chord, bar or all)"))]
    UnknownView { name: String },
    #[snafu(display("Unknown input type {provider:?} (expected csv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display("No input file: use --input or the inputSettings of the configuration"))]
    MissingInput {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
}

pub type ChartsResult<T> = Result<T, ChartsError>;
pub type BChartsResult<T> = Result<T, Box<ChartsError>>;

/// Where the data comes from and which charts to produce, once the
/// configuration file and the command line have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
struct RunSettings {
    input_path: String,
    provider: String,
    excel_worksheet_name: Option<String>,
    columns: SurveyColumns,
    views: Vec<View>,
    out: Option<String>,
}

fn parse_view(name: &str) -> ChartsResult<View> {
    View::from_name(name).context(UnknownViewSnafu { name })
}

/// The views to render. An explicit navigation (--next / --previous) always
/// ends on a single view.
fn select_views(args: &Args, config_views: Option<&[String]>) -> ChartsResult<Vec<View>> {
    let requested: Option<View> = match args.view.as_deref().map(str::trim) {
        None => None,
        Some(name) if name.eq_ignore_ascii_case("all") => None,
        Some(name) => Some(parse_view(name)?),
    };

    if args.next > 0 || args.previous > 0 {
        let mut vc = ViewCycle::starting_at(requested.unwrap_or(View::Donut));
        for _ in 0..args.next {
            vc.next();
        }
        for _ in 0..args.previous {
            vc.previous();
        }
        return Ok(vec![vc.current()]);
    }

    if let Some(v) = requested {
        return Ok(vec![v]);
    }
    if args.view.is_none() {
        if let Some(names) = config_views {
            return names.iter().map(|n| parse_view(n)).collect();
        }
    }
    Ok(View::ALL.to_vec())
}

fn resolve_settings(args: &Args) -> BChartsResult<RunSettings> {
    let (config, config_dir): (ChartsConfig, Option<PathBuf>) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let dir = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, Some(dir))
        }
        None => (ChartsConfig::default(), None),
    };
    info!("config: {:?}", config);

    let input_settings = config.input_settings.clone().unwrap_or_default();
    let input_path: String = match (&args.input, &input_settings.file_path, &config_dir) {
        (Some(p), _, _) => p.clone(),
        (None, Some(p), Some(dir)) => dir.join(p).display().to_string(),
        (None, Some(p), None) => p.clone(),
        (None, None, _) => return Err(Box::new(ChartsError::MissingInput {})),
    };
    let provider = io_common::infer_provider(
        &input_path,
        args.input_type
            .as_deref()
            .or(input_settings.provider.as_deref()),
    );

    let output_settings = config.output_settings.clone().unwrap_or_default();
    let views = select_views(args, output_settings.views.as_deref())?;
    let out = args.out.clone().or(output_settings.output_path);

    Ok(RunSettings {
        input_path,
        provider,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or(input_settings.excel_worksheet_name),
        columns: config.survey_columns(),
        views,
        out,
    })
}

fn read_survey_data(settings: &RunSettings) -> BChartsResult<Vec<Record>> {
    info!(
        "Attempting to read survey file {:?} ({})",
        settings.input_path, settings.provider
    );
    let records = match settings.provider.as_str() {
        "csv" => io_csv::read_csv_records(&settings.input_path)?,
        "xlsx" => io_xlsx::read_xlsx_records(
            &settings.input_path,
            settings.excel_worksheet_name.as_deref(),
        )?,
        x => {
            return Err(Box::new(ChartsError::UnknownProvider {
                provider: x.to_string(),
            }))
        }
    };
    info!(
        "Read {} records from {}",
        records.len(),
        io_common::simplify_file_name(&settings.input_path)
    );
    Ok(records)
}

fn info_to_json(info: &scene::InfoPanel) -> JSValue {
    let lines: Vec<JSValue> = info
        .lines
        .iter()
        .map(|(k, v)| json!({"key": k, "value": v}))
        .collect();
    json!({"title": info.title, "lines": lines})
}

// Six decimals keep the summary stable when it is read back as a reference.
fn round_angle(x: f64) -> f64 {
    (x * 1e6).round() / 1e6
}

fn scene_to_json(scene: &Scene) -> JSValue {
    let mut shapes: Vec<JSValue> = Vec::new();
    for shape in scene.shapes.iter() {
        let mut js = match &shape.kind {
            ShapeKind::Arc {
                label,
                value,
                start_angle,
                end_angle,
            } => json!({
                "type": "arc",
                "label": label,
                "value": value,
                "startAngle": round_angle(*start_angle),
                "endAngle": round_angle(*end_angle)
            }),
            ShapeKind::Group { label, total } => json!({
                "type": "group",
                "label": label,
                "total": total
            }),
            ShapeKind::Ribbon {
                source,
                target,
                value,
            } => json!({
                "type": "ribbon",
                "source": source,
                "target": target,
                "value": value
            }),
            ShapeKind::Bar {
                bin,
                key,
                y0,
                y1,
                delay_ms,
            } => json!({
                "type": "bar",
                "cgpa": bin,
                "key": key,
                "y0": y0,
                "y1": y1,
                "delayMs": delay_ms
            }),
        };
        js["color"] = json!(shape.color);
        js["info"] = info_to_json(&shape.info);
        shapes.push(js);
    }
    let legend: Vec<JSValue> = scene
        .legend
        .iter()
        .map(|l| json!({"label": l.label, "color": l.color}))
        .collect();
    json!({
        "view": scene.view.name(),
        "title": scene.title,
        "transitionMs": scene.transition_ms,
        "yMax": scene.y_max(),
        "legend": legend,
        "shapes": shapes
    })
}

fn summary_to_json(aggs: &Aggregates) -> JSValue {
    let cgpa_counts: Vec<JSValue> = aggs
        .cgpa_counts
        .iter()
        .map(|(label, count)| json!({"label": label, "count": count}))
        .collect();
    let m = &aggs.co_occurrence;
    let matrix: Vec<Vec<u64>> = (0..m.size()).map(|i| m.row(i).to_vec()).collect();
    let treatment: Vec<JSValue> = aggs
        .treatment_by_cgpa
        .iter()
        .map(|(bin, c)| json!({"cgpa": bin, "Yes": c.yes, "No": c.no}))
        .collect();
    json!({
        "records": aggs.record_count,
        "cgpaCounts": cgpa_counts,
        "coOccurrence": {"labels": m.labels(), "matrix": matrix},
        "treatmentByCgpa": treatment
    })
}

fn build_summary_js(aggs: &Aggregates, scenes: &[Scene]) -> JSValue {
    let scenes_js: Vec<JSValue> = scenes.iter().map(scene_to_json).collect();
    json!({
        "summary": summary_to_json(aggs),
        "scenes": scenes_js
    })
}

fn write_summary(out: &Option<String>, pretty_js: &str) -> BChartsResult<()> {
    match out.as_deref() {
        None | Some("stdout") | Some("") => {
            println!("{}", pretty_js);
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js_stats: &str) -> BChartsResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return Err(Box::new(ChartsError::ReferenceMismatch {
            reference: reference_path.to_string(),
        }));
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

/// Loads the survey, aggregates it and writes the summary with the scenes of the requested views.
pub fn run_charts(args: &Args) -> BChartsResult<JSValue> {
    let settings = resolve_settings(args)?;
    debug!("run_charts: settings: {:?}", settings);

    let records = read_survey_data(&settings)?;
    let aggs = aggregate(&records, &settings.columns).context(AggregationSnafu {})?;

    let scenes: Vec<Scene> = settings.views.iter().map(|v| render(*v, &aggs)).collect();
    let result_js = build_summary_js(&aggs, &scenes);

    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_summary(&settings.out, &pretty_js_stats)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &pretty_js_stats)?;
    }
    Ok(result_js)
}
