use clap::Parser;

/// This program tabulates a student mental health survey into the data behind three charts.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the survey: input file, column names,
    /// CGPA bins and output settings. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected summary in JSON format. If provided,
    /// surveycharts will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The survey data, one respondent per row and the questions in the first row.
    /// Setting this option overrides the file that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx, default csv) The type of the input. Files ending in .xlsx are read as Excel.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (donut, chord, bar or all, default all) The chart to render.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    /// Number of 'next' steps to apply from the chosen view before rendering.
    #[clap(long, value_parser, default_value_t = 0)]
    pub next: u32,

    /// Number of 'previous' steps to apply from the chosen view before rendering.
    #[clap(long, value_parser, default_value_t = 0)]
    pub previous: u32,

    /// (default: first sheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
