use crate::source::CategoryDimension;
use crate::utils::config::{DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_STEM};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Output format of the generate command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text edge list
    Text,

    /// Interactive HTML Sankey chart
    #[default]
    Chart,

    /// Plain-text edge list plus an LLM analysis
    #[value(name = "text+ai")]
    TextAi,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text | OutputFormat::TextAi => "txt",
            OutputFormat::Chart => "html",
        }
    }

    /// Append the format suffix to the output stem
    ///
    /// The stem is kept verbatim, so "report.v2" becomes "report.v2.txt".
    pub fn output_path(self, stem: &Path) -> PathBuf {
        let mut path = stem.as_os_str().to_owned();
        path.push(".");
        path.push(self.extension());
        PathBuf::from(path)
    }
}

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the YAML/TOML config file
    pub config_path: PathBuf,

    /// Output file name without suffix
    pub output_stem: PathBuf,

    /// Output format
    pub format: OutputFormat,

    /// Category tier dimension (service or usage type)
    pub dimension: CategoryDimension,

    /// Replay dump to read instead of querying AWS
    pub input: Option<PathBuf>,

    /// Print a cost breakdown to stdout
    pub print_summary: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            output_stem: PathBuf::from(DEFAULT_OUTPUT_STEM),
            format: OutputFormat::default(),
            dimension: CategoryDimension::default(),
            input: None,
            print_summary: false,
        }
    }
}

impl GenerateArgs {
    /// Final output path including the format suffix
    pub fn output_path(&self) -> PathBuf {
        self.format.output_path(&self.output_stem)
    }
}
