//! Constants shared across the pipeline.

use std::time::Duration;

/// Label of the root node every account hangs from
pub const ROOT_LABEL: &str = "all";

/// Cost allocation tag used for the environment tier
pub const ENVIRONMENT_TAG_KEY: &str = "environment";

/// Marker Cost Explorer prepends to tag values ("<key>$<value>")
pub const ENVIRONMENT_TAG_PREFIX: &str = "environment$";

/// Suffix of the fallback environment label ("<account>-unknown")
pub const UNKNOWN_ENVIRONMENT_SUFFIX: &str = "-unknown";

/// Cost Explorer metric aggregated into the graph
pub const COST_METRIC: &str = "AmortizedCost";

// Cost Explorer is a global service, the region only selects the endpoint
pub const COST_EXPLORER_REGION: &str = "us-east-1";

/// Default path of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "configs/configs.yaml";

/// Default output file stem (suffix is picked by format)
pub const DEFAULT_OUTPUT_STEM: &str = "output";

/// Chat completions endpoint used for the cost analysis
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default timeout for LLM requests
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

/// Chart title and theme
pub const CHART_TITLE: &str = "AWS Cost Analysis";
pub const CHART_THEME: &str = "westeros";

/// ECharts bundles loaded by the rendered page
pub const ECHARTS_CDN_URL: &str = "https://go-echarts.github.io/go-echarts-assets/assets/echarts.min.js";
pub const ECHARTS_THEME_URL: &str =
    "https://go-echarts.github.io/go-echarts-assets/assets/themes/westeros.js";

/// Chart dimensions used when the config omits them
pub const DEFAULT_CHART_WIDTH: &str = "900px";
pub const DEFAULT_CHART_HEIGHT: &str = "500px";
