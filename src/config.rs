//! Crawl settings and the command-line interface that fills them in.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const START_URL: &str =
    "https://efile.fara.gov/pls/apex/f?p=171:130:0::NO:RP,130:P130_DATERANGE:N";
pub const FORM_URL: &str = "https://efile.fara.gov/pls/apex/wwv_flow.show";
pub const REGISTRY_BASE: &str = "https://efile.fara.gov/pls/apex/";
pub const DOCS_BASE: &str = "http://www.fara.gov/docs/";
/// Large enough that the worksheet returns every registration on one page.
pub const NUM_RESPONSES: usize = 100_000;
pub const WORKERS: usize = 8;

/// Fixed fields of the APEX worksheet form, except for the row count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApexForm {
    pub request: String,
    pub flow_id: String,
    pub flow_step_id: String,
    pub widget_name: String,
    pub x01: String,
}

impl ApexForm {
    /// Url-encodable pairs, with `p_widget_num_return` set to `num_responses`.
    pub fn params(&self, num_responses: usize) -> Vec<(&'static str, String)> {
        vec![
            ("p_request", self.request.clone()),
            ("p_flow_id", self.flow_id.clone()),
            ("p_flow_step_id", self.flow_step_id.clone()),
            ("p_widget_num_return", num_responses.to_string()),
            ("p_widget_name", self.widget_name.clone()),
            ("x01", self.x01.clone()),
        ]
    }
}

impl Default for ApexForm {
    fn default() -> Self {
        Self {
            request: "APXWGT".into(),
            flow_id: "171".into(),
            flow_step_id: "130".into(),
            widget_name: "worksheet".into(),
            x01: "80340213897823017".into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub start_url: String,
    pub form_url: String,
    pub registry_base: String,
    pub docs_base: String,
    pub form: ApexForm,
    pub num_responses: usize,
    pub workers: usize,
    pub timeout: Duration,
    pub user_agent: String,
    /// `None` writes the feed to stdout.
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_url: START_URL.into(),
            form_url: FORM_URL.into(),
            registry_base: REGISTRY_BASE.into(),
            docs_base: DOCS_BASE.into(),
            form: ApexForm::default(),
            num_responses: NUM_RESPONSES,
            workers: WORKERS,
            timeout: Duration::from_secs(180),
            user_agent: concat!("fara/", env!("CARGO_PKG_VERSION")).into(),
            output: None,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "fara", about = "Scrape active foreign principal registrations")]
pub struct Cli {
    /// Number of worksheet rows requested in the single form submission
    #[arg(long, env = "NUM_RESPONSES", default_value_t = NUM_RESPONSES)]
    pub num_responses: usize,

    /// File to write newline-delimited JSON records to (stdout when omitted)
    #[arg(long, short, env = "FEED_URI")]
    pub output: Option<PathBuf>,

    /// Maximum number of detail pages fetched at once
    #[arg(long, env = "FARA_WORKERS", default_value_t = WORKERS)]
    pub workers: usize,

    /// Request timeout in seconds
    #[arg(long, env = "FARA_TIMEOUT_SECS", default_value_t = 180)]
    pub timeout_secs: u64,

    /// Page fetched first to establish session cookies
    #[arg(long, env = "FARA_START_URL", default_value = START_URL)]
    pub start_url: String,

    /// Endpoint the worksheet form is posted to
    #[arg(long, env = "FARA_FORM_URL", default_value = FORM_URL)]
    pub form_url: String,

    /// Base that registrant links are resolved against
    #[arg(long, env = "FARA_REGISTRY_BASE", default_value = REGISTRY_BASE)]
    pub registry_base: String,

    /// Base that exhibit document links are resolved against
    #[arg(long, env = "FARA_DOCS_BASE", default_value = DOCS_BASE)]
    pub docs_base: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            start_url: cli.start_url,
            form_url: cli.form_url,
            registry_base: cli.registry_base,
            docs_base: cli.docs_base,
            num_responses: cli.num_responses,
            workers: cli.workers.max(1),
            timeout: Duration::from_secs(cli.timeout_secs.max(1)),
            output: cli.output,
            ..Config::default()
        }
    }
}
