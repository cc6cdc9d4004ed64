use std::path::PathBuf;

use clap::{command, Parser};
use serde::{Deserialize, Serialize};

pub mod dsb_model;

/// A model for describing one row of a substitution plan.
///
/// Every source fills the fields it knows about and leaves the rest as `None`,
/// which are then omitted from the JSON output. `date` is always present and
/// uses the plan's own `DD.MM.YYYY` representation.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubstitutionEntry {
    pub date: String,
    #[serde(rename = "class", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_subject: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Body of a successful `today`/`tomorrow` response.
#[derive(Debug, Deserialize, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<SubstitutionEntry>,
}

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to config.json, that contains credentials, the selected entry source and portal settings.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
}

/// Which entry source the server is wired with.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Static,
    #[default]
    Scraping,
    Dsb,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Portal account name and password. Both are required, startup fails without them
/// 2. Selected entry source
/// 3. Address the HTTP server binds to
/// 4. School identifier used in plan document URLs
/// 5. Timeout for every outbound request
/// 6. Origins allowed by the CORS policy, `*` allows any
/// 7. Web portal and DSB API settings
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default)]
    pub school_id: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub dsb: DsbApiConfig,
}

/// Where the web portal lives and how its pages are laid out.
///
/// `plan_url_template` understands the `{school_id}` and `{tile_id}` placeholders.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub login_url: String,
    pub landing_url: String,
    pub tile_selector: String,
    pub tile_title_attr: String,
    pub tile_id_attr: String,
    pub plan_url_template: String,
    pub today_label: String,
    pub tomorrow_label: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            login_url: "https://www.dsbmobile.de/Login.aspx".to_owned(),
            landing_url: "https://www.dsbmobile.de/Default.aspx".to_owned(),
            tile_selector: ".timetable-element".to_owned(),
            tile_title_attr: "data-title".to_owned(),
            tile_id_attr: "data-uuid".to_owned(),
            plan_url_template:
                "https://light.dsbcontrol.de/DSBlightWebsite/Data/{school_id}/{tile_id}/subst_001.htm"
                    .to_owned(),
            today_label: "heute".to_owned(),
            tomorrow_label: "morgen".to_owned(),
        }
    }
}

/// Settings of the DSBmobile JSON API used by the delegated source.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DsbApiConfig {
    pub api_url: String,
    pub bundle_id: String,
    pub app_version: String,
    pub os_version: String,
}

impl Default for DsbApiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://mobileapi.dsbcontrol.de".to_owned(),
            bundle_id: "de.heinekingmedia.dsbmobile".to_owned(),
            app_version: "35".to_owned(),
            os_version: "22".to_owned(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["*".to_owned()]
}
