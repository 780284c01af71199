use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

pub const DEFAULT_API_VERSION: &str = "2025-01-01";

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    #[serde(default = "default_post_page_size")]
    pub post_page_size: u32,
    #[serde(default = "default_project_page_size")]
    pub project_page_size: u32,
    #[serde(default = "default_home_post_count")]
    pub home_post_count: usize,
    #[serde(default = "default_home_project_count")]
    pub home_project_count: usize,
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SanityConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_true")]
    pub use_cdn: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct EmailConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub to_email: Option<String>,
    pub to_name: Option<String>,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub sanity: SanityConfig,
    pub email: Option<EmailConfig>,
    pub log: Option<Log>,
}

fn default_post_page_size() -> u32 { 4 }

fn default_project_page_size() -> u32 { 6 }

fn default_home_post_count() -> usize { 4 }

fn default_home_project_count() -> usize { 3 }

fn default_dataset() -> String { "production".to_string() }

fn default_api_version() -> String { DEFAULT_API_VERSION.to_string() }

fn default_true() -> bool { true }

fn default_timeout_secs() -> u64 { 30 }

impl Default for SanityConfig {
    fn default() -> Self {
        SanityConfig {
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl EmailConfig {
    /// Service id, template id and public key, when all three are set.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        Some((present(&self.service_id)?, present(&self.template_id)?, present(&self.public_key)?))
    }

    /// Service, template and public key are all needed to send anything.
    pub fn is_complete(&self) -> bool {
        self.credentials().is_some()
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

/// Overrides the content store and email settings with whatever `lookup`
/// finds in the environment.
pub fn apply_env<F>(cfg: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).and_then(non_empty);

    if let Some(project_id) = var("SANITY_PROJECT_ID") {
        cfg.sanity.project_id = project_id;
    }
    if let Some(dataset) = var("SANITY_DATASET") {
        cfg.sanity.dataset = dataset;
    }
    if let Some(api_version) = var("SANITY_API_VERSION") {
        cfg.sanity.api_version = api_version;
    }

    let mut email = cfg.email.take().unwrap_or_default();
    let overrides = [
        ("EMAILJS_SERVICE_ID", &mut email.service_id),
        ("EMAILJS_TEMPLATE_ID", &mut email.template_id),
        ("EMAILJS_PUBLIC_KEY", &mut email.public_key),
        ("EMAILJS_TO_EMAIL", &mut email.to_email),
        ("EMAILJS_TO_NAME", &mut email.to_name),
    ];
    for (name, field) in overrides {
        if let Some(value) = var(name) {
            *field = Some(value);
        }
    }
    cfg.email = if email == EmailConfig::default() { None } else { Some(email) };
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir),
        public_dir: parse_path(cfg.paths.public_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;
    apply_env(&mut cfg, |name| env::var(name).ok());

    if cfg.sanity.project_id.is_empty() {
        return Err(io::Error::new(
            ErrorKind::InvalidData, "Missing content store project id. Set sanity.project_id or SANITY_PROJECT_ID"));
    }

    Ok(cfg)
}
