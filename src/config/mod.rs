use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::NoticeCategory;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Knobs for the notice ingestion pipeline. The keyword table and retention
/// window started life hardcoded in the scraper; they are configuration, so
/// they live here.
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    pub source_urls: Vec<String>,
    pub retention_days: i64,
    pub fetch_timeout_secs: u64,
    pub min_title_chars: usize,
    pub max_excerpt_chars: usize,
    #[serde(default = "default_category_rules")]
    pub category_rules: Vec<CategoryRule>,
}

/// Maps title keywords to a notice category. Rules are checked in order and
/// the first match wins.
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryRule {
    pub keywords: Vec<String>,
    pub category: NoticeCategory,
}

fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule {
            keywords: vec!["exam".into(), "result".into()],
            category: NoticeCategory::Examinations,
        },
        CategoryRule {
            keywords: vec!["vacancy".into(), "job".into()],
            category: NoticeCategory::Vacancy,
        },
        CategoryRule {
            keywords: vec!["admission".into(), "entrance".into()],
            category: NoticeCategory::Admissions,
        },
    ]
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (with STUDYHUB__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("STUDYHUB").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite://studyhub.db".to_string(),
                max_connections: 10,
            },
            scraper: ScraperConfig::default(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            source_urls: vec![
                "https://rju.edu.np/notices/".to_string(),
                "https://rju.edu.np/category/notices/".to_string(),
                "https://rju.edu.np/announcements/".to_string(),
            ],
            retention_days: 10,
            fetch_timeout_secs: 30,
            min_title_chars: 10,
            max_excerpt_chars: 500,
            category_rules: default_category_rules(),
        }
    }
}
