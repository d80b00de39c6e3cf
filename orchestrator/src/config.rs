use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_endpoint: String,
    pub openai_api_key: String,
    pub openai_deployment: String,
    pub bing_endpoint: Option<String>,
    pub bing_api_key: Option<String>,
    pub storage_endpoint: String,
    pub storage_sas_token: String,
    pub document_container: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            openai_endpoint: required("OPENAI_ENDPOINT")?
                .trim_end_matches('/')
                .to_string(),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_deployment: required("OPENAI_DEPLOYMENT_NAME")?,
            // Web search is optional; the pipeline degrades to an unsourced report.
            bing_endpoint: optional("BING_ENDPOINT").map(|v| v.trim_end_matches('/').to_string()),
            bing_api_key: optional("BING_API_KEY"),
            storage_endpoint: required("STORAGE_ENDPOINT")?
                .trim_end_matches('/')
                .to_string(),
            storage_sas_token: required("STORAGE_SAS_TOKEN")?
                .trim_start_matches('?')
                .to_string(),
            document_container: std::env::var("DOCUMENT_CONTAINER_NAME")
                .unwrap_or_else(|_| "research-reports".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} is not set", name))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
