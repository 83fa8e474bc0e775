use crate::config::model::Config;

/// 配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "CONSOLE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "console.toml";

pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub fn load_config() -> Result<Config, anyhow::Error> {
    load_config_from_path(&config_path())
}

pub fn load_config_from_path(config_path: &str) -> Result<Config, anyhow::Error> {
    let config_str = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;
    let config = parse_config(&config_str)?;
    tracing::debug!("Loaded configuration from {}", config_path);
    Ok(config)
}

/// 解析并校验配置内容
pub fn parse_config(config_str: &str) -> Result<Config, anyhow::Error> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}
