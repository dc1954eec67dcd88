use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use viewzenix_core::config::AppConfig;

/// # Summary
/// 加载应用配置。
///
/// # Logic
/// 1. 以 `AppConfig::default()` 作为最底层。
/// 2. 叠加配置文件：指定路径时必须存在，否则尝试可选的 `viewzenix.toml`。
/// 3. 叠加 `VIEWZENIX__` 前缀的环境变量，例如 `VIEWZENIX__WEBHOOK__API_KEY`。
///
/// # Arguments
/// * `path` - 命令行传入的配置文件路径。
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name("viewzenix").required(false),
    };

    Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(file)
        .add_source(Environment::with_prefix("VIEWZENIX").separator("__"))
        .build()?
        .try_deserialize()
}
