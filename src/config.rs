use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::theme::ThemePreference;

/// 启动偏好 (~/.config/manna/config.toml)
///
/// 只在启动时读取；已读状态等会话数据不落盘
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 主题偏好：light / dark / system
    pub theme: ThemePreference,
    /// 启动时是否展开所有经文
    pub expand_readings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            expand_readings: false,
        }
    }
}

/// 配置文件路径 (~/.config/manna/config.toml)
pub fn config_path() -> io::Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户配置目录"))?
        .join("manna");

    Ok(config_dir.join("config.toml"))
}

/// 从TOML文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> io::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    let config: Config =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(config)
}
