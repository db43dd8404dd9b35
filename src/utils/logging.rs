//! 日志工具模块
//!
//! 提供日志初始化和格式化的辅助函数

use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 日志
///
/// 优先读取 RUST_LOG 环境变量，默认 info 级别；
/// 重复调用是安全的（后续调用为无操作）
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    Ok(())
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
///
/// # 返回
/// 返回是否成功初始化
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n答题提交日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 答题核心启动");
    info!("📦 落库后端: {}", config.sink_backend);
    info!("📄 表格文档: {} / {}", config.sheet_title, config.sheet_tab);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_log_file_writes_header() {
        let path = std::env::temp_dir().join("quiz_submit_log_header_test.txt");
        let path_str = path.to_str().unwrap();

        init_log_file(path_str).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("答题提交日志"));
        assert!(content.starts_with(&"=".repeat(60)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
    }
}
