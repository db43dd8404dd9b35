//! 落库能力 - 业务能力层
//!
//! 定义提交落库的统一接口，以及所有后端共用的行渲染规则
//!
//! 落库端不保证幂等：对同一份 Submission 调用两次 submit 会追加重复行，
//! "每次完成作答最多调用一次"由上层流程（SubmitFlow）保证

use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::config::Config;
use crate::error::SinkError;
use crate::models::Submission;

use super::memory_sink::MemorySink;
use super::sheets_sink::SheetsSink;

/// 落库文档的固定表头行
pub const SHEET_HEADER: [&str; 4] = ["Timestamp", "Student Name", "Question ID", "Answer"];

/// 提交落库接口
///
/// 后端在启动时由配置选择，调用点不做分支
#[allow(async_fn_in_trait)]
pub trait SubmissionSink {
    /// 将一份完整提交持久化到外部存储
    ///
    /// 每道已作答题目写一行；失败时返回 SinkError，
    /// 由调用方决定是否手动重试（重试会产生重复行）
    async fn submit(&self, submission: &Submission) -> Result<(), SinkError>;
}

/// 将提交渲染为落库行
///
/// 行格式: [时间戳 (ISO-8601), 学生姓名, 题目 id, 答案]
/// 答案必须是 "True" / "False" 字符串字面量而不是布尔值，
/// 保证其他工具可以直接读取
///
/// # 参数
/// - `submission`: 完整提交
/// - `timestamp`: ISO-8601 时间戳（由调用方生成，便于测试）
pub fn render_rows(submission: &Submission, timestamp: &str) -> Vec<Vec<String>> {
    submission
        .answers
        .iter()
        .map(|(question_id, answer)| {
            vec![
                timestamp.to_string(),
                submission.student_name.clone(),
                question_id.clone(),
                if *answer { "True" } else { "False" }.to_string(),
            ]
        })
        .collect()
}

/// 当前时刻的 ISO-8601 时间戳
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 配置选择的落库后端
pub enum SinkBackend {
    /// 表格文档后端（默认）
    Sheets(SheetsSink),
    /// 进程内后端（本地调试 / 测试）
    Memory(MemorySink),
}

impl SinkBackend {
    /// 根据配置选择后端
    pub fn from_config(config: &Config) -> Self {
        match config.sink_backend.as_str() {
            "memory" => {
                debug!("使用进程内落库后端");
                SinkBackend::Memory(MemorySink::new())
            }
            _ => SinkBackend::Sheets(SheetsSink::new(config)),
        }
    }
}

impl SubmissionSink for SinkBackend {
    async fn submit(&self, submission: &Submission) -> Result<(), SinkError> {
        match self {
            SinkBackend::Sheets(sink) => sink.submit(submission).await,
            SinkBackend::Memory(sink) => sink.submit(submission).await,
        }
    }
}
