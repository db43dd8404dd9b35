//! 进程内落库端 - 业务能力层
//!
//! 只负责"把提交行留在内存里"能力，用于本地调试和测试，
//! 行格式与表格后端完全一致

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::SinkError;
use crate::models::Submission;

use super::sink::{now_timestamp, render_rows, SubmissionSink};

/// 进程内落库端
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemorySink {
    /// 创建空的进程内落库端
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    /// 当前已落库的全部行
    pub async fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().await.clone()
    }

    /// 当前已落库的行数
    pub async fn row_count(&self) -> usize {
        self.rows.lock().await.len()
    }
}

impl SubmissionSink for MemorySink {
    async fn submit(&self, submission: &Submission) -> Result<(), SinkError> {
        let timestamp = now_timestamp();
        let new_rows = render_rows(submission, &timestamp);

        let mut rows = self.rows.lock().await;
        rows.extend(new_rows);

        debug!(
            "进程内落库: 学生 {} 共 {} 行",
            submission.student_name,
            submission.answers.len()
        );

        Ok(())
    }
}
