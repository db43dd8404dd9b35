//! 表格落库端 - 业务能力层
//!
//! 只负责"把一份提交写进表格文档"能力，不关心流程
//!
//! 文档按标题查找，不存在则创建并写入表头行。
//! 首次提交并发时查找-创建不保证原子，极端情况下可能创建两个文档，
//! 在单教室的使用场景下可以接受

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::clients::SheetsClient;
use crate::config::Config;
use crate::error::SinkError;
use crate::models::Submission;

use super::sink::{now_timestamp, render_rows, SubmissionSink, SHEET_HEADER};

/// 表格落库端
///
/// 职责：
/// - 解析（查找或创建）目标表格文档，结果在进程内缓存
/// - 将提交按行追加到文档
/// - 不认识 Question / 校验规则
pub struct SheetsSink {
    client: SheetsClient,
    sheet_title: String,
    sheet_tab: String,
    /// 已解析的文档 id（进程内只解析一次）
    document_id: OnceCell<String>,
}

impl SheetsSink {
    /// 创建新的表格落库端
    pub fn new(config: &Config) -> Self {
        Self {
            client: SheetsClient::new(config),
            sheet_title: config.sheet_title.clone(),
            sheet_tab: config.sheet_tab.clone(),
            document_id: OnceCell::new(),
        }
    }

    /// 追加范围（如 "Sheet1!A1"）
    fn append_range(&self) -> String {
        format!("{}!A1", self.sheet_tab)
    }

    /// 查找或创建目标文档
    ///
    /// 新建文档会先写入固定表头行再接受数据追加
    async fn resolve_or_create(&self) -> Result<&str, SinkError> {
        self.document_id
            .get_or_try_init(|| async {
                if let Some(id) = self.client.find_spreadsheet(&self.sheet_title).await? {
                    info!("📄 已找到表格文档 '{}': {}", self.sheet_title, id);
                    return Ok(id);
                }

                info!("📄 未找到表格文档 '{}'，正在创建...", self.sheet_title);
                let id = self.client.create_spreadsheet(&self.sheet_title).await?;

                let header: Vec<String> = SHEET_HEADER.iter().map(|s| s.to_string()).collect();
                self.client
                    .append_rows(&id, &self.append_range(), &[header])
                    .await?;

                info!("📄 已创建表格文档并写入表头: {}", id);
                Ok(id)
            })
            .await
            .map(String::as_str)
    }
}

impl SubmissionSink for SheetsSink {
    async fn submit(&self, submission: &Submission) -> Result<(), SinkError> {
        let document_id = self.resolve_or_create().await?;

        let timestamp = now_timestamp();
        let rows = render_rows(submission, &timestamp);

        match self
            .client
            .append_rows(document_id, &self.append_range(), &rows)
            .await
        {
            Ok(()) => {
                info!(
                    "✓ 已写入 {} 行提交记录 (学生: {})",
                    rows.len(),
                    submission.student_name
                );
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ 提交写入失败 ({}): {}", e.kind(), e);
                Err(e)
            }
        }
    }
}
