//! 表格 API 客户端
//!
//! 封装所有对表格后端（Google Sheets / Drive REST API）的原始调用，
//! 不认识 Submission，只处理文档查找、创建与按行追加
//!
//! 访问令牌由外部协作方获取，客户端只负责在请求上携带；
//! 令牌被后端拒绝视为"外部存储不可用"

use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::SinkError;

/// 表格 API 客户端
pub struct SheetsClient {
    http: reqwest::Client,
    sheets_base_url: String,
    drive_base_url: String,
    token: String,
}

impl SheetsClient {
    /// 创建新的表格客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            sheets_base_url: config.sheets_api_base_url.clone(),
            drive_base_url: config.drive_api_base_url.clone(),
            token: config.google_api_token.clone(),
        }
    }

    /// 按标题查找表格文档
    ///
    /// # 参数
    /// - `title`: 文档标题（人类可读）
    ///
    /// # 返回
    /// 找到时返回文档 id，未找到返回 None
    pub async fn find_spreadsheet(&self, title: &str) -> Result<Option<String>, SinkError> {
        let endpoint = format!("{}/drive/v3/files", self.drive_base_url);

        let response = self
            .http
            .get(&endpoint)
            .bearer_auth(&self.token)
            .query(&[
                ("q", drive_title_query(title).as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "1"),
            ])
            .send()
            .await
            .map_err(|e| SinkError::unavailable(&endpoint, e))?;

        let body = check_response(&endpoint, response).await?;

        let document_id = body
            .get("files")
            .and_then(|v| v.as_array())
            .and_then(|files| files.first())
            .and_then(|file| file.get("id"))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        debug!("查找文档 '{}': {:?}", title, document_id);

        Ok(document_id)
    }

    /// 创建新的表格文档
    ///
    /// # 参数
    /// - `title`: 文档标题
    ///
    /// # 返回
    /// 返回新文档的 id
    pub async fn create_spreadsheet(&self, title: &str) -> Result<String, SinkError> {
        let endpoint = format!("{}/v4/spreadsheets", self.sheets_base_url);

        let body = json!({
            "properties": {
                "title": title
            }
        });

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SinkError::unavailable(&endpoint, e))?;

        let body = check_response(&endpoint, response).await?;

        let document_id = body
            .get("spreadsheetId")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                SinkError::write_rejected(
                    &endpoint,
                    None,
                    Some("响应中缺少 spreadsheetId".to_string()),
                )
            })?;

        debug!("已创建文档 '{}': {}", title, document_id);

        Ok(document_id)
    }

    /// 向表格文档追加数据行
    ///
    /// 行是追加而不是覆盖，不同调用之间没有顺序要求
    ///
    /// # 参数
    /// - `document_id`: 文档 id
    /// - `range`: 追加范围（如 "Sheet1!A1"）
    /// - `rows`: 要追加的行，每行是一组单元格文本
    pub async fn append_rows(
        &self,
        document_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> Result<(), SinkError> {
        let endpoint = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.sheets_base_url, document_id, range
        );

        let body = json!({
            "values": rows
        });

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body)
            .send()
            .await
            .map_err(|e| SinkError::unavailable(&endpoint, e))?;

        check_response(&endpoint, response).await?;

        debug!("已向 {} 追加 {} 行", document_id, rows.len());

        Ok(())
    }
}

/// 构建按标题查找文档的 Drive 查询串
fn drive_title_query(title: &str) -> String {
    // 标题中的单引号需要转义，避免破坏查询语法
    let escaped = title.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
        escaped
    )
}

/// 检查 API 响应并解析为 JSON
///
/// 错误分类：
/// - 网络失败 / 401 / 5xx -> 外部存储不可用
/// - 其余非 2xx -> 外部存储拒绝写入
async fn check_response(endpoint: &str, response: reqwest::Response) -> Result<Value, SinkError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status.is_server_error() {
        let message = response.text().await.unwrap_or_default();
        debug!("后端不可用 ({}): {} {}", endpoint, status, message);
        return Err(SinkError::unavailable_bare(endpoint));
    }

    if !status.is_success() {
        let message = extract_error_message(response).await;
        return Err(SinkError::write_rejected(
            endpoint,
            Some(status.as_u16()),
            message,
        ));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| SinkError::unavailable(endpoint, e))
}

/// 从错误响应体中提取 error.message 字段
async fn extract_error_message(response: reqwest::Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_title_query_plain() {
        let query = drive_title_query("TrueFalse Quiz Submissions");
        assert!(query.starts_with("name = 'TrueFalse Quiz Submissions'"));
        assert!(query.contains("application/vnd.google-apps.spreadsheet"));
        assert!(query.contains("trashed = false"));
    }

    #[test]
    fn test_drive_title_query_escapes_quotes() {
        let query = drive_title_query("Jane's Quiz");
        assert!(query.contains("Jane\\'s Quiz"));
    }
}
