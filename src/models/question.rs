//! 题目数据模型
//!
//! 判断题记录，由题目仓库（QuestionStore）独占持有

use serde::{Deserialize, Serialize};

/// 文字排版方向
///
/// 仅作为展示提示随题目携带，不参与校验逻辑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 从左到右
    Ltr,
    /// 从右到左
    Rtl,
}

/// 判断题记录
///
/// # 字段
/// - `id`: 不透明的唯一标识，在仓库生命周期内保持稳定
/// - `text`: 题干内容，去除首尾空白后非空
/// - `direction`: 文字排版方向（展示提示）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub direction: Direction,
}

impl Question {
    /// 创建新题目
    pub fn new(id: impl Into<String>, text: impl Into<String>, direction: Direction) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            direction,
        }
    }
}
