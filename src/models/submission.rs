//! 提交数据模型
//!
//! 学生完成作答后临时构建的提交记录，交给落库端（Sink）后即不再保留

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// 学生提交记录
///
/// 仅当覆盖了当前题目快照中的全部题目 id 时才允许派发给 Sink，
/// 不持久化任何部分提交
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// 学生姓名（非唯一键，允许重名）
    pub student_name: String,
    /// 题目 id -> 判断结果（BTreeMap 保证落库行顺序稳定）
    pub answers: BTreeMap<String, bool>,
}

/// UI 边界传入的答案值
///
/// 前端可能传 JSON 布尔值，也可能传 "true" / "false" 字符串，
/// 在进入校验和落库之前统一收敛为严格的 bool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// 严格布尔值
    Bool(bool),
    /// 布尔字面量字符串（"true" / "false"，不区分大小写）
    Text(String),
}

impl AnswerValue {
    /// 收敛为严格布尔值
    ///
    /// # 返回
    /// 无法识别的字符串返回 None
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            AnswerValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }
}

/// 将边界答案映射收敛为严格布尔映射
///
/// 无法识别的值直接丢弃（后续完整性校验会将其视为未作答）
pub fn coerce_answers(raw: &HashMap<String, AnswerValue>) -> HashMap<String, bool> {
    raw.iter()
        .filter_map(|(id, value)| value.as_bool().map(|b| (id.clone(), b)))
        .collect()
}
