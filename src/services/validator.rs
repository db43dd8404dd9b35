//! 提交校验服务 - 业务能力层
//!
//! 只负责"判断作答是否完整、构建规范化提交"能力，不关心流程
//!
//! 校验是纯函数：同样的答案和题目列表永远得到同样的结果，
//! 没有隐藏状态和随机性

use std::collections::{BTreeMap, HashMap};

use crate::error::ValidationError;
use crate::models::{Question, Submission};

/// 提交校验服务
///
/// 职责：
/// - 判断答案映射是否覆盖当前全部题目
/// - 构建只包含当前题目 id 的规范化提交
/// - 不持有任何题目数据（校验结束即释放）
#[derive(Debug, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    /// 创建校验服务
    pub fn new() -> Self {
        Self
    }

    /// 作答是否完整
    ///
    /// 当且仅当 `questions` 中每个题目 id 在 `answers` 中都有对应项时为 true；
    /// `answers` 中多余的 id（过期快照残留）不影响判断
    pub fn is_complete(&self, answers: &HashMap<String, bool>, questions: &[Question]) -> bool {
        questions.iter().all(|q| answers.contains_key(&q.id))
    }

    /// 未作答的题目 id 列表（按题目顺序）
    pub fn missing_ids(&self, answers: &HashMap<String, bool>, questions: &[Question]) -> Vec<String> {
        questions
            .iter()
            .filter(|q| !answers.contains_key(&q.id))
            .map(|q| q.id.clone())
            .collect()
    }

    /// 构建规范化提交
    ///
    /// # 参数
    /// - `student_name`: 学生姓名
    /// - `answers`: 严格布尔答案映射（字符串型答案必须在边界处先收敛）
    /// - `questions`: 学生看到的题目快照
    ///
    /// # 返回
    /// 姓名去除空白后为空返回 MissingName；存在未作答题目返回 IncompleteAnswers；
    /// 否则返回只包含当前题目 id 的 Submission（多余的答案 id 被丢弃）
    pub fn normalize(
        &self,
        student_name: &str,
        answers: &HashMap<String, bool>,
        questions: &[Question],
    ) -> Result<Submission, ValidationError> {
        let trimmed_name = student_name.trim();
        if trimmed_name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let missing_ids = self.missing_ids(answers, questions);
        if !missing_ids.is_empty() {
            return Err(ValidationError::IncompleteAnswers { missing_ids });
        }

        let normalized: BTreeMap<String, bool> = questions
            .iter()
            .filter_map(|q| answers.get(&q.id).map(|b| (q.id.clone(), *b)))
            .collect();

        Ok(Submission {
            student_name: trimmed_name.to_string(),
            answers: normalized,
        })
    }
}
