//! 题目仓库 - 基础设施层
//!
//! 持有唯一的题目列表资源，只暴露增删查能力
//!
//! 仓库是显式持有、可注入的对象（每个测试可以用全新实例），
//! 不做内部互斥：变更只来自教师端操作，通常发生在学生开始作答之前

use tracing::{debug, info};

use crate::models::{Direction, Question};
use crate::utils::logging::truncate_text;

/// 题目仓库
///
/// 职责：
/// - 持有当前有序题目列表
/// - 暴露 upload / delete / clear_all / snapshot 能力
/// - 不认识 Submission / Sink
/// - 不处理业务流程
#[derive(Debug, Default)]
pub struct QuestionStore {
    questions: Vec<Question>,
    /// 单调递增序号，保证同一毫秒内生成的 id 也不重复
    seq: u64,
}

impl QuestionStore {
    /// 创建空仓库
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            seq: 0,
        }
    }

    /// 批量上传题目
    ///
    /// 按行拆分 `raw_text`，每个非空行（去除首尾空白后）生成一道新题目，
    /// 追加到现有列表末尾，顺序与行顺序一致
    ///
    /// # 参数
    /// - `raw_text`: 原始文本块，一行一题
    /// - `direction`: 文字排版方向（整批共用）
    ///
    /// # 返回
    /// 返回新创建的题目记录；空白输入返回空列表且仓库不变（不是错误）
    pub fn upload(&mut self, raw_text: &str, direction: Direction) -> Vec<Question> {
        let now_millis = chrono::Utc::now().timestamp_millis();

        let new_questions: Vec<Question> = raw_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let id = format!("q-{}-{}", now_millis, self.seq);
                self.seq += 1;
                Question::new(id, line, direction)
            })
            .collect();

        if new_questions.is_empty() {
            debug!("上传内容为空白，跳过");
            return new_questions;
        }

        for question in &new_questions {
            debug!("新题目 {}: {}", question.id, truncate_text(&question.text, 40));
        }

        self.questions.extend(new_questions.iter().cloned());

        info!(
            "📚 已上传 {} 道题目，当前共 {} 道",
            new_questions.len(),
            self.questions.len()
        );

        new_questions
    }

    /// 按 id 删除题目
    ///
    /// id 不存在时为无操作（不是错误）
    pub fn delete(&mut self, id: &str) {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != id);

        if self.questions.len() < before {
            info!("🗑️ 已删除题目: {}", id);
        } else {
            debug!("要删除的题目不存在: {}", id);
        }
    }

    /// 清空仓库
    pub fn clear_all(&mut self) {
        let count = self.questions.len();
        self.questions.clear();
        info!("🗑️ 已清空全部题目 (共 {} 道)", count);
    }

    /// 当前题目快照
    ///
    /// 调用方只读，变更立即对后续快照可见
    pub fn snapshot(&self) -> &[Question] {
        &self.questions
    }

    /// 当前题目数量
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// 仓库是否为空
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
