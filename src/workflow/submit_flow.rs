//! 提交处理流程 - 流程层
//!
//! 核心职责：定义"一名学生完成作答"的完整处理流程
//!
//! 流程顺序：
//! 1. 终态检查（已提交的会话不再触达落库端）
//! 2. 校验并规范化（normalize 必须先成功）
//! 3. 落库（submit）
//! 4. 成功则标记会话为已提交终态
//!
//! 落库端不保证幂等，"每次完成作答最多提交一次"就在这里保证：
//! 提交成功后会话进入终态；提交失败会话保持可重试，
//! 手动重试会带着同一份提交再次落库（接受重复行的风险）

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Question, StudentSession};
use crate::services::{SubmissionSink, SubmissionValidator};

/// 提交处理流程
///
/// - 编排校验 -> 落库的完整流程
/// - 不持有任何落库资源（sink 由调用方传入）
/// - 只依赖业务能力（services）
pub struct SubmitFlow {
    validator: SubmissionValidator,
    verbose_logging: bool,
}

impl SubmitFlow {
    /// 创建新的提交处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            validator: SubmissionValidator::new(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理一次提交
    ///
    /// # 参数
    /// - `session`: 学生会话（成功后进入已提交终态）
    /// - `answers`: 严格布尔答案映射（边界收敛已完成）
    /// - `questions`: 学生看到的题目快照
    /// - `sink`: 落库端
    pub async fn run<S: SubmissionSink>(
        &self,
        session: &mut StudentSession,
        answers: &HashMap<String, bool>,
        questions: &[Question],
        sink: &S,
    ) -> Result<(), AppError> {
        let student = session.name().to_string();

        // 终态检查：已提交的会话不允许再次触达落库端
        if session.has_submitted() {
            warn!("[学生 {}] ⚠️ 会话已是提交终态，忽略重复提交", student);
            return Ok(());
        }

        // 校验必须先于落库完成，部分提交绝不触达 Sink
        let submission = self
            .validator
            .normalize(&student, answers, questions)
            .map_err(|e| {
                warn!("[学生 {}] ⚠️ 提交校验失败: {}", student, e);
                AppError::Validation(e)
            })?;

        if self.verbose_logging {
            for (question_id, answer) in &submission.answers {
                info!("[学生 {}]   {} -> {}", student, question_id, answer);
            }
        }

        info!(
            "[学生 {}] 📤 正在提交 {} 条答案...",
            student,
            submission.answers.len()
        );

        match sink.submit(&submission).await {
            Ok(()) => {
                session.mark_submitted();
                info!("[学生 {}] ✓ 提交成功", student);
                Ok(())
            }
            Err(e) => {
                // 区分的错误种类只进日志，用户侧收敛为一条"提交失败"
                error!("[学生 {}] ❌ 提交失败 ({}): {}", student, e.kind(), e);
                Err(AppError::Sink(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SinkError, ValidationError};
    use crate::models::{Direction, Question, Submission};
    use crate::services::MemorySink;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn flow() -> SubmitFlow {
        SubmitFlow::new(&Config::default())
    }

    fn questions() -> Vec<Question> {
        vec![
            Question::new("q1", "地球是平的。", Direction::Ltr),
            Question::new("q2", "水在海平面 100 度沸腾。", Direction::Ltr),
        ]
    }

    fn full_answers() -> HashMap<String, bool> {
        let mut answers = HashMap::new();
        answers.insert("q1".to_string(), false);
        answers.insert("q2".to_string(), true);
        answers
    }

    /// 每次都失败的落库端，可切换恢复
    struct FlakySink {
        healthy: AtomicBool,
        inner: MemorySink,
    }

    impl FlakySink {
        fn failing() -> Self {
            Self {
                healthy: AtomicBool::new(false),
                inner: MemorySink::new(),
            }
        }

        fn recover(&self) {
            self.healthy.store(true, Ordering::SeqCst);
        }
    }

    impl SubmissionSink for FlakySink {
        async fn submit(&self, submission: &Submission) -> Result<(), SinkError> {
            if !self.healthy.load(Ordering::SeqCst) {
                return Err(SinkError::unavailable_bare("test://flaky"));
            }
            self.inner.submit(submission).await
        }
    }

    #[tokio::test]
    async fn test_successful_submit_marks_terminal_state() {
        let sink = MemorySink::new();
        let mut session = StudentSession::new("小明");

        flow()
            .run(&mut session, &full_answers(), &questions(), &sink)
            .await
            .unwrap();

        assert!(session.has_submitted());
        assert_eq!(sink.row_count().await, 2);
    }

    #[tokio::test]
    async fn test_second_submit_never_reaches_sink() {
        let sink = MemorySink::new();
        let mut session = StudentSession::new("小明");
        let flow = flow();

        flow.run(&mut session, &full_answers(), &questions(), &sink)
            .await
            .unwrap();
        // 终态会话的重复提交是无操作，不产生新行
        flow.run(&mut session, &full_answers(), &questions(), &sink)
            .await
            .unwrap();

        assert_eq!(sink.row_count().await, 2);
    }

    #[tokio::test]
    async fn test_incomplete_answers_never_reach_sink() {
        let sink = MemorySink::new();
        let mut session = StudentSession::new("小明");

        let mut partial = HashMap::new();
        partial.insert("q1".to_string(), true);

        let err = flow()
            .run(&mut session, &partial, &questions(), &sink)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation(ValidationError::IncompleteAnswers { .. })
        ));
        assert!(!session.has_submitted());
        assert_eq!(sink.row_count().await, 0, "部分提交绝不落库");
    }

    #[tokio::test]
    async fn test_failed_submit_leaves_session_retryable() {
        let sink = FlakySink::failing();
        let mut session = StudentSession::new("小明");
        let flow = flow();

        let err = flow
            .run(&mut session, &full_answers(), &questions(), &sink)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Sink(_)));
        assert!(!session.has_submitted(), "失败后会话保持可重试");

        // 后端恢复后手动重试成功
        sink.recover();
        flow.run(&mut session, &full_answers(), &questions(), &sink)
            .await
            .unwrap();

        assert!(session.has_submitted());
        assert_eq!(sink.inner.row_count().await, 2);
    }

    #[tokio::test]
    async fn test_store_stays_usable_after_failed_submit() {
        let sink = FlakySink::failing();
        let mut session = StudentSession::new("小明");

        let _ = flow()
            .run(&mut session, &full_answers(), &questions(), &sink)
            .await;

        // 单次提交失败不是致命错误，另一名学生照常提交
        let sink_ok = MemorySink::new();
        let mut other = StudentSession::new("小红");
        flow()
            .run(&mut other, &full_answers(), &questions(), &sink_ok)
            .await
            .unwrap();

        assert!(other.has_submitted());
    }
}
