//! 应用门面 - 编排层
//!
//! UI 层（页面渲染、路由、登录界面）是外部协作方，
//! 只通过这里的接口进入核心

use std::collections::HashMap;

use tracing::warn;

use crate::config::Config;
use crate::error::{AppError, AuthError};
use crate::infrastructure::QuestionStore;
use crate::models::{
    coerce_answers, AnswerValue, Direction, InstructorSession, Question, StudentSession,
};
use crate::services::{Role, RoleGate, RoleKind, SinkBackend, SubmissionSink};
use crate::utils::logging;
use crate::workflow::SubmitFlow;

/// 应用门面
///
/// 持有题目仓库（每个实例独立，便于测试隔离）、角色门禁、
/// 提交流程和启动时选定的落库端。
/// 题目变更操作要求传入教师会话，提交操作要求传入学生会话
pub struct QuizApp<S: SubmissionSink> {
    store: QuestionStore,
    gate: RoleGate,
    flow: SubmitFlow,
    sink: S,
}

impl QuizApp<SinkBackend> {
    /// 按配置初始化应用（落库后端由配置选择）
    pub fn from_config(config: Config) -> Self {
        // 初始化日志文件
        if let Err(e) = logging::init_log_file(&config.output_log_file) {
            warn!("⚠️ 日志文件初始化失败: {}", e);
        }

        logging::log_startup(&config);
        let sink = SinkBackend::from_config(&config);
        Self::new(&config, sink)
    }
}

impl<S: SubmissionSink> QuizApp<S> {
    /// 使用指定落库端创建应用
    pub fn new(config: &Config, sink: S) -> Self {
        Self {
            store: QuestionStore::new(),
            gate: RoleGate::new(config),
            flow: SubmitFlow::new(config),
            sink,
        }
    }

    /// 登录
    ///
    /// 学生只需非空姓名，教师还需匹配共享口令
    pub fn login(
        &self,
        kind: RoleKind,
        name: &str,
        credential: Option<&str>,
    ) -> Result<Role, AuthError> {
        self.gate.authenticate(kind, name, credential)
    }

    /// 批量上传题目（教师）
    ///
    /// 空白输入是无操作，返回空列表
    pub fn upload_questions(
        &mut self,
        _instructor: &InstructorSession,
        raw_text: &str,
        direction: Direction,
    ) -> Vec<Question> {
        self.store.upload(raw_text, direction)
    }

    /// 删除单道题目（教师）
    pub fn delete_question(&mut self, _instructor: &InstructorSession, id: &str) {
        self.store.delete(id);
    }

    /// 清空全部题目（教师）
    pub fn clear_all_questions(&mut self, _instructor: &InstructorSession) {
        self.store.clear_all();
    }

    /// 当前题目快照（学生作答时读取，只读）
    pub fn questions(&self) -> &[Question] {
        self.store.snapshot()
    }

    /// 提交答卷（学生）
    ///
    /// 边界答案值先收敛为严格布尔，再进入校验和落库；
    /// 校验错误和落库错误都不是致命错误，仓库和门禁保持可用
    pub async fn submit_quiz(
        &self,
        session: &mut StudentSession,
        answers: &HashMap<String, AnswerValue>,
    ) -> Result<(), AppError> {
        let coerced = coerce_answers(answers);
        self.flow
            .run(session, &coerced, self.store.snapshot(), &self.sink)
            .await
    }

    /// 落库端引用（调试 / 测试）
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemorySink;

    fn instructor(app: &QuizApp<MemorySink>) -> InstructorSession {
        match app
            .login(RoleKind::Instructor, "老师", Some("ZQY0H4"))
            .unwrap()
        {
            Role::Instructor(session) => session,
            _ => panic!("应该得到教师角色"),
        }
    }

    #[test]
    fn test_instructor_gated_mutations() {
        let config = Config::default();
        let mut app = QuizApp::new(&config, MemorySink::new());
        let teacher = instructor(&app);

        let created = app.upload_questions(&teacher, "一\n二\n三", Direction::Ltr);
        assert_eq!(app.questions().len(), 3);

        app.delete_question(&teacher, &created[0].id);
        assert_eq!(app.questions().len(), 2);

        app.clear_all_questions(&teacher);
        assert!(app.questions().is_empty());
    }

    #[tokio::test]
    async fn test_submit_quiz_coerces_string_answers() {
        let config = Config::default();
        let mut app = QuizApp::new(&config, MemorySink::new());
        let teacher = instructor(&app);
        let created = app.upload_questions(&teacher, "一\n二", Direction::Ltr);

        let mut session = match app.login(RoleKind::Student, "小明", None).unwrap() {
            Role::Student(session) => session,
            _ => panic!("应该得到学生角色"),
        };

        // 字符串型答案在边界收敛为严格布尔
        let mut answers = HashMap::new();
        answers.insert(created[0].id.clone(), AnswerValue::Text("True".to_string()));
        answers.insert(created[1].id.clone(), AnswerValue::Bool(false));

        app.submit_quiz(&mut session, &answers).await.unwrap();

        let rows = app.sink().rows().await;
        assert_eq!(rows.len(), 2);
        assert!(session.has_submitted());
    }
}
