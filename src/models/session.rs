//! 会话数据模型
//!
//! 仅存在于客户端会话期间的临时状态，不做任何持久化，
//! 也没有 token / 过期模型

/// 教师会话
///
/// 持有该类型即代表通过了教师口令校验，
/// 题目仓库的所有变更操作都要求传入教师会话
#[derive(Debug, Clone)]
pub struct InstructorSession {
    name: String,
}

impl InstructorSession {
    /// 创建教师会话（由角色门禁在认证通过后调用）
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// 教师姓名
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 学生会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    /// 作答中（允许提交）
    Answering,
    /// 已提交（终态，不再触达 Sink）
    Submitted,
}

/// 学生会话
///
/// 携带"最多提交一次"的终态标记：提交成功后进入 Submitted，
/// 之后的提交调用不会再触达落库端；提交失败则停留在 Answering，
/// 允许手动重试
#[derive(Debug, Clone)]
pub struct StudentSession {
    name: String,
    state: SessionState,
}

impl StudentSession {
    /// 创建学生会话（由角色门禁在姓名校验通过后调用）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: SessionState::Answering,
        }
    }

    /// 学生姓名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 是否已进入提交终态
    pub fn has_submitted(&self) -> bool {
        self.state == SessionState::Submitted
    }

    /// 标记为已提交（终态，不可逆）
    pub fn mark_submitted(&mut self) {
        self.state = SessionState::Submitted;
    }
}
