//! 角色门禁服务 - 业务能力层
//!
//! 区分教师（特权，可变更题目）和学生（只读题目、提交答案）两种角色
//!
//! 这是一个刻意低安全级别的门禁（共享静态口令、无限流、无哈希），
//! 适用于低风险的课堂场景。口令校验做成可插拔能力，
//! 换成更强的方案时门禁控制流不需要改动

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AuthError;
use crate::models::{InstructorSession, StudentSession};

/// 口令校验能力
///
/// 单方法接口，便于替换为哈希口令、会话令牌或带限流的实现
pub trait CredentialCheck: Send + Sync {
    /// 校验调用方提供的口令
    fn verify(&self, secret: &str) -> bool;
}

/// 固定共享口令校验（精确字符串匹配，区分大小写）
pub struct FixedSecret {
    secret: String,
}

impl FixedSecret {
    /// 创建固定口令校验
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialCheck for FixedSecret {
    fn verify(&self, secret: &str) -> bool {
        secret == self.secret
    }
}

/// 请求的角色类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    /// 教师
    Instructor,
    /// 学生
    Student,
}

/// 认证通过后获得的角色
///
/// 持有对应会话即代表获得了该角色的能力
#[derive(Debug, Clone)]
pub enum Role {
    Instructor(InstructorSession),
    Student(StudentSession),
}

/// 角色门禁
pub struct RoleGate {
    check: Box<dyn CredentialCheck>,
}

impl RoleGate {
    /// 使用配置中的共享口令创建门禁
    pub fn new(config: &Config) -> Self {
        Self {
            check: Box::new(FixedSecret::new(config.instructor_secret.clone())),
        }
    }

    /// 使用自定义口令校验创建门禁
    pub fn with_check(check: Box<dyn CredentialCheck>) -> Self {
        Self { check }
    }

    /// 认证
    ///
    /// # 参数
    /// - `kind`: 请求的角色类型
    /// - `name`: 显示姓名
    /// - `credential`: 教师口令（学生角色忽略）
    ///
    /// # 返回
    /// 学生：姓名去除空白后非空即通过；
    /// 教师：姓名非空且口令精确匹配才通过
    pub fn authenticate(
        &self,
        kind: RoleKind,
        name: &str,
        credential: Option<&str>,
    ) -> Result<Role, AuthError> {
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(AuthError::MissingName);
        }

        match kind {
            RoleKind::Student => {
                info!("👤 学生登录: {}", trimmed_name);
                Ok(Role::Student(StudentSession::new(trimmed_name)))
            }
            RoleKind::Instructor => {
                let verified = credential
                    .map(|secret| self.check.verify(secret))
                    .unwrap_or(false);

                if !verified {
                    warn!("⚠️ 教师口令校验失败: {}", trimmed_name);
                    return Err(AuthError::InvalidCredential);
                }

                info!("👤 教师登录: {}", trimmed_name);
                Ok(Role::Instructor(InstructorSession::new(trimmed_name)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_with_secret(secret: &str) -> RoleGate {
        RoleGate::with_check(Box::new(FixedSecret::new(secret)))
    }

    #[test]
    fn test_student_login_needs_only_name() {
        let gate = gate_with_secret("ZQY0H4");

        let role = gate.authenticate(RoleKind::Student, "  小明  ", None).unwrap();
        match role {
            Role::Student(session) => assert_eq!(session.name(), "小明"),
            _ => panic!("应该得到学生角色"),
        }
    }

    #[test]
    fn test_student_login_missing_name() {
        let gate = gate_with_secret("ZQY0H4");

        assert_eq!(
            gate.authenticate(RoleKind::Student, "   ", None).unwrap_err(),
            AuthError::MissingName
        );
    }

    #[test]
    fn test_instructor_login_with_correct_secret() {
        let gate = gate_with_secret("ZQY0H4");

        let role = gate
            .authenticate(RoleKind::Instructor, "Jane", Some("ZQY0H4"))
            .unwrap();
        assert!(matches!(role, Role::Instructor(_)));
    }

    #[test]
    fn test_instructor_login_with_wrong_secret() {
        let gate = gate_with_secret("ZQY0H4");

        assert_eq!(
            gate.authenticate(RoleKind::Instructor, "Jane", Some("wrong"))
                .unwrap_err(),
            AuthError::InvalidCredential
        );
    }

    #[test]
    fn test_instructor_login_is_case_sensitive() {
        let gate = gate_with_secret("ZQY0H4");

        assert_eq!(
            gate.authenticate(RoleKind::Instructor, "Jane", Some("zqy0h4"))
                .unwrap_err(),
            AuthError::InvalidCredential
        );
    }

    #[test]
    fn test_instructor_login_without_credential() {
        let gate = gate_with_secret("ZQY0H4");

        assert_eq!(
            gate.authenticate(RoleKind::Instructor, "Jane", None).unwrap_err(),
            AuthError::InvalidCredential
        );
    }

    #[test]
    fn test_instructor_login_missing_name_checked_first() {
        let gate = gate_with_secret("ZQY0H4");

        assert_eq!(
            gate.authenticate(RoleKind::Instructor, "", Some("ZQY0H4"))
                .unwrap_err(),
            AuthError::MissingName
        );
    }

    #[test]
    fn test_pluggable_credential_check() {
        // 任何口令都拒绝的校验实现
        struct RejectAll;
        impl CredentialCheck for RejectAll {
            fn verify(&self, _secret: &str) -> bool {
                false
            }
        }

        let gate = RoleGate::with_check(Box::new(RejectAll));

        assert_eq!(
            gate.authenticate(RoleKind::Instructor, "Jane", Some("任意口令"))
                .unwrap_err(),
            AuthError::InvalidCredential
        );
    }
}
