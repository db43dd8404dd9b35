use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 认证错误
    Auth(AuthError),
    /// 提交校验错误
    Validation(ValidationError),
    /// 落库错误
    Sink(SinkError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(e) => write!(f, "认证错误: {}", e),
            AppError::Validation(e) => write!(f, "校验错误: {}", e),
            AppError::Sink(e) => write!(f, "落库错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Auth(e) => Some(e),
            AppError::Validation(e) => Some(e),
            AppError::Sink(e) => Some(e),
        }
    }
}

impl AppError {
    /// 面向最终用户的提示文案
    ///
    /// 落库错误不区分具体种类，统一收敛为一条"提交失败"提示，
    /// 具体种类由日志记录
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth(e) => e.user_message().to_string(),
            AppError::Validation(e) => e.user_message(),
            AppError::Sink(e) => e.user_message().to_string(),
        }
    }
}

/// 认证错误
///
/// 可恢复，作为字段级提示展示给调用方
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 姓名为空
    MissingName,
    /// 教师口令不匹配
    InvalidCredential,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingName => write!(f, "姓名不能为空"),
            AuthError::InvalidCredential => write!(f, "教师口令不正确"),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    /// 字段级提示文案
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::MissingName => "请输入姓名",
            AuthError::InvalidCredential => "口令错误，请重新输入",
        }
    }
}

/// 提交校验错误
///
/// 完全在核心内部解决，出现校验错误时绝不会触达 Sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 学生姓名为空
    MissingName,
    /// 存在未作答的题目
    IncompleteAnswers {
        /// 未作答的题目 id 列表
        missing_ids: Vec<String>,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName => write!(f, "学生姓名不能为空"),
            ValidationError::IncompleteAnswers { missing_ids } => {
                write!(f, "还有 {} 道题未作答: {:?}", missing_ids.len(), missing_ids)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// 面向学生的提示文案
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingName => "请输入姓名".to_string(),
            ValidationError::IncompleteAnswers { missing_ids } => {
                format!("还有 {} 道题未作答", missing_ids.len())
            }
        }
    }
}

/// 落库错误
#[derive(Debug)]
pub enum SinkError {
    /// 外部存储不可达或认证失败
    Unavailable {
        endpoint: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
    /// 外部存储拒绝写入（范围非法、权限不足等）
    WriteRejected {
        endpoint: String,
        status: Option<u16>,
        message: Option<String>,
    },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Unavailable { endpoint, source } => {
                write!(f, "外部存储不可用 ({}): {:?}", endpoint, source)
            }
            SinkError::WriteRejected {
                endpoint,
                status,
                message,
            } => {
                write!(
                    f,
                    "外部存储拒绝写入 ({}): status={:?}, message={:?}",
                    endpoint, status, message
                )
            }
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Unavailable {
                source: Some(source),
                ..
            } => Some(source.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl SinkError {
    /// 错误种类名（用于日志区分，最终用户不感知）
    pub fn kind(&self) -> &'static str {
        match self {
            SinkError::Unavailable { .. } => "SinkUnavailable",
            SinkError::WriteRejected { .. } => "SinkWriteRejected",
        }
    }

    /// 面向最终用户的统一提示文案
    ///
    /// 两种落库错误对最终用户不做区分
    pub fn user_message(&self) -> &'static str {
        "提交失败，请稍后重试"
    }
}

// ========== 从常见错误类型转换 ==========

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<SinkError> for AppError {
    fn from(err: SinkError) -> Self {
        AppError::Sink(err)
    }
}

// ========== 便捷构造函数 ==========

impl SinkError {
    /// 创建"外部存储不可用"错误
    pub fn unavailable(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        SinkError::Unavailable {
            endpoint: endpoint.into(),
            source: Some(Box::new(source)),
        }
    }

    /// 创建"外部存储不可用"错误（无底层错误信息）
    pub fn unavailable_bare(endpoint: impl Into<String>) -> Self {
        SinkError::Unavailable {
            endpoint: endpoint.into(),
            source: None,
        }
    }

    /// 创建"外部存储拒绝写入"错误
    pub fn write_rejected(
        endpoint: impl Into<String>,
        status: Option<u16>,
        message: Option<String>,
    ) -> Self {
        SinkError::WriteRejected {
            endpoint: endpoint.into(),
            status,
            message,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
