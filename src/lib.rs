//! # Quiz Submit
//!
//! 判断题答题核心：教师上传题目，学生作答，完整提交落库到表格文档
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有共享资源，只暴露能力
//! - `QuestionStore` - 唯一的题目列表 owner，提供增删查能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单次调用
//! - `SubmissionValidator` - 完整性校验与规范化能力
//! - `RoleGate` - 教师/学生角色认证能力（口令校验可插拔）
//! - `SubmissionSink` - 落库能力（表格后端 / 进程内后端，配置选择）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整处理流程
//! - `SubmitFlow` - 流程编排（校验 -> 落库 -> 终态），保证最多提交一次
//!
//! ### ④ 编排层（App）
//! - `app` - 应用门面，UI 层只通过它进入核心
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::QuizApp;
pub use config::Config;
pub use error::{AppError, AppResult, AuthError, SinkError, ValidationError};
pub use infrastructure::QuestionStore;
pub use models::{AnswerValue, Direction, InstructorSession, Question, StudentSession, Submission};
pub use services::{
    CredentialCheck, FixedSecret, MemorySink, Role, RoleGate, RoleKind, SheetsSink, SinkBackend,
    SubmissionSink, SubmissionValidator,
};
pub use workflow::SubmitFlow;
