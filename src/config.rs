/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 教师登录共享口令（精确匹配，区分大小写）
    pub instructor_secret: String,
    /// 落库后端选择（"sheets" 或 "memory"）
    pub sink_backend: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 表格文档配置 ---
    /// 落库表格文档标题（按标题查找，不存在则创建）
    pub sheet_title: String,
    /// 表格内工作表名
    pub sheet_tab: String,
    // --- 表格 API 配置 ---
    pub sheets_api_base_url: String,
    pub drive_api_base_url: String,
    /// 访问令牌（由外部协作方获取，核心只负责携带）
    pub google_api_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructor_secret: "ZQY0H4".to_string(),
            sink_backend: "sheets".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            sheet_title: "TrueFalse Quiz Submissions".to_string(),
            sheet_tab: "Sheet1".to_string(),
            sheets_api_base_url: "https://sheets.googleapis.com".to_string(),
            drive_api_base_url: "https://www.googleapis.com".to_string(),
            google_api_token: String::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            instructor_secret: std::env::var("INSTRUCTOR_SECRET").unwrap_or(default.instructor_secret),
            sink_backend: std::env::var("SINK_BACKEND").unwrap_or(default.sink_backend),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            sheet_title: std::env::var("SHEET_TITLE").unwrap_or(default.sheet_title),
            sheet_tab: std::env::var("SHEET_TAB").unwrap_or(default.sheet_tab),
            sheets_api_base_url: std::env::var("SHEETS_API_BASE_URL").unwrap_or(default.sheets_api_base_url),
            drive_api_base_url: std::env::var("DRIVE_API_BASE_URL").unwrap_or(default.drive_api_base_url),
            google_api_token: std::env::var("GOOGLE_API_TOKEN").unwrap_or(default.google_api_token),
        }
    }
}
