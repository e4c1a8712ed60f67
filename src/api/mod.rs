//! 后端 API 客户端
//!
//! 三个端点各对应一个请求/响应操作：`/topology/validate`、`/analyze`、`/suggest-fix`。
//! 不重试、不超时、不鉴权；任何传输或解析失败都直接返回给调用者。

// 子模块声明
mod backend;
mod client;
mod error;
mod types;

// 重新导出公共接口
pub use backend::Backend;
pub use client::{
    ANALYZE_ENDPOINT, ApiClient, ClientConfig, DEFAULT_BASE_URL, SUGGEST_FIX_ENDPOINT,
    VALIDATE_ENDPOINT,
};
pub use error::ApiError;
pub use types::{
    Analysis, AnalysisMetrics, AnalysisReport, AnnotatedLink, AnnotatedNode, AnnotatedTopology,
    GlobalVerdict, MetricPoint, MetricSeries, Recommendation, SimulationMetrics,
    SuggestFixResult, ValidationResult,
};
