//! # vocab-app - 词汇学习应用层
//!
//! 在 `vocab-algo` 纯算法之上提供:
//!
//! - [`repository`] - 学习条目存储接口和内存实现
//! - [`session`] - 练习会话 (到期队列、评分、回写)
//! - [`grading`] - 输入答案相似度评分
//! - [`import`] - 图片识别导入和确认流程
//! - [`config`] / [`logging`] / [`error`] - 配置、日志、错误
//! - [`cli`] - `vocab` 命令行

pub mod cli;
pub mod config;
pub mod error;
pub mod grading;
pub mod import;
pub mod logging;
pub mod repository;
pub mod session;

pub use config::{Config, SessionConfig};
pub use error::{AppError, AppResult};
pub use grading::{grade_answer, AnswerGrade};
pub use import::{
    recognize_and_extract, review_text, CancelFlag, ImagePreprocessor, ImportReview,
    RecognitionError, RecognitionProgress, TextRecognizer,
};
pub use repository::{InMemoryRepository, ItemIndex, ItemRepository, RepositoryError, StoredItem};
pub use session::{PracticeSession, ReviewOutcome, SessionSummary};
