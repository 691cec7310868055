//! # vocab-algo - 词汇学习核心算法库
//!
//! 本 crate 提供纯 Rust 实现的两个算法组件:
//!
//! - **SM-2 Scheduler** - 间隔重复调度 (易度因子、复习间隔、掌握度)
//! - **Word-Pair Extractor** - 从识别文本中抽取词对 (分隔符规则、表格回退、置信度)
//!
//! ## 设计理念
//!
//! - **纯函数** - 无 I/O、无共享可变状态，调用方负责持久化
//! - **全函数** - 任何输入都不会 panic 或返回错误，无法解析的行作为数据返回
//! - **可并发** - 多个调用方可同时调用，无需任何同步
//!
//! ## 模块结构
//!
//! - [`scheduler`] - SM-2 状态转移、间隔预览、掌握度、到期文本
//! - [`extractor`] - 行切分、标题识别、分隔符规则、清洗、置信度
//! - [`sanitize`] - 持久化状态修复 (易度下限、间隔非负)
//! - [`types`] - 公共类型和常量
//!
//! ## 使用示例
//!
//! ```rust
//! use chrono::Utc;
//! use vocab_algo::{extract, next_state, LearningItem, UserRating};
//!
//! let result = extract("Hond - Chien\nKat - Chat");
//! assert_eq!(result.pairs.len(), 2);
//!
//! let now = Utc::now();
//! let item = LearningItem::new("Hond", "Chien", now);
//! let reviewed = next_state(&item.review, UserRating::Good, now);
//! assert_eq!(reviewed.interval_days, 1);
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod extractor;
pub mod sanitize;
pub mod scheduler;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

/// 重新导出调度器
pub use scheduler::{
    default_state, due_text, estimated_intervals, format_interval, mastery_score, next_state,
    MAX_INTERVAL_DAYS,
};

/// 重新导出词对抽取
pub use extractor::{
    clean_token, confidence, extract, extract_pages, is_likely_header, parse_line,
    parse_line_with_strategy, ParseStrategy, SeparatorKind,
};

/// 重新导出状态修复
pub use sanitize::{sanitize_state, SanitizeReport};
