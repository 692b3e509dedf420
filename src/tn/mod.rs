//! TN (Text Normalization) - 中文文本规范化
//!
//! 将数字、日期、时间、单位等书面形式转为可朗读的汉字形式。
//!
//! ## 处理流程
//! 1. Unicode 归一化 + 全角转半角 + 空白折叠
//! 2. 按标点切分子句
//! 3. 按优先级依次应用规则（日期 → 时间 → 温度 → 分数 → 百分比 → 电话 → 范围 → 通用数字）
//! 4. 符号映射

mod engine;
mod num;
mod rules;

pub use engine::TextNormalizer;
