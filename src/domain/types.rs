// ==========================================
// 缺陷分派系统 - 领域类型定义
// ==========================================
// 红线: 严重度是等级制, 不是评分制
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 严重度 (Severity / Impact)
// ==========================================
// 顺序: Low < Medium < High
// 序列化格式: 小写 (与输入文件的 impact 字段一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,    // 低
    Medium, // 中
    High,   // 高
}

impl Severity {
    /// 分派顺序: 每个开发者的任务包按此顺序填充
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// 数值等级 (High=2, Medium=1, Low=0)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!("未知严重度: {}", other)),
        }
    }
}
