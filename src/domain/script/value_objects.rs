//! Script Context - Value Objects
//!
//! 讲解脚本的组成单元：文本块与代码块

use serde::{Deserialize, Serialize};

/// 代码行范围
///
/// `from`/`to` 与 `line` 两种写法可以在同一个列表中混用，
/// 不校验 `from <= to`，也不要求至少出现一个字段（原样透传）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    #[serde(rename = "from", default, skip_serializing_if = "Option::is_none")]
    pub from_line: Option<u32>,

    #[serde(rename = "to", default, skip_serializing_if = "Option::is_none")]
    pub to_line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl LineRange {
    pub fn span(from: u32, to: u32) -> Self {
        Self {
            from_line: Some(from),
            to_line: Some(to),
            line: None,
        }
    }

    pub fn single(line: u32) -> Self {
        Self {
            from_line: None,
            to_line: None,
            line: Some(line),
        }
    }

    /// 判断某一行是否落在范围内（1-based）
    ///
    /// 同时给出 from/to 时优先按区间判断，否则退回到单行
    pub fn contains(&self, line_no: u32) -> bool {
        match (self.from_line, self.to_line, self.line) {
            (Some(from), Some(to), _) => line_no >= from && line_no <= to,
            (_, _, Some(line)) => line_no == line,
            _ => false,
        }
    }
}

/// 文本讲解块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub markdown: String,
}

/// 代码讲解块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// 源文件绝对路径
    pub file: String,
    pub relevant_lines: Vec<LineRange>,
    pub markdown: String,
}

/// 讲解块（按 `type` 字段区分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NarrationBlock {
    Text(TextBlock),
    Code(CodeBlock),
}

impl NarrationBlock {
    pub fn text(markdown: impl Into<String>) -> Self {
        Self::Text(TextBlock {
            markdown: markdown.into(),
        })
    }

    pub fn code(
        file: impl Into<String>,
        relevant_lines: Vec<LineRange>,
        markdown: impl Into<String>,
    ) -> Self {
        Self::Code(CodeBlock {
            file: file.into(),
            relevant_lines,
            markdown: markdown.into(),
        })
    }

    /// 需要朗读的 markdown 内容
    pub fn markdown(&self) -> &str {
        match self {
            Self::Text(block) => &block.markdown,
            Self::Code(block) => &block.markdown,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Code(_) => "code",
        }
    }
}
