//! 源文件视图
//!
//! 按行截取文件内容，或渲染带行号与高亮标记的文本

use super::script::LineRange;

/// 按 1-based 闭区间截取内容
///
/// 只有同时给出 `from_line` 与 `to_line` 时才截取，越界部分被收紧；
/// 返回截取后的内容与文件总行数
pub fn slice_lines(content: &str, from_line: Option<u32>, to_line: Option<u32>) -> (String, usize) {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let total = lines.len();

    let selected = match (from_line, to_line) {
        (Some(from), Some(to)) => {
            let start = (from.max(1) as usize - 1).min(total);
            let end = (to as usize).min(total);
            if start < end {
                lines[start..end].concat()
            } else {
                String::new()
            }
        }
        _ => content.to_string(),
    };

    (selected, total)
}

/// 渲染带行号的文本，高亮行以 `>>> ` 开头
pub fn render_with_line_markers(content: &str, ranges: &[LineRange]) -> String {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let line_no = i as u32 + 1;
            let marker = if ranges.iter().any(|r| r.contains(line_no)) {
                ">>> "
            } else {
                "    "
            };
            format!("{}{:4}: {}", marker, line_no, line.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
