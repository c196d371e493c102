//! 讲解块提取器
//!
//! AI CLI 的输出经常在 JSON 数组前后夹带说明文字，这里先尝试截取
//! 第一个 `[` 到最后一个 `]` 之间的内容，截取结果不是合法 JSON 时
//! 再退回整段文本

use serde_json::{Map, Value};

use super::errors::ExtractError;
use super::value_objects::{LineRange, NarrationBlock};

/// 定位原始输出中的 JSON 载荷
///
/// - 截取片段是合法 JSON：返回截取片段
/// - 否则：返回去除首尾空白后的整段文本
pub fn locate_json_payload(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if end > start {
            let candidate = &trimmed[start..=end];
            if serde_json::from_str::<Value>(candidate).is_ok() {
                return candidate;
            }
            tracing::debug!("Bracketed substring is not valid JSON, falling back to full output");
        }
    }

    trimmed
}

/// 将 AI 原始输出解析为讲解块序列
///
/// 未知 `type` 的块被跳过；缺少必填字段时返回 `MalformedBlock`
pub fn extract_blocks(raw: &str) -> Result<Vec<NarrationBlock>, ExtractError> {
    let payload = locate_json_payload(raw);

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| ExtractError::MalformedResponse(e.to_string()))?;

    let items = value.as_array().ok_or_else(|| {
        ExtractError::MalformedResponse("expected a JSON array of script blocks".to_string())
    })?;

    let mut blocks = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if let Some(block) = parse_block(index, item)? {
            blocks.push(block);
        }
    }

    Ok(blocks)
}

fn parse_block(index: usize, item: &Value) -> Result<Option<NarrationBlock>, ExtractError> {
    let obj = item
        .as_object()
        .ok_or_else(|| ExtractError::block(index, "block is not a JSON object"))?;

    match obj.get("type").and_then(Value::as_str) {
        Some("text") => {
            let markdown = required_str(index, obj, "markdown")?;
            Ok(Some(NarrationBlock::text(markdown)))
        }
        Some("code") => {
            let file = required_str(index, obj, "file")?;
            let markdown = required_str(index, obj, "markdown")?;
            let ranges = obj
                .get("relevant_lines")
                .and_then(Value::as_array)
                .ok_or_else(|| ExtractError::block(index, "missing `relevant_lines` array"))?;

            let relevant_lines = ranges
                .iter()
                .map(|range| parse_line_range(index, range))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Some(NarrationBlock::code(file, relevant_lines, markdown)))
        }
        other => {
            tracing::debug!(index, block_type = ?other, "Skipping script block with unknown type");
            Ok(None)
        }
    }
}

fn required_str<'a>(
    index: usize,
    obj: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, ExtractError> {
    match obj.get(field).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => Ok(s),
        Some(_) => Err(ExtractError::block(index, format!("`{}` must not be empty", field))),
        None => Err(ExtractError::block(index, format!("missing `{}` field", field))),
    }
}

fn parse_line_range(index: usize, value: &Value) -> Result<LineRange, ExtractError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ExtractError::block(index, "line range is not a JSON object"))?;

    Ok(LineRange {
        from_line: line_number(index, obj, "from")?,
        to_line: line_number(index, obj, "to")?,
        line: line_number(index, obj, "line")?,
    })
}

/// 行号字段：可缺省，出现时必须是 >= 1 的整数
fn line_number(
    index: usize,
    obj: &Map<String, Value>,
    field: &str,
) -> Result<Option<u32>, ExtractError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                ExtractError::block(index, format!("`{}` must be a positive line number", field))
            }),
    }
}
