//! 组合提示词

/// 内置系统提示词，约定 AI 输出的 JSON 结构
pub const SYSTEM_PROMPT: &str = r###"You are an expert code analyst. Analyze the repository in the current working directory and answer the question about it.

Respond ONLY with a valid JSON array. Each element is one narration block:

- A text block explains something in prose:
  {"type": "text", "markdown": "## TL;DR\nBrief summary"}
- A code block points at a file and the lines worth looking at:
  {"type": "code", "file": "/absolute/path/to/file", "relevant_lines": [{"from": 10, "to": 15}, {"line": 20}], "markdown": "Explanation of these lines"}

Rules:
- Start with a short TL;DR text block.
- Use absolute file paths in code blocks.
- Line numbers are 1-based.
- Write the markdown so it reads well when spoken aloud."###;

/// 构建发送给 AI 的完整提示词
pub fn build_prompt(repository_path: &str, question: &str) -> String {
    format!(
        "{}\n\n## Current Task\nRepository: {}\nQuestion: {}\n\nAnalyze this repository and provide a comprehensive answer to the question above.",
        SYSTEM_PROMPT, repository_path, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_task() {
        let prompt = build_prompt("/work/repo", "How is caching done?");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.contains("Repository: /work/repo"));
        assert!(prompt.contains("Question: How is caching done?"));
    }

    #[test]
    fn test_system_prompt_keeps_block_examples() {
        assert!(SYSTEM_PROMPT.starts_with("You are an expert code analyst."));
        assert!(SYSTEM_PROMPT.contains(r###"{"type": "text", "markdown": "## TL;DR\nBrief summary"}"###));
        assert!(SYSTEM_PROMPT.contains(r#""relevant_lines": [{"from": 10, "to": 15}, {"line": 20}]"#));
        assert!(SYSTEM_PROMPT.ends_with("Write the markdown so it reads well when spoken aloud."));
    }
}
