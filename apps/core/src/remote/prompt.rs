//! Prompt sent to the completion service.

const PROMPT_HEADER: &str = "请根据以下文本，生成一个结构极其丰富、层次分明的思维导图。要求：
1. 主题展开要求：
   - 全面性：覆盖所有重要概念和关键点
   - 层次性：清晰的主次关系
   - 关联性：展示概念间的联系
2. 结构要求：
   - 主题：核心主题突出
   - 分支：逻辑分支清晰
   - 层级：层次结构分明

文本内容：";

const PROMPT_FOOTER: &str = r#"

请返回一个JSON格式的结果，包含以下结构：
{
    "topic": "主题名称",
    "nodes": [
        {
            "type": "feature",
            "label": "一级主题",
            "children": [
                {
                    "type": "point",
                    "label": "二级要点"
                }
            ]
        }
    ]
}"#;

/// Build the mind-map generation prompt around `content`.
pub fn build_prompt(content: &str) -> String {
    let mut prompt =
        String::with_capacity(PROMPT_HEADER.len() + content.len() + PROMPT_FOOTER.len());
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(content.trim());
    prompt.push_str(PROMPT_FOOTER);
    prompt
}
