// All LLM prompt text for selling-point generation.
// Prompts are Chinese because the generated copy is Chinese.

/// System prompt: stay on the user's product, JSON only.
pub const GENERATION_SYSTEM: &str = "你是一位产品卖点提炼专家。你的任务是：根据用户提供的【产品描述】，提炼该产品的营销卖点。

重要规则：
- 你必须严格围绕用户描述的产品来提炼，不要编造或替换成其他产品
- 只输出 JSON，不要输出任何其他文字、标题、解释、markdown标记
- 确保 JSON 格式正确，可以被直接解析";

/// User prompt template. Replace `{description}` before sending.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"我的产品是：{description}

请为【这个产品】提炼以下内容，直接输出JSON（不要代码块标记）：
{
  "valueProposition": "一句话价值主张，不超过30字",
  "sellingPoints": [
    {"title": "卖点标题1(4-6字)", "description": "一句话解释(不超过30字)"},
    {"title": "卖点标题2(4-6字)", "description": "一句话解释(不超过30字)"},
    {"title": "卖点标题3(4-6字)", "description": "一句话解释(不超过30字)"}
  ],
  "targetUser": "目标用户画像，2-3句话",
  "elevatorPitch": "30秒电梯演讲稿，100-150字，口语化，像跟朋友聊天",
  "wechatCopy": "一条朋友圈文案，有吸引力，让人想评论"
}"#;

/// A system + user instruction pair ready for the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Builds the generation prompt for an already-validated description.
pub fn build_prompt(description: &str) -> Prompt {
    Prompt {
        system: GENERATION_SYSTEM.to_string(),
        user: GENERATION_PROMPT_TEMPLATE.replace("{description}", description.trim()),
    }
}
