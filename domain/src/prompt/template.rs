//! Prompt templates for translate, summarize, and the connection probe.

use super::ChatMessage;
use crate::language::Language;

/// The acknowledgment the connection probe asks for.
const PROBE_ACK: &str = "连接成功";

/// Templates for the fixed prompt kinds sent to the completion endpoint.
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for translation into the given target language.
    pub fn translate_system(language: Language) -> String {
        format!(
            r#"你是一个专业的翻译助手。请将用户提供的文本翻译成{}。要求：
1. 翻译要准确、自然、流畅
2. 保持原文的语调和风格
3. 如果是专业术语，请提供准确的对应翻译
4. 只返回翻译结果，不要添加解释或其他内容"#,
            language.native_name()
        )
    }

    /// Full message pair for a translate request.
    pub fn translate(text: &str, language: Language) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(Self::translate_system(language)),
            ChatMessage::user(format!("请翻译以下文本：\n\n{}", text)),
        ]
    }

    /// System prompt for page summarization.
    pub fn summarize_system() -> &'static str {
        r#"你是一个专业的内容总结助手。请根据用户提供的网页内容生成准确、简洁的总结。要求：
1. 总结要准确反映原文的主要观点和关键信息
2. 结构清晰，条理分明
3. 长度适中，一般在200-500字之间
4. 使用要点形式，便于阅读
5. 如果内容较长，请提取最重要的部分进行总结"#
    }

    /// Full message pair for a summarize request.
    pub fn summarize(content: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(Self::summarize_system()),
            ChatMessage::user(format!("请总结以下网页内容：\n\n{}", content)),
        ]
    }

    /// Fixed probe used by the connection test.
    pub fn connection_probe() -> Vec<ChatMessage> {
        vec![ChatMessage::user(format!("请回复\"{}\"", PROBE_ACK))]
    }

    /// Whether a probe reply counts as a successful acknowledgment.
    ///
    /// Lenient on purpose: models often answer with a variation, so any
    /// reply containing "成功" passes.
    pub fn is_probe_ack(reply: &str) -> bool {
        reply.contains(PROBE_ACK) || reply.contains("成功")
    }
}
