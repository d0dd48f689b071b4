//! Prompt construction for rule checks.
//!
//! Building a prompt is pure data transformation: two strings in, an
//! ordered message list out. Nothing here touches the network, so the
//! exact framing the model sees can be pinned down in unit tests.

use crate::types::ChatMessage;

/// System instruction that frames the model as a linter.
pub const LINTER_SYSTEM_PROMPT: &str = "You are a linter. You are given first a rule and then document. You must decide whether the document passes the rule.";

/// System instruction that pins the response format.
///
/// The verdict shape is spelled out inline so the model has the exact
/// contract in front of it. [`crate::verdict::Verdict::from_model_output`]
/// is the receiving end.
pub const RESPONSE_FORMAT_PROMPT: &str = "Respond in json this type.
type Response = {
pass: true;
} | {
pass: false;
message: string;
}";

/// Build the fixed four-message prompt for a rule check.
///
/// Message order is part of the contract: linter framing, the rule, the
/// document, then the response format. Rule and document are each wrapped
/// in delimiter tags padded with blank lines on both sides.
///
/// # Example
///
/// ```
/// use rulecheck_core::prompt::check_prompt;
///
/// let messages = check_prompt("Must contain a greeting", "Hello world");
/// assert_eq!(messages.len(), 4);
/// assert!(messages[1].content.contains("Must contain a greeting"));
/// ```
pub fn check_prompt(rule: &str, document: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(LINTER_SYSTEM_PROMPT),
        ChatMessage::user(format!("<|RULE|>\n\n\n{rule}\n\n\n<|ENDRULE|>")),
        ChatMessage::user(format!(
            "<|DOCUMENT|>\n\n\n{document}\n\n\n<|ENDDOCUMENT|>"
        )),
        ChatMessage::system(RESPONSE_FORMAT_PROMPT),
    ]
}
