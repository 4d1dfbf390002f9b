//! Cold Opener Scenario - one-sentence cold email openers

use super::language::DetectedLanguage;

/// Number of openers the model is asked for and the most we return.
pub const OPENER_COUNT: usize = 10;

/// System turn sent with every generation.
pub const SYSTEM_PROMPT: &str = "You write short, high-performing outbound copy.";

const NO_CONTEXT: &str = "No context";

/// Build the user turn for one generation.
///
/// Output depends only on the arguments.
pub fn build_prompt(
    role: &str,
    company_type: &str,
    context: &str,
    language: DetectedLanguage,
) -> String {
    let context = if context.is_empty() { NO_CONTEXT } else { context };

    format!(
        "You are an expert cold email copywriter.\n\
\n\
Generate {count} cold email opening sentences.\n\
\n\
Rules:\n\
- Each opener must be ONE sentence\n\
- Maximum 20 words\n\
- Natural, human, non-salesy\n\
- No buzzwords\n\
- No emojis\n\
- No questions like \u{201c}Hope you\u{2019}re well\u{201d}\n\
- No exclamation marks\n\
- No mentioning \u{201c}I came across\u{201d}\n\
- No pitching\n\
- No greetings\n\
- Write every line in {language} only. Do not mix in any other language.\n\
\n\
Context:\n\
Prospect role: {role}\n\
Company type: {company_type}\n\
Context: {context}\n\
\n\
Return only the {count} lines, in {language}.",
        count = OPENER_COUNT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs() {
        let prompt = build_prompt("VP Marketing", "B2B SaaS", "Funding / growth", DetectedLanguage::English);

        assert!(prompt.contains("Prospect role: VP Marketing"));
        assert!(prompt.contains("Company type: B2B SaaS"));
        assert!(prompt.contains("Context: Funding / growth"));
        assert!(prompt.contains("Generate 10 cold email opening sentences"));
        assert!(prompt.contains("Write every line in English only"));
        assert!(!prompt.contains(NO_CONTEXT));
    }

    #[test]
    fn test_prompt_empty_context_placeholder() {
        let prompt = build_prompt("Head of Sales", "Fintech", "", DetectedLanguage::German);

        assert!(prompt.contains("Context: No context"));
        assert!(prompt.contains("Write every line in German only"));
        assert!(prompt.contains("Return only the 10 lines, in German."));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prompt("CTO", "Agency", "Hiring", DetectedLanguage::French);
        let b = build_prompt("CTO", "Agency", "Hiring", DetectedLanguage::French);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_lists_banned_patterns() {
        let prompt = build_prompt("CTO", "Agency", "", DetectedLanguage::English);
        for rule in [
            "No buzzwords",
            "No emojis",
            "No exclamation marks",
            "No pitching",
            "No greetings",
            "I came across",
            "Hope you\u{2019}re well",
            "Maximum 20 words",
        ] {
            assert!(prompt.contains(rule), "missing rule: {}", rule);
        }
    }
}
