use crate::coach::advisor::{call_with_fallback, Advisor};
use crate::openai::TextGenerator;
use crate::prompts::Prompts;

/// Merges advisor outputs into one reply. If the merge call fails, the non-empty
/// outputs are joined with single spaces in the order given.
pub async fn synthesize(generator: &dyn TextGenerator, parts: &[(Advisor, String)]) -> String {
    let insights = parts
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(advisor, text)| format!("{}: {}", advisor.label().to_uppercase(), text))
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = format!("{}\n{}", Prompts::SYNTHESIZER_PREAMBLE, insights);

    call_with_fallback(generator, &prompt, Prompts::SYNTHESIZER_SYSTEM, |_| {
        parts
            .iter()
            .map(|(_, text)| text.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    })
    .await
}
