pub const SYSTEM_PROMPT: &str = "You are a podcast analyst giving positive reviews who extracts meaningful quotes and creates concise summaries.";

/// Number of quotes the model is asked for. Not enforced on the answer.
pub const QUOTE_COUNT: usize = 10;

/// Build the user prompt for one episode.
pub fn quote_prompt(title: &str, transcription: &str) -> String {
    format!(
        r#"You are analyzing a podcast episode titled "{title}".

Here is the full transcript:

{transcription}

Please provide:
1. A 2-3 sentence synopsis of the episode. Keep it positive.
2. {QUOTE_COUNT} memorable, insightful, or funny quotes from the episode that would make good daily quotes. Something someone could look at and be intrigued by.

Format your response as JSON:
{{
  "synopsis": "...",
  "quotes": ["quote 1", "quote 2", ...]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_episode() {
        let prompt = quote_prompt("Ep1", "hello world");
        assert!(prompt.contains(r#"titled "Ep1""#));
        assert!(prompt.contains("\n\nhello world\n\n"));
        assert!(prompt.contains("10 memorable"));
        assert!(prompt.contains(r#""quotes": ["quote 1""#));
    }
}
