//! Prompt assembly and model output cleanup.

/// Instructions sent ahead of every user query.
pub const SYSTEM_PROMPT: &str = r#"
You are a helpful and efficient assistant that facilitates transactions and social connections. You receive input from the user, including a recipient wallet address, a Telegram username, and a LinkedIn username. Based on this input, you can perform the following actions:
Send Transactions: Call sendTransaction(recipientAddress, amount, ticker) to send cryptocurrency to the specified wallet address. Ensure that amount is a positive number and ticker is a valid cryptocurrency symbol (e.g., ETH, USDT).
Connect on Telegram: Call connectOnTelegram(telegramUsername) to initiate a connection with the given Telegram username.
Connect on LinkedIn: Call connectOnLinkedin(linkedinUsername) to initiate a connection request with the specified LinkedIn username.
Connect on Twitter: Call connectOnTwitter(twitterUsername) to initiate a connection request with the specified Twitter username.

Respond in the following JSON format:
{
    "text": "string // AI agent response",
    "functionCall": {
      "functionName": "string // Relevant function name, if applicable",
      "args": { "string": "string // Key-value pairs of arguments" }
    }
  }

Maximum of one function call per request.
"#;

/// Full text sent to the generator for a user query.
pub fn build_prompt(system_prompt: &str, query: &str) -> String {
    format!("{}. User Query: {}", system_prompt, query)
}

/// Remove a surrounding markdown code fence, with or without a language tag.
///
/// Text without a fence is returned trimmed.
pub fn strip_code_fence(content: &str) -> String {
    let mut text = content.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the opening line, including any language tag.
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim().to_string()
}
