//! Prompt and structured-output schema sent with every classification request.

use serde_json::{Value, json};

use crate::models::Sentiment;

/// Instruction wrapping the user's text.
pub fn build_prompt(text: &str) -> String {
    format!(
        "Analyze the sentiment of the following text strictly.\n\n\
         Text to analyze:\n\"{}\"\n\n\
         Provide the sentiment classification, a confidence score (0-100), a brief reasoning, \
         detailed emotions, and keywords.",
        text
    )
}

/// Response schema in the Gemini `responseSchema` dialect (OpenAPI subset).
pub fn response_schema() -> Value {
    let classes: Vec<&str> = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
        .iter()
        .map(Sentiment::as_str)
        .collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "sentiment": {
                "type": "STRING",
                "enum": classes,
                "description": "The overall sentiment of the text."
            },
            "score": {
                "type": "INTEGER",
                "description": "A confidence score for the sentiment classification between 0 and 100."
            },
            "reasoning": {
                "type": "STRING",
                "description": "A brief explanation (1-2 sentences) of why this sentiment was chosen."
            },
            "emotions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of up to 3 specific emotions detected (e.g., 'Joy', 'Frustration', 'Sarcasm')."
            },
            "keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Key words or phrases that influenced the sentiment analysis."
            }
        },
        "required": ["sentiment", "score", "reasoning", "emotions", "keywords"]
    })
}
