use crate::message::ChatResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Market,
    Planning,
    General,
}

/// What the placeholder assistant knows about the active session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub title: String,
    pub memo_count: usize,
    pub todo_count: usize,
}

pub fn detect_topic(prompt: &str) -> Topic {
    let lower = prompt.to_lowercase();

    if ["stock", "price", "earnings", "chart", "buy", "sell"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Topic::Market
    } else if ["plan", "todo", "strategy", "schedule"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Topic::Planning
    } else {
        Topic::General
    }
}

/// Canned response. No model is consulted; the shape is what matters.
pub fn generate_reply(prompt: &str, context: Option<&SessionContext>) -> ChatResponse {
    let topic = detect_topic(prompt);

    let mut thinking = format!("Prompt received: {prompt}\nTopic: {topic:?}");
    match context {
        Some(ctx) => thinking.push_str(&format!(
            "\nSession \"{}\" has {} memo(s) and {} todo(s).",
            ctx.title, ctx.memo_count, ctx.todo_count
        )),
        None => thinking.push_str("\nNo session selected."),
    }

    let hint = match topic {
        Topic::Market => "Check recent earnings and price action before acting.",
        Topic::Planning => "Break the plan into todos inside the session.",
        Topic::General => "Add a memo to keep this idea with the session.",
    };

    let reply = [
        "This is a placeholder answer from the mock assistant.",
        hint,
        "No real market data was consulted.",
    ]
    .join("\n");

    ChatResponse { reply, thinking }
}
