use anyhow::Result;
use calcbot::Reply;
use serde::Serialize;

#[derive(Serialize)]
struct JsonLine<'a> {
    input: &'a str,
    reply: &'a Reply,
    text: String,
}

/// Renders replies either as the `Bot: ...` line or as one JSON object per line
pub struct Formatter {
    json: bool,
}

impl Formatter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn format_reply(&self, input: &str, reply: &Reply) -> Result<String> {
        if !self.json {
            return Ok(reply.to_string());
        }
        let line = JsonLine {
            input,
            reply,
            text: reply.to_string(),
        };
        Ok(serde_json::to_string(&line)?)
    }
}
