// Document Builder: renders the final report; the only agent with no LLM call

use crate::models::Extraction;

pub struct DocumentBuilder;

impl DocumentBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Deterministic render: identical inputs produce identical bytes.
    /// Interpolated text is embedded verbatim, without HTML escaping.
    pub fn build(
        &self,
        question: &str,
        summary: &str,
        extraction: &Extraction,
        citations: &str,
    ) -> String {
        let extracted =
            serde_json::to_string_pretty(extraction).unwrap_or_else(|_| "{}".to_string());

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8" />
    <title>Research Report</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        h1, h2, h3 {{ color: #1F4E79; }}
        .section {{ margin-bottom: 24px; }}
        pre {{ background: #f5f5f5; padding: 8px; border-radius: 4px; }}
    </style>
</head>
<body>
    <h1>Research Report</h1>
    <div class="section">
        <h2>Question</h2>
        <p>{question}</p>
    </div>
    <div class="section">
        <h2>Executive Summary</h2>
        <p>{summary}</p>
    </div>
    <div class="section">
        <h2>Extracted Facts & Entities</h2>
        <pre>{extracted}</pre>
    </div>
    <div class="section">
        <h2>Citations</h2>
        <pre>{citations}</pre>
    </div>
</body>
</html>"#,
            question = question,
            summary = summary.replace('\n', "<br/>"),
            extracted = extracted,
            citations = citations,
        )
    }
}
