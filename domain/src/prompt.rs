//! Prompt construction for meeting minutes extraction.

/// Renders meeting notes into the extraction instruction prompt.
///
/// The prompt embeds the notes verbatim and demands JSON-only output with the
/// exact three-field schema (`summary`, `decisions`, `actionItems`), with
/// empty arrays rather than omitted fields when there is nothing to report.
/// Identical notes always produce an identical prompt.
pub fn build_prompt(meeting_text: &str) -> String {
    format!(
        r#"You are a meeting minutes extraction assistant. Analyze the following meeting notes and extract structured information.

Meeting Notes:
{meeting_text}

IMPORTANT: You must respond ONLY with valid JSON. Do not include any explanations, markdown formatting, or extra text.

Extract the following and return as JSON:
1. A summary (2-3 sentences describing the main points discussed)
2. A list of key decisions made
3. A structured list of action items with:
   - task (required): the action to be taken
   - owner (optional): person responsible
   - due (optional): deadline or date

Return ONLY this JSON structure:
{{
  "summary": "2-3 sentence summary here",
  "decisions": [
    "Decision 1",
    "Decision 2"
  ],
  "actionItems": [
    {{
      "task": "Task description",
      "owner": "Person name",
      "due": "Date"
    }}
  ]
}}

If there are no decisions or action items, use empty arrays. Ensure all JSON is properly formatted and valid."#
    )
}
