use std::fmt::Write;

use crate::types::EditorContext;

/// Builds the `generateContent` instruction for one completion request.
///
/// The model is asked for a raw JSON array so the answer can be parsed
/// directly; fence stripping in the requester covers models that wrap the
/// array anyway.
pub fn build_instruction(
    text_before_cursor: &str,
    trigger: &str,
    context: Option<&EditorContext>,
) -> String {
    let mut instruction = String::from(
        "You are an autocompletion engine embedded in a fashion-design text editor. \
         Designers type garment descriptions, material notes, and construction details.",
    );

    if let Some(season) = context.and_then(|c| c.season.as_deref()) {
        let _ = write!(
            instruction,
            "\nPrioritize terminology relevant to the {season} season."
        );
    }

    let _ = write!(
        instruction,
        "\n\nThe designer is typing the sentence: \"{text_before_cursor}\"\n\
         The token under the cursor is: \"{trigger}\"\n\n\
         Propose completions for that token. Treat romanized (transliterated) input \
         as equivalent to the same word in its native script. Prefer established \
         fashion and textile terminology over invented words.\n\n\
         Answer with a raw JSON array only, no prose and no code fences. Each element \
         must be an object shaped \
         {{\"label\": string, \"insertText\": string, \"kind\": string, \
         \"detail\": string, \"trigger\": string}}."
    );

    instruction
}
