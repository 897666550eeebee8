/// Instruction template wrapped around the diff. The rules pin the output
/// shape so the normalizer rarely has anything left to do.
pub const INSTRUCTIONS: &str = "\
Based on the following git diff, generate a concise and professional commit message following conventional commit standards.

Rules:
- Single line, maximum 72 characters
- Start with type: feat, fix, chore, docs, style, refactor, test, etc.
- Format: \"type: brief description\"
- Be specific and descriptive
- No quotes, explanations, or extra text";

/// A fully rendered request: the user-message text plus the model that
/// should answer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub model: String,
}

/// Wrap a diff in the instruction template. Pure; no failure mode.
pub fn build(diff: &str, model: &str) -> Prompt {
    Prompt {
        text: format!("{INSTRUCTIONS}\n\nGit diff:\n{diff}\n\nCommit message:"),
        model: model.to_string(),
    }
}
