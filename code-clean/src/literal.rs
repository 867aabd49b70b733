use crate::config::LiteralScope;
use crate::error::SkipReason;
use crate::naming::SuffixSource;

pub const LITERAL_PREFIX: &str = "literal_";

const MESSAGE_MARKER: &str = "this literal \"";

/// Pull the duplicated literal out of an analyzer message: everything
/// between `this literal "` and the message's last `"`.
pub fn literal_from_message(message: &str) -> Option<&str> {
    let start = message.find(MESSAGE_MARKER)? + MESSAGE_MARKER.len();
    let end = message.rfind('"')?;
    message.get(start..end)
}

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub code: String,
    pub name: String,
}

/// Replace quoted occurrences of `literal` with a generated constant and
/// declare that constant at the end of the file.
///
/// Skipped when the literal no longer appears, or when a generated constant
/// already sits before the literal's last occurrence (the literal was
/// extracted by an earlier run).
pub fn extract_literal(
    code: &str,
    literal: &str,
    scope: LiteralScope,
    names: &mut dyn SuffixSource,
) -> Result<Extracted, SkipReason> {
    let last_use = code.rfind(literal).ok_or(SkipReason::LiteralAbsent)?;
    let declaration = format!("const {}", LITERAL_PREFIX);
    if code.rfind(&declaration).is_some_and(|pos| pos > 0 && pos < last_use) {
        return Err(SkipReason::AlreadyExtracted);
    }

    let name = format!("{}{}", LITERAL_PREFIX, names.next_suffix());
    let quoted = format!("\"{}\"", literal);
    let mut new_code = match scope {
        LiteralScope::First => code.replacen(&quoted, &name, 1),
        LiteralScope::All => code.replace(&quoted, &name),
    };
    new_code.push_str(&format!("\nconst {} = \"{}\"\n", name, literal));

    Ok(Extracted { code: new_code, name })
}
