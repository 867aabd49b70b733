use crate::error::SkipReason;

pub const THROWN_CONSTRUCTOR: &str = "RuntimeException(";
pub const WRAPPER_CONSTRUCTOR: &str = "MultiPathRuntimeError(";

/// Private subclass inserted before the last `}` of the file.
pub const WRAPPER_CLASS: &str = "\n\tprivate class MultiPathRuntimeError extends RuntimeException{\n \
\t\tpublic MultiPathRuntimeError(String error){\n\t\t\tsuper(error);\n\t\t}\n\
\t\tpublic MultiPathRuntimeError(String error,Throwable e){\n\t\t\tsuper(error,e);\n\t\t}\n\
\t}\n";

/// Rename every `RuntimeException(` call to `MultiPathRuntimeError(` and
/// declare the wrapper class just before the file's final closing brace.
pub fn rename_exception(code: &str) -> Result<String, SkipReason> {
    if !code.contains(THROWN_CONSTRUCTOR) {
        return Err(SkipReason::ConstructorAbsent);
    }

    let renamed = code.replace(THROWN_CONSTRUCTOR, WRAPPER_CONSTRUCTOR);
    let last_brace = renamed.rfind('}').ok_or(SkipReason::NoClosingBrace)?;

    let mut out = String::with_capacity(renamed.len() + WRAPPER_CLASS.len());
    out.push_str(&renamed[..last_brace]);
    out.push_str(WRAPPER_CLASS);
    out.push_str(&renamed[last_brace..]);
    Ok(out)
}
