// src/core/sanitize.rs

/// Make one path component safe to join onto a directory: separators and
/// control characters become `_`, and `.`/`..` can't escape the directory.
/// Anything else (including non-ASCII) is kept as-is.
pub fn sanitize_file_component(name: &str) -> String {
    let out: String = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match out.as_str() {
        "." | ".." => out.replace('.', "_"),
        _ => out,
    }
}
