//! LIKE pattern helpers
//!
//! Every pattern built here is matched with `ESCAPE '\'`.

/// Escape SQL LIKE wildcard characters so they are matched literally.
pub fn escape_for_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Pattern matching every path that starts with `prefix`
pub fn starts_with_pattern(prefix: &str) -> String {
    format!("{}%", escape_for_like(prefix))
}

/// Pattern matching every path strictly below the directory `dir`
pub fn below_directory_pattern(dir: &str) -> String {
    format!("{}/%", escape_for_like(dir.trim_end_matches('/')))
}
