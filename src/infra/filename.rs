//! File names for exported pages.

/// Characters the target tools cannot store in a page file name.
const RESERVED: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Converts a note title to a page file stem.
///
/// - Replaces each of `/ \ ? % * : | " < >` with `-`
/// - Keeps every other character, including spaces and case
/// - Returns "untitled" when nothing printable remains
///
/// # Examples
///
/// ```
/// use logseq_export::infra::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("a/b:c*d"), "a-b-c-d");
/// assert_eq!(sanitize_file_name("Meeting <notes>"), "Meeting -notes-");
/// assert_eq!(sanitize_file_name("   "), "untitled");
/// ```
pub fn sanitize_file_name(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if RESERVED.contains(&c) { '-' } else { c })
        .collect();

    if sanitized.trim().is_empty() {
        return "untitled".to_string();
    }
    sanitized
}

/// Generates a page file name from a title and extension.
///
/// # Examples
///
/// ```
/// use logseq_export::infra::page_file_name;
///
/// assert_eq!(page_file_name("Hello", "json"), "Hello.json");
/// ```
pub fn page_file_name(title: &str, extension: &str) -> String {
    format!("{}.{}", sanitize_file_name(title), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_every_reserved_character() {
        assert_eq!(sanitize_file_name(r#"/\?%*:|"<>"#), "----------");
    }

    #[test]
    fn sanitize_keeps_spaces_case_and_unicode() {
        assert_eq!(sanitize_file_name("Café Notes 2024"), "Café Notes 2024");
    }

    #[test]
    fn sanitize_replaces_each_occurrence() {
        assert_eq!(sanitize_file_name("a//b"), "a--b");
    }

    #[test]
    fn sanitize_empty_title_is_untitled() {
        assert_eq!(sanitize_file_name(""), "untitled");
    }

    #[test]
    fn page_file_name_appends_extension() {
        assert_eq!(page_file_name("a/b:c*d", "edn"), "a-b-c-d.edn");
    }
}
