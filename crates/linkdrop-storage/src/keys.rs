//! Storage key construction.
//!
//! Key format: `{link_id}/{folder}/{epoch_secs}_{suffix}_{filename}`. Each
//! segment is sanitized so a user-chosen link id, customer name or filename
//! can neither add path levels nor traverse upwards.

/// Make a user-provided string safe to use as a single key segment.
///
/// Path separators and control characters become `_`, `..` runs collapse to
/// `_`, and an empty result becomes `_`.
pub fn sanitize_segment(raw: &str) -> String {
    let mut segment: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    while segment.contains("..") {
        segment = segment.replace("..", "_");
    }

    if segment.is_empty() {
        "_".to_string()
    } else {
        segment
    }
}

/// Build the storage key of one uploaded file.
///
/// `suffix` disambiguates files with the same name uploaded within the same
/// second to the same folder.
pub fn build_file_key(
    link_id: &str,
    folder_name: &str,
    epoch_secs: i64,
    suffix: &str,
    filename: &str,
) -> String {
    format!(
        "{}/{}/{}_{}_{}",
        sanitize_segment(link_id),
        sanitize_segment(folder_name),
        epoch_secs,
        suffix,
        sanitize_segment(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_file_key_layout() {
        assert_eq!(
            build_file_key("demo", "customer-1", 1700000000, "ab12cd34", "a.txt"),
            "demo/customer-1/1700000000_ab12cd34_a.txt"
        );
    }

    #[test]
    fn test_separators_cannot_add_levels() {
        let key = build_file_key("demo", "alice/../bob", 1, "x", "..\\..\\etc/passwd");
        assert_eq!(key.matches('/').count(), 2);
        assert!(!key.contains(".."));
    }

    #[test]
    fn test_sanitize_segment_edge_cases() {
        assert_eq!(sanitize_segment(""), "_");
        assert_eq!(sanitize_segment(".."), "_");
        assert_eq!(sanitize_segment("..."), "_.");
        assert_eq!(sanitize_segment("a\nb"), "a_b");
        assert_eq!(sanitize_segment(" report v2.pdf "), "report v2.pdf");
    }
}
