/// Messages shown to clients for internal failures. The code's prefix is
/// the HTTP status.
pub(crate) fn message(error_code: &str) -> &'static str {
    match error_code {
        "500-001" => "Failed to fetch artists",
        "500-002" => "Failed to fetch artist",
        "500-003" => "Failed to create artist",
        "500-004" => "Failed to update artist",
        "500-005" => "Failed to delete artist",
        "500-006" => "Failed to update artist image",
        "500-011" => "Failed to fetch events",
        "500-012" => "Failed to fetch event",
        "500-013" => "Failed to create event",
        "500-014" => "Failed to update event",
        "500-015" => "Failed to delete event",
        "500-016" => "Failed to update event image",
        "500-017" => "Failed to fetch upcoming events",
        "500-021" => "Failed to fetch announcements",
        "500-022" => "Failed to fetch announcement",
        "500-023" => "Failed to create announcement",
        "500-024" => "Failed to update announcement",
        "500-025" => "Failed to delete announcement",
        "500-026" => "Failed to fetch active announcements",
        "500-031" => "Failed to fetch dashboard statistics",
        "502-001" => "Failed to upload image to cloud storage",
        _ => "Internal server error",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(message("500-999"), "Internal server error");
        assert_eq!(message("500-031"), "Failed to fetch dashboard statistics");
    }
}
