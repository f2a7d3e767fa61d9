//! Timestamp, ID, and path helpers shared across the storage layer

use std::path::Path;

use chrono::DateTime;

/// Sentinel returned when no labeling handler matches an item/label pair
pub const NO_VALID_HANDLER: &str = "NO_VALID_HANDLER";

/// Current time in whole seconds since the Unix epoch
pub fn record_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Format an epoch-seconds timestamp as `YYYY-MM-DD_HH-MM-SS` (24-hour clock)
///
/// Submission filenames are built from this, so the output must sort
/// chronologically. Out-of-range timestamps format as an empty string.
pub fn format_time(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.format("%Y-%m-%d_%H-%M-%S").to_string())
        .unwrap_or_default()
}

/// Zero-pad a task sequence number to at least 4 digits
///
/// Wider numbers pass through unchanged; the result always parses back to
/// the input.
pub fn format_id(id: u64) -> String {
    format!("{id:04}")
}

/// Final path component with its last extension removed
///
/// `"a/b/file.tar.gz"` becomes `"file.tar"`; a component without a dot is
/// returned unchanged.
pub fn path_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Map an item type and label type to the labeling UI handler route
pub fn handler_url(item_type: &str, label_type: &str) -> &'static str {
    match (item_type, label_type) {
        ("image", "box2d" | "segmentation" | "lane") => "2d_labeling",
        ("video", "box2d" | "segmentation") => "2d_labeling",
        ("pointcloud", "box3d") => "3d_labeling",
        _ => NO_VALID_HANDLER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_id_pads_to_four() {
        assert_eq!(format_id(0), "0000");
        assert_eq!(format_id(7), "0007");
        assert_eq!(format_id(123), "0123");
    }

    #[test]
    fn test_format_id_never_truncates() {
        assert_eq!(format_id(12345), "12345");
        assert_eq!(format_id(1000000), "1000000");
    }

    #[test]
    fn test_format_id_round_trips() {
        for id in [0u64, 3, 42, 9999, 10000, 987654] {
            assert_eq!(format_id(id).parse::<u64>().unwrap(), id);
        }
    }

    #[test]
    fn test_path_stem_strips_last_extension() {
        assert_eq!(path_stem("a/b/file.tar.gz"), "file.tar");
        assert_eq!(path_stem("project.json"), "project");
    }

    #[test]
    fn test_path_stem_no_extension() {
        assert_eq!(path_stem("noext"), "noext");
        assert_eq!(path_stem("a/b/noext"), "noext");
    }

    #[test]
    fn test_format_time_epoch() {
        assert_eq!(format_time(0), "1970-01-01_00-00-00");
    }

    #[test]
    fn test_format_time_uses_24_hour_clock() {
        // 10 days plus 13:05:09 past the epoch
        let afternoon = 10 * 86400 + 13 * 3600 + 5 * 60 + 9;
        assert_eq!(format_time(afternoon), "1970-01-11_13-05-09");

        // the 1:05:09 counterpart must format differently
        let morning = 10 * 86400 + 3600 + 5 * 60 + 9;
        assert_eq!(format_time(morning), "1970-01-11_01-05-09");
    }

    #[test]
    fn test_format_time_sorts_chronologically() {
        let earlier = format_time(1_700_000_000);
        let later = format_time(1_700_000_001);
        assert!(earlier < later);
    }

    #[test]
    fn test_handler_url_image() {
        assert_eq!(handler_url("image", "box2d"), "2d_labeling");
        assert_eq!(handler_url("image", "segmentation"), "2d_labeling");
        assert_eq!(handler_url("image", "lane"), "2d_labeling");
        assert_eq!(handler_url("image", "box3d"), NO_VALID_HANDLER);
    }

    #[test]
    fn test_handler_url_video_and_pointcloud() {
        assert_eq!(handler_url("video", "box2d"), "2d_labeling");
        assert_eq!(handler_url("video", "lane"), NO_VALID_HANDLER);
        assert_eq!(handler_url("pointcloud", "box3d"), "3d_labeling");
        assert_eq!(handler_url("pointcloud", "box2d"), NO_VALID_HANDLER);
    }

    #[test]
    fn test_handler_url_unknown_item_type() {
        assert_eq!(handler_url("audio", "box2d"), NO_VALID_HANDLER);
    }

    #[test]
    fn test_record_timestamp_is_current() {
        let ts = record_timestamp();
        // sanity bound: after 2020, before 2100
        assert!(ts > 1_577_836_800);
        assert!(ts < 4_102_444_800);
    }
}
