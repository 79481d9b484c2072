use course_core::SessionDuration;

/// Short human form for status lines, e.g. `"1m 05s"`.
#[must_use]
pub fn format_elapsed(duration: SessionDuration) -> String {
    let secs = duration.as_secs();
    match (secs / 3600, (secs % 3600) / 60, secs % 60) {
        (0, 0, s) => format!("{s}s"),
        (0, m, s) => format!("{m}m {s:02}s"),
        (h, m, s) => format!("{h}h {m:02}m {s:02}s"),
    }
}
