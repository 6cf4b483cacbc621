//! Lesson fixtures shaped like the tutor's course content.

/// A practice step: lesson day and the answers it accepts.
pub struct Lesson {
    pub day: u32,
    pub expected: Vec<String>,
}

fn lesson(day: u32, expected: &[&str]) -> Lesson {
    Lesson {
        day,
        expected: expected.iter().map(|s| s.to_string()).collect(),
    }
}

/// The opening lessons of the course.
pub fn course() -> Vec<Lesson> {
    vec![
        lesson(1, &["pwd"]),
        lesson(2, &["ls", "ls -l", "ls -la"]),
        lesson(3, &["mkdir test"]),
        lesson(4, &["touch memo.txt"]),
        lesson(
            8,
            &[
                "mkdir project && touch project/README.md && ls -la project && date",
                "mkdir project && touch project/README.md && ls -l project && date",
            ],
        ),
    ]
}

/// A ledger as an older build would have written it, including entries
/// that are not valid records.
pub fn legacy_ledger_json() -> &'static str {
    r#"[
        {"day":1,"userInput":"PWD ","expectedCommands":["pwd"],"attempts":2,"timestamp":"2024-06-01T09:00:00.000Z"},
        {"day":2,"userInput":"dir","expectedCommands":["ls"],"attempts":"many","timestamp":"2024-06-01T09:05:00.000Z"},
        "stray text",
        {"day":2,"userInput":"cls","expectedCommands":["ls"],"attempts":1,"timestamp":"2024-06-01T09:06:00.000Z"}
    ]"#
}
