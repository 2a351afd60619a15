use crate::{config::DEFAULT_MAX_LINE_LENGTH, core::catalog::Entry, rules::Checker};

pub const NAME: &str = "Line length";

/// Physical `msgstr` lines must fit in `max_line_length` characters once
/// written back with their two quotes.
#[derive(Debug, Clone, Copy)]
pub struct LineLengthChecker {
    pub max_line_length: usize,
}

impl LineLengthChecker {
    pub fn new(max_line_length: usize) -> Self {
        Self { max_line_length }
    }
}

impl Default for LineLengthChecker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LENGTH)
    }
}

impl Checker for LineLengthChecker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn check_entry(&self, entry: &mut Entry) {
        let messages: Vec<String> = entry
            .msgstr
            .iter()
            .filter_map(|line| {
                let length = line.chars().count() + 2;
                (length > self.max_line_length)
                    .then(|| format!("Line too long ({length} > {}): {line}", self.max_line_length))
            })
            .collect();
        for message in messages {
            entry.add_error(NAME, message);
        }
    }
}
