use std::io::{self, BufRead};

/// Outcome of the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user typed `q`.
    Quit,
    /// Zero-based index into the displayed rows.
    Index(usize),
    /// Not a number, or outside `1..=count`.
    Invalid,
}

/// Interprets one line of input against `count` displayed rows.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let input = input.trim();
    if input == "q" {
        return Selection::Quit;
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Index(n - 1),
        _ => Selection::Invalid,
    }
}

/// Reads a single line from `input`. EOF and bytes that are not UTF-8 count
/// as invalid input.
pub fn read_selection<R: BufRead>(input: &mut R, count: usize) -> io::Result<Selection> {
    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(parse_selection(&String::from_utf8_lossy(&line), count))
}
