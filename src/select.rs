//! Numbered-menu selection and yes/no confirmation over a [`Console`].
//!
//! Each call reads exactly one line. Invalid input is not retried; the caller
//! decides what an absent selection means.

use std::io;

use tracing::{debug, warn};

use crate::contract::Console;

/// Prints `heading` followed by a 1-based numbered listing of `items`.
pub fn print_menu<C, T>(console: &mut C, heading: &str, items: &[T]) -> io::Result<()>
where
    C: Console + ?Sized,
    T: AsRef<str>,
{
    console.write_line(heading)?;
    for (index, item) in items.iter().enumerate() {
        console.write_line(&format!("{}: {}", index + 1, item.as_ref()))?;
    }
    Ok(())
}

/// Prompts once and returns the item at the entered 1-based position.
///
/// Non-numeric input, zero, values past the end and end of input all yield `None`.
pub fn select<'a, C, T>(console: &mut C, prompt: &str, items: &'a [T]) -> io::Result<Option<&'a T>>
where
    C: Console + ?Sized,
{
    console.write_str(prompt)?;
    let answer = read_answer(console);
    let selected = parse_selection(&answer, items.len()).map(|index| &items[index]);
    match selected {
        Some(_) => debug!(answer = %answer, "Selection accepted"),
        None => warn!(answer = %answer, choices = items.len(), "Selection rejected"),
    }
    Ok(selected)
}

/// Prompts once for a `(y/N)` style answer. Only `y` or `Y` counts as yes.
pub fn confirm<C>(console: &mut C, prompt: &str) -> io::Result<bool>
where
    C: Console + ?Sized,
{
    console.write_str(prompt)?;
    let answer = read_answer(console);
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Maps a typed 1-based choice to a 0-based index into a sequence of `len` items.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=len).contains(&choice).then(|| choice - 1)
}

// Read failures and end of input both count as an empty answer.
fn read_answer<C>(console: &mut C) -> String
where
    C: Console + ?Sized,
{
    match console.read_line() {
        Ok(Some(line)) => line.trim().to_string(),
        Ok(None) => String::new(),
        Err(e) => {
            warn!(error = ?e, "Failed to read from console, treating as empty input");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ScriptedConsole;

    fn items() -> Vec<String> {
        vec!["logs".to_string(), "assets".to_string(), "backups".to_string()]
    }

    #[test]
    fn parse_selection_accepts_bounds() {
        assert_eq!(parse_selection("1", 3), Some(0));
        assert_eq!(parse_selection("3", 3), Some(2));
        assert_eq!(parse_selection("  2 \n", 3), Some(1));
    }

    #[test]
    fn parse_selection_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("-1", 3), None);
        assert_eq!(parse_selection("two", 3), None);
        assert_eq!(parse_selection("2abc", 3), None);
        assert_eq!(parse_selection("", 3), None);
        assert_eq!(parse_selection("1", 0), None);
    }

    #[test]
    fn select_returns_item_and_writes_prompt() {
        let items = items();
        let mut console = ScriptedConsole::new(["2"]);
        let picked = select(&mut console, "Pick: ", &items).unwrap();
        assert_eq!(picked.map(String::as_str), Some("assets"));
        assert_eq!(console.output(), "Pick: ");
    }

    #[test]
    fn select_reads_a_single_line_only() {
        let items = items();
        let mut console = ScriptedConsole::new(["9", "1"]);
        assert_eq!(select(&mut console, "Pick: ", &items).unwrap(), None);
        assert_eq!(console.remaining_input(), 1);
    }

    #[test]
    fn select_on_end_of_input_is_none() {
        let items = items();
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        assert_eq!(select(&mut console, "Pick: ", &items).unwrap(), None);
    }

    #[test]
    fn confirm_only_accepts_y() {
        for (answer, expected) in [("y", true), ("Y", true), (" y ", true), ("yes", false), ("n", false), ("", false)] {
            let mut console = ScriptedConsole::new([answer]);
            assert_eq!(confirm(&mut console, "Sure? (y/N): ").unwrap(), expected, "answer {answer:?}");
        }
    }

    #[test]
    fn print_menu_numbers_from_one() {
        let mut console = ScriptedConsole::default();
        print_menu(&mut console, "Available:", &["a", "b"]).unwrap();
        assert_eq!(console.output(), "Available:\n1: a\n2: b\n");
    }
}
