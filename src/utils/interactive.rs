use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, style,
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use crate::utils::output::OutputStyle;

pub fn prompt_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

/// Remaining text of the first suggestion extending `input`
fn find_suggestion<'a>(input: &str, suggestions: &'a [String]) -> Option<&'a str> {
    if input.chars().count() < 2 {
        return None;
    }
    suggestions
        .iter()
        .find(|s| s.starts_with(input) && s.as_str() != input)
        .map(|s| &s[input.len()..])
}

fn redraw_line(prompt: &str, input: &str, suggestion: &str) -> io::Result<()> {
    execute!(
        io::stdout(),
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        style::Print(prompt),
        style::Print(input),
        style::Print(OutputStyle::muted(suggestion))
    )?;
    // Keep the cursor at the end of what was typed
    let width = suggestion.chars().count();
    if width > 0 {
        execute!(io::stdout(), cursor::MoveLeft(width as u16))?;
    }
    io::stdout().flush()
}

/// Line input with inline completion; Tab accepts, Esc returns `None`
pub fn prompt_input_with_autocomplete(prompt: &str, suggestions: &[String]) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    terminal::enable_raw_mode()?;

    let result = (|| -> Result<Option<String>> {
        let mut input = String::new();
        let mut current_suggestion = String::new();

        loop {
            let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            match code {
                KeyCode::Char(c) => {
                    input.push(c);
                }
                KeyCode::Backspace => {
                    if input.pop().is_none() {
                        continue;
                    }
                }
                KeyCode::Tab => {
                    if current_suggestion.is_empty() {
                        continue;
                    }
                    input.push_str(&current_suggestion);
                }
                KeyCode::Enter => break,
                KeyCode::Esc => return Ok(None),
                _ => continue,
            }

            current_suggestion = find_suggestion(&input, suggestions)
                .unwrap_or_default()
                .to_string();
            redraw_line(prompt, &input, &current_suggestion)?;
        }
        Ok(Some(input.trim().to_string()))
    })();

    terminal::disable_raw_mode()?;
    println!();
    result
}

pub fn prompt_yes_no(prompt: &str) -> Result<bool> {
    let answer = prompt_input(&format!("{} (y/N): ", prompt))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "sim"))
}

/// Enter (or "s"/"y") confirms, "c" cancels; anything else asks again
fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" | "s" | "sim" | "y" | "yes" => Some(true),
        "c" | "n" | "nao" | "não" | "no" => Some(false),
        _ => None,
    }
}

pub fn prompt_confirm_or_cancel(prompt: &str) -> Result<bool> {
    loop {
        let answer = prompt_input(&format!(
            "{} {} ",
            prompt,
            OutputStyle::muted("[Enter to confirm / C to cancel]")
        ))?;
        if let Some(confirmed) = parse_confirmation(&answer) {
            return Ok(confirmed);
        }
        println!("{}", OutputStyle::warning("Press Enter to confirm or C to cancel."));
    }
}

/// `None` for blank input (keep current), `Some(Err)` text for anything
/// outside 0/1
fn parse_active(answer: &str) -> Option<std::result::Result<i64, String>> {
    match answer.trim() {
        "" => None,
        "0" => Some(Ok(0)),
        "1" => Some(Ok(1)),
        other => Some(Err(other.to_string())),
    }
}

/// Ask for the active flag until 0, 1 or blank is entered
pub fn prompt_active(label: &str) -> Result<Option<i64>> {
    loop {
        let answer = prompt_input(&format!("{} (1 = yes, 0 = no): ", OutputStyle::label(label)))?;
        match parse_active(&answer) {
            None => return Ok(None),
            Some(Ok(value)) => return Ok(Some(value)),
            Some(Err(other)) => {
                println!("{}", OutputStyle::warning(&format!("'{}' is not 0 or 1.", other)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_suggestion() {
        let categories = vec!["AGENDA".to_string(), "GERAL".to_string()];
        assert_eq!(find_suggestion("GE", &categories), Some("RAL"));
        assert_eq!(find_suggestion("G", &categories), None);
        assert_eq!(find_suggestion("GERAL", &categories), None);
        assert_eq!(find_suggestion("XY", &categories), None);
    }

    #[test]
    fn test_parse_confirmation() {
        assert_eq!(parse_confirmation(""), Some(true));
        assert_eq!(parse_confirmation(" S "), Some(true));
        assert_eq!(parse_confirmation("c"), Some(false));
        assert_eq!(parse_confirmation("C"), Some(false));
        assert_eq!(parse_confirmation("maybe"), None);
    }

    #[test]
    fn test_parse_active() {
        assert_eq!(parse_active(""), None);
        assert_eq!(parse_active("1"), Some(Ok(1)));
        assert_eq!(parse_active(" 0 "), Some(Ok(0)));
        assert_eq!(parse_active("2"), Some(Err("2".to_string())));
    }
}
