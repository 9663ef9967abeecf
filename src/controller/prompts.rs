//! Follow-up prompts for actions that need parameters

use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::{LogMode, Result};
use crate::ui::{Console, Key, Theme};

pub const DEFAULT_TAG: &str = "latest";

lazy_static! {
    // Optional registry host, then lowercase path components
    static ref IMAGE_NAME: Regex = Regex::new(
        concat!(
            r"^(?:[a-zA-Z0-9.-]+(?::[0-9]+)?/)?",
            r"[a-z0-9]+(?:(?:\.|_|__|-+)[a-z0-9]+)*",
            r"(?:/[a-z0-9]+(?:(?:\.|_|__|-+)[a-z0-9]+)*)*$",
        )
    )
    .expect("image name pattern");
    static ref IMAGE_TAG: Regex =
        Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$").expect("image tag pattern");
}

pub fn is_valid_image_name(name: &str) -> bool {
    IMAGE_NAME.is_match(name)
}

pub fn is_valid_tag(tag: &str) -> bool {
    IMAGE_TAG.is_match(tag)
}

/// Answer to the commit prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitInput {
    Target { name: String, tag: String },
    /// Blank name; there is no default
    MissingName,
    Cancelled,
}

/// Ask which log mode to use. `None` when the user backs out.
pub fn log_mode<C: Console>(
    console: &mut C,
    theme: &Theme,
    tail: usize,
) -> Result<Option<LogMode>> {
    console.print(&format!(
        "{} last {} lines   {} follow   {} all   {} cancel",
        theme.key("[1]"),
        tail,
        theme.key("[2]"),
        theme.key("[3]"),
        theme.key("[esc]")
    ))?;

    loop {
        match console.read_key()? {
            Key::Char('1') => return Ok(Some(LogMode::Tail(tail))),
            Key::Char('2') => return Ok(Some(LogMode::Follow)),
            Key::Char('3') => return Ok(Some(LogMode::All)),
            Key::Escape | Key::Interrupt => return Ok(None),
            _ => console.print(&theme.notice("Choose 1, 2 or 3"))?,
        }
    }
}

/// Ask for the export destination; blank keeps `<name>.tar`
pub fn export_path<C: Console>(console: &mut C, container_name: &str) -> Result<Option<PathBuf>> {
    let default = format!("{}.tar", container_name);
    let answer = console.read_line(&format!("Export to [{}]: ", default))?;
    Ok(answer.map(|a| {
        let a = a.trim();
        if a.is_empty() {
            PathBuf::from(&default)
        } else {
            PathBuf::from(a)
        }
    }))
}

/// Ask for image name and tag, re-prompting on malformed input
pub fn commit_target<C: Console>(console: &mut C, theme: &Theme) -> Result<CommitInput> {
    let name = loop {
        let Some(answer) = console.read_line("Image name: ")? else {
            return Ok(CommitInput::Cancelled);
        };
        let answer = answer.trim().to_string();
        if answer.is_empty() {
            return Ok(CommitInput::MissingName);
        }
        if is_valid_image_name(&answer) {
            break answer;
        }
        console.print(&theme.notice(
            "Invalid image name: use lowercase letters, digits, '.', '_', '-' and '/' \
             (enter the tag separately)",
        ))?;
    };

    let tag = loop {
        let Some(answer) = console.read_line(&format!("Tag [{}]: ", DEFAULT_TAG))? else {
            return Ok(CommitInput::Cancelled);
        };
        let answer = answer.trim();
        if answer.is_empty() {
            break DEFAULT_TAG.to_string();
        }
        if is_valid_tag(answer) {
            break answer.to_string();
        }
        console.print(&theme.notice(
            "Invalid tag: up to 128 letters, digits, '_', '.' or '-'",
        ))?;
    };

    Ok(CommitInput::Target { name, tag })
}

/// Ask for a custom command. `Some(vec![])` means the line was blank.
pub fn custom_command<C: Console>(console: &mut C, split: bool) -> Result<Option<Vec<String>>> {
    Ok(console
        .read_line("Command: ")?
        .map(|text| parse_command(&text, split)))
}

/// Turn the command line into argv
///
/// With `split` unset the whole line is one argument, which the engine then
/// looks up as a single executable name.
pub fn parse_command(text: &str, split: bool) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        Vec::new()
    } else if split {
        text.split_whitespace().map(str::to_string).collect()
    } else {
        vec![text.to_string()]
    }
}
