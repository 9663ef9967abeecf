//! Action menu keymap and rendering

use crate::core::ContainerDetails;
use crate::ui::{Key, Theme};

/// Everything the action menu offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Stop,
    Restart,
    Remove,
    Logs,
    Shell,
    Command,
    Export,
    Commit,
    Back,
    Quit,
}

impl MenuAction {
    /// All actions in menu order
    pub fn all() -> &'static [MenuAction] {
        &[
            MenuAction::Start,
            MenuAction::Stop,
            MenuAction::Restart,
            MenuAction::Remove,
            MenuAction::Logs,
            MenuAction::Shell,
            MenuAction::Command,
            MenuAction::Export,
            MenuAction::Commit,
            MenuAction::Back,
            MenuAction::Quit,
        ]
    }

    pub fn shortcut(&self) -> char {
        match self {
            MenuAction::Start => '1',
            MenuAction::Stop => '2',
            MenuAction::Restart => '3',
            MenuAction::Remove => '4',
            MenuAction::Logs => '5',
            MenuAction::Shell => '6',
            MenuAction::Command => '7',
            MenuAction::Export => '8',
            MenuAction::Commit => '9',
            MenuAction::Back => 'b',
            MenuAction::Quit => 'q',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MenuAction::Start => "Start",
            MenuAction::Stop => "Stop",
            MenuAction::Restart => "Restart",
            MenuAction::Remove => "Remove",
            MenuAction::Logs => "Logs",
            MenuAction::Shell => "Shell",
            MenuAction::Command => "Run command",
            MenuAction::Export => "Export",
            MenuAction::Commit => "Commit",
            MenuAction::Back => "Back",
            MenuAction::Quit => "Quit",
        }
    }

    /// `None` for keys that are not on the menu
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(c) => {
                let c = c.to_ascii_lowercase();
                Self::all().iter().copied().find(|a| a.shortcut() == c)
            }
            Key::Escape => Some(MenuAction::Back),
            _ => None,
        }
    }
}

/// Header with freshly inspected fields, then the choices
pub fn render_menu(details: &ContainerDetails, theme: &Theme) -> Vec<String> {
    let mut lines = vec![
        theme.title(&format!("Container: {} ({})", details.name, details.id)),
        format!("{}     {}", theme.label("Image:"), details.image),
        format!(
            "{}    {} {}",
            theme.label("Status:"),
            theme.icon(details.status),
            details.status_text
        ),
        String::new(),
    ];

    for row in MenuAction::all().chunks(4) {
        let cells: Vec<String> = row
            .iter()
            .map(|a| {
                format!(
                    "{} {:<12}",
                    theme.key(&format!("[{}]", a.shortcut())),
                    a.name()
                )
            })
            .collect();
        lines.push(format!("  {}", cells.join(" ").trim_end()));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContainerStatus;

    #[test]
    fn test_shortcuts_are_unique() {
        let mut keys: Vec<char> = MenuAction::all().iter().map(|a| a.shortcut()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), MenuAction::all().len());
    }

    #[test]
    fn test_from_key() {
        assert_eq!(MenuAction::from_key(Key::Char('2')), Some(MenuAction::Stop));
        assert_eq!(MenuAction::from_key(Key::Char('Q')), Some(MenuAction::Quit));
        assert_eq!(MenuAction::from_key(Key::Escape), Some(MenuAction::Back));
        assert_eq!(MenuAction::from_key(Key::Char('z')), None);
        assert_eq!(MenuAction::from_key(Key::Enter), None);
        assert_eq!(MenuAction::from_key(Key::Interrupt), None);
    }

    #[test]
    fn test_render_menu_shows_current_fields() {
        let details = ContainerDetails {
            id: "abc123def456".to_string(),
            name: "web".to_string(),
            image: "nginx:latest".to_string(),
            status: ContainerStatus::Exited,
            status_text: "exited (0)".to_string(),
            created: None,
            health: None,
            restart_policy: None,
            bind_mounts: vec![],
            ports: vec![],
            networks: vec![],
        };

        let lines = render_menu(&details, &Theme::plain());
        assert_eq!(lines[0], "Container: web (abc123def456)");
        assert!(lines[2].contains("🔴 exited (0)"));
        assert!(lines.iter().any(|l| l.contains("[9] Commit")));
        assert!(lines.iter().any(|l| l.contains("[q] Quit")));
    }
}
