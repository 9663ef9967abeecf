//! Inspect summary shown in the finder's preview pane

use crate::core::{ContainerDetails, NOT_APPLICABLE};
use crate::ui::Theme;

const NONE: &str = "none";

/// Render the preview for one container, one line per entry
pub fn render_details(details: &ContainerDetails, theme: &Theme) -> Vec<String> {
    let field = |name: &str, value: &str| {
        format!("{} {}", theme.label(&format!("{:<15}", name)), value)
    };

    let created = details
        .created
        .map(|c| c.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string());

    let mut lines = vec![
        field("ID:", &details.id),
        field("Name:", &details.name),
        field("Created:", &created),
        field(
            "Status:",
            &format!("{} {}", theme.icon(details.status), details.status_text),
        ),
        field("Health:", details.health.as_deref().unwrap_or(NOT_APPLICABLE)),
        field("Image:", &details.image),
        field(
            "Restart Policy:",
            details.restart_policy.as_deref().unwrap_or(NOT_APPLICABLE),
        ),
    ];

    if details.bind_mounts.is_empty() {
        lines.push(field("Mounts:", NONE));
    } else {
        lines.push(field("Mounts:", ""));
        for mount in &details.bind_mounts {
            let mode = if mount.read_only { " (ro)" } else { "" };
            lines.push(format!("  - {} -> {}{}", mount.source, mount.destination, mode));
        }
    }

    let ports = details
        .ports
        .iter()
        .map(|p| {
            format!(
                "{} (Host: {})",
                p.container_port,
                p.host_port.as_deref().unwrap_or(NOT_APPLICABLE)
            )
        })
        .collect::<Vec<_>>();
    lines.push(field("Ports:", &join_or_none(&ports)));
    lines.push(field("Networks:", &join_or_none(&details.networks)));

    lines
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        NONE.to_string()
    } else {
        items.join(", ")
    }
}
