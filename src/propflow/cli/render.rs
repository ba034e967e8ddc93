use super::styles::LIST_STYLES;
use colored::Colorize;
use propflow::api::{CmdMessage, MessageLevel};
use propflow::attributes::AttrValue;
use propflow::commands::{ComponentSummary, ReducerSummary};
use propflow::config::PropflowConfig;
use propflow::error::Result;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

fn styled(name: &str, text: &str, color: bool) -> String {
    if color {
        LIST_STYLES.apply(name, text)
    } else {
        LIST_STYLES.apply_plain(name, text)
    }
}

pub(super) fn render_listing(
    components: &[ComponentSummary],
    reducers: &[ReducerSummary],
    color: bool,
) -> String {
    if components.is_empty() && reducers.is_empty() {
        return "Manifest defines nothing.\n".to_string();
    }

    let mut out = String::new();
    if !components.is_empty() {
        let width = components.iter().map(|c| c.name.len()).max().unwrap_or(0);
        out.push_str(&styled("heading", "Components", color));
        out.push('\n');
        for summary in components {
            let padded = format!("{:<width$}", summary.name, width = width);
            let mut line = format!(
                "  {}  {:<6}  {}",
                styled("name", &padded, color),
                styled(summary.kind, summary.kind, color),
                styled("detail", &summary.detail, color)
            );
            if summary.label != summary.name {
                line.push_str(&format!("  (as {})", summary.label));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    if !reducers.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&styled("heading", "Reducers", color));
        out.push('\n');
        for summary in reducers {
            out.push_str(&format!(
                "  {}  initial={}  {}\n",
                styled("name", &summary.name, color),
                compact_json(&summary.initial),
                styled("detail", &summary.actions.join(", "), color)
            ));
        }
    }
    out
}

pub(super) fn render_state(state: &AttrValue) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub(super) fn render_config(config: &PropflowConfig) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

fn compact_json(value: &AttrValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}
