use super::styles;
use pwdm::api::{CmdMessage, MessageLevel};
use pwdm::model::Record;
use unicode_width::UnicodeWidthStr;

const INNER_WIDTH: usize = 31;

const MENU_ITEMS: [&str; 5] = [
    "1. Add a new password",
    "2. Get a password",
    "3. Delete a password",
    "4. View all the passwords",
    "Q. Quit",
];

fn frame_line() -> String {
    format!("+{}+", "-".repeat(INNER_WIDTH))
}

/// A row of the box, padded to the frame width. Text wider than the frame
/// is left unpadded.
fn boxed_row(text: &str) -> String {
    let padding = INNER_WIDTH.saturating_sub(text.width());
    format!("|{}{}|", text, " ".repeat(padding))
}

fn heading(title: &str) -> String {
    let label = format!("+ {} +", title);
    let left = INNER_WIDTH.saturating_sub(label.width()) / 2;
    let row = format!("{}{}", " ".repeat(left), label);
    boxed_row(&row)
}

fn header_block(title: &str) -> String {
    let frame = styles::FRAME.apply_to(frame_line());
    format!(
        "{}\n{}\n{}\n",
        frame,
        styles::HEADING.apply_to(heading(title)),
        frame
    )
}

pub(super) fn render_menu() -> String {
    let mut out = header_block("MENU");
    for item in MENU_ITEMS {
        out.push_str(&boxed_row(&format!("  {}", item)));
        out.push('\n');
    }
    out.push_str(&format!("{}\n", styles::FRAME.apply_to(frame_line())));
    out
}

/// The numbered listing of every record.
pub(super) fn render_view(records: &[Record]) -> String {
    let mut out = header_block("VIEW");
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "|  {} {} | {}\n",
            styles::INDEX.apply_to(format!("{}.", i + 1)),
            styles::ACCOUNT.apply_to(&record.account),
            styles::PASSWORD.apply_to(&record.password)
        ));
    }
    out.push_str(&format!("{}\n", styles::FRAME.apply_to(frame_line())));
    out
}

pub(super) fn render_found(record: &Record, copied: bool) -> String {
    let mut out = header_block("VIEW");
    out.push_str(&format!(
        " Account `{}` found.\n",
        styles::ACCOUNT.apply_to(&record.account)
    ));
    let password = styles::PASSWORD.apply_to(&record.password);
    if copied {
        out.push_str(&format!(" Password `{}` copied to clipboard.\n", password));
    } else {
        out.push_str(&format!(" Password `{}`\n", password));
    }
    out.push_str(&format!("{}\n", styles::FRAME.apply_to(frame_line())));
    out
}

pub(super) fn render_added(record: &Record) -> String {
    format!(
        "\n{}: Password: {}\n",
        styles::ACCOUNT.apply_to(&record.account),
        styles::PASSWORD.apply_to(&record.password)
    )
}

pub(super) fn render_candidate(password: &str) -> String {
    format!("{}", styles::PASSWORD.apply_to(password))
}

pub(super) fn render_closing_frame() -> String {
    format!("{}\n", styles::FRAME.apply_to(frame_line()))
}

pub(super) fn render_config(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

pub(super) fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => &*styles::INFO,
                MessageLevel::Success => &*styles::SUCCESS,
                MessageLevel::Warning => &*styles::WARNING,
                MessageLevel::Error => &*styles::ERROR,
            };
            format!("{}\n", style.apply_to(&msg.content))
        })
        .collect()
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}
