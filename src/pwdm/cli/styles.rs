use console::Style;
use once_cell::sync::Lazy;

pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static ERROR: Lazy<Style> = Lazy::new(|| Style::new().red());

pub static FRAME: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static ACCOUNT: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static PASSWORD: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
pub static INDEX: Lazy<Style> = Lazy::new(|| Style::new().dim());
