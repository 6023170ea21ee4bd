use console::Emoji;

pub mod args;
pub mod commands;
pub mod shell;

pub use args::*;
pub use commands::CliApp;

pub(crate) static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
pub(crate) static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
pub(crate) static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
pub(crate) static CART: Emoji<'_, '_> = Emoji("🛒 ", "");
pub(crate) static FIRE: Emoji<'_, '_> = Emoji("🔥 ", "");
