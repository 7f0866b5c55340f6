mod chat;
mod help;
mod input;
mod launcher;
mod message;
mod mode_bar;
mod page;
mod panel;
mod status;

pub use chat::ChatWidget;
pub use help::HelpWidget;
pub use input::PromptWidget;
pub use launcher::LauncherWidget;
pub use message::MessageWidget;
pub use mode_bar::ModeBarWidget;
pub use page::PageWidget;
pub use panel::PanelWidget;
pub use status::StatusLineWidget;
