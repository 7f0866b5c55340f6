use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{self, Block, BorderType, Borders, Padding},
};
use tui_textarea::TextArea;

// input -------------------------------------------------------------------------------------
pub struct PromptWidget<'a> {
    textarea: &'a TextArea<'a>,
    theme: Theme,
}

impl<'a> PromptWidget<'a> {
    pub fn new(textarea: &'a TextArea<'a>, theme: Theme) -> Self {
        Self { textarea, theme }
    }
}

impl<'a> widgets::Widget for PromptWidget<'a>
where
    Self: Sized,
{
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer) {
        let mut a = self.textarea.clone();
        a.set_placeholder_text("Type a message...");
        a.set_style(Style::new().bg(self.theme.panel).fg(self.theme.bubble_text));
        a.set_cursor_line_style(Style::default());
        a.set_block(
            Block::new()
                .borders(Borders::TOP)
                .padding(Padding::horizontal(1))
                .border_style(self.theme.border_color)
                .border_type(BorderType::Plain)
                .style(Style::new().bg(self.theme.panel)),
        );
        a.render(area, buf);
    }
}
