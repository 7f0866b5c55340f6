use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

/// The bubble shown in the bottom-right corner while the widget is closed.
pub struct LauncherWidget<'a> {
    button: Paragraph<'a>,
}

impl<'a> LauncherWidget<'a> {
    pub fn new(theme: Theme) -> Self {
        let button = Paragraph::new("💬 Chat")
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title_bottom(" ctrl+o ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::new().fg(theme.foreground))
                    .style(Style::new().bg(theme.launcher).fg(theme.text_color)),
            )
            .alignment(Alignment::Center)
            .bold();

        Self { button }
    }
}

impl<'a> Widget for LauncherWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer) {
        let area = area.inner(ratatui::layout::Margin::new(1, 0));
        let [modal] = Layout::horizontal([Constraint::Length(12)])
            .flex(Flex::End)
            .areas(area);
        let [modal] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::End)
            .areas(modal);

        Widget::render(Clear, modal, buf);
        self.button.render(modal, buf);
    }
}
