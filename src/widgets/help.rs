use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Clear, Padding, Paragraph, Widget},
};

use crate::theme::Theme;

pub const HELP_TEXT: &str = r#"
[ctrl+o]     open / close the chat
[ctrl+t]     minimize / restore
[tab]        next mode
[shift+tab]  previous mode
[alt+1..3]   Resume-Job / Job Match / Info
[enter]      send message
[alt+enter]  new line
[up/down]    scroll transcript
[F1]         help
[esc]        close popup
[ctrl+c]     exit
"#;

pub struct HelpWidget<'a> {
    help_text: Paragraph<'a>,
}

impl<'a> HelpWidget<'a> {
    pub fn new(theme: Theme) -> Self {
        let help_text = Paragraph::new(HELP_TEXT).block(
            Block::bordered()
                .title(" Help Overview ")
                .title_alignment(Alignment::Center)
                .padding(Padding::horizontal(2))
                .title_style(Style::new().bg(Color::White).fg(theme.background))
                .border_type(BorderType::QuadrantOutside)
                .border_style(Style::new().fg(Color::White))
                .style(Style::new().bg(theme.background).fg(theme.foreground)),
        );

        Self { help_text }
    }
}

impl<'a> Widget for HelpWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer) {
        let [modal] = Layout::horizontal([Constraint::Length(52)])
            .flex(Flex::Center)
            .areas(area);
        let [modal] = Layout::vertical([Constraint::Length(16)])
            .flex(Flex::Center)
            .areas(modal);

        Widget::render(Clear, modal, buf);
        self.help_text.render(modal, buf);
    }
}
