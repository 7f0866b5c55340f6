use crate::{
    chat::{FALLBACK_REPLY, Message, Role},
    theme::Theme,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{self, Padding, Widget},
};

// message ----------------------------------------------------------------------------------
/// One chat bubble. User bubbles hug the right edge, bot bubbles the left.
pub struct MessageWidget<'a> {
    content: widgets::Paragraph<'a>,
    header: Line<'a>,
    sender: Role,
    bubble_width: u16,
}

impl<'a> MessageWidget<'a> {
    pub fn new(msg: &'a Message, theme: Theme, width: u16) -> Self {
        let (title, bg) = match msg.sender() {
            Role::User => ("you", theme.user_bubble),
            Role::Bot => ("bot", theme.bot_bubble),
        };

        let fg = match msg.sender() {
            Role::Bot if msg.text() == FALLBACK_REPLY => theme.error_text_color,
            _ => theme.bubble_text,
        };
        let style = Style::default().bg(bg).fg(fg);
        let header = Line::raw(title).style(
            Style::new()
                .fg(theme.muted_text)
                .add_modifier(Modifier::ITALIC),
        );

        let text = match msg.sender() {
            Role::User => Text::raw(msg.text()),
            Role::Bot => tui_markdown::from_str(msg.text()),
        };

        let content = widgets::Paragraph::new(text)
            .wrap(widgets::Wrap { trim: false })
            .block(widgets::Block::new().padding(Padding::horizontal(1)))
            .style(style);

        let bubble_width = (width.saturating_mul(3) / 4).max(8).min(width);

        Self {
            header: match msg.sender() {
                Role::User => header.right_aligned(),
                Role::Bot => header.left_aligned(),
            },
            content,
            sender: msg.sender(),
            bubble_width,
        }
    }

    /// Rows needed for header plus wrapped content and a blank spacer row.
    pub fn lines(&self) -> u16 {
        // text wraps inside the horizontal padding
        let rows = self.content.line_count(self.bubble_width.saturating_sub(2));
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
    }
}

impl<'a> Widget for MessageWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let [header_win, content_win, _spacer] = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ],
        )
        .areas(area);

        let bubble_width = self.bubble_width.min(content_win.width);
        let x = match self.sender {
            Role::User => content_win.right().saturating_sub(bubble_width),
            Role::Bot => content_win.left(),
        };
        let bubble = Rect::new(x, content_win.y, bubble_width, content_win.height);

        self.header.render(header_win, buf);
        self.content.render(bubble, buf);
    }
}
