use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Widget},
};

pub const PANEL_WIDTH: u16 = 48;
pub const PANEL_HEIGHT: u16 = 26;

/// Areas inside an expanded panel.
pub struct PanelAreas {
    pub transcript: Rect,
    pub modes: Rect,
    pub input: Rect,
}

/// The floating frame of the open widget, anchored to the bottom-right corner.
pub struct PanelWidget {
    minimized: bool,
    theme: Theme,
}

impl PanelWidget {
    pub fn new(minimized: bool, theme: Theme) -> Self {
        Self { minimized, theme }
    }

    /// Outer rect of the panel within `area`.
    pub fn frame(&self, area: Rect) -> Rect {
        let height = if self.minimized { 3 } else { PANEL_HEIGHT };
        let area = area.inner(ratatui::layout::Margin::new(1, 0));

        let [frame] = Layout::horizontal([Constraint::Length(PANEL_WIDTH)])
            .flex(Flex::End)
            .areas(area);
        let [frame] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::End)
            .areas(frame);
        frame
    }

    fn block(&self) -> Block<'static> {
        let controls = if self.minimized { " ▲ ✖ " } else { " ▼ ✖ " };

        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.theme.border_color))
            .title_top(Line::raw(" Chatbot ").bold().left_aligned())
            .title_top(Line::raw(controls).right_aligned())
            .title_style(Style::new().fg(self.theme.bubble_text))
            .style(Style::new().bg(self.theme.panel))
    }

    /// Inner areas for the expanded panel rendered within `area`.
    pub fn areas(&self, area: Rect) -> PanelAreas {
        let inner = self.block().inner(self.frame(area));
        let [transcript, modes, input] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .areas(inner);

        PanelAreas {
            transcript,
            modes,
            input,
        }
    }
}

impl Widget for PanelWidget {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer) {
        let frame = self.frame(area);
        Widget::render(Clear, frame, buf);
        self.block().render(frame, buf);
    }
}
