use crate::{chat::Mode, theme::Theme};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Padding, Paragraph, Widget},
};

/// One button per mode. The active one is drawn darker and bold.
pub struct ModeBarWidget {
    active: Mode,
    theme: Theme,
}

impl ModeBarWidget {
    pub fn new(active: Mode, theme: Theme) -> Self {
        Self { active, theme }
    }
}

impl Widget for ModeBarWidget {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer) {
        buf.set_style(area, Style::new().bg(self.theme.panel));

        let buttons = Layout::horizontal([Constraint::Fill(1); 3])
            .flex(Flex::SpaceBetween)
            .spacing(1)
            .split(area.inner(ratatui::layout::Margin::new(1, 0)));

        for (mode, slot) in Mode::ALL.iter().zip(buttons.iter()) {
            let active = *mode == self.active;
            let mut style = Style::new()
                .bg(self.theme.mode_color(*mode, active))
                .fg(self.theme.text_color);
            if active {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }

            Paragraph::new(mode.label())
                .alignment(Alignment::Center)
                .block(Block::new().padding(Padding::top(slot.height.saturating_sub(1) / 2)))
                .style(style)
                .render(*slot, buf);
        }
    }
}
