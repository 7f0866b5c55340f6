use crate::{chat::Mode, theme::Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{self, StatefulWidget, Widget},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

// status ------------------------------------------------------------------------------------
#[derive(Default)]
pub struct StatusLineWidget<'a> {
    style: Style,
    spinner: Throbber<'a>,
    mode: Line<'a>,
    endpoint: Line<'a>,
    version: Line<'a>,
}

impl<'a> StatusLineWidget<'a> {
    pub fn new(pending: usize, mode: Mode, endpoint: String, theme: Theme) -> Self {
        let mut widget = Self::default();
        widget.style = Style::new().bg(theme.foreground).fg(theme.bubble_text);

        widget.spinner = Throbber::default()
            .label(if pending > 0 {
                format!("waiting ({pending})")
            } else {
                "idle".to_string()
            })
            .throbber_style(Style::default().fg(theme.bubble_text))
            .style(Style::new().fg(theme.bubble_text))
            .throbber_set(if pending > 0 {
                throbber_widgets_tui::BRAILLE_EIGHT_DOUBLE
            } else {
                throbber_widgets_tui::WHITE_CIRCLE
            });

        widget.mode = Line::raw(format!(" {} ", mode.label()))
            .bg(theme.mode_color(mode, true))
            .fg(theme.text_color)
            .alignment(Alignment::Center)
            .add_modifier(Modifier::BOLD);

        widget.endpoint = Line::raw(format!(" {endpoint} "))
            .alignment(Alignment::Left)
            .fg(theme.bubble_text);

        widget.version = Line::raw(concat!("jobchat v", env!("CARGO_PKG_VERSION")))
            .alignment(Alignment::Center)
            .fg(theme.text_color)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD);

        widget
    }
}

impl<'a> widgets::StatefulWidget for StatusLineWidget<'a> {
    type State = ThrobberState;
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, state: &mut Self::State)
    where
        Self: Sized,
    {
        let [version_win, mut spinner_win, mode_win, endpoint_win] = Layout::new(
            Direction::Horizontal,
            [
                Constraint::Length(16),
                Constraint::Length(16),
                Constraint::Length(14),
                Constraint::Fill(1),
            ],
        )
        .areas(area);

        buf.set_style(area, self.style);
        spinner_win.x += 1;
        spinner_win.width = spinner_win.width.saturating_sub(1);
        self.version.render(version_win, buf);
        StatefulWidget::render(self.spinner, spinner_win, buf, state);
        self.mode.render(mode_win, buf);
        self.endpoint.render(endpoint_win, buf);
    }
}
