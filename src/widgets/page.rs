use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Paragraph, Widget},
};
use tui_widgets::big_text::BigText;

// page --------------------------------------------------------------------------------------
/// Backdrop the floating widget sits on.
pub struct PageWidget<'a> {
    title: BigText<'a>,
    info: Paragraph<'a>,
}

impl<'a> PageWidget<'a> {
    pub fn new(theme: Theme, endpoint: &str) -> Self {
        let mut line = Line::default();
        line.push_span("CHATBOT ".fg(theme.resume_job));
        line.push_span("UI".fg(theme.text_color));

        let title = tui_widgets::big_text::BigText::builder()
            .pixel_size(tui_widgets::big_text::PixelSize::Quadrant)
            .lines(vec![line])
            .build();

        let info = Paragraph::new(format!(
            "backend: {endpoint}\n\n[ctrl+o] open / close chat\n[ctrl+t] minimize\n[tab] switch mode\n[enter] send\n[F1] help"
        ))
        .style(Style::new().fg(theme.foreground));

        Self { title, info }
    }
}

impl<'a> Widget for PageWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let [content] = Layout::horizontal([Constraint::Length(64)])
            .flex(Flex::Start)
            .areas(area.inner(ratatui::layout::Margin::new(2, 1)));

        let [title, info] = Layout::vertical([Constraint::Length(4), Constraint::Length(9)])
            .flex(Flex::Start)
            .areas(content);

        self.title.render(title, buf);
        self.info.render(info, buf);
    }
}
