use crate::{chat::Message, theme::Theme};
use ratatui::{
    layout::{Alignment, Rect, Size},
    style::{Modifier, Style},
    widgets::{self, Paragraph, StatefulWidget, Widget},
};
use tui_widgets::scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

// chat --------------------------------------------------------------------------------------
/// Displays the transcript as a scrollable list of bubbles.
pub struct ChatWidget<'a> {
    pub messages: &'a [Message],
    pub theme: Theme,
}

impl<'a> StatefulWidget for ChatWidget<'a> {
    type State = ScrollViewState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) where
        Self: Sized,
    {
        buf.set_style(area, Style::new().bg(self.theme.panel));

        if self.messages.is_empty() {
            Paragraph::new("Ask about a resume, a job, or anything else.")
                .alignment(Alignment::Center)
                .wrap(widgets::Wrap { trim: true })
                .style(
                    Style::new()
                        .fg(self.theme.muted_text)
                        .add_modifier(Modifier::ITALIC),
                )
                .render(area, buf);
            return;
        }

        // leave a column for the scrollbar
        let width = area.width.saturating_sub(1);

        // newest first, until the scroll view height would overflow
        let mut height: u16 = 0;
        let mut msgs = Vec::new();
        for msg in self.messages.iter().rev() {
            let msg_widget = super::MessageWidget::new(msg, self.theme, width);
            let lines = msg_widget.lines();
            let Some(next) = height.checked_add(lines) else {
                break;
            };
            msgs.push((msg_widget, lines));
            height = next;
        }

        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut offset = 0;
        for (widget, lines) in msgs.into_iter().rev() {
            scroll_view.render_widget(widget, Rect::new(0, offset, width, lines));
            offset += lines;
        }

        StatefulWidget::render(scroll_view, area, buf, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn rendered(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn long_transcript_keeps_newest_messages() {
        let filler = "x\n".repeat(79);
        let messages: Vec<Message> = (0..900)
            .map(|i| Message::user(format!("msg-{i:04}\n{filler}")))
            .collect();

        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        let mut state = ScrollViewState::default();
        ChatWidget {
            messages: &messages,
            theme: Theme::default(),
        }
        .render(area, &mut buf, &mut state);

        let text = rendered(&buf);
        assert!(text.contains("msg-"));
        assert!(!text.contains("msg-0000"));
    }

    #[test]
    fn empty_transcript_shows_placeholder() {
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        ChatWidget {
            messages: &[],
            theme: Theme::default(),
        }
        .render(area, &mut buf, &mut ScrollViewState::default());

        assert!(rendered(&buf).contains("Ask about a resume"));
    }
}
