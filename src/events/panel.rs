use super::Event;
use crate::calendar::CalendarDate;
use crate::theme::{
    panel::{EMPTY_STYLE, HIGHLIGHT_STYLE, TIME_STYLE},
    BASE_STYLE, TITLE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Widget},
};

/// Lists the events of one day, one per line, with at most one of them
/// highlighted
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EventsPanel<'a> {
    title: String,
    events: &'a [Event],
    highlight: Option<usize>,
}

impl<'a> EventsPanel<'a> {
    pub(crate) fn new<D: CalendarDate>(
        date: D,
        events: &'a [Event],
        highlight: Option<usize>,
    ) -> EventsPanel<'a> {
        EventsPanel {
            title: format!(" Events for {} {} ", date.short_month_name(), date.day()),
            events,
            highlight,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        self.events
            .iter()
            .enumerate()
            .map(|(i, ev)| {
                let line = Line::from_iter([
                    Span::styled(ev.time().to_string(), TIME_STYLE),
                    Span::raw("  "),
                    Span::raw(ev.title()),
                ]);
                if self.highlight == Some(i) {
                    line.style(HIGHLIGHT_STYLE)
                } else {
                    line
                }
            })
            .collect()
    }
}

impl Widget for EventsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Span::styled(self.title.clone(), TITLE_STYLE))
            .title_alignment(Alignment::Center)
            .style(BASE_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        if self.events.is_empty() {
            Paragraph::new(Line::styled("No events scheduled", EMPTY_STYLE))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }
        // Scroll just far enough to keep the highlighted event visible
        let height = usize::from(inner.height);
        let skip = match self.highlight {
            Some(i) if height > 0 && i >= height => i + 1 - height,
            _ => 0,
        };
        let lines = self.lines().into_iter().skip(skip).collect::<Vec<_>>();
        Paragraph::new(Text::from(lines))
            .style(BASE_STYLE)
            .render(inner, buf);
    }
}
