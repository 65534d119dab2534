use super::{build_grid, cell_mark, CalendarDate, CellMark, GridCell};
use crate::events::EventStore;
use crate::theme::{
    BASE_STYLE, EVENT_MARK_STYLE, SELECTED_STYLE, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{layout::Flex, prelude::*, widgets::*};

static HEADER: &str = " Sun   Mon   Tue   Wed   Thu   Fri   Sat  ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 6;

const WEEK_COLUMNS: u16 = 7;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * WEEK_COLUMNS;

/// Number of lines above the first week: month title, selected date, a blank
/// line, the weekday header, and its rule
const HEADER_LINES: u16 = 5;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Most weeks that a month can touch
const MAX_WEEKS: u16 = 6;

/// Column, relative to the left edge of a day, at which the marker for a day
/// with events is drawn
const MARK_OFFSET: u16 = 4;

const ACS_HLINE: char = '─';

const EVENT_MARK: &str = "•";

/// Draws one month of a calendar, with the title, the selected date, and a
/// marker beside every day that has events
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a, D> {
    reference: D,
    selected: D,
    today: D,
    events: &'a EventStore,
}

impl<'a, D: CalendarDate> MonthView<'a, D> {
    /// Number of lines needed to draw any month
    pub(crate) const HEIGHT: u16 = HEADER_LINES + MAX_WEEKS * WEEK_LINES - 1;

    pub(crate) fn new(reference: D, selected: D, today: D, events: &'a EventStore) -> Self {
        MonthView {
            reference,
            selected,
            today,
            events,
        }
    }

    fn cell_style(&self, day: u8) -> Style {
        match cell_mark(day, self.reference, self.selected, self.today) {
            CellMark::Today => TODAY_STYLE,
            CellMark::Selected => SELECTED_STYLE,
            CellMark::Plain => BASE_STYLE,
        }
    }

    fn has_events(&self, day: u8) -> bool {
        self.reference
            .with_day(day)
            .is_some_and(|date| self.events.has_events(&date.key()))
    }
}

impl<D: CalendarDate> Widget for MonthView<'_, D> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([MAIN_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_centered(0, self.reference.month_title(), TITLE_STYLE);
        canvas.draw_centered(
            1,
            format!("Selected: {}", self.selected.long_label()),
            BASE_STYLE,
        );
        canvas.draw_header();
        for (i, cell) in std::iter::zip(0u16.., build_grid(self.reference)) {
            let GridCell::Day(day) = cell else {
                continue;
            };
            let week_no = i / WEEK_COLUMNS;
            let x = (i % WEEK_COLUMNS) * DAY_WIDTH;
            canvas.draw_day(week_no, x, day, self.cell_style(day));
            if self.has_events(day) {
                canvas.draw_event_mark(week_no, x);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_centered<S: AsRef<str>>(&mut self, y: u16, s: S, style: Style) {
        if y < self.area.height {
            Paragraph::new(Text::styled(s.as_ref(), style))
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        x: self.area.x,
                        y: y + self.area.y,
                        width: self.area.width,
                        height: 1,
                    },
                    self.buf,
                );
        }
    }

    fn draw_header(&mut self) {
        self.mvprint(HEADER_LINES - 2, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(HEADER_LINES - 1, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, x: u16, day: u8, style: Style) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            x,
            format!(" {day:>2} "),
            Some(style),
        );
    }

    fn draw_event_mark(&mut self, week_no: u16, x: u16) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            x + MARK_OFFSET,
            EVENT_MARK,
            Some(EVENT_MARK_STYLE),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
