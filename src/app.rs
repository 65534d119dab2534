use crate::calendar::{advance, CalendarDate, MonthStep, MonthView, OutOfRangeError};
use crate::events::{Event, EventStore, EventTime, EventsPanel};
use crate::form::{EventForm, EventFormState, FormInput, FormOutput};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use tracing::{debug, info};

/// Width of the events panel
const PANEL_WIDTH: u16 = 42;

/// The month on display and the selected day.  The selected day need not
/// lie in the month on display.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CalendarViewState<D> {
    pub(crate) reference: D,
    pub(crate) selected: D,
}

impl<D: CalendarDate> CalendarViewState<D> {
    pub(crate) fn new(date: D) -> Self {
        CalendarViewState {
            reference: date,
            selected: date,
        }
    }

    /// Display the previous or next month.  The selection is kept as-is.
    pub(crate) fn navigate(self, step: MonthStep) -> Result<Self, OutOfRangeError> {
        Ok(CalendarViewState {
            reference: advance(self.reference, step)?,
            selected: self.selected,
        })
    }

    /// Select `day` of the month on display
    pub(crate) fn select_day(self, day: u8) -> Option<Self> {
        let selected = self.reference.with_day(day)?;
        Some(CalendarViewState {
            reference: self.reference,
            selected,
        })
    }

    /// Returns the selected day-of-month if the selection is in the month on
    /// display
    pub(crate) fn selected_day(&self) -> Option<u8> {
        self.reference
            .same_month(self.selected)
            .then(|| self.selected.day())
    }

    /// Move the selection `delta` days, staying within the month on display.
    /// If nothing in this month is selected, select its first day.
    pub(crate) fn move_selection(self, delta: i8) -> Option<Self> {
        let day = match self.selected_day() {
            Some(day) => u8::try_from(i16::from(day) + i16::from(delta)).ok()?,
            None => 1,
        };
        self.select_day(day)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<D> {
    today: D,
    view: CalendarViewState<D>,
    events: EventStore,
    /// Index of the highlighted event among the selected day's events
    highlight: usize,
    state: AppState,
}

impl<D: CalendarDate> App<D> {
    pub(crate) fn new(today: D, start: D) -> App<D> {
        App {
            today,
            view: CalendarViewState::new(start),
            events: EventStore::new(),
            highlight: 0,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_selection(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_selection(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_selection(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_selection(7),
                KeyCode::Char('p' | '<') | KeyCode::PageUp => self.navigate(MonthStep::Previous),
                KeyCode::Char('n' | '>') | KeyCode::PageDown => self.navigate(MonthStep::Next),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.jump_to_today();
                    true
                }
                KeyCode::Char('a') => {
                    self.state = AppState::Adding(EventFormState::new());
                    true
                }
                KeyCode::Char('J') => self.highlight_next(),
                KeyCode::Char('K') => self.highlight_previous(),
                KeyCode::Char('x') | KeyCode::Delete => self.remove_highlighted(),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Adding(form) => {
                let output = match key {
                    KeyCode::Esc => {
                        self.state = AppState::Calendar;
                        return true;
                    }
                    KeyCode::Char(c) => form.handle_input(FormInput::Char(c)),
                    KeyCode::Backspace => form.handle_input(FormInput::Backspace),
                    KeyCode::Tab | KeyCode::BackTab => form.handle_input(FormInput::Tab),
                    KeyCode::Enter => form.handle_input(FormInput::Enter),
                    _ => FormOutput::Invalid,
                };
                match output {
                    FormOutput::Ok => true,
                    FormOutput::Invalid => false,
                    FormOutput::Submit { title, time } => {
                        let added = self.add_event(&title, time);
                        if added {
                            self.state = AppState::Calendar;
                        }
                        added
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn set_view(&mut self, view: CalendarViewState<D>) {
        if view.selected != self.view.selected {
            debug!(selected = %view.selected.long_label(), "selected date");
            self.highlight = 0;
        }
        self.view = view;
    }

    fn navigate(&mut self, step: MonthStep) -> bool {
        match self.view.navigate(step) {
            Ok(view) => {
                debug!(
                    offset = step.offset(),
                    month = %view.reference.month_title(),
                    "changed month"
                );
                self.set_view(view);
                true
            }
            Err(e) => {
                debug!(error = %e, "cannot change month");
                false
            }
        }
    }

    fn move_selection(&mut self, delta: i8) -> bool {
        if let Some(view) = self.view.move_selection(delta) {
            self.set_view(view);
            true
        } else {
            false
        }
    }

    fn jump_to_today(&mut self) {
        self.set_view(CalendarViewState::new(self.today));
    }

    fn selected_events(&self) -> &[Event] {
        self.events.events_for(&self.view.selected.key())
    }

    fn highlight_next(&mut self) -> bool {
        if self.highlight + 1 < self.selected_events().len() {
            self.highlight += 1;
            true
        } else {
            false
        }
    }

    fn highlight_previous(&mut self) -> bool {
        if let Some(h) = self.highlight.checked_sub(1) {
            self.highlight = h;
            true
        } else {
            false
        }
    }

    fn add_event(&mut self, title: &str, time: EventTime) -> bool {
        let key = self.view.selected.key();
        let (events, id) = self.events.add(&key, title, Some(time));
        let Some(id) = id else {
            debug!(%key, "not adding event with blank title");
            return false;
        };
        info!(%key, %id, title, %time, "added event");
        self.events = events;
        self.highlight = self.selected_events().len().saturating_sub(1);
        true
    }

    fn remove_highlighted(&mut self) -> bool {
        let key = self.view.selected.key();
        let Some(id) = self.events.events_for(&key).get(self.highlight).map(Event::id) else {
            return false;
        };
        self.events = self.events.remove(&key, id);
        info!(%key, %id, "removed event");
        self.highlight = self
            .highlight
            .min(self.selected_events().len().saturating_sub(1));
        true
    }
}

impl<D: CalendarDate> Widget for &mut App<D> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, panel_area] = Layout::vertical([
            Constraint::Length(MonthView::<D>::HEIGHT + 1),
            Constraint::Min(0),
        ])
        .areas(area);
        MonthView::new(
            self.view.reference,
            self.view.selected,
            self.today,
            &self.events,
        )
        .render(cal_area, buf);
        let [panel_area] = Layout::horizontal([PANEL_WIDTH])
            .flex(Flex::Center)
            .areas(panel_area);
        let events = self.selected_events();
        let highlight = (!events.is_empty()).then_some(self.highlight);
        EventsPanel::new(self.view.selected, events, highlight).render(panel_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Adding(ref mut state) = self.state {
            EventForm.render(area, buf, state);
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Adding(EventFormState),
    Quitting,
}
