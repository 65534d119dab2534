use crate::events::EventTime;
use crate::theme::{
    form::{FOCUSED_LABEL_STYLE, PLACEHOLDER_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 40;
const OUTER_HEIGHT: u16 = 9;

/// Longest accepted title, in characters
const MAX_TITLE_LEN: usize = 60;

/// "HH:MM"
const MAX_TIME_LEN: usize = 5;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct EventForm;

impl StatefulWidget for EventForm {
    type State = EventFormState;

    /*
     * ........................................
     * .┌──────────── New Event ─────────────┐.
     * .│                                    │.
     * .│ Title: Event title                 │.
     * .│ Time:  12:00                       │.
     * .│                                    │.
     * .│     [ENTER] Add   [ESC] Cancel     │.
     * .└────────────────────────────────────┘.
     * ........................................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" New Event ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Field {
    #[default]
    Title,
    Time,
}

/// Contents of the event form.  The title field is focused initially.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EventFormState {
    title: String,
    time: String,
    focus: Field,
}

impl EventFormState {
    pub(crate) fn new() -> EventFormState {
        EventFormState::default()
    }

    fn to_text(&self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.field_line("Title:", &self.title, "Event title", Field::Title),
            self.field_line("Time: ", &self.time, "12:00", Field::Time),
            Line::styled("", BASE_STYLE),
            Line::styled("[ENTER] Add   [ESC] Cancel", BASE_STYLE).alignment(Alignment::Center),
        ])
    }

    fn field_line(
        &self,
        label: &'static str,
        value: &str,
        placeholder: &'static str,
        field: Field,
    ) -> Line<'static> {
        let label = Span::styled(
            label,
            if self.focus == field {
                FOCUSED_LABEL_STYLE
            } else {
                BASE_STYLE
            },
        );
        let value = if value.is_empty() {
            Span::styled(placeholder, PLACEHOLDER_STYLE)
        } else {
            Span::styled(value.to_owned(), BASE_STYLE)
        };
        Line::from_iter([Span::styled(" ", BASE_STYLE), label, Span::raw(" "), value])
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Time => &mut self.time,
        }
    }

    pub(crate) fn handle_input(&mut self, input: FormInput) -> FormOutput {
        match input {
            FormInput::Char(c) => {
                let accepted = match self.focus {
                    Field::Title => !c.is_control() && self.title.chars().count() < MAX_TITLE_LEN,
                    Field::Time => {
                        (c.is_ascii_digit() || c == ':') && self.time.len() < MAX_TIME_LEN
                    }
                };
                if accepted {
                    self.focused_mut().push(c);
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            FormInput::Backspace => {
                if self.focused_mut().pop().is_some() {
                    FormOutput::Ok
                } else {
                    FormOutput::Invalid
                }
            }
            FormInput::Tab => {
                self.focus = match self.focus {
                    Field::Title => Field::Time,
                    Field::Time => Field::Title,
                };
                FormOutput::Ok
            }
            FormInput::Enter => {
                if self.title.trim().is_empty() {
                    return FormOutput::Invalid;
                }
                match EventTime::parse(&self.time) {
                    Ok(time) => FormOutput::Submit {
                        title: self.title.trim().to_owned(),
                        time,
                    },
                    Err(e) => {
                        tracing::debug!(error = %e, "rejecting event form");
                        self.focus = Field::Time;
                        FormOutput::Invalid
                    }
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FormInput {
    Char(char),
    Backspace,
    Tab,
    Enter,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum FormOutput {
    Ok,
    Invalid,
    Submit { title: String, time: EventTime },
}
