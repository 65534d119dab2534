use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);

pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightBlue);

pub(crate) const EVENT_MARK_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) mod panel {
    use super::*;

    pub(crate) const EMPTY_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const TIME_STYLE: Style = BASE_STYLE.fg(Color::Gray);

    pub(crate) const HIGHLIGHT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);
}

pub(crate) mod form {
    use super::*;

    pub(crate) const PLACEHOLDER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const FOCUSED_LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
