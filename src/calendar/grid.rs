use super::{is_selected, is_today, CalendarDate};

/// One slot of the month view
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum GridCell {
    /// Padding before the first day of the month
    Blank,
    Day(u8),
}

/// Weekday of the first of `date`'s month, counting Sunday as 0
pub(crate) fn first_weekday_of_month<D: CalendarDate>(date: D) -> u8 {
    date.first_of_month()
        .to_civil()
        .weekday()
        .number_days_from_sunday()
}

/// Returns the cells for `date`'s month: one blank per weekday before the
/// first of the month, then every day of the month in order.  The sequence
/// is not padded out to a whole number of weeks.
pub(crate) fn build_grid<D: CalendarDate>(date: D) -> Vec<GridCell> {
    let blanks = first_weekday_of_month(date);
    let days = date.days_in_month();
    let mut cells = Vec::with_capacity(usize::from(blanks) + usize::from(days));
    cells.extend(std::iter::repeat(GridCell::Blank).take(blanks.into()));
    cells.extend((1..=days).map(GridCell::Day));
    cells
}

/// How a day cell should be highlighted
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum CellMark {
    Today,
    Selected,
    Plain,
}

/// Determine the highlighting for `day` of `reference`'s month.  Today's
/// highlighting takes precedence over the selection's.
pub(crate) fn cell_mark<D: CalendarDate>(day: u8, reference: D, selected: D, today: D) -> CellMark {
    if is_today(day, reference, today) {
        CellMark::Today
    } else if is_selected(day, reference, selected) {
        CellMark::Selected
    } else {
        CellMark::Plain
    }
}
