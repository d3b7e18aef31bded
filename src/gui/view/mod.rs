//! GUI renderer (reads state, produces widgets; no mutation).

pub(crate) mod constants;
mod widgets;

use iced::widget::{Column, column, text};
use iced::Length;

use super::state::{Message, Wave};
use super::util::song_label;
use constants::{LABEL_TEXT, PADDING, ROW_SPACING, SMALL_TEXT};

pub(crate) fn view(state: &Wave) -> Column<'_, Message> {
    let label = text(song_label(state.controller.track()))
        .size(LABEL_TEXT)
        .width(Length::Fill)
        .center();

    column![
        widgets::open_row(state),
        label,
        widgets::progress_row(state),
        widgets::transport_bar(state),
        text(&state.status).size(SMALL_TEXT),
    ]
    .spacing(ROW_SPACING)
    .padding(PADDING)
}
