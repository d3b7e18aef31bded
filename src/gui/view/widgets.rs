//! Reusable small widgets used by the view.

use iced::widget::{button, column, container, progress_bar, row, slider, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Wave};
use super::super::util::time_text;
use super::constants::{BUTTON_SIZE, GLYPH_TEXT, SMALL_TEXT, VOLUME_SLIDER_W};

/// Square transport button showing a glyph.
fn glyph_button(symbol: &'static str, on_press: Message) -> iced::widget::Button<'static, Message> {
    button(
        text(symbol)
            .size(GLYPH_TEXT)
            .width(Length::Fill)
            .center(),
    )
    .width(Length::Fixed(BUTTON_SIZE))
    .height(Length::Fixed(BUTTON_SIZE))
    .on_press(on_press)
}

/// Path box + Open button.
pub(crate) fn open_row(state: &Wave) -> iced::widget::Row<'_, Message> {
    let input = text_input("Audio file path (.mp3 .wav .ogg)", &state.path_input)
        .on_input(Message::PathInputChanged)
        .on_submit(Message::OpenPressed)
        .width(Length::Fill);

    row![input, button("Open").on_press(Message::OpenPressed)]
        .spacing(8)
        .align_y(Alignment::Center)
}

/// Progress bar + elapsed/total.
pub(crate) fn progress_row(state: &Wave) -> iced::widget::Row<'_, Message> {
    let progress = state.controller.progress();

    row![
        progress_bar(0.0..=1.0, progress.ratio()),
        text(time_text(progress)).size(SMALL_TEXT),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
}

/// prev / play-pause / stop / next on the left, mute button + slider on the right.
///
/// Emits only Messages; glyphs and slider come straight from the controller.
pub(crate) fn transport_bar(state: &Wave) -> iced::widget::Container<'_, Message> {
    let controller = &state.controller;

    let transport = row![
        glyph_button("⏮", Message::Prev),
        glyph_button(controller.play_glyph().symbol(), Message::TogglePlayPause),
        glyph_button("⏹", Message::Stop),
        glyph_button("⏭", Message::Next),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .width(Length::Fill);

    let vol_slider = slider(0..=100, controller.slider_value(), Message::VolumeChanged)
        .width(Length::Fixed(VOLUME_SLIDER_W));

    let volume = row![
        glyph_button(controller.volume_glyph().symbol(), Message::ToggleMute),
        column![vol_slider, text(controller.volume().to_string()).size(SMALL_TEXT)]
            .spacing(2)
            .align_x(Alignment::Center),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(row![transport, volume].spacing(16).align_y(Alignment::Center))
}
