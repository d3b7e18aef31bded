//! gui/subscription.rs
//! Poll playback events by emitting a periodic TickPlayback message.

use iced::{Subscription, time};
use std::time::Duration;

use super::state::{Message, Wave};

const TICK_MS: u64 = 200;

pub(crate) fn subscription(_state: &Wave) -> Subscription<Message> {
    time::every(Duration::from_millis(TICK_MS)).map(|_| Message::TickPlayback)
}
