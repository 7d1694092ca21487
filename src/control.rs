#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::rack::UnitId;

/// Parameter edits sent from a control thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RackMessage {
    /// Set parameter `param` of `unit`. Values are clamped on arrival.
    SetParam { unit: UnitId, param: usize, value: f32 },
    SetBypass { unit: UnitId, bypassed: bool },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<RackMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<RackMessage> {
    fn pop(&mut self) -> Option<RackMessage> {
        Consumer::pop(self).ok()
    }
}

/// Plain queue, handy in tests and offline rendering.
impl MessageReceiver for std::collections::VecDeque<RackMessage> {
    fn pop(&mut self) -> Option<RackMessage> {
        self.pop_front()
    }
}
