//! Realtime software modem for Baudot (ITA2) FSK audio, the kind legacy
//! TTY/textphone devices speak over a phone line.
//!
//! [`Modem`] is the entry point: feed it text to transmit with
//! [`Modem::enqueue_text`], pull modulated audio with [`Modem::modulate`],
//! and feed received audio to [`Modem::demodulate`]. Both directions report
//! back through the `FnMut(Event)` callback given to [`Modem::new`].
//!
//! [`tty_detect::TtyDetector`] is a separate, narrower tool: a standalone
//! Goertzel-filter presence check for TTY tone on 8kHz audio, with no
//! shared state with the modem proper.

mod arbiter;
pub mod config;
mod consts;
mod demod;
pub mod event;
mod modem;
mod modulator;
mod queue;
mod tables;
pub mod tty_detect;

pub use config::{BaudEstimate, BaudRate, ShiftState, StopBits};
pub use event::{DemodCase, Event, TxStateEvent};
pub use modem::Modem;
pub use tty_detect::TtyDetector;

/// Re-exports the crate's small surface for `use obl::prelude::*;`.
pub mod prelude {
    pub use crate::{
        BaudEstimate, BaudRate, DemodCase, Event, Modem, ShiftState, StopBits, TtyDetector,
        TxStateEvent,
    };
}
