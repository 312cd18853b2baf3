//! Events the modem reports back to the caller through a single callback.

/// A shift state the demodulator has just settled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemodCase {
    Letters,
    Figures,
}

/// Transmit-side state transitions, mirroring the original's
/// `OBL_EVENT_TX_STATE` sub-codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStateEvent {
    /// The modulator has drained its queue and the 200ms hold tone expired;
    /// the line has gone idle.
    Stop,
    /// The modulator just pulled its first codeword off an empty queue.
    Start,
    /// The top-level arbiter's TX-silence timer expired; demodulation is
    /// about to resume.
    Timeout,
}

/// Something worth telling the caller about. Delivered through the
/// `FnMut(Event)` callback passed to [`crate::Modem::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A character was demodulated from the line.
    DemodChar(u8),
    /// Defined for wire/API compatibility; the demodulator currently handles
    /// a mid-character dropout by returning to `WaitStart` silently instead
    /// of emitting this.
    DemodAbort,
    /// The demodulator's shift state changed.
    DemodCase(DemodCase),
    /// A TX-side state transition.
    TxState(TxStateEvent),
}

impl Event {
    /// The numeric event code the original C API reported this event under.
    /// Kept for callers bridging to systems that still speak that protocol.
    pub fn kind_code(&self) -> u8 {
        match self {
            Event::DemodChar(_) => 1,
            Event::DemodAbort => 2,
            Event::TxState(_) => 3,
            Event::DemodCase(_) => 4,
        }
    }
}
