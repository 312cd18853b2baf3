//! [`Modem`]: the public half-duplex Baudot FSK modem, wiring together the
//! TX queue, modulator, demodulator, and top-level arbiter.

use crate::arbiter::{Arbiter, Gate};
use crate::config::{BaudEstimate, BaudRate, ShiftState, StopBits};
use crate::consts::DEFAULT_AMP;
use crate::demod::Demodulator;
use crate::event::{Event, TxStateEvent};
use crate::modulator::Modulator;
use crate::queue::TxQueue;

/// A half-duplex Baudot FSK modem. Generic over the event callback so
/// callers pay nothing for indirection they don't need.
pub struct Modem<F: FnMut(Event)> {
    queue: TxQueue,
    modulator: Modulator,
    demod: Demodulator,
    arbiter: Arbiter,
    callback: F,
    baud: BaudRate,
    stop_bits: StopBits,
    crlf_enabled: bool,
    autobaud_enabled: bool,
}

impl<F: FnMut(Event)> Modem<F> {
    pub fn new(baud: BaudRate, callback: F) -> Self {
        Self {
            queue: TxQueue::new(),
            modulator: Modulator::new(baud),
            demod: Demodulator::new(false, baud),
            arbiter: Arbiter::new(),
            callback,
            baud,
            stop_bits: StopBits::default(),
            crlf_enabled: true,
            autobaud_enabled: false,
        }
    }

    /// Resets every per-instance field to its power-on default, except the
    /// event callback and the autobaud enable flag, same as the original.
    pub fn reset(&mut self) {
        self.queue.reset();
        self.modulator.reset(self.baud, self.stop_bits);
        self.demod.reset(self.autobaud_enabled, self.baud);
        self.arbiter.reset();
        self.crlf_enabled = true;
    }

    pub fn set_baud(&mut self, baud: BaudRate) {
        self.baud = baud;
        self.modulator.set_baud(baud, self.stop_bits);
    }

    pub fn baud(&self) -> BaudRate {
        self.baud
    }

    pub fn set_crlf(&mut self, enabled: bool) {
        self.crlf_enabled = enabled;
    }

    pub fn set_stop_bits(&mut self, stop_bits: StopBits) {
        self.stop_bits = stop_bits;
        self.modulator.set_stop_bits(stop_bits, self.baud);
    }

    pub fn set_amplitude(&mut self, amp: i16) {
        self.modulator.set_amplitude(amp);
    }

    pub fn amplitude(&self) -> i16 {
        self.modulator.amplitude()
    }

    pub fn set_tx_frequencies(&mut self, one_hz: f64, zero_hz: f64) {
        self.modulator.set_tx_frequencies(one_hz, zero_hz);
    }

    pub fn set_amplitude_imbalance(&mut self, one_amp: i16, zero_amp: i16) {
        self.modulator.set_amplitude_imbalance(one_amp, zero_amp);
    }

    pub fn enable_autobaud(&mut self, enabled: bool) {
        self.autobaud_enabled = enabled;
        self.demod.enable_autobaud(enabled, self.baud);
    }

    pub fn estimated_baud(&self) -> BaudEstimate {
        self.demod.estimated_baud()
    }

    /// Enqueues text for transmission, returning the number of bytes of
    /// `text` actually consumed (less than `text.len()` only if the TX
    /// queue filled up).
    pub fn enqueue_text(&mut self, text: &str) -> usize {
        let consumed = self.queue.enqueue(text, self.crlf_enabled);
        self.arbiter.on_enqueue();
        if consumed < text.len() {
            log::warn!(
                "tx queue full: consumed {consumed} of {} input bytes",
                text.len()
            );
        }
        consumed
    }

    /// Fills `out` with modulated PCM samples, returning how many were
    /// non-silent.
    pub fn modulate(&mut self, out: &mut [i16]) -> usize {
        let modulator = &mut self.modulator;
        let queue = &mut self.queue;
        let callback = &mut self.callback;
        let non_idle = modulator.modulate(queue, out, |ev| callback(ev));
        self.arbiter.on_modulate(out.len(), non_idle);
        non_idle
    }

    /// Demodulates `samples` of received PCM audio, unless the arbiter
    /// believes the line still carries our own TX.
    pub fn demodulate(&mut self, samples: &[i16]) {
        match self.arbiter.gate() {
            Gate::Blocked => return,
            Gate::ProceedSeeded => {
                let seed = if self.queue.shift_state() == ShiftState::Figures {
                    ShiftState::Figures
                } else {
                    ShiftState::Letters
                };
                self.demod.seed_shift(seed);
                (self.callback)(Event::TxState(TxStateEvent::Timeout));
                log::debug!("tx-silence timeout; handing off to demod (seed={seed:?})");
            }
            Gate::Proceed => {}
        }
        let demod = &mut self.demod;
        let callback = &mut self.callback;
        for &s in samples {
            demod.process_sample(s, |ev| callback(ev));
        }
    }

    /// Two-byte convenience wrapper over `demodulate`, for callers that
    /// receive audio as byte pairs rather than `i16` samples (spec §4.9).
    pub fn demodulate_packet(&mut self, low: u8, high: u8) {
        let sample = i16::from_le_bytes([low, high]);
        self.demodulate(&[sample]);
    }
}

impl<F: FnMut(Event)> std::fmt::Debug for Modem<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modem")
            .field("baud", &self.baud)
            .field("stop_bits", &self.stop_bits)
            .field("crlf_enabled", &self.crlf_enabled)
            .field("autobaud_enabled", &self.autobaud_enabled)
            .field("amplitude", &self.amplitude())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn default_amplitude_matches_constant() {
        let modem = Modem::new(BaudRate::B50, |_| {});
        assert_eq!(modem.amplitude(), DEFAULT_AMP);
    }

    #[test]
    fn reset_preserves_autobaud_flag() {
        let mut modem = Modem::new(BaudRate::B50, |_| {});
        modem.enable_autobaud(true);
        modem.reset();
        assert_eq!(modem.estimated_baud(), BaudEstimate::Invalid);
    }

    #[test]
    fn loopback_hi_round_trips() {
        let mut tx = Modem::new(BaudRate::B47, |_| {});
        let consumed = tx.enqueue_text("HI");
        assert_eq!(consumed, 2);

        // A full second comfortably covers LETR + 'H' + 'I' plus the 200ms
        // post-transmit hold tone at 47 baud.
        let mut tx_audio = vec![0i16; 48_000];
        tx.modulate(&mut tx_audio);
        assert!(tx_audio.iter().any(|&s| s != 0), "modulator should have produced tone");

        // A silence prelude/postlude around the transmitted tone, as a real
        // line would have either side of an utterance.
        let mut line = vec![0i16; 2_000];
        line.extend_from_slice(&tx_audio);
        line.extend(std::iter::repeat(0i16).take(2_000));

        let chars = Rc::new(RefCell::new(Vec::new()));
        let chars2 = chars.clone();
        let mut rx = Modem::new(BaudRate::B47, move |e| {
            if let Event::DemodChar(c) = e {
                chars2.borrow_mut().push(c);
            }
        });
        rx.demodulate(&line);

        let decoded: Vec<u8> = chars.borrow().clone();
        assert_eq!(decoded, b"HI", "round trip should recover the transmitted text");
    }
}
