//! Start-bit detection, per-bit sampling, and the LETR/FIGR case decoder.

use crate::config::ShiftState;
use crate::consts::{DEM_BAUD, FIGR, LETR, MIN_THRESH, SAMPLE_RATE};
use crate::event::{DemodCase, Event};
use crate::tables::BAUDOT_TO_ASCII;

/// Bit-sampler state. Public so the autobaud estimator (§4.6) can watch its
/// transitions without the two modules otherwise knowing about each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    WaitStart,
    Sample,
    WaitStop,
}

/// Demodulates one codeword at a time out of a stream of (metric, energy)
/// pairs, fixed to `DEM_BAUD` regardless of what the autobaud estimator
/// reports (REDESIGN FLAG 4 / design note 4).
pub struct BitSampler {
    state: State,
    accumulator: u8,
    bit_index: u8,
    sample_counter: u32,
    dropout: u32,
    shift: ShiftState,
}

impl BitSampler {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            accumulator: 0,
            bit_index: 0,
            sample_counter: 0,
            dropout: 0,
            shift: ShiftState::Letters,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Seeds the demod-side shift state (used on TX→RX handoff; spec §4.7).
    pub fn seed_shift(&mut self, shift: ShiftState) {
        self.shift = shift;
    }

    fn decode(&mut self, codeword: u8) -> Event {
        let event = match codeword {
            LETR => {
                self.shift = ShiftState::Letters;
                Event::DemodCase(DemodCase::Letters)
            }
            FIGR => {
                self.shift = ShiftState::Figures;
                Event::DemodCase(DemodCase::Figures)
            }
            _ => {
                let table = if self.shift == ShiftState::Figures { 1 } else { 0 };
                Event::DemodChar(BAUDOT_TO_ASCII[table][codeword as usize])
            }
        };
        log::trace!("decoded codeword {codeword:#04x} -> {event:?}");
        event
    }

    /// Advances one sample. Returns an event if a codeword (or a dropout)
    /// was just resolved.
    pub fn step(&mut self, metric: i32, energy: i32) -> Option<Event> {
        match self.state {
            State::WaitStart => {
                if energy != 0 && metric < -(MIN_THRESH * energy) {
                    self.sample_counter =
                        SAMPLE_RATE / DEM_BAUD + SAMPLE_RATE / (2 * DEM_BAUD);
                    self.accumulator = 0;
                    self.bit_index = 0;
                    self.dropout = 0;
                    self.state = State::Sample;
                }
                None
            }
            State::Sample => {
                let mut event = None;
                self.sample_counter -= 1;
                if self.sample_counter == 0 {
                    if metric > 0 {
                        self.accumulator |= 1 << self.bit_index;
                    }
                    self.bit_index += 1;
                    self.sample_counter = SAMPLE_RATE / DEM_BAUD;
                    if self.bit_index >= 5 {
                        event = Some(self.decode(self.accumulator));
                        self.state = State::WaitStop;
                    }
                }
                if energy == 0 || metric.abs() < MIN_THRESH * energy {
                    self.dropout += 1;
                    if self.dropout > SAMPLE_RATE / 45 {
                        log::warn!("demod dropout mid-character; returning to WaitStart");
                        self.state = State::WaitStart;
                        return None;
                    }
                } else {
                    self.dropout = 0;
                }
                event
            }
            State::WaitStop => {
                self.sample_counter -= 1;
                if self.sample_counter == 0 {
                    self.state = State::WaitStart;
                }
                None
            }
        }
    }
}

impl Default for BitSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_wait_start_with_letters_shift() {
        let sampler = BitSampler::new();
        assert_eq!(sampler.state(), State::WaitStart);
    }

    #[test]
    fn strong_space_metric_enters_sample() {
        let mut sampler = BitSampler::new();
        let ev = sampler.step(-1000, 10);
        assert!(ev.is_none());
        assert_eq!(sampler.state(), State::Sample);
    }

    #[test]
    fn letr_updates_shift_without_emitting_char() {
        let mut sampler = BitSampler::new();
        sampler.seed_shift(ShiftState::Letters);
        let ev = sampler.decode(LETR);
        assert_eq!(ev, Event::DemodCase(DemodCase::Letters));
    }
}
