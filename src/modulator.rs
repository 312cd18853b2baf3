//! FSK modulator: turns queued Baudot codewords into PCM samples.
//!
//! Tone generation is a Q16 phase accumulator driving the shared sine LUT,
//! the same scheme [`crate::device::pokey`]-style wavetable synths in this
//! codebase use for audio generation. The accumulator is a plain `u16` and
//! is left to wrap on overflow, which is exactly the free modulo-2^16 phase
//! wrap the tone generator wants.

use crate::config::{BaudRate, StopBits};
use crate::consts::{DEFAULT_AMP, DEFAULT_ONE_HZ, DEFAULT_ZERO_HZ, HOLD_SAMPLES, SAMPLE_RATE};
use crate::event::{Event, TxStateEvent};
use crate::queue::TxQueue;
use crate::tables::sine_lut;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Start,
    Bit,
    Stop,
    Hold,
}

/// The FSK tone generator and its per-codeword framing state machine
/// (IDLE → START → BIT × 5 → STOP → (next codeword, or HOLD) → IDLE).
pub struct Modulator {
    state: State,
    codeword: u8,
    bit_index: u8,
    current_bit: bool,
    sample_counter: u32,
    samples_per_bit: u32,
    stop_samples: u32,
    phase: u16,
    one_step: u16,
    zero_step: u16,
    one_amp: i16,
    zero_amp: i16,
    one_hz: f64,
    zero_hz: f64,
}

fn freq_to_step(hz: f64) -> u16 {
    ((hz / SAMPLE_RATE as f64) * 65536.0).round() as u16
}

impl Modulator {
    pub fn new(baud: BaudRate) -> Self {
        let mut m = Self {
            state: State::Idle,
            codeword: 0,
            bit_index: 0,
            current_bit: false,
            sample_counter: 0,
            samples_per_bit: 0,
            stop_samples: 0,
            phase: 0,
            one_step: 0,
            zero_step: 0,
            one_amp: DEFAULT_AMP,
            zero_amp: DEFAULT_AMP,
            one_hz: DEFAULT_ONE_HZ,
            zero_hz: DEFAULT_ZERO_HZ,
        };
        m.set_baud(baud, StopBits::default());
        m.set_tx_frequencies(DEFAULT_ONE_HZ, DEFAULT_ZERO_HZ);
        m
    }

    pub fn reset(&mut self, baud: BaudRate, stop_bits: StopBits) {
        *self = Self::new(baud);
        self.set_stop_bits(stop_bits, baud);
    }

    pub fn set_baud(&mut self, baud: BaudRate, stop_bits: StopBits) {
        self.samples_per_bit = SAMPLE_RATE / baud.baud();
        self.stop_samples = self.samples_per_bit * stop_bits.half_bits() / 2;
    }

    pub fn set_stop_bits(&mut self, stop_bits: StopBits, baud: BaudRate) {
        self.set_baud(baud, stop_bits);
    }

    pub fn set_tx_frequencies(&mut self, one_hz: f64, zero_hz: f64) {
        self.one_hz = one_hz;
        self.zero_hz = zero_hz;
        self.one_step = freq_to_step(one_hz);
        self.zero_step = freq_to_step(zero_hz);
    }

    pub fn set_amplitude(&mut self, amp: i16) {
        self.one_amp = amp;
        self.zero_amp = amp;
    }

    /// Sets mark and space amplitudes independently. The original assigned
    /// `one_amp` to both fields here; this keeps them disjoint as the API
    /// doc always promised (REDESIGN FLAG 2).
    pub fn set_amplitude_imbalance(&mut self, one_amp: i16, zero_amp: i16) {
        self.one_amp = one_amp;
        self.zero_amp = zero_amp;
    }

    pub fn amplitude(&self) -> i16 {
        ((self.one_amp as i32 + self.zero_amp as i32) / 2) as i16
    }

    fn tone(&mut self, mark: bool) -> i16 {
        let step = if mark { self.one_step } else { self.zero_step };
        self.phase = self.phase.wrapping_add(step);
        let idx = (self.phase as usize) >> 2;
        let sample = sine_lut()[idx % sine_lut().len()] as i32;
        let amp = if mark { self.one_amp } else { self.zero_amp } as i32;
        ((amp * sample) >> 15) as i16
    }

    /// Fills `out` with modulated samples, pulling codewords from `queue` as
    /// needed, and returns the number of samples that were not silence
    /// (i.e. not generated while IDLE with an empty queue).
    pub fn modulate(
        &mut self,
        queue: &mut TxQueue,
        out: &mut [i16],
        mut on_event: impl FnMut(Event),
    ) -> usize {
        let mut non_idle = 0;
        for slot in out.iter_mut() {
            let sample = match self.state {
                State::Idle => {
                    if !queue.is_empty() {
                        log::debug!("modulator: Idle -> Start");
                        on_event(Event::TxState(TxStateEvent::Start));
                        let s = self.tone(false);
                        self.sample_counter = 1;
                        self.state = State::Start;
                        non_idle += 1;
                        s
                    } else {
                        0
                    }
                }
                State::Start => {
                    let s = self.tone(false);
                    non_idle += 1;
                    self.sample_counter += 1;
                    if self.sample_counter >= self.samples_per_bit {
                        self.codeword = queue.pop().unwrap_or(0);
                        self.bit_index = 0;
                        self.current_bit = self.codeword & 1 != 0;
                        self.sample_counter = 0;
                        self.state = State::Bit;
                    }
                    s
                }
                State::Bit => {
                    let s = self.tone(self.current_bit);
                    non_idle += 1;
                    self.sample_counter += 1;
                    if self.sample_counter >= self.samples_per_bit {
                        self.sample_counter = 0;
                        self.bit_index += 1;
                        if self.bit_index >= 5 {
                            self.state = State::Stop;
                        } else {
                            self.current_bit = (self.codeword >> self.bit_index) & 1 != 0;
                        }
                    }
                    s
                }
                State::Stop => {
                    let s = self.tone(true);
                    non_idle += 1;
                    self.sample_counter += 1;
                    if self.sample_counter >= self.stop_samples {
                        self.sample_counter = 0;
                        self.state = if !queue.is_empty() {
                            State::Start
                        } else {
                            State::Hold
                        };
                    }
                    s
                }
                State::Hold => {
                    let s = self.tone(true);
                    non_idle += 1;
                    if !queue.is_empty() {
                        self.sample_counter = 0;
                        self.state = State::Start;
                    } else {
                        self.sample_counter += 1;
                        if self.sample_counter >= HOLD_SAMPLES {
                            self.sample_counter = 0;
                            self.state = State::Idle;
                            log::debug!("modulator: Hold -> Idle");
                            on_event(Event::TxState(TxStateEvent::Stop));
                        }
                    }
                    s
                }
            };
            *slot = sample;
        }
        non_idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_with_empty_queue_emits_silence() {
        let mut m = Modulator::new(BaudRate::B50);
        let mut q = TxQueue::new();
        let mut out = [0i16; 32];
        let non_idle = m.modulate(&mut q, &mut out, |_| {});
        assert_eq!(non_idle, 0);
        assert!(out.iter().all(|&s| s == 0));
    }

    #[test]
    fn enqueued_text_drives_modulator_out_of_idle() {
        let mut m = Modulator::new(BaudRate::B50);
        let mut q = TxQueue::new();
        q.enqueue("U", true);
        let mut out = [0i16; 4000];
        let mut started = false;
        let non_idle = m.modulate(&mut q, &mut out, |e| {
            if let Event::TxState(TxStateEvent::Start) = e {
                started = true;
            }
        });
        assert!(started);
        assert!(non_idle > 0);
    }

    #[test]
    fn hold_then_idle_fires_stop_event() {
        let mut m = Modulator::new(BaudRate::B50);
        let mut q = TxQueue::new();
        q.enqueue("U", true);
        let mut out = vec![0i16; SAMPLE_RATE as usize]; // 1s, comfortably past hold timeout
        let mut stopped = false;
        m.modulate(&mut q, &mut out, |e| {
            if let Event::TxState(TxStateEvent::Stop) = e {
                stopped = true;
            }
        });
        assert!(stopped);
    }
}
