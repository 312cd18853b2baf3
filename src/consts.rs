//! Shared numeric constants used across the modem's sub-components.
//!
//! Values come from the ITA2/Baudot FSK convention this crate implements
//! (TIA-968-A territory): 1400/1800 Hz tones, 45/47/50 baud, a 16384-entry
//! sine table indexed by a Q16 phase accumulator. None of these are tunable
//! at the protocol level; the setters on [`crate::Modem`] only ever override
//! the handful the original design exposed (tone frequency, amplitude,
//! stop-bit count, baud).

/// Fixed audio sample rate for the modem (spec §6). Resampling to/from this
/// rate is the caller's responsibility.
pub const SAMPLE_RATE: u32 = 48_000;

/// Number of bits in a Baudot codeword.
pub const NBITS: u32 = 5;

/// Number of distinct Baudot codewords (2^NBITS).
pub const NB: usize = 32;

/// Letters shift codeword.
pub const LETR: u8 = 0x1F;
/// Figures shift codeword.
pub const FIGR: u8 = 0x1B;

/// Flag bit set in the ASCII→Baudot table when the character has a Letters
/// encoding.
pub const LETFLAG: u8 = 1 << 6;
/// Flag bit set in the ASCII→Baudot table when the character has a Figures
/// encoding.
pub const FIGFLAG: u8 = 1 << 5;

/// Replacement glyph for ASCII values with no Baudot representation.
pub const REPLACEMENT_CHAR: u8 = b'\'';

/// Default mark ("1") tone, Hz.
pub const DEFAULT_ONE_HZ: f64 = 1400.0;
/// Default space ("0") tone, Hz.
pub const DEFAULT_ZERO_HZ: f64 = 1800.0;
/// Default peak modulator amplitude.
pub const DEFAULT_AMP: i16 = 16384;

/// Sine LUT size; one full period, indexed by the top 14 bits of a Q16 phase.
pub const SINE_LUT_SIZE: usize = 16384;

/// Demodulator resonator bandwidth factor.
pub const BETA: f64 = 0.95;

/// Demodulator signal/energy validity ratio.
pub const MIN_THRESH: i32 = 3;

/// Effective demodulator bit-sampling baud. Fixed regardless of the
/// autobaud estimate (§9 design note 4 / REDESIGN FLAG 4): 47 baud tolerates
/// +-10% timing error against all three real rates (45/47/50), so the
/// estimate is a report only, never fed back into bit timing.
pub const DEM_BAUD: u32 = 47;

/// Running-sum filter history depth (20-sample boxcar).
pub const FILTER_LEN: usize = 20;

/// TX queue capacity, in Baudot codewords.
pub const TX_QUEUE_CAPACITY: usize = 1024;

/// 200ms top-level TX-to-RX handover timeout, in samples.
pub const TX_TIMEOUT_SAMPLES: u32 = 200 * SAMPLE_RATE / 1000;

/// 200ms post-transmit hold-tone duration, in samples.
pub const HOLD_SAMPLES: u32 = 200 * SAMPLE_RATE / 1000;

/// Line-fold threshold: start looking for a whitespace char to fold at.
pub const CRLF_FOLD_START: u32 = 60;
/// Line-fold threshold: force a CR-LF unconditionally past this count.
pub const CRLF_FOLD_FORCE: u32 = 70;
/// Shift-economy threshold: re-assert the current shift past this count.
pub const SHIFT_REASSERT: u32 = 70;
