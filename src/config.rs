//! Small enums that replace the original's raw-int "contract violation"
//! parameters (`obl_set_speed(OBL_BAUD_INVALID)` etc.) with types that make
//! the invalid states unrepresentable.

/// One of the three standard Baudot teletype rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudRate {
    B45,
    B47,
    B50,
}

impl BaudRate {
    pub fn baud(self) -> u32 {
        match self {
            BaudRate::B45 => 45,
            BaudRate::B47 => 47,
            BaudRate::B50 => 50,
        }
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        BaudRate::B50
    }
}

/// Stop-bit length, in half-bit units (the original's `OBL_STOP_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    OnePointFive,
    Two,
}

impl StopBits {
    /// Stop duration expressed in units of half a data bit.
    pub fn half_bits(self) -> u32 {
        match self {
            StopBits::One => 2,
            StopBits::OnePointFive => 3,
            StopBits::Two => 4,
        }
    }
}

impl Default for StopBits {
    fn default() -> Self {
        StopBits::OnePointFive
    }
}

/// Shift state shared by the TX queue's remembered case and the
/// demodulator's decode case. `Whitespace` and `NoCase` only ever appear on
/// the TX side; the demodulator only ever holds `Letters` or `Figures`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftState {
    Letters,
    Figures,
    Whitespace,
    NoCase,
}

/// The autobaud estimator's current best guess, or a report that it hasn't
/// converged (or is disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudEstimate {
    Valid(BaudRate),
    Invalid,
}
