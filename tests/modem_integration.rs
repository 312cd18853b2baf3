use obl::prelude::*;

#[test]
fn transmitting_hi_fires_start_then_stop() {
    let mut started = false;
    let mut stopped = false;
    let mut chars = Vec::new();
    let mut modem = Modem::new(BaudRate::B50, |e| match e {
        Event::TxState(TxStateEvent::Start) => started = true,
        Event::TxState(TxStateEvent::Stop) => stopped = true,
        Event::DemodChar(c) => chars.push(c),
        _ => {}
    });

    let consumed = modem.enqueue_text("HI");
    assert_eq!(consumed, 2);

    // A full second of audio comfortably covers two characters plus the
    // 200ms post-transmit hold tone at 50 baud.
    let mut audio = vec![0i16; 48_000];
    let non_idle = modem.modulate(&mut audio);

    assert!(started, "modulator should have reported TX start");
    assert!(stopped, "modulator should have returned to idle after the hold tone");
    assert!(non_idle > 0);
    assert!(audio.iter().any(|&s| s != 0));
    let _ = chars;
}

#[test]
fn demodulate_is_gated_while_transmitting() {
    let mut demod_events = 0usize;
    let mut modem = Modem::new(BaudRate::B50, |e| {
        if matches!(e, Event::DemodChar(_) | Event::DemodCase(_) | Event::DemodAbort) {
            demod_events += 1;
        }
    });

    modem.enqueue_text("HI");
    let mut audio = vec![0i16; 4000];
    modem.modulate(&mut audio);

    // Immediately feeding the TX audio back in should be a no-op: the
    // arbiter is still in the MOD state right after a fresh transmission.
    modem.demodulate(&audio);
    assert_eq!(demod_events, 0);
}

#[test]
fn reset_clears_tx_queue_and_idles_modulator() {
    let mut modem = Modem::new(BaudRate::B47, |_| {});
    modem.enqueue_text("THE QUICK BROWN FOX");
    modem.reset();

    let mut audio = vec![0i16; 100];
    let non_idle = modem.modulate(&mut audio);
    assert_eq!(non_idle, 0, "a reset queue should have nothing left to send");
    assert!(audio.iter().all(|&s| s == 0));
}

#[test]
fn enqueue_text_returns_full_length_for_short_input() {
    let mut modem = Modem::new(BaudRate::B50, |_| {});
    assert_eq!(modem.enqueue_text("hello world"), "hello world".len());
}

#[test]
fn two_instance_round_trip_recovers_enqueued_text() {
    let mut tx = Modem::new(BaudRate::B47, |_| {});
    let consumed = tx.enqueue_text("SOS");
    assert_eq!(consumed, 3);

    // Four codewords (LETR + S, O, S) at ~7.5 bit-periods each, comfortably
    // inside 64k samples at 47 baud, plus the 200ms post-transmit hold tone.
    let mut tx_audio = vec![0i16; 64_000];
    tx.modulate(&mut tx_audio);
    assert!(tx_audio.iter().any(|&s| s != 0));

    // Silence prelude/postlude either side of the transmitted tone, as a
    // real line would have around an utterance.
    let mut line = vec![0i16; 2_000];
    line.extend_from_slice(&tx_audio);
    line.extend(std::iter::repeat(0i16).take(2_000));

    let mut decoded = Vec::new();
    let mut rx = Modem::new(BaudRate::B47, |e| {
        if let Event::DemodChar(c) = e {
            decoded.push(c);
        }
    });
    rx.demodulate(&line);

    assert_eq!(decoded, b"SOS");
}

#[test]
fn tty_detector_needs_a_sustained_run() {
    let mut detector = TtyDetector::new();
    let samples: Vec<i16> = (0..(22 * 10))
        .map(|i| {
            let t = i as f64 / obl::tty_detect::SAMPLE_RATE as f64;
            (20000.0 * (2.0 * std::f64::consts::PI * 1800.0 * t).sin()) as i16
        })
        .collect();
    let mut detected = false;
    for s in samples {
        detected = detector.push_sample(s);
    }
    assert!(!detected, "10 windows is well short of the 64-window run target");
}
