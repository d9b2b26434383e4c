//! The control channel: live pot updates from a collaborator process.
//!
//! Messages are fixed-format: the byte `p`, a pot index `0`–`3`, and two
//! decimal digits mapping to 0.00–0.99. Anything else is logged and
//! dropped — a garbled control stream must never take down the audio path.
//!
//! Updates land in [`SharedPots`] through relaxed atomic stores. The audio
//! thread snapshots the pots once per block, so a write becomes audible no
//! later than the next block boundary (a few milliseconds at the default
//! block size); that staleness bound is the whole synchronization story,
//! by design.

use ruido_core::{Effect, Pots, SharedPots};
use std::io::Read;
use std::sync::Arc;
use tracing::{info, warn};

/// One decoded control message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotUpdate {
    /// Pot index, 0–3
    pub index: usize,
    /// Two-digit value, 0–99
    pub value: u8,
}

impl PotUpdate {
    /// The pot value as a fraction in \[0, 0.99\].
    pub fn fraction(self) -> f32 {
        f32::from(self.value) / 100.0
    }
}

/// Decode one 4-byte control message. Returns `None` for anything
/// malformed.
pub fn parse_message(bytes: &[u8]) -> Option<PotUpdate> {
    let &[b'p', index, d1, d2] = bytes else {
        return None;
    };
    if !index.is_ascii_digit() || !d1.is_ascii_digit() || !d2.is_ascii_digit() {
        return None;
    }
    let index = (index - b'0') as usize;
    if index > 3 {
        return None;
    }
    Some(PotUpdate {
        index,
        value: (d1 - b'0') * 10 + (d2 - b'0'),
    })
}

/// Run the control loop: read messages from `source` until EOF, applying
/// each to the shared pots.
///
/// `mirror` is a private instance of the running effect used only to log
/// the derived parameters after each accepted update — the audio thread's
/// instance is never touched from here.
pub fn control_loop<R: Read>(
    mut source: R,
    shared: &Arc<SharedPots>,
    mirror: &dyn Effect,
) {
    let mut buf = [0u8; 4];
    loop {
        // Skip message separators so both raw 4-byte streams and
        // line-oriented senders work
        let mut first = [0u8; 1];
        match source.read_exact(&mut first) {
            Ok(()) => {}
            Err(_) => return,
        }
        if first[0] == b'\n' || first[0] == b'\r' {
            continue;
        }
        buf[0] = first[0];
        if source.read_exact(&mut buf[1..]).is_err() {
            return;
        }

        match parse_message(&buf) {
            Some(update) => {
                shared.store(update.index, update.fraction());
                let pots = shared.snapshot();
                info!(
                    pot = update.index,
                    value = update.fraction(),
                    "{}",
                    mirror.describe(&pots)
                );
            }
            None => {
                warn!(message = ?buf, "dropping malformed control message");
            }
        }
    }
}

/// Spawn the control thread reading stdin.
pub fn spawn_stdin_control(shared: Arc<SharedPots>, mirror: Box<dyn Effect + Send>) {
    std::thread::spawn(move || {
        control_loop(std::io::stdin().lock(), &shared, mirror.as_ref());
    });
}

/// Parse a pot value given on the command line, rejecting out-of-range
/// knobs early instead of silently clamping a typo.
pub fn parse_pot_value(text: &str) -> Result<f32, String> {
    let value: f32 = text
        .parse()
        .map_err(|_| format!("'{text}' is not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("pot value {value} is outside [0, 1]"));
    }
    Ok(value)
}

/// Build a [`Pots`] from up to four command-line values, defaulting the
/// rest to center.
pub fn pots_from_args(values: &[f32]) -> Pots {
    let mut all = [0.5f32; 4];
    for (slot, &value) in all.iter_mut().zip(values) {
        *slot = value;
    }
    Pots::new(all)
}
