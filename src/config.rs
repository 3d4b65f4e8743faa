use std::{env, path::PathBuf, time::Duration};

use crate::popup::ContactCard;

// Runtime constants read from the environment (not gameplay tuning).

pub fn frame_rate() -> u32 {
    env::var("SHOOTER_FPS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|&fps| fps > 0)
        .unwrap_or(60)
}

pub fn frame_interval() -> Duration {
    Duration::from_micros(1_000_000 / u64::from(frame_rate()))
}

pub fn log_file() -> PathBuf {
    env::var("SHOOTER_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("canvas_shooter.log"))
}

/// Fixed RNG seed for reproducible runs; entropy when unset.
pub fn rng_seed() -> Option<u64> {
    env::var("SHOOTER_SEED").ok().and_then(|v| v.parse().ok())
}

/// Frames a key stays held after its last press/repeat event.
pub fn key_hold_frames() -> u64 {
    env::var("SHOOTER_KEY_HOLD_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8)
}

/// Contact card from `SHOOTER_CONTACT_*`, field by field over the default.
pub fn contact_card() -> ContactCard {
    card_from(|name| env::var(name).ok())
}

fn card_from(lookup: impl Fn(&str) -> Option<String>) -> ContactCard {
    let defaults = ContactCard::default();
    ContactCard {
        name: lookup("SHOOTER_CONTACT_NAME").unwrap_or(defaults.name),
        website: lookup("SHOOTER_CONTACT_WEBSITE").unwrap_or(defaults.website),
        email: lookup("SHOOTER_CONTACT_EMAIL").unwrap_or(defaults.email),
        github: lookup("SHOOTER_CONTACT_GITHUB").unwrap_or(defaults.github),
    }
}
