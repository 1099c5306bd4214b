// Human-readable labels for elapsed-second offsets.
// All inputs are offsets from the start of the uploaded file, not wall-clock times.

use crate::models::TimeScale;

/// `{h}h {m}m {s}s` with leading zero components omitted ("1h 5m 0s", "5m 2s", "42s").
/// Used for bucket start/end labels in tooltips.
pub fn format_hms(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Like [`format_hms`] but with a day component for multi-day series.
pub fn format_elapsed(seconds: i64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {secs}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Compact axis label for an aggregated bucket: `{H}h:{MM}` past the first
/// hour (minutes omitted when zero), `{M}m` below it.
pub fn format_bucket_label(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{hours}h:{minutes:02}")
        } else {
            format!("{hours}h")
        }
    } else {
        format!("{minutes}m")
    }
}

/// Axis tick label whose form depends on the total displayed duration:
/// day/hour past 2 days, hour:minute past 2 hours, minute:second below.
pub fn format_tick_label(seconds: i64, total_duration: i64) -> String {
    if total_duration >= 2 * 86_400 {
        let days = seconds / 86_400;
        let hours = (seconds % 86_400) / 3600;
        if days == 0 {
            return format!("{hours}h");
        }
        if hours == 0 {
            return format!("{days}d");
        }
        return format!("{days}d {hours}h");
    }

    if total_duration >= 2 * 3600 {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        if minutes > 0 {
            return format!("{hours}h:{minutes:02}m");
        }
        return format!("{hours}h");
    }

    let minutes = seconds / 60;
    let secs = seconds % 60;
    if minutes == 0 {
        format!("{secs}s")
    } else if secs > 0 {
        format!("{minutes}m:{secs}s")
    } else {
        format!("{minutes}m")
    }
}

/// Tick label when the user pins the time scale instead of auto-detecting it.
pub fn format_scaled_label(seconds: i64, scale: TimeScale) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;

    match scale {
        TimeScale::Days => {
            if days == 0 {
                format!("{hours}h")
            } else {
                format!("{days}d {hours}h")
            }
        }
        TimeScale::Hours => {
            if days == 0 && hours == 0 {
                format!("{minutes}m")
            } else {
                format!("{}h {minutes}m", days * 24 + hours)
            }
        }
        TimeScale::Minutes => format!("{}m", seconds / 60),
        TimeScale::Seconds => format!("{seconds}s"),
    }
}
