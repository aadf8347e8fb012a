// Temperature store -> chart window

use chrono::{DateTime, Duration, TimeZone};
use serde_json::Value;

use super::{f64_array_at, round1, round2};
use crate::models::{TemperatureChannel, TemperatureHistory};

/// 5 minutes at Moonraker's 1 Hz store rate.
pub const MAX_HISTORY_POINTS: usize = 300;

/// Build the chart window from `/server/temperature_store`.
///
/// Each channel keeps its newest `min(len, 300)` samples. The store has no per-sample
/// time, so labels are synthesized at 1 s spacing ending at `now`: for `count` labels,
/// index `i` is `now - (count - 1 - i)` seconds, formatted `HH:MM`. `count` follows the
/// longer channel.
pub fn temperature_history<Tz>(store: &Value, now: DateTime<Tz>) -> TemperatureHistory
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let extruder = channel(store.get("extruder"));
    let bed = channel(store.get("heater_bed"));

    let count = extruder.len().max(bed.len());
    let timestamps = (0..count)
        .map(|i| {
            let back = (count - 1 - i) as i64;
            (now.clone() - Duration::seconds(back))
                .format("%H:%M")
                .to_string()
        })
        .collect();

    TemperatureHistory {
        timestamps,
        extruder,
        bed,
    }
}

fn channel(raw: Option<&Value>) -> TemperatureChannel {
    let Some(raw) = raw else {
        return TemperatureChannel::default();
    };
    let temperatures = f64_array_at(raw, "temperatures");
    let keep = temperatures.len().min(MAX_HISTORY_POINTS);

    TemperatureChannel {
        temperatures: tail(&temperatures, keep).into_iter().map(round1).collect(),
        targets: tail(&f64_array_at(raw, "targets"), keep)
            .into_iter()
            .map(round1)
            .collect(),
        powers: tail(&f64_array_at(raw, "powers"), keep)
            .into_iter()
            .map(round2)
            .collect(),
    }
}

/// Last `n` values; left-padded with zeros when shorter (sensors without a target/power).
fn tail(values: &[f64], n: usize) -> Vec<f64> {
    if values.len() >= n {
        values[values.len() - n..].to_vec()
    } else {
        let mut out = vec![0.0; n - values.len()];
        out.extend_from_slice(values);
        out
    }
}
