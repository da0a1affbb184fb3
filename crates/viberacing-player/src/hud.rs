//! Lap readout, shown in the window title

use viberacing_sim::{CarView, RacePhase, RaceSnapshot};

/// `Blue: Laps 2 | Lap 4.05s | Last 11.73s`
pub fn car_line(car: &CarView) -> String {
    let last = car
        .last_lap
        .map_or_else(|| "--".to_string(), |t| format!("{:.2}s", t));
    format!(
        "{}: Laps {} | Lap {:.2}s | Last {}",
        car.name, car.laps, car.current_lap_time, last
    )
}

fn phase_label(snapshot: &RaceSnapshot) -> Option<String> {
    match snapshot.phase {
        RacePhase::Countdown => snapshot.countdown.map(|n| format!("Starting in {}", n)),
        RacePhase::FlagWave => Some("GO!".to_string()),
        RacePhase::Active => None,
    }
}

pub fn window_title(base: &str, snapshot: &RaceSnapshot) -> String {
    let mut parts = vec![base.to_string()];
    parts.extend(phase_label(snapshot));
    parts.extend(snapshot.cars.iter().map(car_line));
    parts.join("  ||  ")
}
