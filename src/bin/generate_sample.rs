use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Seasonal temperature in °F for a day of the year (northern hemisphere).
fn seasonal_fahrenheit(day_of_year: f64) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * (day_of_year - 200.0) / 365.0;
    55.0 + 25.0 * phase.cos()
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data.csv".to_string());

    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .context("invalid start date")?
        .and_hms_opt(12, 0, 0)
        .context("invalid start time")?;
    let stations = ["Harbor", "Airport, North"];
    let days = 120;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Date", "Station", "TempF", "Humidity", "Notes"])?;

    let mut rows = 0usize;
    for day in 0..days {
        let when = start + Duration::days(day);
        for station in &stations {
            let temp = seasonal_fahrenheit(day as f64) + rng.gauss(0.0, 4.0);
            let humidity = (65.0 + rng.gauss(0.0, 12.0)).clamp(5.0, 100.0);

            // Sprinkle in the kind of dirt real sensor exports carry.
            let roll = rng.next_f64();
            let (temp_cell, hum_cell, note) = if roll < 0.02 {
                ("ERR".to_string(), format!("{humidity:.0}"), "sensor fault")
            } else if roll < 0.04 {
                (format!("{temp:.1}"), String::new(), "humidity offline")
            } else if roll < 0.05 {
                (String::new(), String::new(), "station down")
            } else {
                (format!("{temp:.1}"), format!("{humidity:.0}"), "")
            };

            writer.write_record([
                when.format("%Y-%m-%d %H:%M:%S").to_string(),
                station.to_string(),
                temp_cell,
                hum_cell,
                note.to_string(),
            ])?;
            rows += 1;
        }
    }
    writer.flush().context("flushing CSV")?;

    log::info!("generated {rows} rows for {} stations", stations.len());
    println!("Wrote {rows} weather observations (°F) to {output_path}");
    Ok(())
}
