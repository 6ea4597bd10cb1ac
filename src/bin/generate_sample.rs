//! Writes `sample_data.csv`, a deterministic table with the default column
//! names, for running the dashboard offline with `--file sample_data.csv`.

use anyhow::{Context, Result};

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

/// (continent, baseline life expectancy, baseline GDP per capita)
const CONTINENTS: &[(&str, f64, f64)] = &[
    ("Africa", 42.0, 1200.0),
    ("Americas", 58.0, 4500.0),
    ("Asia", 50.0, 2500.0),
    ("Europe", 66.0, 8000.0),
    ("Oceania", 69.0, 10000.0),
];

const COUNTRIES_PER_CONTINENT: usize = 6;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["country", "year", "pop", "continent", "lifeExp", "gdpPercap"])?;

    let mut rows = 0usize;
    for &(continent, life_base, gdp_base) in CONTINENTS {
        for c in 0..COUNTRIES_PER_CONTINENT {
            let country = format!("{continent} {}", c + 1);
            let country_gdp = gdp_base * (1.0 + rng.gauss(0.0, 0.3)).max(0.2);
            for (step, year) in (1952..=2007).step_by(5).enumerate() {
                let growth = 1.0 + step as f64 * 0.04;
                let life_exp = life_base + step as f64 * 1.5 + rng.gauss(0.0, 2.0);
                let gdp = country_gdp * growth * (1.0 + rng.gauss(0.0, 0.05));
                let pop = (1_000_000.0 * (1.0 + rng.next_f64() * 50.0)) as u64;

                writer.write_record([
                    country.clone(),
                    year.to_string(),
                    pop.to_string(),
                    continent.to_string(),
                    format!("{life_exp:.3}"),
                    format!("{gdp:.6}"),
                ])?;
                rows += 1;
            }
        }
    }

    // A couple of incomplete rows, as found in real exports.
    writer.write_record(["Unknown", "2007", "1000", "", "55.000", "3000.0"])?;
    writer.write_record(["Atlantis", "2007", "1000", "Europe", "NaN", "9000.0"])?;
    rows += 2;

    writer.flush()?;
    println!("Wrote {rows} rows to {output_path}");
    Ok(())
}
