use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Thermal voltage at 300 K (V).
const VT: f64 = 0.025_85;
/// Sample area matching the analyzer's default (cm²).
const AREA_CM2: f64 = 0.121;

/// Single-diode cell with a shunt path. Returns the instrument current in A:
/// forward diode current is positive, photocurrent negative.
struct Diode {
    saturation_a: f64,
    ideality: f64,
    shunt_ohm: f64,
    photocurrent_a: f64,
}

impl Diode {
    fn current(&self, v: f64) -> f64 {
        self.saturation_a * ((v / (self.ideality * VT)).exp() - 1.0) + v / self.shunt_ohm
            - self.photocurrent_a
    }
}

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

/// Sweep -0.2 V → 1.0 V in 10 mV steps and render an instrument export.
fn render_sweep(cell: &Diode, noise_a: f64, comma_decimals: bool, rng: &mut SimpleRng) -> String {
    let mut out = String::from("Current(A)\tVoltage(V)\n");
    for k in 0..=120 {
        let v = -0.2 + k as f64 * 0.01;
        let i = cell.current(v) + rng.gauss(0.0, noise_a);
        let mut line = format!("{i:.6E}\t{v:.3}");
        if comma_decimals {
            line = line.replace('.', ",");
        }
        let _ = writeln!(out, "{line}");
    }
    out
}

fn write_file(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write sample file");
    println!("Wrote {}", path.display());
}

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let mut rng = SimpleRng::new(42);

    // Jsc ≈ 20 mA/cm² and Voc ≈ 0.6 V for the reference cell.
    let photocurrent = 0.020 * AREA_CM2;
    let cells = [
        ("cell_A", 4.6e-10, 1.5, 5_000.0, 1.0),
        ("cell_B", 2.0e-9, 1.6, 2_000.0, 0.85),
        ("cell_C", 8.0e-11, 1.4, 10_000.0, 1.1),
    ];

    for (idx, &(name, i0, n, rsh, light_scale)) in cells.iter().enumerate() {
        let dark = Diode {
            saturation_a: i0,
            ideality: n,
            shunt_ohm: rsh,
            photocurrent_a: 0.0,
        };
        let light = Diode {
            photocurrent_a: photocurrent * light_scale,
            ..dark
        };

        // Every second file uses comma decimals like European instrument locales.
        let comma = idx % 2 == 1;
        write_file(
            &out_dir,
            &format!("dark_{name}.txt"),
            &render_sweep(&dark, 2e-8, comma, &mut rng),
        );
        write_file(
            &out_dir,
            &format!("light_{name}.txt"),
            &render_sweep(&light, 2e-6, comma, &mut rng),
        );
    }

    // Malformed rows are dropped by the loader; a header-only file fails.
    let mut noisy = render_sweep(
        &Diode {
            saturation_a: 4.6e-10,
            ideality: 1.5,
            shunt_ohm: 5_000.0,
            photocurrent_a: photocurrent,
        },
        2e-6,
        false,
        &mut rng,
    );
    noisy.push_str("OVERFLOW\t0.990\n-1.0E-3\n");
    write_file(&out_dir, "light_cell_D_with_bad_rows.txt", &noisy);
    write_file(&out_dir, "empty_export.txt", "Current(A)\tVoltage(V)\n");
}
