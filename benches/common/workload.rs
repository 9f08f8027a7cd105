//! Deterministic click-stream generators for tracker benchmarks.
//!
//! Streams are reproducible from a seed so runs stay comparable; no RNG
//! crates are pulled into the harness.

use trendkit::traits::CoreTracker;

/// Shape of the id distribution a stream draws from.
#[derive(Debug, Clone, Copy)]
pub enum StreamShape {
    /// Every id in `[0, universe)` is equally likely.
    Uniform,
    /// A small hot set absorbs most clicks.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Zipfian skew (YCSB parameterization); `theta` near 1.0 is steep.
    Zipfian { theta: f64 },
}

/// Seeded generator yielding one item id per call.
#[derive(Debug, Clone)]
pub struct ClickStream {
    universe: u64,
    rng: SplitMix64,
    state: ShapeState,
}

/// Per-shape state precomputed at construction so `next_id` stays cheap.
#[derive(Debug, Clone)]
enum ShapeState {
    Uniform,
    Hotset { hot_size: u64, hot_prob: f64 },
    Zipfian(Zipf),
}

impl ClickStream {
    pub fn new(universe: u64, shape: StreamShape, seed: u64) -> Self {
        let universe = universe.max(1);
        let state = match shape {
            StreamShape::Uniform => ShapeState::Uniform,
            StreamShape::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_size = ((universe as f64) * hot_fraction.clamp(0.0, 1.0)).round() as u64;
                ShapeState::Hotset {
                    hot_size: hot_size.clamp(1, universe),
                    hot_prob: hot_prob.clamp(0.0, 1.0),
                }
            },
            StreamShape::Zipfian { theta } => ShapeState::Zipfian(Zipf::new(universe, theta)),
        };
        Self {
            universe,
            rng: SplitMix64::new(seed),
            state,
        }
    }

    pub fn next_id(&mut self) -> u64 {
        match &self.state {
            ShapeState::Uniform => self.rng.next_u64() % self.universe,
            ShapeState::Hotset { hot_size, hot_prob } => {
                let (hot_size, hot_prob) = (*hot_size, *hot_prob);
                if self.rng.next_f64() < hot_prob || hot_size == self.universe {
                    self.rng.next_u64() % hot_size
                } else {
                    hot_size + self.rng.next_u64() % (self.universe - hot_size)
                }
            },
            ShapeState::Zipfian(zipf) => {
                let draw = self.rng.next_f64();
                zipf.rank_for(draw)
            },
        }
    }
}

/// Feed `operations` generated clicks into a tracker.
///
/// Returns how many clicks the tracker accepted so callers can report
/// throughput.
pub fn run_clicks<T>(tracker: &mut T, stream: &mut ClickStream, operations: usize) -> u64
where
    T: CoreTracker<u64>,
{
    let mut delivered = 0u64;

    for _ in 0..operations {
        if tracker.record_click(stream.next_id()).is_ok() {
            delivered += 1;
        }
    }

    delivered
}

/// Inverse-CDF Zipfian sampler over ranks `0..item_count`.
///
/// Follows the YCSB generator: the harmonic normalizer and the `alpha`/`eta`
/// terms are fixed at construction, so each draw is O(1).
#[derive(Debug, Clone)]
struct Zipf {
    item_count: u64,
    skew: f64,
    harmonic_n: f64,
    alpha: f64,
    eta: f64,
}

impl Zipf {
    fn new(item_count: u64, theta: f64) -> Self {
        // The closed form degenerates at theta == 1.
        let skew = theta.clamp(0.0, 0.9999);
        let harmonic = |n: u64| (1..=n).map(|i| (i as f64).powf(-skew)).sum::<f64>();
        let harmonic_2 = harmonic(2);
        let harmonic_n = harmonic(item_count);
        let alpha = 1.0 / (1.0 - skew);
        let eta = (1.0 - (2.0 / item_count as f64).powf(1.0 - skew))
            / (1.0 - harmonic_2 / harmonic_n);

        Self {
            item_count,
            skew,
            harmonic_n,
            alpha,
            eta,
        }
    }

    /// Map a uniform draw in `[0, 1)` to a rank, most popular first.
    fn rank_for(&self, u: f64) -> u64 {
        let scaled = u * self.harmonic_n;
        if scaled < 1.0 {
            return 0;
        }
        if scaled < 1.0 + 0.5f64.powf(self.skew) {
            return 1;
        }
        let spread = (self.item_count as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (spread as u64).min(self.item_count - 1)
    }
}

/// SplitMix64: tiny, seedable, and good enough to shape benchmark streams.
#[derive(Debug, Clone, Copy)]
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        // 53 mantissa bits give a uniform draw in [0, 1).
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}
