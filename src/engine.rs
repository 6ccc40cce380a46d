use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::config::{Config, PlacementMode};
use crate::error::EngineError;
use crate::geometry::BoundingBox;
use crate::measure::Measurer;
use crate::palette::Color;
use crate::search::{find_position, OccupiedSet, SearchMode};
use crate::sizing::compute_size;

// ── Word ──────────────────────────────────────────────────────────────────────

/// One input term and its weight (e.g. a frequency count).
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Word {
    pub text: String,
    pub weight: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self { text: text.into(), weight }
    }
}

/// Order words heaviest first.
///
/// The sort is stable, so equal weights keep their input order.  NaN weights
/// sort after everything else.
pub fn rank_words(words: &[Word]) -> Vec<&Word> {
    let key = |w: &Word| if w.weight.is_nan() { f64::NEG_INFINITY } else { w.weight };

    let mut ranked: Vec<&Word> = words.iter().collect();
    ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
    ranked
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordList {
    List(Vec<Word>),
    Map(BTreeMap<String, f64>),
}

/// Parse a word list from JSON.
///
/// Accepts either an array of `{ "text": ..., "weight": ... }` objects (input
/// order is kept, which decides ties) or an object mapping word → weight
/// (ties then fall back to alphabetical order).
pub fn words_from_json(json: &str) -> Result<Vec<Word>, serde_json::Error> {
    Ok(match serde_json::from_str(json)? {
        WordList::List(words) => words,
        WordList::Map(map) => map.into_iter().map(|(text, weight)| Word { text, weight }).collect(),
    })
}

// ── Run output ────────────────────────────────────────────────────────────────

/// A word that found a free position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    /// Position in the weight ordering (0 = heaviest).
    pub rank: usize,
    /// Final box on the canvas.
    pub bbox: BoundingBox,
    pub font_size: f32,
    pub color: Color,
}

/// Why a word is missing from the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnplacedReason {
    /// The search ran out of probes.
    NoFreePosition,
    /// The run was cancelled before this word was tried.
    Cancelled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnplacedWord {
    pub text: String,
    pub rank: usize,
    pub font_size: f32,
    pub reason: UnplacedReason,
}

/// Everything a render sink needs to draw one word cloud.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Placed words in placement order.
    pub placed: Vec<PlacedWord>,
    pub unplaced: Vec<UnplacedWord>,
    /// Every probed candidate box, in probe order.  Empty unless debug is on.
    pub debug_outlines: Vec<BoundingBox>,
    pub cancelled: bool,
}

impl Layout {
    fn empty(config: &Config) -> Self {
        Self {
            width: config.width(),
            height: config.height(),
            background: config.background_color(),
            placed: Vec::new(),
            unplaced: Vec::new(),
            debug_outlines: Vec::new(),
            cancelled: false,
        }
    }
}

// ── PlacementEngine ───────────────────────────────────────────────────────────

/// Lifecycle of a [`PlacementEngine`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Ready,
    /// Working on the word with this rank.
    Placing(usize),
    Done,
}

/// Places words one at a time, heaviest first, never moving a word once it
/// is down.
///
/// An engine runs once.  A second [`run`](PlacementEngine::run) fails with
/// [`EngineError::NotReady`] until [`reset`](PlacementEngine::reset) clears
/// the occupied set.
pub struct PlacementEngine<'c> {
    config: &'c Config,
    occupied: OccupiedSet<'c>,
    rng: StdRng,
    state: RunState,
}

impl<'c> PlacementEngine<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            occupied: OccupiedSet::new(config.mask()),
            rng: Self::make_rng(config),
            state: RunState::Ready,
        }
    }

    fn make_rng(config: &Config) -> StdRng {
        match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn occupied(&self) -> &OccupiedSet<'c> {
        &self.occupied
    }

    /// Forget all placed words and return to `Ready`.  A seeded generator is
    /// reseeded, so the next run repeats the previous one.
    pub fn reset(&mut self) {
        self.occupied.clear();
        self.rng = Self::make_rng(self.config);
        self.state = RunState::Ready;
    }

    /// Place `words` and return the resulting layout.
    pub fn run<M: Measurer + ?Sized>(
        &mut self,
        words: &[Word],
        measurer: &M,
    ) -> Result<Layout, EngineError> {
        self.run_with_cancel(words, measurer, &AtomicBool::new(false))
    }

    /// Like [`run`](PlacementEngine::run), but checks `cancel` before every
    /// word.  Once it is set, the remaining words are reported as
    /// [`UnplacedReason::Cancelled`] and the layout is marked cancelled.
    pub fn run_with_cancel<M: Measurer + ?Sized>(
        &mut self,
        words: &[Word],
        measurer: &M,
        cancel: &AtomicBool,
    ) -> Result<Layout, EngineError> {
        if self.state != RunState::Ready {
            return Err(EngineError::NotReady(self.state));
        }

        let config = self.config;
        let (width, height) = (config.width(), config.height());
        let ranked = rank_words(words);
        let total = ranked.len();

        let mut layout = Layout::empty(config);
        let mut outlines: Vec<BoundingBox> = Vec::new();

        for (rank, word) in ranked.iter().enumerate() {
            let font_size = compute_size(
                rank,
                total,
                config.font_min_size(),
                config.font_max_size(),
                config.size_function(),
            );

            if cancel.load(Ordering::Relaxed) {
                layout.cancelled = true;
                layout.unplaced.push(UnplacedWord {
                    text: word.text.clone(),
                    rank,
                    font_size,
                    reason: UnplacedReason::Cancelled,
                });
                continue;
            }

            self.state = RunState::Placing(rank);

            // Only the extent matters for placement.
            let bbox = measurer.measure(&word.text, font_size).at(0, 0);

            let mut record = |candidate: &BoundingBox| {
                if config.debug() {
                    outlines.push(*candidate);
                }
            };
            let mode = match config.placement() {
                PlacementMode::Spiral => SearchMode::Spiral,
                PlacementMode::Random => SearchMode::Random(&mut self.rng),
            };

            match find_position(&bbox, &self.occupied, width, height, mode, config.search(), &mut record) {
                Some((x, y)) => {
                    let placed = bbox.at(x, y);
                    let color = config.palette().color_for(layout.placed.len());
                    self.occupied.insert(placed);

                    log::debug!(
                        "placed {:?} (rank {rank}, size {font_size:.1}) at {x},{y} {}x{}",
                        word.text,
                        placed.width,
                        placed.height
                    );

                    layout.placed.push(PlacedWord {
                        text: word.text.clone(),
                        rank,
                        bbox: placed,
                        font_size,
                        color,
                    });
                }
                None => {
                    log::warn!(
                        "dropped {:?} (rank {rank}, size {font_size:.1}, {}x{}): no free position",
                        word.text,
                        bbox.width,
                        bbox.height
                    );

                    layout.unplaced.push(UnplacedWord {
                        text: word.text.clone(),
                        rank,
                        font_size,
                        reason: UnplacedReason::NoFreePosition,
                    });
                }
            }
        }

        self.state = RunState::Done;
        layout.debug_outlines = outlines;

        log::info!(
            "placement finished: {} of {total} words placed on {width}x{height}{}",
            layout.placed.len(),
            if layout.cancelled { " (cancelled)" } else { "" }
        );

        Ok(layout)
    }
}

/// One-shot convenience: build an engine for `config` and run it.
pub fn place_words<M: Measurer + ?Sized>(
    config: &Config,
    words: &[Word],
    measurer: &M,
) -> Result<Layout, EngineError> {
    PlacementEngine::new(config).run(words, measurer)
}
