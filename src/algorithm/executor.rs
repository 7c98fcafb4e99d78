use crate::{
    algorithm::bitset::TileBitset,
    algorithm::propagation::{CandidateFilter, Wavefront},
    algorithm::selection::{FieldSummary, select_collapse_point, weighted_pick},
    io::error::{Result, invalid_parameter},
    math::random::RandomSource,
    spatial::grid::Field,
    spatial::tiles::{TileCatalog, TileExtractor},
};
use log::{debug, trace};
use std::hash::Hash;

/// Read-only observer of collapse progress
///
/// Called once after each forced collapse and once after every cell the
/// wavefront re-filters, with the coordinates of that cell. Observation is
/// synchronous and costs a call per touched cell, so throughput-sensitive
/// callers should run without one.
pub trait CollapseObserver<T> {
    /// Inspect the engine after cell `(x, y)` changed
    fn observe(&mut self, wave: &Wave<T>, x: usize, y: usize);
}

impl<T, F> CollapseObserver<T> for F
where
    F: FnMut(&Wave<T>, usize, usize),
{
    fn observe(&mut self, wave: &Wave<T>, x: usize, y: usize) {
        (*self)(wave, x, y);
    }
}

/// Wave function collapse engine over a fixed-size field
///
/// Owns the field, the catalog, the random source and every scratch buffer
/// used while collapsing, so independent engines never share state.
pub struct Wave<T> {
    catalog: TileCatalog<T>,
    field: Field,
    /// Every tile allowed; stands in for neighbors past the field edge
    everything: TileBitset,
    random: RandomSource,
    filter: CandidateFilter,
    wavefront: Wavefront,
    ties: Vec<usize>,
    pool: Vec<(usize, u64)>,
    initial_uncertainty: usize,
    summary: FieldSummary,
}

impl<T> Wave<T> {
    /// Create an engine from a prepared catalog
    ///
    /// A `rnd_seed` of 0 selects a nondeterministic seed; see
    /// [`Wave::rnd_seed`] for the value actually used.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `width` or `height` is zero
    /// - The catalog fails [`TileCatalog::validate`]
    pub fn new(
        width: usize,
        height: usize,
        catalog: TileCatalog<T>,
        rnd_seed: u64,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "output size",
                &format!("{width}x{height}"),
                &"output dimensions must be positive",
            ));
        }
        catalog.validate()?;

        let tile_count = catalog.len();
        let field = Field::new(width, height, tile_count);
        let random = RandomSource::new(rnd_seed);
        let cells = field.len();
        let initial_uncertainty = cells.saturating_mul(tile_count);
        let unresolved = if tile_count == 1 { 0 } else { cells };

        debug!(
            "wave {width}x{height} over {tile_count} tiles, seed {}",
            random.seed()
        );

        Ok(Self {
            everything: TileBitset::full(tile_count),
            filter: CandidateFilter::new(tile_count),
            wavefront: Wavefront::new(cells),
            ties: Vec::with_capacity(cells),
            pool: Vec::with_capacity(tile_count),
            initial_uncertainty,
            summary: FieldSummary {
                uncertainty: initial_uncertainty,
                unresolved,
            },
            catalog,
            field,
            random,
        })
    }

    /// Collapse the field
    ///
    /// With `step_mode` false, steps until every cell holds one tile and
    /// returns true. With `step_mode` true, runs at most one step and returns
    /// whether the field is solved afterwards; call again to resume.
    pub fn collapse(&mut self, step_mode: bool) -> bool {
        self.run(step_mode, None)
    }

    /// Collapse the field, reporting every touched cell to `observer`
    pub fn collapse_observed(
        &mut self,
        step_mode: bool,
        observer: &mut dyn CollapseObserver<T>,
    ) -> bool {
        self.run(step_mode, Some(observer))
    }

    fn run(&mut self, step_mode: bool, mut observer: Option<&mut dyn CollapseObserver<T>>) -> bool {
        loop {
            let (id, summary) = select_collapse_point(
                &self.field,
                self.catalog.len(),
                &mut self.random,
                &mut self.ties,
            );
            self.summary = summary;
            if summary.is_solved() {
                debug!("wave solved, seed {}", self.random.seed());
                return true;
            }

            self.step(id, &mut observer);

            if step_mode {
                self.refresh_summary();
                return self.summary.is_solved();
            }
        }
    }

    fn step(&mut self, id0: usize, observer: &mut Option<&mut dyn CollapseObserver<T>>) {
        self.collapse_cell(id0);
        self.notify(id0, observer);

        self.wavefront.reset(&self.field);
        self.wavefront.push_neighbors(&self.field, id0);

        while let Some(id) = self.wavefront.next_unvisited() {
            let before = self.field.cell(id).map_or(0, TileBitset::count);
            if before == 1 {
                continue;
            }

            self.filter_candidates(id);

            if self.field.cell(id).map_or(0, TileBitset::count) != before {
                self.wavefront.push_neighbors(&self.field, id);
            }
            self.notify(id, observer);
        }
    }

    /// Force a cell down to a single weighted pick
    ///
    /// Candidates come from the filtered cell; an empty or weightless cell
    /// falls back to the whole catalog.
    fn collapse_cell(&mut self, id: usize) {
        self.filter_candidates(id);

        let filtered = match self.field.cell(id) {
            Some(cell) if !cell.is_empty() => weighted_pick(
                cell,
                &self.catalog.weights,
                &mut self.random,
                &mut self.pool,
            ),
            _ => None,
        };
        let picked = filtered.or_else(|| {
            trace!("cell {id} falls back to the full catalog");
            weighted_pick(
                &self.everything,
                &self.catalog.weights,
                &mut self.random,
                &mut self.pool,
            )
        });

        if let (Some(tile), Some(cell)) = (picked, self.field.cell_mut(id)) {
            cell.reset(false);
            cell.set(tile, true);
        }
    }

    fn filter_candidates(&mut self, id: usize) {
        self.filter.apply(
            &mut self.field,
            id,
            &self.catalog.neighbors,
            &self.everything,
        );
    }

    fn notify(&self, id: usize, observer: &mut Option<&mut dyn CollapseObserver<T>>) {
        if let Some(observer) = observer.as_deref_mut() {
            let (x, y) = self.field.coords(id);
            observer.observe(self, x, y);
        }
    }

    fn refresh_summary(&mut self) {
        let cells = self.field.cells();
        self.summary = FieldSummary {
            uncertainty: self.field.uncertainty(),
            unresolved: cells.iter().filter(|cell| !cell.is_single()).count(),
        };
    }

    /// Catalog driving this engine
    ///
    /// Cloning it initializes other engines with identical rules.
    pub const fn catalog(&self) -> &TileCatalog<T> {
        &self.catalog
    }

    /// Tile payloads indexed by tile id
    pub fn tiles(&self) -> &[T] {
        &self.catalog.tiles
    }

    /// Current per-cell possibility sets
    pub const fn field(&self) -> &Field {
        &self.field
    }

    /// Field width in cells
    pub const fn width(&self) -> usize {
        self.field.width()
    }

    /// Field height in cells
    pub const fn height(&self) -> usize {
        self.field.height()
    }

    /// Seed actually driving the random source
    pub const fn rnd_seed(&self) -> u64 {
        self.random.seed()
    }

    /// Remaining possibilities per cell, as of the last scan
    ///
    /// Starts at the tile count and reaches exactly 1.0 once solved. The
    /// converse does not hold while empty cells remain, so use
    /// [`Wave::is_solved`] to detect completion.
    pub fn uncertainty(&self) -> f32 {
        self.summary.uncertainty as f32 / self.field.len() as f32
    }

    /// Fraction of the initial possibilities eliminated, from 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        let cells = self.field.len();
        let removable = self.initial_uncertainty.saturating_sub(cells);
        if removable == 0 {
            return 1.0;
        }
        let removed = self
            .initial_uncertainty
            .saturating_sub(self.summary.uncertainty.max(cells));
        removed as f32 / removable as f32
    }

    /// Test if every cell holds exactly one tile, as of the last scan
    pub const fn is_solved(&self) -> bool {
        self.summary.is_solved()
    }

    /// Tile placed at a position, if that cell is decided
    pub fn tile_at(&self, x: usize, y: usize) -> Option<&T> {
        let cell = self.field.cell(self.field.index(x, y)?)?;
        if !cell.is_single() {
            return None;
        }
        self.catalog.tiles.get(cell.first_set())
    }
}

impl<T: Clone> Wave<T> {
    /// Row-major output buffer, once every cell is decided
    pub fn render(&self) -> Option<Vec<T>> {
        self.field
            .cells()
            .iter()
            .map(|cell| {
                cell.is_single()
                    .then(|| self.catalog.tiles.get(cell.first_set()).cloned())
                    .flatten()
            })
            .collect()
    }
}

impl<T: Clone + Eq + Hash> Wave<T> {
    /// Create an engine whose catalog is extracted from a seed pattern
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Tile extraction rejects the pattern or window
    /// - [`Wave::new`] rejects the output size
    pub fn from_pattern(
        width: usize,
        height: usize,
        pattern: &[T],
        pattern_width: usize,
        pattern_height: usize,
        tile_width: usize,
        tile_height: usize,
        rnd_seed: u64,
    ) -> Result<Self> {
        let catalog = TileExtractor::extract(
            pattern,
            pattern_width,
            pattern_height,
            tile_width,
            tile_height,
        )?;
        Self::new(width, height, catalog, rnd_seed)
    }
}
