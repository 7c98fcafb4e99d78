//! Collapse-point selection and weighted tile picks
//!
//! Selection prefers the undecided cell with the fewest remaining tiles and
//! breaks ties uniformly. Tile picks draw from the candidate tiles with
//! probability proportional to their weights.

use crate::algorithm::bitset::TileBitset;
use crate::math::random::RandomSource;
use crate::spatial::grid::Field;

/// Totals gathered while scanning the field for a collapse point
///
/// Completion is decided by `unresolved`, not by comparing `uncertainty`
/// with the cell count: an empty cell next to a cell holding two tiles gives
/// the same total as two decided cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldSummary {
    /// Sum of every cell's cardinality
    pub uncertainty: usize,
    /// Cells not holding exactly one tile
    pub unresolved: usize,
}

impl FieldSummary {
    /// Test if every cell holds exactly one tile
    pub const fn is_solved(&self) -> bool {
        self.unresolved == 0
    }
}

/// Pick the next cell to collapse
///
/// Tracks the smallest cardinality strictly greater than 1 and every cell
/// reaching it, then draws one of those cells uniformly. When no cell has
/// more than one tile left but some cell is empty, an empty cell is drawn
/// instead so the fallback pool can fill it. Returns cell 0 when nothing is
/// left to collapse; callers must consult the summary, not the index, to
/// detect completion.
///
/// `ties` is caller-owned scratch space and is cleared on entry.
pub fn select_collapse_point(
    field: &Field,
    tile_count: usize,
    random: &mut RandomSource,
    ties: &mut Vec<usize>,
) -> (usize, FieldSummary) {
    ties.clear();
    let mut summary = FieldSummary::default();
    let mut lowest = tile_count;
    let mut contradictions = false;

    for (id, cell) in field.cells().iter().enumerate() {
        let len = cell.count();
        summary.uncertainty += len;
        if len != 1 {
            summary.unresolved += 1;
        }
        if len == 0 {
            contradictions = true;
        }

        if len > 1 && len <= lowest {
            if len < lowest {
                ties.clear();
                lowest = len;
            }
            ties.push(id);
        }
    }

    if ties.is_empty() && contradictions {
        ties.extend(
            field
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_empty())
                .map(|(id, _)| id),
        );
    }

    if ties.is_empty() {
        return (0, summary);
    }

    let choice = random.index(ties.len());
    (ties.get(choice).copied().unwrap_or(0), summary)
}

/// Draw one tile from `candidates`, weighted by `weights`
///
/// Equivalent to drawing uniformly from a multiset where tile `i` appears
/// `weights[i]` times. Returns `None` when the candidates carry no weight.
///
/// `pool` is caller-owned scratch space holding cumulative weights.
pub fn weighted_pick(
    candidates: &TileBitset,
    weights: &[u32],
    random: &mut RandomSource,
    pool: &mut Vec<(usize, u64)>,
) -> Option<usize> {
    pool.clear();
    let mut total = 0_u64;
    for tile in candidates.iter_ones() {
        let weight = weights.get(tile).copied().unwrap_or(0);
        if weight == 0 {
            continue;
        }
        total += u64::from(weight);
        pool.push((tile, total));
    }

    if total == 0 {
        return None;
    }

    let draw = random.below(total);
    pool.iter()
        .find(|&&(_, cumulative)| draw < cumulative)
        .map(|&(tile, _)| tile)
}
