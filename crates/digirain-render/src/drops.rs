//! Per-column drop state.

use digirain_core::CharacterSource;
use rand::{Rng, seq::SliceRandom};
use tracing::{debug, trace};

/// Highest random start offset, in rows, given to seeded drops.
const SEED_STAGGER_ROWS: f64 = 40.0;

/// Row a recycled drop restarts from.
const RESTART_ROW: f64 = 1.0;

/// State for a single rain column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropColumn {
    /// Fall position of the drop head in rows; `0.0` means the column is idle.
    pub position: f64,
    /// Glyph per row reached so far, oldest first.
    pub glyphs: Vec<char>,
}

impl DropColumn {
    pub fn is_active(&self) -> bool {
        self.position > 0.0
    }

    fn reset(&mut self) {
        self.position = 0.0;
        self.glyphs.clear();
    }

    fn start_at(&mut self, position: f64) {
        self.position = position;
        self.glyphs.clear();
    }
}

/// Every rain column across the surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropField {
    columns: Vec<DropColumn>,
}

/// Number of drops that should be active for `columns` at `density` percent.
///
/// Out-of-range densities saturate at `0` and `columns`.
pub fn target_active(columns: usize, density: f64) -> usize {
    let target = (columns as f64 * density / 100.0).floor();
    if target.is_nan() || target <= 0.0 {
        0
    } else {
        (target as usize).min(columns)
    }
}

impl DropField {
    /// Rebuild the field with `columns` idle columns, then start a random
    /// subset sized by `density` at staggered heights.
    ///
    /// Everything from the previous field is discarded.
    pub fn seed<R: Rng + ?Sized>(&mut self, columns: usize, density: f64, rng: &mut R) {
        self.columns = vec![DropColumn::default(); columns];

        let target = target_active(columns, density);
        let mut order: Vec<usize> = (0..columns).collect();
        order.shuffle(rng);

        for &col in &order[..target] {
            self.columns[col].position = 1.0 + rng.r#gen::<f64>() * SEED_STAGGER_ROWS;
        }

        debug!(columns, density, target, "drop field seeded");
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[DropColumn] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&DropColumn> {
        self.columns.get(idx)
    }

    pub fn active_count(&self) -> usize {
        self.columns.iter().filter(|c| c.is_active()).count()
    }

    /// Move the drop in `idx` down by `rows`.
    pub(crate) fn advance(&mut self, idx: usize, rows: f64) -> f64 {
        let col = &mut self.columns[idx];
        col.position += rows;
        col.position
    }

    /// Glyph for `row` of column `idx`, assigning one if the row has none and
    /// occasionally swapping the cached one for a fresh draw.
    pub(crate) fn glyph_at<R: Rng + ?Sized>(
        &mut self,
        idx: usize,
        row: usize,
        reroll_chance: f64,
        source: &CharacterSource,
        rng: &mut R,
    ) -> char {
        let glyphs = &mut self.columns[idx].glyphs;
        if rng.r#gen::<f64>() < reroll_chance && row < glyphs.len() {
            glyphs[row] = source.random(rng);
        }
        while glyphs.len() <= row {
            glyphs.push(source.random(rng));
        }
        glyphs[row]
    }

    /// Retire the drop in `idx` and start a fresh one in a random idle column.
    ///
    /// Returns the column that was started, or `None` when every other column
    /// is already busy.
    pub(crate) fn recycle<R: Rng + ?Sized>(&mut self, idx: usize, rng: &mut R) -> Option<usize> {
        let idle: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != idx && !c.is_active())
            .map(|(i, _)| i)
            .collect();

        let spawned = idle.choose(rng).copied();
        if let Some(next) = spawned {
            self.columns[next].start_at(RESTART_ROW);
        }
        self.columns[idx].reset();

        trace!(from = idx, to = ?spawned, "drop recycled");
        spawned
    }
}

#[cfg(test)]
mod tests {
    use digirain_core::CharacterSet;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xD1_6124)
    }

    #[test]
    fn test_target_active() {
        assert_eq!(target_active(100, 20.0), 20);
        assert_eq!(target_active(7, 50.0), 3);
        assert_eq!(target_active(100, 29.0), 29);
        assert_eq!(target_active(10, 0.0), 0);
        assert_eq!(target_active(10, 100.0), 10);
        assert_eq!(target_active(10, 250.0), 10);
        assert_eq!(target_active(10, -5.0), 0);
        assert_eq!(target_active(0, 50.0), 0);
        assert_eq!(target_active(10, f64::NAN), 0);
    }

    #[test]
    fn test_seed_positions_in_stagger_range() {
        let mut field = DropField::default();
        field.seed(80, 50.0, &mut rng());
        assert_eq!(field.len(), 80);
        assert_eq!(field.active_count(), 40);
        for col in field.columns() {
            if col.is_active() {
                assert!(col.position >= 1.0 && col.position < 41.0);
            } else {
                assert_eq!(col.position, 0.0);
            }
            assert!(col.glyphs.is_empty());
        }
    }

    #[test]
    fn test_seed_is_hard_reset() {
        let mut r = rng();
        let source = CharacterSource::default();
        let mut field = DropField::default();
        field.seed(10, 100.0, &mut r);
        field.glyph_at(3, 0, 0.0, &source, &mut r);
        field.seed(10, 0.0, &mut r);
        assert_eq!(field.active_count(), 0);
        assert!(field.columns().iter().all(|c| c.glyphs.is_empty()));
    }

    #[test]
    fn test_glyph_cache_fills_and_is_stable() {
        let mut r = rng();
        let source = CharacterSource::new(CharacterSet::Alphanumeric);
        let mut field = DropField::default();
        field.seed(4, 100.0, &mut r);

        let first = field.glyph_at(0, 2, 0.0, &source, &mut r);
        assert_eq!(field.column(0).unwrap().glyphs.len(), 3);
        for _ in 0..20 {
            assert_eq!(field.glyph_at(0, 2, 0.0, &source, &mut r), first);
        }
    }

    #[test]
    fn test_glyph_reroll_always() {
        let mut r = rng();
        let source = CharacterSource::new(CharacterSet::Alphanumeric);
        let mut field = DropField::default();
        field.seed(1, 100.0, &mut r);
        field.glyph_at(0, 0, 0.0, &source, &mut r);

        let changed = (0..50)
            .map(|_| field.glyph_at(0, 0, 1.0, &source, &mut r))
            .collect::<std::collections::HashSet<_>>();
        assert!(changed.len() > 1);
    }

    #[test]
    fn test_recycle_moves_drop() {
        let mut r = rng();
        let source = CharacterSource::default();
        let mut field = DropField::default();
        field.seed(5, 20.0, &mut r);
        let busy = (0..5).find(|&i| field.columns()[i].is_active()).unwrap();
        field.glyph_at(busy, 0, 0.0, &source, &mut r);

        let next = field.recycle(busy, &mut r).unwrap();
        assert_ne!(next, busy);
        assert_eq!(field.column(busy).unwrap(), &DropColumn::default());
        assert_eq!(field.column(next).unwrap().position, 1.0);
        assert_eq!(field.active_count(), 1);
    }

    #[test]
    fn test_recycle_without_idle_columns_shrinks() {
        let mut r = rng();
        let mut field = DropField::default();
        field.seed(3, 100.0, &mut r);
        assert_eq!(field.recycle(1, &mut r), None);
        assert_eq!(field.active_count(), 2);
        assert!(!field.column(1).unwrap().is_active());
    }
}
