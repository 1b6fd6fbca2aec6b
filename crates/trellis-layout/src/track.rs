//! Per-row and per-column size state for grid passes.

use std::ops::Range;

use smallvec::SmallVec;
use trellis_core::MAX_SIZE;

use crate::distribute::{distribute, force_grow};

type Indices = SmallVec<[usize; 8]>;

/// Highest track index a placement or span may reach on one axis.
///
/// Indices and spans past it are clamped, so a stray `usize::MAX` span or
/// `i32::MAX` index cannot allocate billions of tracks.
pub const MAX_TRACKS: usize = 4096;

/// One row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    /// Current size
    pub size: i32,
    /// Smallest size the track may shrink to
    pub min: i32,
    /// Largest size the track may grow to
    pub max: i32,
    /// At least one occupant wants extra space
    pub growable: bool,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            size: 0,
            min: 0,
            max: MAX_SIZE,
            growable: false,
        }
    }
}

impl Track {
    /// Take in one occupant's size, minimum and maximum.
    pub fn absorb(&mut self, size: i32, min: i32, max: i32) {
        self.min = self.min.max(min);
        self.max = self.max.min(max);
        self.size = self.size.max(size).max(self.min);
        if self.size > self.max {
            self.max = self.size;
        }
    }
}

/// Final column widths and row heights of a grid pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSizes {
    pub columns: Vec<i32>,
    pub rows: Vec<i32>,
}

/// One item's demand on a run of tracks along a single axis.
///
/// Sizes include the item's margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Occupant {
    pub start: usize,
    pub span: usize,
    pub size: i32,
    pub min: i32,
    pub max: i32,
    pub grows: bool,
}

impl Occupant {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start.saturating_add(self.span)
    }
}

/// A run of tracks separated by a fixed gap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tracks {
    tracks: Vec<Track>,
    gap: i32,
}

impl Tracks {
    /// `count` empty tracks with `gap` pixels between neighbours.
    pub fn new(count: usize, gap: i32) -> Self {
        Self {
            tracks: vec![Track::default(); count],
            gap,
        }
    }

    /// Build `count` tracks from their occupants.
    ///
    /// Single-track occupants seed sizes, minima and maxima directly.
    /// Spanning occupants are reconciled afterwards, narrowest span first
    /// and in insertion order within a span, so wide spans see the effect
    /// of narrower ones.
    pub(crate) fn seed(count: usize, gap: i32, occupants: &[Occupant]) -> Self {
        let mut tracks = Self::new(count, gap);
        let mut spanning: Vec<&Occupant> = Vec::new();
        for occupant in occupants {
            if occupant.span > 1 {
                spanning.push(occupant);
            } else if let Some(track) = tracks.track_mut(occupant.start) {
                track.absorb(occupant.size, occupant.min, occupant.max);
                track.growable |= occupant.grows;
            }
        }

        spanning.sort_by_key(|occupant| occupant.span);
        for occupant in spanning {
            let range = occupant.range();
            if occupant.grows && !tracks.any_growable(range.clone()) {
                if let Some(track) = tracks.track_mut(range.end.saturating_sub(1)) {
                    track.growable = true;
                }
            }
            tracks.reconcile(range.clone(), occupant.size);
            tracks.reconcile_min(range, occupant.min);
        }
        tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn gap(&self) -> i32 {
        self.gap
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub(crate) fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    /// Current sizes, in order.
    pub fn sizes(&self) -> Vec<i32> {
        self.tracks.iter().map(|t| t.size).collect()
    }

    /// Sum of the gaps between tracks.
    pub fn gaps(&self) -> i32 {
        gaps_between(self.tracks.len(), self.gap)
    }

    /// Sizes plus gaps, saturating at [`MAX_SIZE`].
    pub fn total(&self) -> i32 {
        self.span_size(0..self.tracks.len())
    }

    /// Size of `range`, including the gaps inside it.
    pub fn span_size(&self, range: Range<usize>) -> i32 {
        self.span_sum(range, |t| t.size)
    }

    fn span_min(&self, range: Range<usize>) -> i32 {
        self.span_sum(range, |t| t.min)
    }

    fn span_sum(&self, range: Range<usize>, field: impl Fn(&Track) -> i32) -> i32 {
        let range = self.clip(range);
        let count = range.len();
        let sum: i64 = self.tracks[range].iter().map(|t| i64::from(field(t))).sum();
        let total = sum + i64::from(gaps_between(count, self.gap));
        total.clamp(0, i64::from(MAX_SIZE)) as i32
    }

    /// Leading edge of every track, starting at `origin`.
    pub fn starts(&self, origin: i32) -> Vec<i32> {
        let mut cursor = origin;
        self.tracks
            .iter()
            .map(|track| {
                let start = cursor;
                cursor = cursor.saturating_add(track.size).saturating_add(self.gap);
                start
            })
            .collect()
    }

    /// Grow `range` until it is at least `required` wide.
    ///
    /// Growable tracks absorb the deficit first, then every track in the
    /// range up to its maximum. Whatever still remains is forced in equal
    /// shares, raising maxima with it, so a spanning occupant is never
    /// clipped.
    pub(crate) fn reconcile(&mut self, range: Range<usize>, required: i32) {
        let range = self.clip(range);
        let deficit = required - self.span_size(range.clone());
        if deficit <= 0 || range.is_empty() {
            return;
        }

        let growable = self.growable_in(range.clone());
        let all: Indices = range.collect();
        let mut remaining = deficit;
        if !growable.is_empty() {
            remaining = self.grow_sizes(&growable, remaining);
        }
        if remaining > 0 {
            remaining = self.grow_sizes(&all, remaining);
        }
        if remaining > 0 {
            self.force_sizes(&all, remaining);
        }
    }

    /// Raise the minima of `range` until they add up to `required`.
    ///
    /// Growable tracks take the increase when there are any. Sizes follow
    /// their minima.
    pub(crate) fn reconcile_min(&mut self, range: Range<usize>, required: i32) {
        let range = self.clip(range);
        let deficit = required - self.span_min(range.clone());
        if deficit <= 0 || range.is_empty() {
            return;
        }

        let mut targets = self.growable_in(range.clone());
        if targets.is_empty() {
            targets = range.collect();
        }
        let mut values: SmallVec<[i32; 8]> = targets.iter().map(|&i| self.tracks[i].min).collect();
        force_grow(deficit, &mut values);
        for (&i, &min) in targets.iter().zip(&values) {
            let track = &mut self.tracks[i];
            track.min = min;
            track.size = track.size.max(min);
            track.max = track.max.max(track.size);
        }
    }

    /// Distribute the difference between `available` and the current total
    /// over the growable tracks: up to their maxima when growing, down to
    /// their minima when shrinking.
    ///
    /// With `fill` set, space the growable tracks cannot take is forced into
    /// them anyway (or into every track if none is growable). Returns what
    /// was left unplaced.
    pub(crate) fn fit(&mut self, available: i32, fill: bool) -> i32 {
        if self.tracks.is_empty() {
            return 0;
        }
        let extra = available - self.total();
        if extra == 0 {
            return 0;
        }

        let growable = self.growable_in(0..self.tracks.len());
        let leftover = if growable.is_empty() {
            extra
        } else if extra > 0 {
            self.grow_sizes(&growable, extra)
        } else {
            self.shrink_sizes(&growable, extra)
        };

        if leftover > 0 && fill {
            let targets = if growable.is_empty() {
                (0..self.tracks.len()).collect()
            } else {
                growable
            };
            self.force_sizes(&targets, leftover);
            return 0;
        }
        leftover
    }

    /// Give every track the same size.
    ///
    /// When `available` is known and some track is growable, the shared size
    /// is the available space split evenly, but never below the largest
    /// minimum. Otherwise it is the widest current track.
    pub(crate) fn unify(&mut self, available: Option<i32>) {
        let count = self.tracks.len();
        if count == 0 {
            return;
        }
        let widest = self.tracks.iter().map(|t| t.size).max().unwrap_or(0);
        let largest_min = self.tracks.iter().map(|t| t.min).max().unwrap_or(0);
        let any_growable = self.tracks.iter().any(|t| t.growable);

        let size = match available {
            Some(available) if any_growable => {
                largest_min.max((available - self.gaps()) / count as i32)
            }
            _ => widest,
        };
        for track in &mut self.tracks {
            track.size = size;
            track.min = track.min.min(size);
            track.max = track.max.max(size);
            track.growable = any_growable;
        }
    }

    /// Whether any track in `range` is growable.
    pub(crate) fn any_growable(&self, range: Range<usize>) -> bool {
        !self.growable_in(self.clip(range)).is_empty()
    }

    fn clip(&self, range: Range<usize>) -> Range<usize> {
        let end = range.end.min(self.tracks.len());
        range.start.min(end)..end
    }

    fn growable_in(&self, range: Range<usize>) -> Indices {
        range.filter(|&i| self.tracks[i].growable).collect()
    }

    fn grow_sizes(&mut self, indices: &[usize], amount: i32) -> i32 {
        let ceilings: SmallVec<[i32; 8]> = indices.iter().map(|&i| self.tracks[i].max).collect();
        self.distribute_sizes(indices, amount, &ceilings)
    }

    fn shrink_sizes(&mut self, indices: &[usize], amount: i32) -> i32 {
        let floors: SmallVec<[i32; 8]> = indices.iter().map(|&i| self.tracks[i].min).collect();
        self.distribute_sizes(indices, amount, &floors)
    }

    fn distribute_sizes(&mut self, indices: &[usize], amount: i32, limits: &[i32]) -> i32 {
        let mut values: SmallVec<[i32; 8]> = indices.iter().map(|&i| self.tracks[i].size).collect();
        let leftover = distribute(amount, &mut values, limits);
        for (&i, &size) in indices.iter().zip(&values) {
            self.tracks[i].size = size;
        }
        leftover
    }

    fn force_sizes(&mut self, indices: &[usize], amount: i32) {
        let mut values: SmallVec<[i32; 8]> = indices.iter().map(|&i| self.tracks[i].size).collect();
        force_grow(amount, &mut values);
        for (&i, &size) in indices.iter().zip(&values) {
            let track = &mut self.tracks[i];
            track.size = size;
            track.max = track.max.max(size);
        }
    }
}

fn gaps_between(count: usize, gap: i32) -> i32 {
    gap.saturating_mul(count.saturating_sub(1) as i32)
}
