//! Per-session genre interest tracking.

use std::collections::HashMap;

use crate::film::Genre;

/// Counts how often films of each genre were viewed.
#[derive(Debug, Clone, Default)]
pub struct GenreInterest {
    views: HashMap<Genre, u32>,
}

impl GenreInterest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one view of a film in `genre`.
    pub fn record(&mut self, genre: Genre) {
        *self.views.entry(genre).or_insert(0) += 1;
    }

    pub fn views(&self, genre: Genre) -> u32 {
        self.views.get(&genre).copied().unwrap_or(0)
    }

    /// Whether nothing has been viewed yet.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The `n` most-viewed genres, ties broken by declaration order.
    pub fn top(&self, n: usize) -> Vec<Genre> {
        let mut ranked: Vec<(Genre, u32)> = self.views.iter().map(|(g, c)| (*g, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().take(n).map(|(g, _)| g).collect()
    }
}
