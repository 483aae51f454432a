//! # cursor — wizard cursor over the coin list
//!
//! ```text
//!   Loading ──initialize([])──▶ Empty
//!      │
//!      └──initialize(coins)──▶ Active(0) ◀──advance/retreat/select──▶ Active(i)
//! ```
//!
//! The cursor clamps at both ends; there is no "complete" state. Every index
//! change goes through [`Cursor::move_to`], which re-reads the draft from the
//! store so a draft never carries text over from another coin.

use crate::error::Result;
use crate::models::{AnalysisField, AnalysisRecord, Coin, Draft};
use crate::store::AnalysisStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Coin list not fetched yet
    Loading,
    /// Coin list fetched and empty
    Empty,
    Active(usize),
}

#[derive(Debug)]
pub struct Cursor {
    coins: Vec<Coin>,
    state: CursorState,
    draft: Draft,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self { coins: Vec::new(), state: CursorState::Loading, draft: Draft::default() }
    }

    pub fn initialize(&mut self, coins: Vec<Coin>, store: &AnalysisStore) {
        self.coins = coins;
        if self.coins.is_empty() {
            self.state = CursorState::Empty;
            self.draft = Draft::default();
        } else {
            self.move_to(0, store);
        }
    }

    /// Jump to `coin_id`. Returns `false` (and changes nothing) if the id is
    /// not in the list.
    pub fn select(&mut self, coin_id: &str, store: &AnalysisStore) -> bool {
        match self.coins.iter().position(|c| c.id == coin_id) {
            Some(i) => {
                self.move_to(i, store);
                true
            }
            None => false,
        }
    }

    /// Step forward; no-op on the last coin.
    pub fn advance(&mut self, store: &AnalysisStore) -> bool {
        match self.state {
            CursorState::Active(i) if i + 1 < self.coins.len() => {
                self.move_to(i + 1, store);
                true
            }
            _ => false,
        }
    }

    /// Step back; no-op on the first coin.
    pub fn retreat(&mut self, store: &AnalysisStore) -> bool {
        match self.state {
            CursorState::Active(i) if i > 0 => {
                self.move_to(i - 1, store);
                true
            }
            _ => false,
        }
    }

    /// Edit one draft field. Nothing is persisted until [`Cursor::save`].
    pub fn update_draft(&mut self, field: AnalysisField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Upsert the draft for the current coin, then advance.
    ///
    /// Returns the saved record, or `None` when there is no current coin.
    /// The cursor advances even if writing the store file fails; that error
    /// is returned after the move.
    pub fn save(&mut self, store: &mut AnalysisStore) -> Result<Option<AnalysisRecord>> {
        let Some(coin) = self.current() else {
            return Ok(None);
        };
        let record = self.draft.to_record(coin);

        let persisted = store.upsert(record.clone());
        self.advance(store);
        persisted.map(|()| Some(record))
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn index(&self) -> Option<usize> {
        match self.state {
            CursorState::Active(i) => Some(i),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&Coin> {
        self.index().and_then(|i| self.coins.get(i))
    }

    /// 1-based position and total, for "coin 3 of 10".
    pub fn position(&self) -> Option<(usize, usize)> {
        self.index().map(|i| (i + 1, self.coins.len()))
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    // ── Reconcile ─────────────────────────────────────────────────────────────

    fn move_to(&mut self, index: usize, store: &AnalysisStore) {
        debug_assert!(index < self.coins.len());
        self.state = CursorState::Active(index);
        self.reconcile(store);
    }

    /// Draft := stored record for the current coin, or all-empty.
    fn reconcile(&mut self, store: &AnalysisStore) {
        self.draft = self
            .current()
            .and_then(|coin| store.get(&coin.id))
            .map(Draft::from_record)
            .unwrap_or_default();
    }
}
