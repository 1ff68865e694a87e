//! Filter state store
//!
//! Holds the current filter form for one table and publishes every change on
//! a `watch` channel so a dispatcher can follow it.

use tokio::sync::watch;

use crate::filters::{ActiveFilter, FilterPatch, FilterSet, DEFAULT_PAGE};

pub struct FilterStore<F: FilterSet> {
    tx: watch::Sender<F>,
}

impl<F: FilterSet> Default for FilterStore<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FilterSet> FilterStore<F> {
    pub fn new() -> Self {
        Self::with_state(F::default())
    }

    pub fn with_state(state: F) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> F {
        self.tx.borrow().clone()
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<F> {
        self.tx.subscribe()
    }

    /// Merge a patch into the state
    ///
    /// A patch that does not set `page` resets it to 1; a patch that does
    /// set it is taken verbatim. A zero `limit` is ignored.
    pub fn update(&self, patch: FilterPatch<F::Key>) -> F {
        self.tx.send_modify(|state| {
            for (key, value) in patch.fields {
                state.set(key, value);
            }
            if let Some(limit) = patch.limit.filter(|limit| *limit > 0) {
                state.set_limit(limit);
            }
            state.set_page(patch.page.unwrap_or(DEFAULT_PAGE));
        });
        self.state()
    }

    /// Reset every field and paging to the defaults
    pub fn clear(&self) -> F {
        self.tx.send_replace(F::default());
        self.state()
    }

    /// Reset one field to its "no constraint" value and go back to page 1
    pub fn remove_filter(&self, key: F::Key) -> F {
        let sentinel = F::kind(key).sentinel();
        self.update(FilterPatch::new().set(key, sentinel).page(DEFAULT_PAGE))
    }

    /// Fields currently constraining the query, in form order
    pub fn active_filters(&self) -> Vec<ActiveFilter<F::Key>> {
        let state = self.tx.borrow();
        F::KEYS
            .iter()
            .filter(|key| !F::kind(**key).is_unset(state.get(**key)))
            .map(|key| ActiveFilter {
                key: *key,
                label: F::label(*key),
                value: F::display_value(*key, state.get(*key)),
            })
            .collect()
    }
}
