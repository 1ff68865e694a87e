//! Client side of the dashboard tables
//!
//! A [`FilterStore`] holds the filter form, [`query::serialize`] turns it into
//! a query string and [`spawn_dispatcher`] debounces changes into fetches
//! where only the newest response is ever applied.

pub mod client;
pub mod dispatcher;
pub mod filters;
pub mod pager;
pub mod query;
pub mod store;

pub use client::{AdapterClient, EndpointSource, PageSource};
pub use dispatcher::{
    spawn_dispatcher, DispatcherConfig, DispatcherHandle, SequenceGate, ViewState,
    DEFAULT_DEBOUNCE,
};
pub use filters::{
    ActiveFilter, AlarmFilterKey, AlarmFilters, BatchFilterKey, BatchFilters, FieldKind,
    FilterPatch, FilterSet, ALL, DEFAULT_LIMIT, DEFAULT_PAGE,
};
pub use pager::{page_window, PageItem};
pub use store::FilterStore;
