//! Script-folding fuzzy match reranking.
//!
//! Queries typed in one script should match records stored in another:
//! "tokyo" should find "Tōkyō", "cafe" should find "Café". This crate runs a
//! fuzzy pass over *script-folded* field text and merges the resulting ranked
//! set with the ranked set computed over the original text, keeping, per
//! record, whichever representation scored higher.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ normalize.rs│────▶│  project.rs  │────▶│  engine.rs  │
//! │ (Normalizer,│     │ (per-call    │     │ (MatchEngine│
//! │ ScriptFolder│     │  side-maps)  │     │ TieredEngine│
//! └─────────────┘     └──────────────┘     └──────┬──────┘
//!                                                 │ uses scoring.rs
//!                                                 ▼
//!                                          ┌─────────────┐
//!                                          │   merge.rs  │
//!                                          │ (merge_ranked, merge_with_
//!                                          │  normalized_matches)
//!                                          └─────────────┘
//! ```
//!
//! The seams are traits: plug in a real transliteration engine via
//! [`Normalizer`], or an existing matcher via [`MatchEngine`]. Everything is
//! synchronous and allocation-local: per-query state (side-maps, both
//! ranked sets) lives and dies inside one call, so concurrent queries over
//! shared records need no coordination.
//!
//! # Usage
//!
//! ```
//! use scriptfold::{
//!     search_and_merge, FieldWeight, Record, ScriptFolder, SearchParams, TieredEngine,
//! };
//!
//! let records = vec![
//!     Record::new(0u32).with_field("name", "Tōkyō").with_field("country", "Japan"),
//!     Record::new(1u32).with_field("name", "Toronto").with_field("country", "Canada"),
//! ];
//! let params = SearchParams::new(vec![
//!     FieldWeight::new("name", 2.0),
//!     FieldWeight::new("country", 1.0),
//! ]);
//! let fields: Vec<String> = vec!["name".into(), "country".into()];
//!
//! let results = search_and_merge(
//!     &TieredEngine,
//!     &ScriptFolder,
//!     &records,
//!     &fields,
//!     "tokyo japan",
//!     &params,
//! );
//! assert_eq!(results[0].id().get(), 0);
//! ```

pub mod contracts;
pub mod engine;
pub mod fuzzy;
pub mod merge;
pub mod normalize;
pub mod project;
pub mod scoring;
pub mod types;

#[doc(hidden)]
pub mod testing;

pub use engine::{MatchEngine, TieredEngine};
pub use merge::{merge_ranked, merge_with_normalized_matches, search_and_merge};
pub use normalize::{fold, Normalizer, ScriptFolder};
pub use project::{normalized_candidates, original_candidates, project, Candidate, SideMap};
pub use scoring::{composite, MISSING_FIELD_PENALTY};
pub use types::{FieldWeight, Match, Record, RecordId, SearchParams, SubScore};
