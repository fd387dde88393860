//! Blend independently sorted sequences into one list with a controlled mix.
//!
//! Given several sources, each already in its own order, this crate builds a result of a
//! requested length where every source makes up a requested percentage of the items. When
//! a source holds fewer items than its percentage asks for, the other sources make up the
//! difference, proportionally to their own percentages. Each source keeps its internal
//! order in the result. It's `no_std`, but requires `alloc`.
//!
//! # Quick start
//!
//! ```
//! use list_blend::blend;
//!
//! let news = vec!["n1", "n2", "n3", "n4", "n5", "n6"];
//! let ads = vec!["ad1", "ad2", "ad3"];
//! let feed = blend([news, ads], [75, 25], 8);
//! assert_eq!(feed, vec!["n1", "ad1", "n2", "ad2", "n3", "n4", "n5", "n6"]);
//! ```
//!
//! The work is split in two steps, which can be used separately:
//!
//! 1. The [`Allocator`] computes a quota per source from the source sizes, percentages and
//!    result size. Quotas never exceed source sizes and add up to the result size (or to
//!    the total number of items, if there aren't enough).
//! 2. [`RoundRobin`] takes one item from each source with quota left, in source order,
//!    pass after pass, until all quotas are used up.
//!
//! ```
//! use list_blend::{RoundRobin, allocate};
//!
//! // Source 0 can't fill half of 10 items, source 1 takes over the missing 3
//! let quotas = allocate(&[2, 20], &[50, 50], 10);
//! assert_eq!(quotas, vec![2, 8]);
//!
//! let merged = RoundRobin::new([0..2, 100..120], quotas).unwrap().into_vec();
//! assert_eq!(merged, vec![0, 100, 1, 101, 102, 103, 104, 105, 106, 107]);
//! ```
//!
//! # Builder and diagnostics
//!
//! [`Blend`] collects the same inputs step by step and can report every intermediate
//! allocation state to a [`trace::Trace`] sink, e.g. [`trace::LogTrace`] to send it to
//! the [`log`] facade:
//!
//! ```
//! use list_blend::{Blend, trace::LogTrace};
//!
//! let merged = Blend::new([vec![1, 2, 3], vec![4, 5, 6]])
//!     .percentages([50, 50])
//!     .result_size(4)
//!     .trace(LogTrace::new(log::Level::Debug))
//!     .build()
//!     .unwrap();
//! assert!(merged.eq([1, 4, 2, 5]));
//! ```
//!
//! # Errors
//!
//! Every source needs one percentage, and [`RoundRobin`] needs one quota per source.
//! The `try_*` functions and the builder return [`BlendError`] otherwise, [`blend`] and
//! [`allocate`] panic.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

pub mod allocator;
mod builder;
mod convenience;
mod error;
pub mod interleave;
pub mod trace;

pub use allocator::{Allocator, QuotaRow};
pub use builder::Blend;
pub use convenience::*;
pub use error::BlendError;
pub use interleave::RoundRobin;


#[doc(hidden)]
#[doc = include_str!("../README.md")]
struct _ReadmeTest;
