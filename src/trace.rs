//! Diagnostics for the [`Allocator`](crate::Allocator).
//!
//! The allocator reports its working rows to a [`Trace`] sink at every interesting step.
//! The default sink, [`NoTrace`], ignores everything and compiles away. Use [`Recorder`] to
//! keep the snapshots, [`LogTrace`] to forward them to the [`log`] facade, or any closure
//! via [`ByFunc`] (see [`Blend::trace_with`](crate::Blend::trace_with)).
//!
//! ```
//! use list_blend::{Allocator, trace::{Recorder, Stage}};
//!
//! let mut recorder = Recorder::default();
//! let quotas = Allocator::new(10)
//!     .with_trace(&mut recorder)
//!     .allocate(&[2, 20], &[50, 50])
//!     .unwrap();
//! assert_eq!(quotas, vec![2, 8]);
//! assert_eq!(recorder.snapshots.first().unwrap().stage, Stage::Initial);
//! assert_eq!(recorder.snapshots.last().unwrap().stage, Stage::Settled);
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::QuotaRow;

/// Point of the allocation at which a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Rows were just built, in source order
    Initial,
    /// Rows were sorted by `remaining`, most deficient first
    Sorted {
        /// Redistribution round, starting at 0
        round: usize,
    },
    /// Row `id` handed `amount` slots to the most deficient row (or to the result)
    Allotted {
        /// Redistribution round, starting at 0
        round: usize,
        /// Donor row
        id: usize,
        /// Slots given away
        amount: i64,
    },
    /// Row `id` could not be covered by anyone and keeps all its items
    Released {
        /// Released row
        id: usize,
    },
    /// Row `id` gave back `amount` slots because the quotas overshot the result size
    Trimmed {
        /// Trimmed row
        id: usize,
        /// Slots given back
        amount: i64,
    },
    /// Final state, rows back in source order
    Settled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::Sorted { round } => write!(f, "sorted (round {round})"),
            Self::Allotted { round, id, amount } => {
                write!(f, "allotted {amount} from {id} (round {round})")
            }
            Self::Released { id } => write!(f, "released {id}"),
            Self::Trimmed { id, amount } => write!(f, "trimmed {amount} from {id}"),
            Self::Settled => f.write_str("settled"),
        }
    }
}

/// Receives allocator state snapshots
pub trait Trace {
    /// Called with the current stage and the rows in their current order
    fn record(&mut self, stage: Stage, rows: &[QuotaRow]);
}

impl<T> Trace for &mut T
where
    T: Trace + ?Sized,
{
    #[inline]
    fn record(&mut self, stage: Stage, rows: &[QuotaRow]) {
        T::record(self, stage, rows);
    }
}

/// Discards every snapshot. Default for [`Allocator`](crate::Allocator).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Trace for NoTrace {
    #[inline(always)]
    fn record(&mut self, _stage: Stage, _rows: &[QuotaRow]) {}
}

/// Calls a closure with every snapshot
///
/// Construct via [`Blend::trace_with`](crate::Blend::trace_with) or directly.
#[derive(Debug, Clone)]
pub struct ByFunc<F>(pub F);

impl<F> Trace for ByFunc<F>
where
    F: FnMut(Stage, &[QuotaRow]),
{
    // Leaving decision to inline this to the compiler because F can be long
    fn record(&mut self, stage: Stage, rows: &[QuotaRow]) {
        (self.0)(stage, rows);
    }
}

/// Owned copy of the rows at some [`Stage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// When the snapshot was taken
    pub stage: Stage,
    /// Rows in the order the allocator held them at that moment
    pub rows: Vec<QuotaRow>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.stage)?;
        fmt::Display::fmt(&Table(&self.rows), f)
    }
}

/// Keeps every snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    /// Snapshots in the order they were recorded
    pub snapshots: Vec<Snapshot>,
}

impl Recorder {
    /// Iterates over recorded stages
    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.snapshots.iter().map(|snapshot| snapshot.stage)
    }
}

impl Trace for Recorder {
    fn record(&mut self, stage: Stage, rows: &[QuotaRow]) {
        self.snapshots.push(Snapshot {
            stage,
            rows: rows.to_vec(),
        });
    }
}

/// Writes every snapshot to the [`log`] facade as a [`Table`]
#[derive(Debug, Clone, Copy)]
pub struct LogTrace {
    level: log::Level,
}

impl LogTrace {
    /// Logs snapshots at `level`
    pub const fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new(log::Level::Trace)
    }
}

impl Trace for LogTrace {
    fn record(&mut self, stage: Stage, rows: &[QuotaRow]) {
        log::log!(target: "list_blend::allocator", self.level, "{stage}:\n{}", Table(rows));
    }
}

/// Renders rows as five tab-separated lines: `ID`, `SIZE`, `GOAL`, `DIFF` (capacity) and
/// `USE` (remaining), one column per row.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a>(pub &'a [QuotaRow]);

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn line(
            f: &mut fmt::Formatter<'_>, label: &str, rows: &[QuotaRow],
            value: impl Fn(&QuotaRow) -> i64,
        ) -> fmt::Result {
            write!(f, "{label}:\t")?;
            for row in rows {
                write!(f, "{}\t", value(row))?;
            }
            writeln!(f)
        }
        line(f, "ID", self.0, |row| row.id() as i64)?;
        line(f, "SIZE", self.0, |row| row.size)?;
        line(f, "GOAL", self.0, QuotaRow::target)?;
        line(f, "DIFF", self.0, QuotaRow::capacity)?;
        line(f, "USE", self.0, QuotaRow::remaining)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::ToString, vec};

    use super::*;

    #[test]
    fn table() {
        let rows = [QuotaRow::new(0, 2, 50, 10), QuotaRow::new(1, 20, 50, 10)];
        assert_eq!(
            Table(&rows).to_string(),
            "ID:\t0\t1\t\nSIZE:\t2\t20\t\nGOAL:\t5\t5\t\nDIFF:\t-3\t15\t\nUSE:\t-3\t15\t\n"
        );
    }

    #[test]
    fn snapshot_display() {
        let snapshot = Snapshot {
            stage: Stage::Sorted { round: 2 },
            rows: vec![QuotaRow::new(0, 1, 100, 1)],
        };
        assert_eq!(
            snapshot.to_string(),
            "sorted (round 2):\nID:\t0\t\nSIZE:\t1\t\nGOAL:\t1\t\nDIFF:\t0\t\nUSE:\t0\t\n"
        );
    }

    #[test]
    fn stage_display() {
        assert_eq!(
            format!(
                "{}",
                Stage::Allotted {
                    round: 1,
                    id: 3,
                    amount: 4
                }
            ),
            "allotted 4 from 3 (round 1)"
        );
        assert_eq!(Stage::Released { id: 0 }.to_string(), "released 0");
        assert_eq!(Stage::Trimmed { id: 2, amount: 5 }.to_string(), "trimmed 5 from 2");
    }

    fn feed<T: Trace>(mut trace: T, rows: &[QuotaRow]) {
        trace.record(Stage::Initial, rows);
    }

    #[test]
    fn forwarding() {
        let rows = [QuotaRow::new(0, 3, 100, 3)];
        let mut calls = 0;
        {
            let mut by_func = ByFunc(|stage: Stage, rows: &[QuotaRow]| {
                assert_eq!(stage, Stage::Initial);
                assert_eq!(rows.len(), 1);
                calls += 1;
            });
            feed(&mut by_func, &rows);
            feed(by_func, &rows);
        }
        assert_eq!(calls, 2);

        let mut recorder = Recorder::default();
        (&mut recorder).record(Stage::Settled, &rows);
        NoTrace.record(Stage::Settled, &rows);
        LogTrace::default().record(Stage::Settled, &rows);
        assert_eq!(recorder.stages().collect::<Vec<_>>(), vec![Stage::Settled]);
        assert_eq!(recorder.snapshots[0].rows, rows.to_vec());
    }
}
