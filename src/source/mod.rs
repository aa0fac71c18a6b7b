// src/source/mod.rs
//! Line sources: where raw sentence text comes from

pub mod serial;

use async_trait::async_trait;

use crate::error::Result;

pub use serial::SerialSource;

/// Capability shared by every provider of raw sentence lines.
///
/// `next_line` yields `Ok(None)` once the source is exhausted and `Err`
/// on a read fault. `close` is the teardown hook; the collection loop
/// calls it exactly once on every exit path, so implementations must
/// tolerate being closed after a fault.
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> Result<Option<String>>;

    async fn close(&mut self) -> Result<()>;

    /// Short human-readable name used in session logs.
    fn describe(&self) -> String;
}

/// Finite, in-memory source used for offline runs and tests.
pub struct FixtureSource {
    lines: std::vec::IntoIter<String>,
}

impl FixtureSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        Self {
            lines: lines.into_iter(),
        }
    }

    /// The built-in test sentences: a short climb near Munich, 545.4 m
    /// up to 590.0 m.
    pub fn builtin() -> Self {
        Self::new([
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
            "$GPGGA,123520,4807.123,N,01131.321,E,1,08,0.9,550.0,M,46.9,M,,*46",
            "$GPGGA,123521,4807.210,N,01131.600,E,1,08,0.9,560.0,M,46.9,M,,*41",
            "$GPGGA,123522,4807.350,N,01131.800,E,1,08,0.9,570.0,M,46.9,M,,*48",
            "$GPGGA,123523,4807.500,N,01132.050,E,1,08,0.9,580.0,M,46.9,M,,*4B",
            "$GPGGA,123524,4807.720,N,01132.300,E,1,08,0.9,590.0,M,46.9,M,,*4B",
        ])
    }
}

#[async_trait]
impl LineSource for FixtureSource {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next())
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "built-in test sentences".to_string()
    }
}
