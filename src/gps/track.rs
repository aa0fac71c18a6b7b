// src/gps/track.rs
//! Fix records and the bounded track that stores them

/// One reported position sample.
///
/// A `Fix` is only ever constructed complete: latitude, longitude and
/// altitude are always present. `time` is the receiver's time of day as
/// zero-padded `HH:MM:SS`, or empty when the sentence carried no time field.
#[derive(Debug, Clone, PartialEq)]
pub struct Fix {
    pub time: String,
    /// Signed decimal degrees, south negative.
    pub latitude: f64,
    /// Signed decimal degrees, west negative.
    pub longitude: f64,
    /// Meters above mean sea level.
    pub altitude: f64,
}

/// Ordered collection of fixes for one session, bounded by a capacity.
///
/// Insertion order is arrival order. Once the cap is reached `append`
/// refuses further fixes; it never evicts older ones.
#[derive(Debug)]
pub struct Track {
    fixes: Vec<Fix>,
    cap: usize,
}

impl Track {
    /// Create an empty track holding at most `cap` fixes.
    pub fn new(cap: usize) -> Self {
        Self {
            fixes: Vec::new(),
            cap,
        }
    }

    /// Store `fix` at the end of the track.
    ///
    /// Returns `false` without storing anything once the track is full.
    /// That is the producer's signal to stop collecting, not an error.
    pub fn append(&mut self, fix: Fix) -> bool {
        if self.is_full() {
            return false;
        }
        self.fixes.push(fix);
        true
    }

    pub fn is_full(&self) -> bool {
        self.fixes.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Maximum number of fixes this track will store.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Read-only view of the current contents, in arrival order.
    ///
    /// Safe to call at any time, including mid-collection.
    pub fn snapshot(&self) -> &[Fix] {
        &self.fixes
    }
}
