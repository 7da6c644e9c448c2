//! Best score persistence
//!
//! The only thing that outlives a page load is one number. Storage is behind
//! `BestScoreStore` so the sim never sees where it lives:
//! - LocalStorage on web
//! - In-memory natively and in tests
//!
//! Missing or garbled values read as 0.

/// LocalStorage key for the best score
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Where the best score is read from at startup and flushed to on a new best
pub trait BestScoreStore {
    fn load(&self) -> u64;
    fn save(&mut self, best: u64);
}

/// Parse a stored best score. Anything that isn't a finite, non-negative
/// number becomes 0.
pub fn parse_best_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.floor() as u64,
        _ => {
            log::warn!("Ignoring malformed best score {:?}", raw);
            0
        }
    }
}

/// Keeps the raw stored string, like a key/value store would
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with an arbitrary stored value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        parse_best_score(self.raw.as_deref())
    }

    fn save(&mut self, best: u64) {
        self.raw = Some(best.to_string());
    }
}

/// Browser LocalStorage backed store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(BEST_SCORE_KEY).ok().flatten());
        let best = parse_best_score(raw.as_deref());
        log::info!("Loaded best score {}", best);
        best
    }

    fn save(&mut self, best: u64) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(BEST_SCORE_KEY, &best.to_string()).is_ok() {
                log::info!("Best score saved ({})", best);
            } else {
                log::warn!("Could not save best score");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best_score() {
        assert_eq!(parse_best_score(None), 0);
        assert_eq!(parse_best_score(Some("42")), 42);
        assert_eq!(parse_best_score(Some(" 17 ")), 17);
        assert_eq!(parse_best_score(Some("12.9")), 12);
    }

    #[test]
    fn test_parse_best_score_garbage_is_zero() {
        assert_eq!(parse_best_score(Some("")), 0);
        assert_eq!(parse_best_score(Some("wolf")), 0);
        assert_eq!(parse_best_score(Some("-5")), 0);
        assert_eq!(parse_best_score(Some("NaN")), 0);
        assert_eq!(parse_best_score(Some("inf")), 0);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load(), 0);
        store.save(12);
        assert_eq!(store.load(), 12);

        let store = MemoryStore::with_raw("corrupt");
        assert_eq!(store.load(), 0);
    }
}
