//! Independent pending asset operations and aggregate load progress.

/// Outcome of one asynchronous asset operation.
#[derive(Clone, Debug, Default)]
pub enum AssetState<T> {
    #[default]
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> AssetState<T> {
    /// The payload if the asset resolved successfully. Pending and failed
    /// assets look the same to consumers.
    pub fn ready(&self) -> Option<&T> {
        match self {
            AssetState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, AssetState::Pending)
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for AssetState<T> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => AssetState::Ready(v),
            Err(e) => AssetState::Failed(e.to_string()),
        }
    }
}

/// Counts registered and settled items, failures included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: u32,
    pub total: u32,
    pub failed: u32,
}

impl LoadProgress {
    pub fn register(&mut self, count: u32) {
        self.total += count;
    }

    /// Mark one item settled; returns the new percentage.
    pub fn settle(&mut self, ok: bool) -> f32 {
        if self.loaded < self.total {
            self.loaded += 1;
            if !ok {
                self.failed += 1;
            }
        }
        self.percent()
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.loaded as f32 / self.total as f32 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.loaded >= self.total
    }
}
