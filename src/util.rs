mod arc_anyhow_error;
mod ascii_table;
mod request_map;
mod timed_cache;

pub use self::{
    arc_anyhow_error::ArcAnyhowError,
    ascii_table::AsciiTable,
    request_map::RequestMap,
    timed_cache::{
        TimedCache,
        TimedCacheEntry,
        DEFAULT_STALE_TIME,
    },
};
