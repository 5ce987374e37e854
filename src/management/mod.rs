mod store;
mod watchlist;

pub use store::EntryStore;
pub use watchlist::WATCHLIST_FILE;
pub use watchlist::WatchlistManager;
