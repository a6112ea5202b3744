pub mod entry;
pub mod read;
pub mod sort;

pub use entry::DirectoryEntry;
pub use read::{read_entries, ReadOptions};
pub use sort::{sort_entries, Criterion, Order, SortKey};
