use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;

use crate::file_system::entry::DirectoryEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Criterion {
    #[default]
    Name,
    Size,
    ModifiedTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    pub fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// One of the six orderings a listing can be shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub criterion: Criterion,
    pub order: Order,
}

impl SortKey {
    pub const fn new(criterion: Criterion, order: Order) -> Self {
        Self { criterion, order }
    }

    /// Reads a `C=<N|S|M>[&O=<A|D>]` query string.
    ///
    /// Returns `None` when the query is absent or not of that shape. A
    /// criterion letter other than `S` or `M` selects the name, and anything
    /// but `O=D` sorts ascending.
    pub fn from_query(query: Option<&str>) -> Option<Self> {
        let args = query?.as_bytes();
        let well_formed = (args.len() == 3 || (args.len() == 7 && args[3] == b'&'))
            && args[0] == b'C'
            && args[1] == b'=';
        if !well_formed {
            return None;
        }

        let criterion = match args[2] {
            b'M' => Criterion::ModifiedTime,
            b'S' => Criterion::Size,
            _ => Criterion::Name,
        };
        let order = if args.len() == 7 && &args[4..] == b"O=D" {
            Order::Descending
        } else {
            Order::Ascending
        };
        Some(Self::new(criterion, order))
    }

    /// The query this ordering is requested with, already HTML-escaped for
    /// use inside an attribute. Always [`SortKey::QUERY_LEN`] bytes long.
    pub fn query(self) -> &'static str {
        match (self.criterion, self.order) {
            (Criterion::Name, Order::Ascending) => "?C=N&amp;O=A",
            (Criterion::Name, Order::Descending) => "?C=N&amp;O=D",
            (Criterion::Size, Order::Ascending) => "?C=S&amp;O=A",
            (Criterion::Size, Order::Descending) => "?C=S&amp;O=D",
            (Criterion::ModifiedTime, Order::Ascending) => "?C=M&amp;O=A",
            (Criterion::ModifiedTime, Order::Descending) => "?C=M&amp;O=D",
        }
    }

    pub const QUERY_LEN: usize = "?C=x&amp;O=y".len();

    /// Ordering a column header link for `criterion` should request: the
    /// opposite direction for the active column, ascending for the others.
    pub fn toggled_for(self, criterion: Criterion) -> Self {
        if criterion == self.criterion {
            Self::new(criterion, self.order.reverse())
        } else {
            Self::new(criterion, Order::Ascending)
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "name" => Self::new(Criterion::Name, Order::Ascending),
            "size" => Self::new(Criterion::Size, Order::Ascending),
            "date" => Self::new(Criterion::ModifiedTime, Order::Ascending),
            "name_desc" => Self::new(Criterion::Name, Order::Descending),
            "size_desc" => Self::new(Criterion::Size, Order::Descending),
            "date_desc" => Self::new(Criterion::ModifiedTime, Order::Descending),
            _ => return Err(anyhow!("Invalid value for sort order: {}", s)),
        };
        Ok(key)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.criterion {
            Criterion::Name => "name",
            Criterion::Size => "size",
            Criterion::ModifiedTime => "date",
        };
        match self.order {
            Order::Ascending => write!(f, "{name}"),
            Order::Descending => write!(f, "{name}_desc"),
        }
    }
}

fn compare_names(a: &[u8], b: &[u8], case_sensitive: bool) -> Ordering {
    if case_sensitive {
        a.cmp(b)
    } else {
        a.iter()
            .map(u8::to_ascii_lowercase)
            .cmp(b.iter().map(u8::to_ascii_lowercase))
    }
}

fn compare(
    a: &DirectoryEntry,
    b: &DirectoryEntry,
    criterion: Criterion,
    case_sensitive: bool,
) -> Ordering {
    match criterion {
        Criterion::Name => compare_names(a.name(), b.name(), case_sensitive),
        // equal sizes stay unordered, there is no fallback to the name
        Criterion::Size => a.size().cmp(&b.size()),
        Criterion::ModifiedTime => a.modified_at().cmp(b.modified_at()),
    }
}

/// Moves every directory in front of every file with a single swap pass and
/// returns the number of directories.
fn partition_dirs_first(entries: &mut [DirectoryEntry]) -> usize {
    let (mut l, mut r) = (0, entries.len());
    loop {
        while l < r && entries[l].is_dir() {
            l += 1;
        }
        while l < r && !entries[r - 1].is_dir() {
            r -= 1;
        }
        if l >= r {
            break;
        }
        entries.swap(l, r - 1);
    }
    l
}

/// Orders `entries` by `key`.
///
/// With `dirs_first`, directories and files are split into two runs first and
/// each run is sorted on its own, so no entry ever crosses the boundary.
pub fn sort_entries(
    entries: &mut [DirectoryEntry],
    key: SortKey,
    dirs_first: bool,
    case_sensitive: bool,
) {
    let cmp = |a: &DirectoryEntry, b: &DirectoryEntry| {
        key.order.apply(compare(a, b, key.criterion, case_sensitive))
    };

    if dirs_first {
        let split = partition_dirs_first(entries);
        let (dirs, files) = entries.split_at_mut(split);
        dirs.sort_by(cmp);
        files.sort_by(cmp);
    } else {
        entries.sort_by(cmp);
    }
}
