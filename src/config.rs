use std::ffi::OsString;

use anyhow::{anyhow, bail};
use clap::Parser;

use crate::cli::Args;
use crate::file_system::SortKey;
use crate::filter::{IgnoreFilter, IgnorePattern};

pub const DEFAULT_NAME_LENGTH: usize = 50;
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Settings of one listing location, read-only once built and shared by all
/// requests against it.
#[derive(Debug)]
pub struct Config {
    pub enabled: bool,
    /// Ordering used when the request carries no valid sort query.
    pub default_sort: SortKey,
    pub case_sensitive: bool,
    pub dirs_first: bool,
    /// Show modification times in the local time zone instead of UTC.
    pub localtime: bool,
    /// Show sizes as byte counts rather than in binary units.
    pub exact_size: bool,
    /// Right-align exact sizes to this many bytes.
    pub size_width: usize,
    /// Display units a name may take before it is cut.
    pub name_length: usize,
    pub time_format: String,
    pub hide_symlinks: bool,
    /// Print the request URI as the page heading.
    pub show_path: bool,
    pub hide_parent: bool,
    pub show_dot_files: bool,
    pub ignore: IgnoreFilter,
    pub css_href: Option<String>,
    pub header: Option<Vec<u8>>,
    pub footer: Option<Vec<u8>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: false,
            default_sort: SortKey::default(),
            case_sensitive: true,
            dirs_first: true,
            localtime: false,
            exact_size: true,
            size_width: 0,
            name_length: DEFAULT_NAME_LENGTH,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            hide_symlinks: false,
            show_path: true,
            hide_parent: false,
            show_dot_files: false,
            ignore: IgnoreFilter::empty(),
            css_href: None,
            header: None,
            footer: None,
        }
    }
}

impl Config {
    pub fn parse<I, T>(itr: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Args::try_parse_from(itr) {
            Ok(args) => Ok(args.try_into()?),
            Err(err) => Err(anyhow!("error parsing arguments into Config: {}", err)),
        }
    }

    /// Compiles `patterns` into the ignore filter, replacing any previous one.
    pub fn with_ignore(mut self, patterns: &[IgnorePattern]) -> anyhow::Result<Self> {
        self.ignore = IgnoreFilter::new(patterns)?;
        Ok(self)
    }

    /// Rejects combinations that would produce a broken page.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.show_path && self.header.is_none() {
            bail!("show_path can only be turned off together with a custom header");
        }
        if self.time_format.is_empty() {
            bail!("time format must not be empty");
        }
        Ok(())
    }
}
