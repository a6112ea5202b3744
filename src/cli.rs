use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::config::{Config, DEFAULT_NAME_LENGTH, DEFAULT_TIME_FORMAT};
use crate::file_system::SortKey;
use crate::filter::IgnorePattern;
use crate::handler::IndexRequest;

/// Render a directory listing as an HTML index page.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Request URI the directory is served under.
    #[arg(name = "uri", long = "uri", short = 'u', default_value = "/")]
    pub uri: String,
    /// Raw query string of the request, e.g. "C=S&O=D".
    #[arg(name = "query", long = "query", short = 'q')]
    pub query: Option<String>,
    /// Response charset; display lengths count characters only for UTF-8.
    #[arg(name = "charset", long = "charset", default_value = "utf-8")]
    pub charset: String,
    /// Write the page here instead of standard output.
    #[arg(name = "output", long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// name, size, date, name_desc, size_desc or date_desc.
    #[arg(name = "sort", long = "sort", short = 's', default_value_t = SortKey::default())]
    pub default_sort: SortKey,
    #[arg(name = "case-insensitive", long = "case-insensitive", short = 'i')]
    pub case_insensitive: bool,
    #[arg(name = "no-dirs-first", long = "no-dirs-first")]
    pub no_dirs_first: bool,
    #[arg(name = "localtime", long = "localtime", alias = "local")]
    pub localtime: bool,
    #[arg(
        name = "human-sizes",
        long = "human-sizes",
        short = 'H',
        alias = "human",
        conflicts_with = "size-width"
    )]
    pub human_sizes: bool,
    #[arg(name = "size-width", long = "size-width", default_value_t = 0)]
    pub size_width: usize,
    #[arg(name = "name-length", long = "name-length", default_value_t = DEFAULT_NAME_LENGTH)]
    pub name_length: usize,
    #[arg(name = "time-format", long = "time-format", default_value = DEFAULT_TIME_FORMAT)]
    pub time_format: String,

    #[arg(name = "hide-symlinks", long = "hide-symlinks")]
    pub hide_symlinks: bool,
    #[arg(name = "hide-path", long = "hide-path", requires = "header")]
    pub hide_path: bool,
    #[arg(name = "hide-parent", long = "hide-parent")]
    pub hide_parent: bool,
    #[arg(name = "all", long = "all", short = 'a', alias = "dot-files")]
    pub show_dot_files: bool,

    /// Glob of names to leave out; may be repeated.
    #[arg(name = "ignore", long = "ignore", short = 'e')]
    pub ignore: Vec<String>,
    /// Regular expression of names to leave out, matched case-insensitively.
    #[arg(name = "ignore-regex", long = "ignore-regex", short = 'r')]
    pub ignore_regex: Vec<String>,

    #[arg(name = "css", long = "css")]
    pub css_href: Option<String>,
    /// File whose contents replace the built-in page header.
    #[arg(name = "header", long = "header")]
    pub header: Option<PathBuf>,
    /// File whose contents replace the built-in page footer.
    #[arg(name = "footer", long = "footer")]
    pub footer: Option<PathBuf>,
}

impl Args {
    pub fn request(&self) -> IndexRequest {
        let utf8 = self.charset.eq_ignore_ascii_case("utf-8")
            || self.charset.eq_ignore_ascii_case("utf8");
        IndexRequest {
            path: self.dir.clone(),
            uri: self.uri.clone(),
            query: self.query.clone(),
            utf8,
        }
    }
}

impl TryInto<Config> for Args {
    type Error = anyhow::Error;

    fn try_into(self) -> Result<Config, Self::Error> {
        let patterns: Vec<IgnorePattern> = self
            .ignore
            .into_iter()
            .map(IgnorePattern::Glob)
            .chain(self.ignore_regex.into_iter().map(IgnorePattern::Regex))
            .collect();

        let header = self.header.as_deref().map(read_decoration).transpose()?;
        let footer = self.footer.as_deref().map(read_decoration).transpose()?;

        let config = Config {
            enabled: true,
            default_sort: self.default_sort,
            case_sensitive: !self.case_insensitive,
            dirs_first: !self.no_dirs_first,
            localtime: self.localtime,
            exact_size: !self.human_sizes,
            size_width: self.size_width,
            name_length: self.name_length,
            time_format: self.time_format,
            hide_symlinks: self.hide_symlinks,
            show_path: !self.hide_path,
            hide_parent: self.hide_parent,
            show_dot_files: self.show_dot_files,
            css_href: self.css_href,
            header,
            footer,
            ..Config::default()
        };
        config.with_ignore(&patterns)
    }
}

fn read_decoration(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read '{}'", path.display()))
}
