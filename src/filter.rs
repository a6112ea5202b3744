use std::ffi::OsStr;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::bytes::{RegexSet, RegexSetBuilder};

/// One configured ignore rule, before compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnorePattern {
    Glob(String),
    Regex(String),
}

/// Compiled ignore rules applied to raw entry names.
///
/// Regular expressions match case-insensitively anywhere in the name, globs
/// must match the whole name. An entry is ignored if any rule matches.
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    regex: Option<RegexSet>,
    glob: GlobSet,
}

impl IgnoreFilter {
    pub fn new(patterns: &[IgnorePattern]) -> anyhow::Result<Self> {
        let mut regexes = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            match pattern {
                IgnorePattern::Glob(s) => {
                    builder.add(Glob::new(s)?);
                }
                IgnorePattern::Regex(s) => regexes.push(s.as_str()),
            }
        }

        let regex = if regexes.is_empty() {
            None
        } else {
            Some(RegexSetBuilder::new(regexes).case_insensitive(true).build()?)
        };

        Ok(Self {
            regex,
            glob: builder.build()?,
        })
    }

    pub fn empty() -> Self {
        Self {
            regex: None,
            glob: GlobSet::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none() && self.glob.is_empty()
    }

    pub fn is_ignored(&self, name: &OsStr) -> bool {
        if let Some(re) = &self.regex {
            if re.is_match(name.as_encoded_bytes()) {
                return true;
            }
        }
        !self.glob.is_empty() && self.glob.is_match(name)
    }
}

impl Default for IgnoreFilter {
    fn default() -> Self {
        Self::empty()
    }
}
