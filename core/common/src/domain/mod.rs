//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod dirs;
pub mod pokemon;

use crate::error::Error;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use dirs::Dirs;
pub use pokemon::{DetailLevel, EntityRecord, EntitySummary, EvolutionNode};

/// ホームディレクトリのパス（POKEDEX_HOME 等から解決）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

fn entity_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("static regex"))
}

/// ポケモン名または図鑑番号（API のパスにそのまま載せる小文字 ASCII）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName(String);

impl EntityName {
    /// 前後空白を除いて小文字化し、API パスとして安全な形か検証する
    pub fn parse(s: &str) -> Result<Self, Error> {
        let normalized = s.trim().to_lowercase();
        if !entity_name_pattern().is_match(&normalized) {
            return Err(Error::invalid_argument(format!(
                "Invalid Pokémon name or id: '{}'",
                s.trim()
            )));
        }
        Ok(Self(normalized))
    }
}

impl std::ops::Deref for EntityName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for EntityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for EntityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
