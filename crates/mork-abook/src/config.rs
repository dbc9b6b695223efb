//! Locating the address book to read.
//!
//! The book is taken from, in order: an explicit path, an explicit profile
//! directory, or the default Thunderbird profile found through
//! `profiles.ini` below the home directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the personal address book inside a profile.
pub const BOOK_FILE_NAME: &str = "abook.mab";

/// Directories below `$HOME` that may hold Thunderbird profiles, in lookup
/// order. The first is used by older Debian builds.
pub const PROFILE_ROOTS: [&str; 2] = [".mozilla-thunderbird", ".thunderbird"];

/// Profile index file inside a profile root.
pub const PROFILES_INI: &str = "profiles.ini";

/// Resolved location of the address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the Mork address book.
    pub book: PathBuf,
}

impl Config {
    /// Resolves the book location.
    ///
    /// # Errors
    ///
    /// Fails when discovery is needed and `$HOME` is unset, no
    /// `profiles.ini` names a profile, or reading one fails.
    pub async fn resolve(book: Option<PathBuf>, profile_dir: Option<PathBuf>) -> Result<Self> {
        if let Some(book) = book {
            return Ok(Self { book });
        }
        if let Some(profile_dir) = profile_dir {
            return Ok(Self::for_profile(&profile_dir));
        }

        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| Error::Config("HOME is not set".to_string()))?;
        let profile_dir = find_profile_dir(&home).await?;
        Ok(Self::for_profile(&profile_dir))
    }

    /// Book location inside `profile_dir`.
    #[must_use]
    pub fn for_profile(profile_dir: &Path) -> Self {
        Self {
            book: profile_dir.join(BOOK_FILE_NAME),
        }
    }

    /// Directory holding the book, used to resolve contact photos.
    #[must_use]
    pub fn profile_dir(&self) -> Option<&Path> {
        self.book.parent()
    }
}

/// Finds the default Thunderbird profile below `home`.
///
/// # Errors
///
/// Returns [`Error::ProfileNotFound`] when no profile root has a usable
/// `profiles.ini`, or [`Error::Io`] when one exists but cannot be read.
pub async fn find_profile_dir(home: &Path) -> Result<PathBuf> {
    for root in PROFILE_ROOTS {
        let root_dir = home.join(root);
        let ini = root_dir.join(PROFILES_INI);

        let text = match tokio::fs::read_to_string(&ini).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => return Err(err.into()),
        };

        match parse_profiles_ini(&text, &root_dir) {
            Some(profile) => {
                tracing::debug!(ini = %ini.display(), profile = %profile.display(), "Found Thunderbird profile");
                return Ok(profile);
            }
            None => tracing::warn!(ini = %ini.display(), "No profile path in profiles.ini"),
        }
    }

    Err(Error::ProfileNotFound(
        home.join(PROFILE_ROOTS[1]).join(PROFILES_INI),
    ))
}

#[derive(Debug, Default)]
struct ProfileEntry {
    path: Option<String>,
    is_relative: bool,
    is_default: bool,
}

impl ProfileEntry {
    fn new() -> Self {
        Self {
            is_relative: true,
            ..Self::default()
        }
    }
}

/// Picks the profile directory out of a `profiles.ini`.
///
/// The `[Profile*]` section marked `Default=1` wins, otherwise the first one
/// with a `Path=`. Relative paths (`IsRelative=1`, the default) are joined
/// onto `root_dir`.
#[must_use]
pub fn parse_profiles_ini(text: &str, root_dir: &Path) -> Option<PathBuf> {
    let mut profiles = Vec::new();
    let mut current: Option<ProfileEntry> = None;

    for line in text.lines().map(str::trim) {
        if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            profiles.extend(current.take());
            if section.starts_with("Profile") {
                current = Some(ProfileEntry::new());
            }
            continue;
        }
        let (Some(entry), Some((key, value))) = (current.as_mut(), line.split_once('=')) else {
            continue;
        };
        match key.trim() {
            "Path" => entry.path = Some(value.trim().to_string()),
            "IsRelative" => entry.is_relative = value.trim() == "1",
            "Default" => entry.is_default = value.trim() == "1",
            _ => {}
        }
    }
    profiles.extend(current);

    let profiles: Vec<ProfileEntry> = profiles
        .into_iter()
        .filter(|profile| profile.path.as_deref().is_some_and(|p| !p.is_empty()))
        .collect();
    let chosen = profiles
        .iter()
        .find(|profile| profile.is_default)
        .or_else(|| profiles.first())?;
    let path = chosen.path.as_deref()?;

    Some(if chosen.is_relative {
        root_dir.join(path)
    } else {
        PathBuf::from(path)
    })
}
