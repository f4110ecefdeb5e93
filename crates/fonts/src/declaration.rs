//! `[[fonts]]` entries: a family name plus local files or a remote flag.

use crate::error::FontError;
use std::path::{Path, PathBuf};
use styled_prose_config::{ConfigTable, FieldError, FieldErrors, FieldReader};

/// One of the four faces a family can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::Regular,
        FontRole::Bold,
        FontRole::Italic,
        FontRole::BoldItalic,
    ];

    /// Lower-case role name, as found in remote file names.
    pub fn as_str(self) -> &'static str {
        match self {
            FontRole::Regular => "regular",
            FontRole::Bold => "bold",
            FontRole::Italic => "italic",
            FontRole::BoldItalic => "bolditalic",
        }
    }

    /// Cached file name for this role.
    pub fn file_name(self) -> String {
        format!("{}.ttf", self.as_str())
    }

    /// Id the face is registered under with the backend.
    pub fn font_id(self, family: &str) -> String {
        match self {
            FontRole::Regular => family.to_string(),
            FontRole::Bold => format!("{}_bold", family),
            FontRole::Italic => format!("{}_italic", family),
            FontRole::BoldItalic => format!("{}_bold_italic", family),
        }
    }

    /// Role of a remote file such as `static/Lora-BoldItalic.ttf`: the part
    /// after the last `-`, without extension, lower-cased.
    pub fn from_remote_file_name(file_name: &str) -> Option<FontRole> {
        let tail = file_name.rsplit('-').next()?;
        let stem = tail.rsplit_once('.').map_or(tail, |(stem, _)| stem);
        match stem.to_lowercase().as_str() {
            "regular" => Some(FontRole::Regular),
            "bold" => Some(FontRole::Bold),
            "italic" => Some(FontRole::Italic),
            "bolditalic" => Some(FontRole::BoldItalic),
            _ => None,
        }
    }
}

/// The font files of one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFiles {
    pub regular: PathBuf,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
}

impl FontFiles {
    pub fn get(&self, role: FontRole) -> Option<&Path> {
        match role {
            FontRole::Regular => Some(&self.regular),
            FontRole::Bold => self.bold.as_deref(),
            FontRole::Italic => self.italic.as_deref(),
            FontRole::BoldItalic => self.bold_italic.as_deref(),
        }
    }

    /// All four role files inside `dir`, named by [`FontRole::file_name`].
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            regular: dir.join(FontRole::Regular.file_name()),
            bold: Some(dir.join(FontRole::Bold.file_name())),
            italic: Some(dir.join(FontRole::Italic.file_name())),
            bold_italic: Some(dir.join(FontRole::BoldItalic.file_name())),
        }
    }

    /// Resolves relative paths against `base`.
    pub fn relative_to(&self, base: &Path) -> Self {
        let join = |p: &Path| base.join(p);
        Self {
            regular: join(&self.regular),
            bold: self.bold.as_deref().map(join),
            italic: self.italic.as_deref().map(join),
            bold_italic: self.bold_italic.as_deref().map(join),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// User-supplied files, relative to the configuration file.
    Local(FontFiles),
    /// Fetched from the remote catalog into the font cache.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDeclaration {
    pub name: String,
    pub source: FontSource,
}

impl FontDeclaration {
    /// Validates one `[[fonts]]` table; `index` names the entry when it has
    /// no usable `font_name`.
    pub fn from_table(index: usize, table: &ConfigTable) -> Result<Self, FontError> {
        let mut reader = FieldReader::new(table);

        let name = reader.string("font_name");
        let regular = reader.string("regular").map(PathBuf::from);
        let bold = reader.string("bold").map(PathBuf::from);
        let italic = reader.string("italicized").map(PathBuf::from);
        let bold_italic = reader.string("bold_italicized").map(PathBuf::from);
        let remote = reader.boolean("from_google_fonts").unwrap_or(false);

        if name.is_none() && !reader.is_set("font_name") {
            reader.error("font_name", "field required");
        }

        let mut shape_error = None;
        let any_local = regular.is_some() || bold.is_some() || italic.is_some() || bold_italic.is_some();
        if remote && any_local {
            shape_error = Some(FieldError::new(
                "from_google_fonts",
                "You cannot use Google Fonts while also providing local font files. \
                 Disable remote fetching or unset all local files.",
            ));
        } else if !remote && regular.is_none() {
            shape_error = Some(FieldError::new(
                "regular",
                "You must specify a regular local font file, or enable `from_google_fonts` \
                 to use Google Fonts.",
            ));
        }

        let family = name.clone().unwrap_or_else(|| format!("fonts[{}]", index));
        let mut failures = match reader.finish() {
            Ok(()) => Vec::new(),
            Err(FieldErrors(failures)) => failures,
        };
        failures.extend(shape_error);
        if !failures.is_empty() {
            return Err(FontError::Invalid {
                family,
                failures: FieldErrors(failures),
            });
        }

        let source = match regular {
            Some(regular) if !remote => FontSource::Local(FontFiles {
                regular,
                bold,
                italic,
                bold_italic,
            }),
            _ => FontSource::Remote,
        };
        Ok(Self {
            name: family,
            source,
        })
    }
}
