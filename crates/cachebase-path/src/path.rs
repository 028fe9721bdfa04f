//! The [`Path`] type and its string form.
//!
//! Grammar of the string form:
//!
//! - `""` is the root path (zero segments)
//! - `.` separates segments
//! - `\.` is a literal dot inside a segment
//! - `\\` is a literal backslash
//! - any other character, including a lone `\`, is taken verbatim
//!
//! Empty segments are rejected, so `"a..b"`, `".a"` and `"a."` do not parse.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::{PathError, PathResult};

const SEPARATOR: char = '.';
const ESCAPE: char = '\\';

/// A parsed location inside a nested value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The root path. Reading it yields the whole value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-notation string.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachebase_path::Path;
    ///
    /// let path = Path::parse("a.b\\.c").unwrap();
    /// assert_eq!(path.segments(), ["a", "b.c"]);
    /// assert!(Path::parse("a..b").is_err());
    /// ```
    pub fn parse(input: &str) -> PathResult<Self> {
        if input.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                ESCAPE => match chars.peek() {
                    Some(&next @ (SEPARATOR | ESCAPE)) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push(ch),
                },
                SEPARATOR => push_segment(input, &mut segments, std::mem::take(&mut current))?,
                _ => current.push(ch),
            }
        }
        push_segment(input, &mut segments, current)?;

        Ok(Self { segments })
    }

    /// Join a sequence of segments with `.` and parse the result.
    ///
    /// Segments are joined verbatim, so a segment that itself contains an
    /// unescaped dot contributes more than one segment.
    pub fn from_segments<I, S>(segments: I) -> PathResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = segments
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(".");
        Self::parse(&joined)
    }

    /// A single-segment path whose text is taken as-is, dots included.
    pub fn literal(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Append one literal segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// The first segment, i.e. the top-level key this path lives under.
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The terminal segment and the segments leading to it.
    pub fn split_last(&self) -> Option<(&str, &[String])> {
        self.segments
            .split_last()
            .map(|(last, parents)| (last.as_str(), parents))
    }
}

fn push_segment(input: &str, segments: &mut Vec<String>, segment: String) -> PathResult<()> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment {
            path: input.to_owned(),
            position: segments.len(),
        });
    }
    segments.push(segment);
    Ok(())
}

impl fmt::Display for Path {
    /// Renders the canonical string form. Literal dots are escaped, and so
    /// is any backslash that would otherwise read as the start of an escape.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_char(SEPARATOR)?;
            }
            write_segment(f, segment)?;
        }
        Ok(())
    }
}

fn write_segment(f: &mut fmt::Formatter<'_>, segment: &str) -> fmt::Result {
    let mut chars = segment.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            SEPARATOR => f.write_str("\\.")?,
            ESCAPE if matches!(chars.peek(), None | Some(&SEPARATOR) | Some(&ESCAPE)) => {
                f.write_str("\\\\")?
            }
            _ => f.write_char(ch)?,
        }
    }
    Ok(())
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> PathResult<Self> {
        Self::parse(s)
    }
}

/// Anything that can name a location: dot-notation strings, segment
/// sequences, or an already-parsed [`Path`].
pub trait IntoPath {
    fn into_path(self) -> PathResult<Path>;
}

impl IntoPath for Path {
    fn into_path(self) -> PathResult<Path> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> PathResult<Path> {
        Ok(self.clone())
    }
}

impl IntoPath for &str {
    fn into_path(self) -> PathResult<Path> {
        Path::parse(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> PathResult<Path> {
        Path::parse(&self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> PathResult<Path> {
        Path::parse(self)
    }
}

impl IntoPath for &[&str] {
    fn into_path(self) -> PathResult<Path> {
        Path::from_segments(self)
    }
}

impl IntoPath for &[String] {
    fn into_path(self) -> PathResult<Path> {
        Path::from_segments(self)
    }
}

impl<const N: usize> IntoPath for [&str; N] {
    fn into_path(self) -> PathResult<Path> {
        Path::from_segments(self)
    }
}

impl IntoPath for Vec<&str> {
    fn into_path(self) -> PathResult<Path> {
        Path::from_segments(self)
    }
}

impl IntoPath for Vec<String> {
    fn into_path(self) -> PathResult<Path> {
        Path::from_segments(self)
    }
}
