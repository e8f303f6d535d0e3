//! Independent, unvalidated copies of header collections.
//!
//! [`HeaderList`] is what an [`HttpError`](crate::HttpError) keeps in place of
//! the transport's own header storage. Values are stored as raw bytes and are
//! never validated on insertion, so a header the server sent with an illegal
//! value is preserved exactly as received instead of failing the copy.

use std::fmt;

/// A borrowed view of a header collection: `(name, raw value)` pairs.
///
/// A name with several values may either appear once per value or be
/// repeated; copies preserve the order in which values are yielded.
pub type HeaderIter<'a> = Box<dyn Iterator<Item = (&'a str, &'a [u8])> + 'a>;

#[derive(Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    values: Vec<Box<[u8]>>,
}

/// An ordered, case-insensitive multimap of header names to value lists.
///
/// Names keep the spelling of their first insertion and the order in which
/// they were first seen; lookups ignore ASCII case. Every list owns its
/// storage, so cloning or copying never shares memory with the source.
///
/// # Example
///
/// ```rust
/// use apikit_http::HeaderList;
///
/// let mut headers = HeaderList::new();
/// headers.append_unchecked("Set-Cookie", "a=1");
/// headers.append_unchecked("set-cookie", "b=2");
/// headers.append_unchecked("X-Broken", b"bad\x00value".as_slice());
///
/// assert_eq!(headers.len(), 2);
/// assert_eq!(headers.get_all("SET-COOKIE").count(), 2);
/// assert_eq!(headers.get("x-broken"), Some(b"bad\x00value".as_slice()));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<HeaderEntry>,
}

impl HeaderList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Copies every name/value pair of a header view into a new list.
    ///
    /// No validation is performed, so the copy cannot fail.
    #[must_use]
    pub fn copy_from(source: HeaderIter<'_>) -> Self {
        let mut copy = Self::new();
        for (name, value) in source {
            copy.append_unchecked(name, value);
        }
        copy
    }

    /// Adds a value for `name`, after any values already present.
    ///
    /// Neither the name nor the value is checked for syntactic validity.
    pub fn append_unchecked(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        let name = name.into();
        let value = value.into().into_boxed_slice();
        match self.position(&name) {
            Some(index) => self.entries[index].values.push(value),
            None => self.entries.push(HeaderEntry {
                name,
                values: vec![value],
            }),
        }
    }

    /// Returns the first value for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.get_all(name).next()
    }

    /// Returns the first value for `name` if it is present and valid UTF-8.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|value| std::str::from_utf8(value).ok())
    }

    /// Returns all values for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.position(name)
            .into_iter()
            .flat_map(|index| self.entries[index].values.iter().map(AsRef::as_ref))
    }

    /// Returns `true` if at least one value is present for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterates over the distinct names with their value lists.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&[u8]>)> {
        self.entries.iter().map(|entry| {
            (
                entry.name.as_str(),
                entry.values.iter().map(AsRef::as_ref).collect(),
            )
        })
    }

    /// Iterates over every `(name, value)` pair, flattening value lists.
    ///
    /// The result can be fed back into [`HeaderList::copy_from`].
    #[must_use]
    pub fn pairs(&self) -> HeaderIter<'_> {
        Box::new(self.entries.iter().flat_map(|entry| {
            entry
                .values
                .iter()
                .map(move |value| (entry.name.as_str(), value.as_ref()))
        }))
    }

    /// Returns the number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list holds no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name))
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderList
where
    N: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut list = Self::new();
        for (name, value) in iter {
            list.append_unchecked(name, value);
        }
        list
    }
}

impl fmt::Debug for HeaderList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in &self.entries {
            let values: Vec<_> = entry
                .values
                .iter()
                .map(|value| String::from_utf8_lossy(value))
                .collect();
            map.entry(&entry.name, &values);
        }
        map.finish()
    }
}

/// Builds a [`HeaderIter`] over an [`http::HeaderMap`].
///
/// Entries whose name does not satisfy `keep` are skipped.
pub(crate) fn header_map_iter<'a>(
    map: &'a http::HeaderMap,
    keep: impl Fn(&str) -> bool + 'a,
) -> HeaderIter<'a> {
    Box::new(
        map.iter()
            .filter(move |(name, _)| keep(name.as_str()))
            .map(|(name, value)| (name.as_str(), value.as_bytes())),
    )
}
