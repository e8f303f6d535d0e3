//! `User-Agent` values identifying a client library.

use std::fmt;

use http::HeaderValue;
use http::header::InvalidHeaderValue;

use crate::constants::UNKNOWN_PRODUCT;

/// A product token (`name[/version]`) for a `User-Agent` header.
///
/// Use the [`user_agent!`](crate::user_agent!) macro to get one for the crate
/// you are writing:
///
/// ```rust
/// let agent = apikit_http::user_agent!();
/// assert_eq!(agent.to_string(), format!("apikit-http/{}", env!("CARGO_PKG_VERSION")));
/// ```
///
/// (In a doctest, the "calling crate" is the crate being documented.)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserAgent {
    product: String,
    version: Option<String>,
}

impl UserAgent {
    /// Creates a product token without a version.
    ///
    /// A blank name is replaced by [`UNKNOWN_PRODUCT`].
    #[must_use]
    pub fn new(product: impl Into<String>) -> Self {
        let product = product.into();
        let product = if product.trim().is_empty() {
            UNKNOWN_PRODUCT.to_owned()
        } else {
            product
        };
        Self {
            product,
            version: None,
        }
    }

    /// Sets the version; a blank version is ignored.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.version = (!version.trim().is_empty()).then_some(version);
        self
    }

    /// The product name.
    #[must_use]
    pub fn product(&self) -> &str {
        &self.product
    }

    /// The product version, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Renders the token as a header value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeaderValue`] if the name or version contains
    /// characters that are not allowed in a header value.
    pub fn to_header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::try_from(self.to_string())
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{version}", self.product),
            None => f.write_str(&self.product),
        }
    }
}

/// Builds a [`UserAgent`] from the calling crate's package name and version.
#[macro_export]
macro_rules! user_agent {
    () => {
        $crate::UserAgent::new(env!("CARGO_PKG_NAME")).with_version(env!("CARGO_PKG_VERSION"))
    };
}
