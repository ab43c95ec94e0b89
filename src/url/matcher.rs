use regex::RegexSet;
use url::Url;

/// Default patterns for product pages on storefront-style sites
pub const DEFAULT_PRODUCT_PATTERNS: &[&str] = &["/products/", "/collections/.*/products/"];

/// Classifies canonical URLs as product pages by path pattern
///
/// Patterns are searched for anywhere in the path, not anchored, so
/// `/blog/products/review` counts as a product page too.
#[derive(Debug, Clone)]
pub struct ProductMatcher {
    patterns: RegexSet,
}

impl ProductMatcher {
    /// Compiles a matcher from a list of regex patterns
    ///
    /// # Errors
    ///
    /// Returns the regex error of the first pattern that fails to compile.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    /// Returns true if the URL's path matches any product pattern
    ///
    /// # Examples
    ///
    /// ```
    /// use product_harvest::url::ProductMatcher;
    /// use url::Url;
    ///
    /// let matcher = ProductMatcher::default();
    /// assert!(matcher.is_product_url(&Url::parse("https://shop.com/products/bow").unwrap()));
    /// assert!(!matcher.is_product_url(&Url::parse("https://shop.com/about").unwrap()));
    /// ```
    pub fn is_product_url(&self, url: &Url) -> bool {
        self.is_product_path(url.path())
    }

    /// Returns true if the path matches any product pattern
    pub fn is_product_path(&self, path: &str) -> bool {
        self.patterns.is_match(path)
    }
}

impl Default for ProductMatcher {
    fn default() -> Self {
        Self {
            patterns: RegexSet::new(DEFAULT_PRODUCT_PATTERNS)
                .expect("default product patterns are valid regexes"),
        }
    }
}
