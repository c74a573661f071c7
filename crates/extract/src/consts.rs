use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Literal token marking an art-related change bullet ("New Splash Art",
/// "Updated splash art", ...). Case-sensitive, leading space included.
pub(crate) const ART_TOKEN: &str = " art";

/// Prefix of a version marker's link title, e.g. `V12.5`.
pub(crate) const VERSION_MARKER_PREFIX: char = 'V';

// Version markers on a patch history page: `<dl><dt><a title="V12.5">`.
selector!(VERSION_MARKER_SELECTOR, "dl dt a[title]");
selector!(LINK_SELECTOR, "a[href]");
regex!(PATCH_REGEX, r"^(\d+)\.(\d+)$");

/// Elements that count as a single change bullet.
pub(crate) const BLOCK_TAGS: &[&str] = &["li", "p", "dd"];
/// Elements that hold their own bullets; their text does not count towards
/// the enclosing bullet's own text.
pub(crate) const NESTED_LIST_TAGS: &[&str] = &["ul", "ol", "dl"];
