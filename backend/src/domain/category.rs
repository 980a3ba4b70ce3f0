//! Category set data model.
//!
//! Each user owns at most one ordered list of skill category names; the list
//! order is the display and plot order on the radar chart. The list is always
//! replaced wholesale, never patched.

/// Default category names seeded for every new account.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Coding",
    "Design",
    "Communication",
    "Leadership",
    "Problem Solving",
];

/// Minimum category count enforced by the settings UI before saving.
///
/// Advisory only: the repository boundary deliberately does not enforce this,
/// matching the observed behaviour where a direct API call can store a
/// shorter list.
pub const MIN_CATEGORIES: usize = 3;

/// The default seed list as owned strings, in plot order.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|name| (*name).to_owned()).collect()
}
