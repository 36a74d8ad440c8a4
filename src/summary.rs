use std::fmt;

/// A point-in-time report on a tree: everything the public queries return, gathered in one
/// place. Building one walks the tree several times so it costs `O(n)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<K> {
    /// Number of keys.
    pub size: usize,
    /// Height in edges, `-1` for an empty tree.
    pub height: isize,
    /// Smallest key, if any.
    pub min: Option<K>,
    /// Largest key, if any.
    pub max: Option<K>,
    /// All keys in ascending order.
    pub inorder: Vec<K>,
    /// Whether the tree passed its validator.
    pub is_valid: bool,
}

impl<K> fmt::Display for Summary<K>
where
    K: fmt::Display,
{
    /// Writes `size=3, height=1, min=1, max=3, valid=true`. Missing bounds print as `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size={}, height={}, min=", self.size, self.height)?;
        write_bound(f, self.min.as_ref())?;
        f.write_str(", max=")?;
        write_bound(f, self.max.as_ref())?;
        write!(f, ", valid={}", self.is_valid)
    }
}

fn write_bound<K: fmt::Display>(f: &mut fmt::Formatter<'_>, bound: Option<&K>) -> fmt::Result {
    match bound {
        Some(key) => write!(f, "{}", key),
        None => f.write_str("none"),
    }
}
