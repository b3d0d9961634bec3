//! Level-naming scheme for the hierarchy.
//!
//! Each hierarchy level maps to a fixed letter in level order (root = 'a') and a
//! collection named `<letter>coll`, so a 5-level run produces `acoll` through
//! `ecoll`. Relationship type labels are derived from the letters of the two
//! levels they connect: level a -> b edges are typed "AB".

use crate::error::PopulateError;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Name of the single collection holding all relationship documents.
pub const REL_COLLECTION: &str = "rels";

/// Maps recursion depths to level letters, collection names and
/// relationship type labels.
#[derive(Debug, Clone)]
pub struct LevelScheme {
    levels: usize,
}

impl LevelScheme {
    /// Create a scheme for the given number of levels (1 to 26).
    pub fn new(levels: usize) -> Result<Self, PopulateError> {
        if levels == 0 || levels > ALPHABET.len() {
            return Err(PopulateError::Config(format!(
                "levels must be between 1 and {}, got {levels}",
                ALPHABET.len()
            )));
        }
        Ok(Self { levels })
    }

    /// Number of hierarchy levels (root inclusive).
    pub fn depth_count(&self) -> usize {
        self.levels
    }

    /// The letter for a level. Depth 0 is the root.
    pub fn letter(&self, depth: usize) -> char {
        debug_assert!(depth < self.levels);
        ALPHABET[depth] as char
    }

    /// The node collection name for a level, e.g. `acoll`.
    pub fn collection(&self, depth: usize) -> String {
        format!("{}coll", self.letter(depth))
    }

    /// All node collection names in level order.
    pub fn collections(&self) -> Vec<String> {
        (0..self.levels).map(|d| self.collection(d)).collect()
    }

    /// Relationship type label for an edge between two levels, the uppercased
    /// concatenation of their letters in (source, target) order.
    pub fn rel_type(&self, src_depth: usize, tgt_depth: usize) -> String {
        format!(
            "{}{}",
            self.letter(src_depth).to_ascii_uppercase(),
            self.letter(tgt_depth).to_ascii_uppercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_collections() {
        let scheme = LevelScheme::new(5).unwrap();
        assert_eq!(scheme.letter(0), 'a');
        assert_eq!(scheme.letter(4), 'e');
        assert_eq!(scheme.collection(0), "acoll");
        assert_eq!(scheme.collection(2), "ccoll");
        assert_eq!(
            scheme.collections(),
            vec!["acoll", "bcoll", "ccoll", "dcoll", "ecoll"]
        );
    }

    #[test]
    fn test_rel_type_is_uppercased_letter_pair() {
        let scheme = LevelScheme::new(3).unwrap();
        assert_eq!(scheme.rel_type(0, 1), "AB");
        assert_eq!(scheme.rel_type(1, 2), "BC");
    }

    #[test]
    fn test_level_bounds() {
        assert!(LevelScheme::new(0).is_err());
        assert!(LevelScheme::new(27).is_err());
        assert!(LevelScheme::new(26).is_ok());
    }
}
