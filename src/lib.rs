//! # Chained Hash Map
//!
//! A Rust implementation of a hash table built from first principles.
//!
//! String keys are hashed with the DJB2 rolling hash, collisions are resolved
//! with a singly linked chain per bucket, and the bucket array grows and
//! shrinks with the observed load factor: it doubles once the load factor
//! passes 0.7 and halves (never below the capacity the table was constructed
//! with) once removals drop it under 0.2. Every resize rehashes every entry
//! under the new bucket count.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new hash map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.insert("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Sizing
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! # fn main() -> Result<(), chainmap::CapacityError> {
//! // Two buckets to start; the bucket count doubles once the load factor
//! // passes 0.7, so the third insert leaves the table wider than it began.
//! let mut map = ChainedHashMap::with_capacity(2)?;
//! map.insert("line_1".to_string(), "Tiny hash table");
//! map.insert("line_2".to_string(), "Filled beyond capacity");
//! map.insert("line_3".to_string(), "Linked list saves the day!");
//!
//! assert!(map.capacity() > 2);
//! assert_eq!(map.get("line_3"), Some(&"Linked list saves the day!"));
//!
//! // An explicit resize rehashes every entry under the new bucket count.
//! map.resize(2.0);
//! assert_eq!(map.get("line_1"), Some(&"Tiny hash table"));
//! # Ok(())
//! # }
//! ```
//!
//! The table assumes exclusive, sequential access by one caller. A system
//! that shares a table across threads must wrap every operation in external
//! mutual exclusion, such as a `Mutex`.

/// Module implementing the chained hash table and its entry chains
mod chained_hashmap;
/// Utility functions and traits for the hash map
mod utils;

pub use chained_hashmap::{CapacityError, ChainedHashMap, Iter};
pub use utils::HashMapExtensions;
