pub(crate) type HashSet<T> = std::collections::HashSet<T, ahash::RandomState>;

pub mod edge_irregularity;
