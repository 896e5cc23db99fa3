pub mod edge_irregularity;
