pub mod data_core;
pub mod path_builder;
pub mod shadow_tree;
pub mod tree_walker;
