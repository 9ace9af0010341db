pub mod index_map;
