pub mod id_path;
