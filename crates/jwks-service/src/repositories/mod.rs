pub mod key_files;
