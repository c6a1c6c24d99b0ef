pub mod jwk_encoder;
pub mod key_merge;
pub mod key_set_service;
