//! Build-time constants generated from the repository's config.toml.

include!(concat!(env!("OUT_DIR"), "/dymatic_config.rs"));
