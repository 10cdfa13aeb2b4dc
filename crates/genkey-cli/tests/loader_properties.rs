//! Property-based tests for the loader.
//!
//! Verifies the read ceiling and the typed wrap for arbitrary file contents,
//! driving the async loader on a current-thread runtime per case.

use std::io::Write;

use genkey_cli::{
    LoaderConfig, MemoryEnv,
    loader::{
        INFO_ENV_KEY, INFO_LIMIT, SALT_ENV_KEY, SALT_LIMIT, load_info, load_salt, read_bounded,
    },
};
use proptest::prelude::*;
use tempfile::NamedTempFile;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().expect("build runtime")
}

fn file_with(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents).expect("write temp file");
    file
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: A bounded read yields exactly min(len, limit) leading bytes
    #[test]
    fn prop_read_never_exceeds_limit(
        contents in prop::collection::vec(any::<u8>(), 0..256),
        limit in 0u64..128,
    ) {
        let file = file_with(&contents);

        let bytes = runtime().block_on(read_bounded(file.path(), limit))?;

        let expected = contents.len().min(limit as usize);
        prop_assert_eq!(bytes.as_slice(), &contents[..expected]);
    }

    /// Property: The salt chain keeps the first 32 bytes and never errors on length
    #[test]
    fn prop_salt_chain_truncates(contents in prop::collection::vec(any::<u8>(), 0..128)) {
        let file = file_with(&contents);
        let env = MemoryEnv::new().with_var(SALT_ENV_KEY, file.path());

        let salt = runtime().block_on(load_salt(&env, &LoaderConfig::default()))?;

        let expected = contents.len().min(SALT_LIMIT as usize);
        prop_assert_eq!(salt.as_bytes(), &contents[..expected]);
    }

    /// Property: The info chain keeps the first 1024 bytes
    #[test]
    fn prop_info_chain_truncates(contents in prop::collection::vec(any::<u8>(), 0..2048)) {
        let file = file_with(&contents);
        let env = MemoryEnv::new().with_var(INFO_ENV_KEY, file.path());

        let info = runtime().block_on(load_info(&env, &LoaderConfig::default()))?;

        let expected = contents.len().min(INFO_LIMIT as usize);
        prop_assert_eq!(info.as_bytes(), &contents[..expected]);
    }
}
