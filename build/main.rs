use std::env;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};

// Wire-format and policy constants that must be usable in array-length
// position (stack buffers are sized from them), so they are baked in at
// build time instead of being runtime options.
const MAX_STR_LEN_VAR: &str = "TBAND_MAX_STR_LEN";
const DROP_CNT_EVERY_VAR: &str = "TBAND_TRACE_DROP_CNT_EVERY";

fn env_u64(var: &str, default: u64) -> Result<u64> {
    println!("cargo:rerun-if-env-changed={}", var);
    match env::var(var) {
        Ok(s) => s
            .trim()
            .parse()
            .with_context(|| format!("{} must be an unsigned integer, got `{}`", var, s)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(e).with_context(|| format!("failed to read {}", var)),
    }
}

fn main() -> Result<()> {
    let max_str_len = env_u64(MAX_STR_LEN_VAR, 20)?;
    ensure!(
        (1..=255).contains(&max_str_len),
        "{} must be within 1..=255",
        MAX_STR_LEN_VAR
    );

    let drop_cnt_every = env_u64(DROP_CNT_EVERY_VAR, 50)?;
    ensure!(
        drop_cnt_every <= u32::MAX as u64,
        "{} must fit in a u32",
        DROP_CNT_EVERY_VAR
    );

    let out_dir = env::var("OUT_DIR").context("OUT_DIR not set")?;
    let to = Path::new(&out_dir).join("config_gen.rs");
    let config = format!(
        "/// Upper bound on string fields, in bytes. Longer strings are truncated.\n\
         pub const MAX_STR_LEN: usize = {};\n\
         \n\
         /// Events between two periodic drop-count publishes on a core.\n\
         /// 0 disables periodic publishing (change-triggered only).\n\
         pub const TRACE_DROP_CNT_EVERY: u32 = {};\n",
        max_str_len, drop_cnt_every
    );
    fs::write(&to, config).with_context(|| format!("failed to write {:?}", to))?;

    Ok(())
}
