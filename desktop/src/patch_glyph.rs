//! Pre-build step for the FastEPD dependency: its text renderer skips glyphs
//! that are a single pixel wide, which drops characters like a lowercase `l`
//! in small fonts. Rewrites the guard in the vendored source. Never fails the
//! build.

use std::path::PathBuf;

use log::{info, warn};

const LIBRARY_DIR: &str = "FastEPD";
const TARGET_FILE: &str = "src/bb_ep_gfx.inl";
const UNPATCHED: &str = "if (char_width > 1) { // skip this if drawing a space";
const PATCHED: &str =
    "if (char_width > 0) { // draw all non-empty glyphs (e.g. lowercase l can be 1px wide)";

/// Variables of the surrounding build.
pub trait BuildEnvironment {
    fn subst(&self, name: &str) -> Option<String>;
}

/// Command-line values first, then the process environment.
struct ProcessEnvironment {
    libdeps_dir: Option<String>,
    pio_env: Option<String>,
}

impl BuildEnvironment for ProcessEnvironment {
    fn subst(&self, name: &str) -> Option<String> {
        let explicit = match name {
            "PROJECT_LIBDEPS_DIR" => self.libdeps_dir.clone(),
            "PIOENV" => self.pio_env.clone(),
            _ => None,
        };
        explicit.or_else(|| std::env::var(name).ok())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    AlreadyApplied,
    Skipped(String),
}

pub fn target_path(env: &impl BuildEnvironment) -> Option<PathBuf> {
    let libdeps = env.subst("PROJECT_LIBDEPS_DIR")?;
    let pio_env = env.subst("PIOENV")?;
    Some(
        PathBuf::from(libdeps)
            .join(pio_env)
            .join(LIBRARY_DIR)
            .join(TARGET_FILE),
    )
}

pub fn patch_glyph_width_guard(env: &impl BuildEnvironment) -> PatchOutcome {
    let Some(target) = target_path(env) else {
        return PatchOutcome::Skipped("PROJECT_LIBDEPS_DIR or PIOENV not set".into());
    };
    if !target.exists() {
        return PatchOutcome::Skipped(format!("{} not found", target.display()));
    }

    let source = match std::fs::read_to_string(&target) {
        Ok(source) => source,
        Err(err) => return PatchOutcome::Skipped(format!("cannot read {}: {err}", target.display())),
    };
    if source.contains(PATCHED) {
        return PatchOutcome::AlreadyApplied;
    }
    if !source.contains(UNPATCHED) {
        return PatchOutcome::Skipped("expected glyph-width guard not found".into());
    }

    match std::fs::write(&target, source.replacen(UNPATCHED, PATCHED, 1)) {
        Ok(()) => PatchOutcome::Applied,
        Err(err) => PatchOutcome::Skipped(format!("cannot write {}: {err}", target.display())),
    }
}

/// Patch FastEPD's glyph-width guard before it is compiled.
#[derive(argh::FromArgs)]
struct Args {
    /// library dependency directory, defaults to $PROJECT_LIBDEPS_DIR
    #[argh(option)]
    libdeps_dir: Option<String>,

    /// build environment name, defaults to $PIOENV
    #[argh(option)]
    pio_env: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let env = ProcessEnvironment {
        libdeps_dir: args.libdeps_dir,
        pio_env: args.pio_env,
    };

    match patch_glyph_width_guard(&env) {
        PatchOutcome::Applied => info!("[patch_fastepd] patched glyph-width guard in FastEPD"),
        PatchOutcome::AlreadyApplied => info!("[patch_fastepd] already applied"),
        PatchOutcome::Skipped(reason) => warn!("[patch_fastepd] skip: {reason}"),
    }
}
