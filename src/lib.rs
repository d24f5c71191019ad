//! Xiangqi (Chinese chess) rules engine. For more information, see [README].
//!
//! [`rules`] validates moves and tracks the game state, [`Engine`] drives a
//! game session over a line-based text protocol.
//!
//! [README]: https://github.com/xiangqi-rs/xiangqi/blob/main/README.md

// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]

pub mod rules;

mod engine;
pub use engine::Engine;
use shadow_rs::shadow;

shadow!(build);

/// Version of the rules engine with the commit and the branch it was built
/// from, as shown in the startup banner.
fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints the engine version and the repository on startup.
pub fn print_engine_info() {
    println!("Xiangqi rules engine {}", engine_version());
    println!("<{}>", env!("CARGO_PKG_REPOSITORY"));
}

/// Prints the build type and whether the build is clean on startup.
pub fn print_binary_info() {
    println!("Release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
    println!();
}
