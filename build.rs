//! Retrieves information about the version of the engine from Git and the build
//! environment. The generated constants are accessed at runtime through the
//! `build` module of the library.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
