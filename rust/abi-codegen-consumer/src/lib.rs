//! Test consumer crate that uses encoders generated by build.rs.

pub mod token {
    include!(concat!(env!("OUT_DIR"), "/token.rs"));
}

pub mod overloaded_fns {
    include!(concat!(env!("OUT_DIR"), "/overloaded_fns.rs"));
}

/// Encoders for `abi/Overloaded.abi.json`, keyed by method name.
pub fn overloaded() -> abi_codegen::FnTable {
    include!(concat!(env!("OUT_DIR"), "/overloaded.rs"))
}
