//! lib target


use env_logger::Builder;

#[macro_use]
extern crate lazy_static;


lazy_static! {
    static ref LOG: u64 = init_log();
}

// install a logger facility
fn init_log() -> u64 {
    Builder::from_default_env().init();
    println!("\n ************** initializing logger *****************\n");
    1
}

/// initialize logger once, from RUST_LOG
pub fn log_init() {
    lazy_static::initialize(&LOG);
}

pub mod errors;

pub mod graph;

pub mod embedding;

pub mod tools;

pub mod assign;

pub mod editcost;

pub mod pipeline;

pub mod io;

pub mod prelude;
