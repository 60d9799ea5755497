#![allow(dead_code)]

pub mod fixtures;

use cadastral_resolver::Coord;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx_eq(p: Option<Coord>, x: f64, y: f64) -> bool {
    p.is_some_and(|p| (p.x - x).abs() < 1e-6 && (p.y - y).abs() < 1e-6)
}
