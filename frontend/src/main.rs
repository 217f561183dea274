//! Entry point for the WASM application

pub fn main() {
    colsplit_frontend::run();
}
