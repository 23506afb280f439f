#[cfg(target_arch = "wasm32")]
pub fn main() {
    passkey_web::app::launch();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
