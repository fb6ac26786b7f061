// Generates the Kotlin/Swift bindings for commonspot-mobile:
// cargo run -p uniffi-bindgen -- generate --library <path to libcommonspot_mobile> --language kotlin --out-dir <dir>
fn main() {
    uniffi::uniffi_bindgen_main()
}
