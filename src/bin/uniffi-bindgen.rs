// Generates the Kotlin bindings for the Android host.
fn main() {
    uniffi::uniffi_bindgen_main()
}
