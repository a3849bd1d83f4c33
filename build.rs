fn main() {
    println!("cargo:rerun-if-env-changed=PANEL_CONFIG_JSON");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
