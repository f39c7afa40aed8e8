fn main() {
    // Host builds (tests, simulation) have no ESP-IDF toolchain to locate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
