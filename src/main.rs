fn main() {
    rps_regret::cli::run();
}
